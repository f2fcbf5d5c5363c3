//! Record store - categories, items and their daily records
//!
//! The store is the persisted document itself: serializing it produces the
//! blob, deserializing a blob produces a store. It knows nothing about where
//! the blob lives; see [`crate::core::workbook`] for write-through.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::core::error::StoreError;
use crate::core::estimator::{self, Estimate};
use crate::entities::category::{self, SHOW_ALL};
use crate::entities::record::parse_quantity;
use crate::entities::{Field, Item, Record};

/// Result of a mutation that may legitimately change nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Categories and items, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(
        default = "category::default_categories",
        deserialize_with = "categories_or_default"
    )]
    categories: Vec<String>,

    #[serde(default, deserialize_with = "items_or_default")]
    items: Vec<Item>,
}

// An explicit `null` reads the same as a missing key
fn categories_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_else(category::default_categories))
}

fn items_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Item>, D::Error> {
    Ok(Option::<Vec<Item>>::deserialize(d)?.unwrap_or_default())
}

impl Default for Store {
    fn default() -> Self {
        Self {
            categories: category::default_categories(),
            items: Vec::new(),
        }
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StoreError::invalid(format!("{} must not be empty", what)))
    } else {
        Ok(trimmed)
    }
}

impl Store {
    /// Parse a persisted blob
    ///
    /// A blob whose category list lost the reserved category gets it back
    /// at the front.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        let mut store: Store = serde_json::from_str(blob)?;
        if !store.categories.iter().any(|c| category::is_reserved(c)) {
            store.categories.insert(0, SHOW_ALL.to_string());
        }
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    /// All categories, the reserved one included
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Categories an item can be filed under
    pub fn assignable_categories(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|c| !category::is_reserved(c))
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let name = required(name, "category name")?;
        if self.has_category(name) {
            return Ok(Outcome::Unchanged);
        }
        self.categories.push(name.to_string());
        Ok(Outcome::Applied)
    }

    /// Remove a category and every item filed under it
    pub fn remove_category(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let name = required(name, "category name")?;
        if category::is_reserved(name) {
            return Err(StoreError::invalid(format!(
                "'{}' is reserved and cannot be removed",
                name
            )));
        }
        if !self.has_category(name) {
            return Ok(Outcome::Unchanged);
        }

        self.categories.retain(|c| c != name);
        let before = self.items.len();
        self.items.retain(|i| i.category != name);
        info!(
            category = name,
            items_removed = before - self.items.len(),
            "removed category"
        );
        Ok(Outcome::Applied)
    }

    // ---------------------------------------------------------------------
    // Items
    // ---------------------------------------------------------------------

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items visible in a view; the reserved category shows everything
    pub fn items_in<'a>(&'a self, view: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |i| category::is_reserved(view) || i.category == view)
    }

    /// First item with this name, ignoring surrounding whitespace
    pub fn item(&self, name: &str) -> Option<&Item> {
        let name = name.trim();
        self.items.iter().find(|i| i.name == name)
    }

    fn item_mut(&mut self, name: &str) -> Result<&mut Item, StoreError> {
        let name = name.trim();
        self.items
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| StoreError::UnknownItem(name.to_string()))
    }

    pub fn add_item(&mut self, name: &str, category: &str) -> Result<Outcome, StoreError> {
        let name = required(name, "item name")?;
        let category = required(category, "category")?;

        if category::is_reserved(category) {
            return Err(StoreError::invalid(format!(
                "items cannot be filed under '{}'",
                category
            )));
        }
        if !self.has_category(category) {
            return Err(StoreError::invalid(format!(
                "category '{}' does not exist",
                category
            )));
        }
        if self.item(name).is_some() {
            return Err(StoreError::invalid(format!(
                "an item named '{}' already exists",
                name
            )));
        }

        self.items.push(Item::new(name, category));
        Ok(Outcome::Applied)
    }

    /// Remove every item with this name
    pub fn remove_item(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let name = required(name, "item name")?;
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        if self.items.len() == before {
            Ok(Outcome::Unchanged)
        } else {
            Ok(Outcome::Applied)
        }
    }

    // ---------------------------------------------------------------------
    // Records
    // ---------------------------------------------------------------------

    pub fn record(&self, item: &str, date: NaiveDate) -> Option<&Record> {
        self.item(item).and_then(|i| i.record(date))
    }

    /// Record for (item, date), created with defaults if absent
    pub fn get_or_create_record(
        &mut self,
        item: &str,
        date: NaiveDate,
    ) -> Result<&mut Record, StoreError> {
        Ok(self.item_mut(item)?.record_or_default(date))
    }

    /// Store raw user text in a field
    ///
    /// Blank text stores the empty marker rather than zero.
    pub fn set_field(
        &mut self,
        item: &str,
        date: NaiveDate,
        field: Field,
        raw: &str,
    ) -> Result<Option<f64>, StoreError> {
        let value = parse_quantity(raw).map_err(|e| StoreError::invalid(format!("{}: {}", field, e)))?;
        self.get_or_create_record(item, date)?.set(field, value);
        Ok(value)
    }

    /// Add `delta` to a field, treating an empty field as zero
    pub fn adjust_field(
        &mut self,
        item: &str,
        date: NaiveDate,
        field: Field,
        delta: f64,
    ) -> Result<f64, StoreError> {
        if !delta.is_finite() {
            return Err(StoreError::invalid(format!("{}: delta must be finite", field)));
        }
        let target = self.item_mut(item)?;
        let current = target
            .record(date)
            .map_or(Record::default().get(field), |r| r.get(field))
            .unwrap_or(0.0);
        if !(current + delta).is_finite() {
            return Err(StoreError::invalid(format!(
                "{}: adjusting {} by {} leaves the finite range",
                field, current, delta
            )));
        }
        Ok(target.record_or_default(date).adjust(field, delta))
    }

    /// Set lead-time days at `date` for every item
    ///
    /// Items without a record on that date get a default record first.
    /// Returns the number of items touched.
    pub fn apply_bulk_days(&mut self, date: NaiveDate, days: f64) -> Result<usize, StoreError> {
        if days == 0.0 || !days.is_finite() {
            return Err(StoreError::invalid("bulk days must be a non-zero number"));
        }
        for item in &mut self.items {
            item.record_or_default(date).days = Some(days);
        }
        Ok(self.items.len())
    }

    /// Compute and store a suggested order for (item, date)
    ///
    /// Leaves the store untouched when the estimate is not computable.
    pub fn calculate_order(&mut self, item: &str, date: NaiveDate) -> Result<Estimate, StoreError> {
        let target = self.item_mut(item)?;
        let estimate = estimator::estimate_for(target, date)?;
        target.record_or_default(date).order = Some(estimate.order);
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::NotComputable;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn store_with_items() -> Store {
        let mut store = Store::default();
        store.add_item("flour", "bread").unwrap();
        store.add_item("rye", "bread").unwrap();
        store.add_item("whole milk", "milk").unwrap();
        store
    }

    #[test]
    fn test_default_store() {
        let store = Store::default();
        assert_eq!(store.categories(), &["show all", "bread", "milk", "packaging"]);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_add_category() {
        let mut store = Store::default();
        assert_eq!(store.add_category("eggs").unwrap(), Outcome::Applied);
        assert_eq!(store.add_category("  eggs ").unwrap(), Outcome::Unchanged);
        assert!(matches!(
            store.add_category("  "),
            Err(StoreError::InvalidInput(_))
        ));
        assert_eq!(store.categories().last().unwrap(), "eggs");
    }

    #[test]
    fn test_remove_category_cascades() {
        let mut store = store_with_items();
        assert_eq!(store.remove_category("bread").unwrap(), Outcome::Applied);

        assert!(!store.has_category("bread"));
        let names: Vec<_> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["whole milk"]);
    }

    #[test]
    fn test_remove_reserved_category_changes_nothing() {
        let mut store = store_with_items();
        let before = store.clone();
        assert!(matches!(
            store.remove_category(SHOW_ALL),
            Err(StoreError::InvalidInput(_))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_absent_category() {
        let mut store = store_with_items();
        assert_eq!(store.remove_category("eggs").unwrap(), Outcome::Unchanged);
        assert_eq!(store.items().len(), 3);
    }

    #[test]
    fn test_add_item_validation() {
        let mut store = Store::default();
        assert!(store.add_item("", "bread").is_err());
        assert!(store.add_item("flour", "").is_err());
        assert!(store.add_item("flour", "eggs").is_err());
        assert!(store.add_item("flour", SHOW_ALL).is_err());

        store.add_item("flour", "bread").unwrap();
        assert!(matches!(
            store.add_item("flour", "milk"),
            Err(StoreError::InvalidInput(_))
        ));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_remove_item_removes_every_match() {
        // Legacy blobs may carry duplicate names
        let blob = r#"{"categories": ["show all", "bread"], "items": [
            {"name": "flour", "category": "bread", "records": {}},
            {"name": "flour", "category": "bread", "records": {}},
            {"name": "rye", "category": "bread", "records": {}}
        ]}"#;
        let mut store = Store::from_json(blob).unwrap();
        assert_eq!(store.remove_item("flour").unwrap(), Outcome::Applied);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.remove_item("flour").unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_items_in_view() {
        let store = store_with_items();
        assert_eq!(store.items_in(SHOW_ALL).count(), 3);
        assert_eq!(store.items_in("bread").count(), 2);
        assert_eq!(store.items_in("packaging").count(), 0);
    }

    #[test]
    fn test_get_or_create_record() {
        let mut store = store_with_items();
        assert!(store.record("flour", date("2024-01-01")).is_none());

        let record = store.get_or_create_record("flour", date("2024-01-01")).unwrap();
        assert_eq!(*record, Record::default());
        assert!(store.record("flour", date("2024-01-01")).is_some());

        assert!(matches!(
            store.get_or_create_record("spelt", date("2024-01-01")),
            Err(StoreError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_set_field() {
        let mut store = store_with_items();
        let d = date("2024-01-01");

        assert_eq!(store.set_field("flour", d, Field::Stock, "7").unwrap(), Some(7.0));
        assert_eq!(store.record("flour", d).unwrap().stock, Some(7.0));

        assert_eq!(store.set_field("flour", d, Field::Stock, "").unwrap(), None);
        assert_eq!(store.record("flour", d).unwrap().stock, None);

        assert!(store.set_field("flour", d, Field::Stock, "seven").is_err());
        assert_eq!(store.record("flour", d).unwrap().stock, None);
    }

    #[test]
    fn test_set_field_creates_defaults() {
        let mut store = store_with_items();
        let d = date("2024-01-01");
        store.set_field("flour", d, Field::Order, "12").unwrap();

        let record = store.record("flour", d).unwrap();
        assert_eq!(record.order, Some(12.0));
        assert_eq!(record.stock, None);
        assert_eq!(record.days, Some(3.0));
        assert_eq!(record.safety, Some(0.0));
    }

    #[test]
    fn test_adjust_field() {
        let mut store = store_with_items();
        let d = date("2024-01-01");

        assert_eq!(store.adjust_field("flour", d, Field::Stock, -1.0).unwrap(), -1.0);
        assert_eq!(store.adjust_field("flour", d, Field::Stock, 3.0).unwrap(), 2.0);
        assert_eq!(store.adjust_field("flour", d, Field::Days, 1.0).unwrap(), 4.0);
        assert!(store.adjust_field("flour", d, Field::Days, f64::NAN).is_err());
    }

    #[test]
    fn test_adjust_field_rejects_overflow() {
        let mut store = store_with_items();
        let d = date("2024-01-01");
        store.adjust_field("flour", d, Field::Stock, 1e308).unwrap();
        let before = store.clone();

        assert!(matches!(
            store.adjust_field("flour", d, Field::Stock, 1e308),
            Err(StoreError::InvalidInput(_))
        ));
        assert_eq!(store, before);

        assert!(store
            .adjust_field("whole milk", d, Field::Stock, f64::MAX)
            .is_ok());
        let before = store.clone();
        assert!(store
            .adjust_field("whole milk", d, Field::Stock, f64::MAX)
            .is_err());
        assert_eq!(store, before);

        let restored = Store::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(store, restored);
    }

    #[test]
    fn test_item_lookup_ignores_surrounding_whitespace() {
        let mut store = Store::default();
        store.add_item(" flour ", "bread").unwrap();
        assert_eq!(store.items()[0].name, "flour");

        let d = date("2024-01-01");
        store.set_field(" flour ", d, Field::Stock, "4").unwrap();
        store.adjust_field("flour ", d, Field::Stock, 1.0).unwrap();
        assert_eq!(store.record(" flour", d).unwrap().stock, Some(5.0));
        assert!(store.item("  flour").is_some());
    }

    #[test]
    fn test_adjust_field_is_additive() {
        let d = date("2024-01-01");
        let mut stepwise = store_with_items();
        stepwise.adjust_field("rye", d, Field::Order, 5.0).unwrap();
        stepwise.adjust_field("rye", d, Field::Order, -2.0).unwrap();

        let mut once = store_with_items();
        once.adjust_field("rye", d, Field::Order, 3.0).unwrap();

        assert_eq!(stepwise, once);
    }

    #[test]
    fn test_apply_bulk_days() {
        let mut store = store_with_items();
        let d = date("2024-01-05");
        store.set_field("flour", d, Field::Stock, "9").unwrap();

        assert_eq!(store.apply_bulk_days(d, 5.0).unwrap(), 3);
        for item in store.items() {
            assert_eq!(item.record(d).unwrap().days, Some(5.0));
        }
        assert_eq!(store.record("flour", d).unwrap().stock, Some(9.0));
        assert_eq!(store.record("rye", d).unwrap().safety, Some(0.0));

        assert!(store.apply_bulk_days(d, 0.0).is_err());
    }

    #[test]
    fn test_calculate_order() {
        let mut store = store_with_items();
        let d1 = date("2024-01-01");
        let d2 = date("2024-01-02");
        store.set_field("flour", d1, Field::Stock, "20").unwrap();
        store.set_field("flour", d1, Field::Order, "50").unwrap();
        store.set_field("flour", d1, Field::Safety, "5").unwrap();
        store.set_field("flour", d2, Field::Stock, "10").unwrap();
        store.set_field("flour", d2, Field::Safety, "5").unwrap();

        let estimate = store.calculate_order("flour", d2).unwrap();
        assert_eq!(estimate.order, 125.0);
        assert_eq!(store.record("flour", d2).unwrap().order, Some(125.0));

        // Rerunning with unchanged inputs gives the same answer
        let again = store.calculate_order("flour", d2).unwrap();
        assert_eq!(again.order, 125.0);
    }

    #[test]
    fn test_calculate_order_on_earliest_date_mutates_nothing() {
        let mut store = store_with_items();
        let d1 = date("2024-01-01");
        store.set_field("flour", d1, Field::Stock, "20").unwrap();
        store.set_field("flour", d1, Field::Order, "50").unwrap();
        let before = store.clone();

        let result = store.calculate_order("flour", d1);
        assert!(matches!(
            result,
            Err(StoreError::NotComputable(NotComputable::NoPreviousRecord(_)))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_calculate_order_without_record_creates_nothing() {
        let mut store = store_with_items();
        let before = store.clone();
        assert!(store.calculate_order("flour", date("2024-01-01")).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut store = store_with_items();
        store.add_category("eggs").unwrap();
        store.set_field("flour", date("2024-01-01"), Field::Stock, "20").unwrap();
        store.set_field("flour", date("2024-01-01"), Field::Order, "").unwrap();
        store.adjust_field("rye", date("2023-12-31"), Field::Safety, 2.5).unwrap();

        let blob = store.to_json().unwrap();
        let restored = Store::from_json(&blob).unwrap();
        assert_eq!(store, restored);
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let store = Store::from_json("{}").unwrap();
        assert_eq!(store, Store::default());

        let store = Store::from_json(r#"{"categories": ["bread"]}"#).unwrap();
        assert_eq!(store.categories(), &["show all", "bread"]);
    }

    #[test]
    fn test_from_json_null_keys_use_defaults() {
        let store = Store::from_json(r#"{"categories": null, "items": null}"#).unwrap();
        assert_eq!(store, Store::default());

        let store = Store::from_json(
            r#"{"categories": null, "items": [{"name": "flour", "category": "bread", "records": {}}]}"#,
        )
        .unwrap();
        assert_eq!(store.categories(), Store::default().categories());
        assert_eq!(store.items().len(), 1);
    }
}
