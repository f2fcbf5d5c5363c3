//! Item entity - a tracked product with its date-indexed records

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::record::Record;

/// A tracked product
///
/// Records are keyed by calendar date. The map is ordered, so iteration is
/// chronological and "the previous record" is a range query, not a sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, unique across the workbook
    pub name: String,

    /// Category the item is filed under
    pub category: String,

    /// Sparse per-day records; a missing date means "nothing entered"
    #[serde(default)]
    pub records: BTreeMap<NaiveDate, Record>,
}

impl Item {
    /// Create an item with no records
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            records: BTreeMap::new(),
        }
    }

    /// Record stored for `date`, if any
    pub fn record(&self, date: NaiveDate) -> Option<&Record> {
        self.records.get(&date)
    }

    /// Record for `date`, inserting the default record first if absent
    pub fn record_or_default(&mut self, date: NaiveDate) -> &mut Record {
        self.records.entry(date).or_default()
    }

    /// The latest record strictly before `date`
    ///
    /// This is whatever date happens to be present, not necessarily the
    /// calendar day before.
    pub fn previous_record(&self, date: NaiveDate) -> Option<(NaiveDate, &Record)> {
        self.records
            .range(..date)
            .next_back()
            .map(|(d, r)| (*d, r))
    }

    /// Earliest recorded date
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.keys().next().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_item_creation() {
        let item = Item::new("flour", "bread");
        assert_eq!(item.name, "flour");
        assert_eq!(item.category, "bread");
        assert!(item.records.is_empty());
        assert_eq!(item.first_date(), None);
    }

    #[test]
    fn test_record_or_default_materializes_defaults() {
        let mut item = Item::new("flour", "bread");
        assert!(item.record(date("2024-01-01")).is_none());

        let record = item.record_or_default(date("2024-01-01"));
        assert_eq!(*record, Record::default());
        assert!(item.record(date("2024-01-01")).is_some());
    }

    #[test]
    fn test_previous_record_skips_gaps() {
        let mut item = Item::new("flour", "bread");
        item.record_or_default(date("2024-01-10"));
        item.record_or_default(date("2024-01-03"));
        item.record_or_default(date("2024-02-01"));

        let (prev, _) = item.previous_record(date("2024-02-01")).unwrap();
        assert_eq!(prev, date("2024-01-10"));

        let (prev, _) = item.previous_record(date("2024-01-10")).unwrap();
        assert_eq!(prev, date("2024-01-03"));

        assert!(item.previous_record(date("2024-01-03")).is_none());
    }

    #[test]
    fn test_records_serialize_as_iso_keys() {
        let mut item = Item::new("milk", "milk");
        item.record_or_default(date("2024-03-05")).stock = Some(4.0);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["records"]["2024-03-05"]["stock"], 4);
    }

    #[test]
    fn test_rejects_invalid_date_key() {
        let json = r#"{"name": "x", "category": "bread", "records": {"2024-02-30": {}}}"#;
        let result: Result<Item, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_records_key_is_empty() {
        let item: Item = serde_json::from_str(r#"{"name": "x", "category": "bread"}"#).unwrap();
        assert!(item.records.is_empty());
    }
}
