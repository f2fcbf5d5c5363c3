//! Workbook - the store plus its blob and the selected view
//!
//! Every mutation that reports [`Outcome::Applied`] (or otherwise changes
//! state) writes the whole store back before returning.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::error::{PersistError, StoreError};
use crate::core::estimator::Estimate;
use crate::core::persist::BlobStore;
use crate::core::store::{Outcome, Store};
use crate::entities::category::SHOW_ALL;
use crate::entities::{Field, Item};

pub struct Workbook<B: BlobStore> {
    store: Store,
    blob: B,
    view: String,
}

impl<B: BlobStore> Workbook<B> {
    /// Load the store from `blob`, falling back to defaults if it is empty
    pub fn open(blob: B) -> Result<Self, StoreError> {
        let store = match blob.load()? {
            Some(content) => {
                Store::from_json(&content).map_err(|e| PersistError::Corrupt(e.to_string()))?
            }
            None => Store::default(),
        };
        debug!(
            categories = store.categories().len(),
            items = store.items().len(),
            "opened workbook"
        );
        Ok(Self {
            store,
            blob,
            view: SHOW_ALL.to_string(),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// Category currently used to filter items
    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn select_view(&mut self, category: &str) -> Result<(), StoreError> {
        if !self.store.has_category(category) {
            return Err(StoreError::invalid(format!(
                "category '{}' does not exist",
                category
            )));
        }
        self.view = category.to_string();
        Ok(())
    }

    /// Items visible in the selected view
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.store.items_in(&self.view)
    }

    /// Write the full store to the blob
    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = self.store.to_json().map_err(PersistError::from)?;
        self.blob.save(&json)?;
        Ok(())
    }

    fn commit(&mut self, outcome: Outcome) -> Result<Outcome, StoreError> {
        if outcome.is_applied() {
            self.save()?;
        }
        Ok(outcome)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let outcome = self.store.add_category(name)?;
        self.commit(outcome)
    }

    /// Remove a category and its items; resets the view if it was selected
    pub fn remove_category(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let outcome = self.store.remove_category(name)?;
        if outcome.is_applied() && self.view == name.trim() {
            self.view = SHOW_ALL.to_string();
        }
        self.commit(outcome)
    }

    pub fn add_item(&mut self, name: &str, category: &str) -> Result<Outcome, StoreError> {
        let outcome = self.store.add_item(name, category)?;
        self.commit(outcome)
    }

    pub fn remove_item(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let outcome = self.store.remove_item(name)?;
        self.commit(outcome)
    }

    pub fn set_field(
        &mut self,
        item: &str,
        date: NaiveDate,
        field: Field,
        raw: &str,
    ) -> Result<Option<f64>, StoreError> {
        let value = self.store.set_field(item, date, field, raw)?;
        self.save()?;
        Ok(value)
    }

    pub fn adjust_field(
        &mut self,
        item: &str,
        date: NaiveDate,
        field: Field,
        delta: f64,
    ) -> Result<f64, StoreError> {
        let value = self.store.adjust_field(item, date, field, delta)?;
        self.save()?;
        Ok(value)
    }

    pub fn apply_bulk_days(&mut self, date: NaiveDate, days: f64) -> Result<usize, StoreError> {
        let touched = self.store.apply_bulk_days(date, days)?;
        self.save()?;
        Ok(touched)
    }

    pub fn calculate_order(&mut self, item: &str, date: NaiveDate) -> Result<Estimate, StoreError> {
        match self.store.calculate_order(item, date) {
            Ok(estimate) => {
                debug!(item, %date, order = estimate.order, "computed order");
                self.save()?;
                Ok(estimate)
            }
            Err(e) => {
                debug!(item, %date, reason = %e, "order not computed");
                Err(e)
            }
        }
    }
}
