//! Entity types - categories, items and their daily records

pub mod category;
pub mod item;
pub mod record;

pub use category::{DEFAULT_CATEGORIES, SHOW_ALL};
pub use item::Item;
pub use record::{Field, Record, DEFAULT_LEAD_DAYS, DEFAULT_SAFETY_STOCK};
