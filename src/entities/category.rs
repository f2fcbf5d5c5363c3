//! Category names and the reserved "show all" view

/// Pseudo-category that selects every item; never assigned, never removed
pub const SHOW_ALL: &str = "show all";

/// Categories a fresh workbook starts with
pub const DEFAULT_CATEGORIES: &[&str] = &[SHOW_ALL, "bread", "milk", "packaging"];

/// Whether `name` is the reserved "show all" category
pub fn is_reserved(name: &str) -> bool {
    name == SHOW_ALL
}

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
