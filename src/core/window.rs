//! Rolling date window used when rendering the grid

use chrono::{Duration, NaiveDate, Utc};

/// Days shown either side of the centre date
pub const DEFAULT_DAYS_RANGE: u32 = 15;

/// Largest range accepted from the command line or config
pub const MAX_DAYS_RANGE: u32 = 366;

/// Dates from `center - range` through `center + range`, inclusive
pub fn date_window(center: NaiveDate, range: u32) -> Vec<NaiveDate> {
    let range = i64::from(range);
    (-range..=range)
        .filter_map(|offset| center.checked_add_signed(Duration::days(offset)))
        .collect()
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
