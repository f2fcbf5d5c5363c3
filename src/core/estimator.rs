//! Order estimator - suggest an order quantity from recent consumption
//!
//! Consumption is measured between the target record and the latest record
//! before it: whatever was ordered back then, minus what is on hand now,
//! spread over the days in between. The suggestion covers the target
//! record's lead time plus its safety stock.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::error::NotComputable;
use crate::entities::{Item, Record};

/// A computed order suggestion with its intermediate values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Date of the record consumption was measured from
    pub previous: NaiveDate,
    /// Previous order minus current stock; negative when stock grew
    pub consumed: f64,
    pub elapsed_days: f64,
    pub daily_rate: f64,
    /// Unrounded need: daily rate over the lead time plus safety stock
    pub needed: f64,
    /// Suggested order, rounded and never negative
    pub order: f64,
}

/// Estimate from two records of the same item
///
/// `previous` is expected to be the latest record before `date`; this is
/// not checked, so an inverted pair yields a negative rate (and an order of
/// zero after flooring).
pub fn estimate(
    previous_date: NaiveDate,
    previous: &Record,
    date: NaiveDate,
    current: &Record,
) -> Result<Estimate, NotComputable> {
    let ordered = previous
        .order
        .ok_or(NotComputable::MissingPreviousOrder(previous_date))?;
    let stock = current.stock.ok_or(NotComputable::MissingStock(date))?;

    let elapsed_days = (date - previous_date).num_days() as f64;
    if elapsed_days == 0.0 {
        return Err(NotComputable::ZeroElapsed);
    }

    let consumed = ordered - stock;
    let daily_rate = consumed / elapsed_days;
    let needed = daily_rate * current.days.unwrap_or(0.0) + current.safety.unwrap_or(0.0);
    if !needed.is_finite() {
        return Err(NotComputable::NonFinite);
    }

    Ok(Estimate {
        previous: previous_date,
        consumed,
        elapsed_days,
        daily_rate,
        needed,
        // f64::round breaks ties away from zero
        order: needed.round().max(0.0),
    })
}

/// Estimate for an item's record at `date`
pub fn estimate_for(item: &Item, date: NaiveDate) -> Result<Estimate, NotComputable> {
    let current = item.record(date).ok_or(NotComputable::NoRecord(date))?;
    let (previous_date, previous) = item
        .previous_record(date)
        .ok_or(NotComputable::NoPreviousRecord(date))?;

    estimate(previous_date, previous, date, current)
}
