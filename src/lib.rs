//! stockplan: per-item, per-day stock and order planning
//!
//! Tracks stock, order quantity, lead-time days and safety stock for each
//! item on each date, and suggests order quantities from the consumption
//! between two recorded dates.

pub mod cli;
pub mod core;
pub mod entities;
