//! `stockplan set`, `adjust` and `bulk-days` - Record editing

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_workbook;
use crate::cli::GlobalOpts;
use crate::entities::record::format_quantity;
use crate::entities::Field;

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Item name
    pub item: String,

    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Field to set (stock, order, days, safety)
    pub field: Field,

    /// New value; an empty string clears the field
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct AdjustArgs {
    /// Item name
    pub item: String,

    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Field to adjust (stock, order, days, safety)
    pub field: Field,

    /// Amount to add; negative to subtract
    #[arg(allow_negative_numbers = true)]
    pub delta: f64,
}

#[derive(clap::Args, Debug)]
pub struct BulkDaysArgs {
    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Lead-time days to set for every item
    #[arg(allow_negative_numbers = true)]
    pub days: f64,
}

pub fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    let value = workbook
        .set_field(&args.item, args.date, args.field, &args.value)
        .into_diagnostic()?;

    let shown = match value {
        Some(_) => format_quantity(value),
        None => style("(empty)").dim().to_string(),
    };
    println!(
        "{} {} {} {} = {}",
        style("✓").green(),
        style(&args.item).cyan(),
        args.date,
        args.field,
        shown
    );
    Ok(())
}

pub fn run_adjust(args: AdjustArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    let value = workbook
        .adjust_field(&args.item, args.date, args.field, args.delta)
        .into_diagnostic()?;

    println!(
        "{} {} {} {} = {}",
        style("✓").green(),
        style(&args.item).cyan(),
        args.date,
        args.field,
        format_quantity(Some(value))
    );
    Ok(())
}

pub fn run_bulk_days(args: BulkDaysArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    let touched = workbook
        .apply_bulk_days(args.date, args.days)
        .into_diagnostic()?;

    println!(
        "{} Set days = {} on {} for {} item(s)",
        style("✓").green(),
        format_quantity(Some(args.days)),
        args.date,
        touched
    );
    Ok(())
}
