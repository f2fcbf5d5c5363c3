//! `stockplan calc` command - Suggest an order quantity

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_workbook;
use crate::cli::output::print_structured;
use crate::cli::GlobalOpts;
use crate::entities::record::format_quantity;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Item name
    pub item: String,

    /// Date whose order should be computed (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Show the intermediate values
    #[arg(long, short = 'e')]
    pub explain: bool,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    let estimate = workbook
        .calculate_order(&args.item, args.date)
        .into_diagnostic()?;

    if print_structured(&estimate, global.output)? {
        return Ok(());
    }

    println!(
        "{} {} {} order = {}",
        style("✓").green(),
        style(&args.item).cyan(),
        args.date,
        style(format_quantity(Some(estimate.order))).bold()
    );

    if args.explain {
        println!("  previous record: {}", estimate.previous);
        println!("  consumed:        {}", format_quantity(Some(estimate.consumed)));
        println!("  elapsed days:    {}", format_quantity(Some(estimate.elapsed_days)));
        println!("  daily rate:      {:.2}", estimate.daily_rate);
        println!("  needed:          {:.2}", estimate.needed);
    }
    Ok(())
}
