//! `stockplan show` command - Item/date grid around a centre date

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{open_workbook, truncate_str};
use crate::cli::output::{print_rows, print_structured};
use crate::cli::GlobalOpts;
use crate::core::window::MAX_DAYS_RANGE;
use crate::core::{date_window, today};
use crate::entities::record::format_quantity;
use crate::entities::{Field, Item, Record, SHOW_ALL};

/// Which quantity each grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum CellField {
    /// stock/order/days/safety
    #[default]
    All,
    Stock,
    Order,
    Days,
    Safety,
}

impl CellField {
    fn field(self) -> Option<Field> {
        match self {
            CellField::All => None,
            CellField::Stock => Some(Field::Stock),
            CellField::Order => Some(Field::Order),
            CellField::Days => Some(Field::Days),
            CellField::Safety => Some(Field::Safety),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Category to show (default: all)
    #[arg(long, short = 'c', default_value = SHOW_ALL)]
    pub category: String,

    /// Centre date of the window (default: today, UTC)
    #[arg(long, short = 'd')]
    pub date: Option<NaiveDate>,

    /// Days shown before and after the centre date (default: from config)
    #[arg(
        long,
        short = 'r',
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DAYS_RANGE))
    )]
    pub range: Option<u32>,

    /// Quantity shown in each cell
    #[arg(long, short = 'f', default_value = "all")]
    pub field: CellField,
}

#[derive(Serialize)]
struct GridRow<'a> {
    name: &'a str,
    category: &'a str,
    records: BTreeMap<NaiveDate, &'a Record>,
}

#[derive(Serialize)]
struct Grid<'a> {
    view: &'a str,
    dates: &'a [NaiveDate],
    items: Vec<GridRow<'a>>,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, config) = open_workbook(global)?;
    workbook.select_view(&args.category).into_diagnostic()?;

    let center = args.date.unwrap_or_else(today);
    let dates = date_window(center, args.range.unwrap_or(config.days_range));
    let items: Vec<&Item> = workbook.visible_items().collect();

    let grid = Grid {
        view: workbook.view(),
        dates: &dates,
        items: items
            .iter()
            .map(|item| GridRow {
                name: &item.name,
                category: &item.category,
                records: dates
                    .iter()
                    .filter_map(|d| item.record(*d).map(|r| (*d, r)))
                    .collect(),
            })
            .collect(),
    };
    if print_structured(&grid, global.output)? {
        return Ok(());
    }

    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    let mut header = vec!["ITEM".to_string()];
    header.extend(dates.iter().map(|d| d.format("%m-%d").to_string()));

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut row = vec![truncate_str(&item.name, 20)];
            row.extend(
                dates
                    .iter()
                    .map(|d| item.record(*d).map(|r| cell(r, args.field)).unwrap_or_default()),
            );
            row
        })
        .collect();
    print_rows(&header, &rows, global.output);
    Ok(())
}

/// Render one record; empty fields show as "-" in the combined view
fn cell(record: &Record, field: CellField) -> String {
    match field.field() {
        Some(f) => format_quantity(record.get(f)),
        None => Field::ALL
            .iter()
            .map(|f| match record.get(*f) {
                Some(v) => format_quantity(Some(v)),
                None => "-".to_string(),
            })
            .collect::<Vec<_>>()
            .join("/"),
    }
}
