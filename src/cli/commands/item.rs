//! `stockplan item` command - Item management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{bail, IntoDiagnostic, Result};

use crate::cli::helpers::{open_workbook, stdin_is_terminal, truncate_str};
use crate::cli::output::{print_rows, print_structured};
use crate::cli::GlobalOpts;
use crate::core::Outcome;
use crate::entities::record::format_quantity;
use crate::entities::{Field, SHOW_ALL};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items, optionally limited to one category
    List(ListArgs),

    /// Add an item
    Add(AddArgs),

    /// Remove an item (every item with that name)
    Rm(RmArgs),

    /// Show every record of an item
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Category to list (default: all)
    #[arg(long, short = 'c', default_value = SHOW_ALL)]
    pub category: String,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item name
    pub name: String,

    /// Category to file the item under (prompted for when interactive)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Item name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item name
    pub name: String,
}

/// Run an item subcommand
pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(args) => run_list(args, global),
        ItemCommands::Add(args) => run_add(args, global),
        ItemCommands::Rm(args) => run_rm(args, global),
        ItemCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    workbook.select_view(&args.category).into_diagnostic()?;

    let items: Vec<_> = workbook.visible_items().collect();
    if print_structured(&items, global.output)? {
        return Ok(());
    }

    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    let header = vec![
        "NAME".to_string(),
        "CATEGORY".to_string(),
        "RECORDS".to_string(),
        "LAST DATE".to_string(),
    ];
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                truncate_str(&item.name, 30),
                item.category.clone(),
                item.records.len().to_string(),
                item.records
                    .keys()
                    .next_back()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    print_rows(&header, &rows, global.output);
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;

    let category = match args.category {
        Some(category) => category,
        None => {
            let choices: Vec<&str> = workbook.store().assignable_categories().collect();
            if choices.is_empty() {
                bail!("No categories exist yet. Add one with 'stockplan cat add <NAME>'.");
            }
            if !stdin_is_terminal() {
                bail!("--category is required when not running interactively");
            }
            let selected = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Category")
                .items(&choices)
                .default(0)
                .interact()
                .into_diagnostic()?;
            choices[selected].to_string()
        }
    };

    if workbook.add_item(&args.name, &category).into_diagnostic()? == Outcome::Applied {
        println!(
            "{} Added item {} to {}",
            style("✓").green(),
            style(args.name.trim()).cyan(),
            category.trim()
        );
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;

    match workbook.remove_item(&args.name).into_diagnostic()? {
        Outcome::Applied => println!(
            "{} Removed item {}",
            style("✓").green(),
            style(args.name.trim()).cyan()
        ),
        Outcome::Unchanged => println!(
            "{}",
            style(format!("No item named '{}'", args.name.trim())).dim()
        ),
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (workbook, _) = open_workbook(global)?;

    let Some(item) = workbook.store().item(&args.name) else {
        bail!("Item not found: {}", args.name);
    };

    if print_structured(item, global.output)? {
        return Ok(());
    }

    println!(
        "{} {}",
        style(&item.name).bold(),
        style(format!("({})", item.category)).dim()
    );
    if item.records.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    let mut header = vec!["DATE".to_string()];
    header.extend(Field::ALL.iter().map(|f| f.as_str().to_uppercase()));

    let rows: Vec<Vec<String>> = item
        .records
        .iter()
        .map(|(date, record)| {
            let mut row = vec![date.to_string()];
            row.extend(Field::ALL.iter().map(|f| format_quantity(record.get(*f))));
            row
        })
        .collect();
    print_rows(&header, &rows, global.output);
    Ok(())
}
