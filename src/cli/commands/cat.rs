//! `stockplan cat` command - Category management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{confirm, open_workbook, stdin_is_terminal};
use crate::cli::output::{print_rows, print_structured};
use crate::cli::GlobalOpts;
use crate::core::Outcome;
use crate::entities::category;

#[derive(Subcommand, Debug)]
pub enum CatCommands {
    /// List categories with their item counts
    List,

    /// Add a category
    Add(AddArgs),

    /// Remove a category and every item in it
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Category name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Category name
    pub name: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(serde::Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    items: usize,
    reserved: bool,
}

/// Run a category subcommand
pub fn run(cmd: CatCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatCommands::List => run_list(global),
        CatCommands::Add(args) => run_add(args, global),
        CatCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let (workbook, _) = open_workbook(global)?;
    let store = workbook.store();

    let rows: Vec<CategoryRow> = store
        .categories()
        .iter()
        .map(|name| CategoryRow {
            name,
            items: store.items_in(name).count(),
            reserved: category::is_reserved(name),
        })
        .collect();

    if print_structured(&rows, global.output)? {
        return Ok(());
    }

    let header = vec!["CATEGORY".to_string(), "ITEMS".to_string()];
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.name.to_string(), r.items.to_string()])
        .collect();
    print_rows(&header, &table, global.output);
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;

    match workbook.add_category(&args.name).into_diagnostic()? {
        Outcome::Applied => println!(
            "{} Added category {}",
            style("✓").green(),
            style(args.name.trim()).cyan()
        ),
        Outcome::Unchanged => println!(
            "{}",
            style(format!("Category '{}' already exists", args.name.trim())).dim()
        ),
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let (mut workbook, _) = open_workbook(global)?;
    let name = args.name.trim();

    let affected = if workbook.store().has_category(name) && !category::is_reserved(name) {
        workbook.store().items_in(name).count()
    } else {
        0
    };

    // Confirm the cascade when a human is at the keyboard
    if affected > 0 && !args.yes && stdin_is_terminal() {
        let prompt = format!(
            "Removing '{}' also deletes {} item(s). Proceed?",
            name, affected
        );
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    match workbook.remove_category(name).into_diagnostic()? {
        Outcome::Applied => {
            println!("{} Removed category {}", style("✓").green(), style(name).cyan());
            if affected > 0 {
                println!("  {} item(s) removed with it", affected);
            }
        }
        Outcome::Unchanged => println!(
            "{}",
            style(format!("No category named '{}'", name)).dim()
        ),
    }
    Ok(())
}
