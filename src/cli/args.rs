//! Top-level argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::cat::CatCommands;
use crate::cli::commands::item::ItemCommands;
use crate::cli::commands::{
    calc::CalcArgs, completions::CompletionsArgs, init::InitArgs, record::AdjustArgs,
    record::BulkDaysArgs, record::SetArgs, show::ShowArgs,
};

#[derive(Parser, Debug)]
#[command(name = "stockplan")]
#[command(version)]
#[command(about = "Plan stock levels and order quantities per item and per day")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Data file to use instead of the project's (skips project discovery)
    #[arg(long, global = true, env = "STOCKPLAN_DATA")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "auto")]
    pub output: OutputFormat,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .stockplan project in the current directory
    Init(InitArgs),

    /// Manage categories
    #[command(subcommand)]
    Cat(CatCommands),

    /// Manage items
    #[command(subcommand)]
    Item(ItemCommands),

    /// Set a field of an item's record (empty value clears it)
    Set(SetArgs),

    /// Add to or subtract from a field (an empty field counts as 0)
    Adjust(AdjustArgs),

    /// Compute a suggested order from consumption since the previous record
    Calc(CalcArgs),

    /// Set lead-time days on one date for every item
    BulkDays(BulkDaysArgs),

    /// Show the item/date grid around a date
    Show(ShowArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// Output format for commands that print data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table for humans
    #[default]
    Auto,
    /// Bordered table
    Table,
    /// Tab-separated values
    Tsv,
    /// JSON
    Json,
    /// YAML
    Yaml,
}
