use clap::Parser;
use miette::Result;
use stockplan::cli::{Cli, Commands};
use stockplan::cli::commands::{calc, cat, completions, init, item, record, show};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable
    let default_filter = if cli.global.verbose {
        "stockplan=debug"
    } else {
        "stockplan=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("STOCKPLAN_LOG").unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let global = cli.global;
    match cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Cat(cmd) => cat::run(cmd, &global),
        Commands::Item(cmd) => item::run(cmd, &global),
        Commands::Set(args) => record::run_set(args, &global),
        Commands::Adjust(args) => record::run_adjust(args, &global),
        Commands::Calc(args) => calc::run(args, &global),
        Commands::BulkDays(args) => record::run_bulk_days(args, &global),
        Commands::Show(args) => show::run(args, &global),
        Commands::Completions(args) => completions::run(args),
    }
}
