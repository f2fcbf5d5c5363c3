//! `stockplan init` command - Create a project in the current directory

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing project's config and data
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;

    let result = if args.force {
        Project::init_force(&cwd)
    } else {
        Project::init(&cwd)
    };

    match result {
        Ok(project) => {
            println!(
                "{} Initialized stockplan project in {}",
                style("✓").green(),
                project.dir().display()
            );
            println!("\nNext steps:");
            println!("  stockplan item add flour --category bread");
            println!("  stockplan set flour 2024-01-01 stock 20");
            println!("  stockplan show");
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} Project already exists at {} (use --force to reset it)",
                style("!").yellow(),
                path.display()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
