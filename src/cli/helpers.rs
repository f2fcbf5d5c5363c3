//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use std::io::{self, IsTerminal, Write};

use miette::{miette, IntoDiagnostic, Result};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::core::{Config, FileBlobStore, Project, Workbook};

/// Open the workbook selected by `--data` or by project discovery
///
/// Returns the project config alongside; with `--data` there is no
/// project, so the defaults apply.
pub fn open_workbook(global: &GlobalOpts) -> Result<(Workbook<FileBlobStore>, Config)> {
    let (path, config) = match &global.data {
        Some(path) => (path.clone(), Config::default()),
        None => {
            let project = Project::discover().map_err(|e| miette!("{}", e))?;
            let config = Config::load(&project).into_diagnostic()?;
            (project.data_path(&config), config)
        }
    };
    debug!(path = %path.display(), "opening data file");

    let workbook = Workbook::open(FileBlobStore::new(path)).into_diagnostic()?;
    Ok((workbook, config))
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Whether stdin is attached to a terminal (interactive use)
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Ask a yes/no question on stdin; anything but "y" means no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().into_diagnostic()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).into_diagnostic()?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
