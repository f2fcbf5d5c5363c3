//! CLI command implementations

pub mod calc;
pub mod cat;
pub mod completions;
pub mod init;
pub mod item;
pub mod record;
pub mod show;
