//! Project configuration - `.stockplan/config.yaml`

use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::project::Project;
use crate::core::window::{DEFAULT_DAYS_RANGE, MAX_DAYS_RANGE};

/// Config file name inside the project directory
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config.yaml: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("Invalid config.yaml: days_range {0} exceeds the maximum of {max}", max = MAX_DAYS_RANGE)]
    DaysRange(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data blob file, relative to `.stockplan/`
    pub data_file: String,

    /// Days shown either side of the centre date in `show`
    pub days_range: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: "data.json".to_string(),
            days_range: DEFAULT_DAYS_RANGE,
        }
    }
}

impl Config {
    /// Load the project's config; a missing file means all defaults
    pub fn load(project: &Project) -> Result<Self, ConfigError> {
        let path = project.config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(content)?;
        if config.days_range > MAX_DAYS_RANGE {
            return Err(ConfigError::DaysRange(config.days_range));
        }
        Ok(config)
    }

    /// Commented config written by `stockplan init`
    pub fn default_template() -> String {
        format!(
            "# stockplan configuration\n\
             \n\
             # Data file, relative to this directory\n\
             data_file: data.json\n\
             \n\
             # Days shown before and after the centre date in 'stockplan show'\n\
             days_range: {}\n",
            DEFAULT_DAYS_RANGE
        )
    }
}
