//! Project discovery - locate the `.stockplan` directory

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::{Config, CONFIG_FILE};
use crate::core::store::Store;

/// Directory holding config and data, relative to the project root
pub const PROJECT_DIR: &str = ".stockplan";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a stockplan project (or any parent): {0}\nRun 'stockplan init' to create one, or pass --data <FILE>")]
    NotFound(PathBuf),

    #[error("stockplan project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode initial data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A directory tree rooted at the folder containing `.stockplan/`
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Walk up from the current directory to find a project
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Walk up from `start` to find a project
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        start
            .ancestors()
            .find(|dir| dir.join(PROJECT_DIR).is_dir())
            .map(|root| Self {
                root: root.to_path_buf(),
            })
            .ok_or_else(|| ProjectError::NotFound(start.to_path_buf()))
    }

    /// Create a project at `root` with the default config and data
    pub fn init(root: &Path) -> Result<Self, ProjectError> {
        let project = Self {
            root: root.to_path_buf(),
        };
        if project.dir().exists() {
            return Err(ProjectError::AlreadyExists(project.dir()));
        }
        project.write_defaults()?;
        Ok(project)
    }

    /// Recreate the config and data files, discarding what was there
    pub fn init_force(root: &Path) -> Result<Self, ProjectError> {
        let project = Self {
            root: root.to_path_buf(),
        };
        project.write_defaults()?;
        Ok(project)
    }

    fn write_defaults(&self) -> Result<(), ProjectError> {
        fs::create_dir_all(self.dir())?;
        fs::write(self.config_path(), Config::default_template())?;
        let config = Config::default();
        fs::write(self.dir().join(&config.data_file), Store::default().to_json()?)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.stockplan` directory
    pub fn dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir().join(CONFIG_FILE)
    }

    /// Data blob location according to `config`
    pub fn data_path(&self, config: &Config) -> PathBuf {
        self.dir().join(&config.data_file)
    }
}
