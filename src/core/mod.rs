//! Core module - store, estimator, persistence and project plumbing

pub mod config;
pub mod error;
pub mod estimator;
pub mod persist;
pub mod project;
pub mod store;
pub mod window;
pub mod workbook;

pub use config::{Config, ConfigError};
pub use error::{NotComputable, PersistError, StoreError};
pub use estimator::{estimate, estimate_for, Estimate};
pub use persist::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use project::{Project, ProjectError};
pub use store::{Outcome, Store};
pub use window::{date_window, today};
pub use workbook::Workbook;
