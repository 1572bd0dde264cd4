pub mod config;
pub mod error;
pub mod manifest;
pub mod report;
pub mod types;

pub use config::NodebisectConfig;
pub use error::{ConfigError, ManifestError, ReportError};
pub use manifest::Manifest;
pub use types::*;
