// common/src/lib.rs
pub mod config;
pub mod error;
pub mod models;
pub mod source;

// Re-export commonly used items
pub use config::AppConfig;
pub use error::{ConfigError, ReportError, SourceError};
pub use models::*;
pub use source::{ActivitySource, BacklogClient, FetchOptions};
