//! Configuration loading, layered resolution, and config file management.

pub mod loader;
pub mod store;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, resolve, validate};
pub use types::{Config, ConfigFile, FileFormat, LoggingConfig, OutputFormat, PartialConfig};
