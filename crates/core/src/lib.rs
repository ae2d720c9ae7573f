#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod convert;
pub mod frontmatter;
pub mod paths;

pub use api::{ApiError, SiyuanClient};
pub use config::{Config, ConfigError, ConfigLoader, OutputFormat};
pub use convert::{ConvertOptions, convert};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
