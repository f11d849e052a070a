pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{etl::EtlEngine, pipeline::WeatherPipeline};
pub use crate::db::SqliteSink;
pub use crate::utils::error::{EtlError, Result};
