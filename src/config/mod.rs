pub mod toml_config;

use crate::domain::model::Location;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// The four coordinate pairs fetched when no locations are configured:
/// San Francisco, New York, Chicago and Los Angeles.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("37.7749", "-122.4194"),
        Location::new("40.7128", "-74.0060"),
        Location::new("41.8781", "-87.6298"),
        Location::new("34.0522", "-118.2437"),
    ]
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "weather-etl")]
#[command(about = "Fetches current weather for fixed coordinates and appends it to a SQLite table")]
pub struct CliConfig {
    /// Base URL of the weather API
    #[arg(long, default_value = "https://api.open-meteo.com")]
    pub api_endpoint: String,

    /// SQLite database file receiving weather_data rows
    #[arg(long, default_value = "./weather.db")]
    pub database: String,

    /// Coordinate pair to fetch, repeatable (LAT,LON)
    #[arg(long = "location", value_name = "LAT,LON", default_values_t = default_locations())]
    pub locations: Vec<Location>,

    /// HTTP timeout per request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// Load the pipeline definition from a TOML file instead of flags
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Report process CPU and memory statistics during the run
    #[arg(long)]
    pub monitor: bool,

    /// Show the run plan without touching the network or the database
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("api_endpoint", &self.api_endpoint)?;
        crate::utils::validation::validate_path("database", &self.database)?;
        crate::utils::validation::validate_positive_number(
            "timeout_seconds",
            self.timeout_seconds as usize,
            1,
        )?;

        if self.locations.is_empty() {
            return Err(EtlError::ConfigError {
                message: "At least one --location is required".to_string(),
            });
        }

        for location in &self.locations {
            crate::utils::validation::validate_latitude("location.latitude", &location.latitude)?;
            crate::utils::validation::validate_longitude(
                "location.longitude",
                &location.longitude,
            )?;
        }

        Ok(())
    }
}
