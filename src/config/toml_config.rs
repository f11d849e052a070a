use crate::core::ConfigProvider;
use crate::domain::model::Location;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub locations: Vec<Location>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub database_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// Load a pipeline definition from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse a pipeline definition from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute environment variables written as ${VAR_NAME}.
    /// Unset variables are left verbatim so validation can report them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        crate::utils::validation::validate_url("source.endpoint", &self.source.endpoint)?;
        crate::utils::validation::validate_path("load.database_path", &self.load.database_path)?;

        if let Some(timeout) = self.source.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "source.timeout_seconds",
                timeout as usize,
                1,
            )?;
        }

        if self.locations.is_empty() {
            return Err(EtlError::ConfigError {
                message: "At least one [[locations]] entry is required".to_string(),
            });
        }

        for location in &self.locations {
            crate::utils::validation::validate_latitude("locations.latitude", &location.latitude)?;
            crate::utils::validation::validate_longitude(
                "locations.longitude",
                &location.longitude,
            )?;
        }

        Ok(())
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(30)
    }

    pub fn database_path(&self) -> &str {
        &self.load.database_path
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
