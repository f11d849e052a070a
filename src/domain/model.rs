use crate::utils::error::EtlError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A coordinate pair kept as the decimal strings sent to the weather API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

impl Location {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Location {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) =
            s.split_once(',')
                .ok_or_else(|| EtlError::InvalidConfigValueError {
                    field: "location".to_string(),
                    value: s.to_string(),
                    reason: "Expected LAT,LON".to_string(),
                })?;

        let latitude = latitude.trim();
        let longitude = longitude.trim();
        if latitude.is_empty() || longitude.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "location".to_string(),
                value: s.to_string(),
                reason: "Expected LAT,LON".to_string(),
            });
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// One API response body with the location it was fetched for attached.
/// The body stays untyped until the transform step flattens it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    pub location: Location,
    #[serde(flatten)]
    pub payload: serde_json::Value,
}

/// A flat row ready for the weather_data table, in insert column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub latitude: String,
    pub longitude: String,
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: f64,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub observations: usize,
    pub rows_loaded: usize,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}
