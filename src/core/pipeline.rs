use crate::core::{ConfigProvider, Pipeline, RawObservation, RecordSink, WeatherRecord};
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub struct WeatherPipeline<S: RecordSink, C: ConfigProvider> {
    sink: S,
    config: C,
    client: Client,
}

impl<S: RecordSink, C: ConfigProvider> WeatherPipeline<S, C> {
    pub fn new(sink: S, config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .user_agent(concat!("weather-etl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            sink,
            config,
            client,
        })
    }

    fn forecast_url(&self, latitude: &str, longitude: &str) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.config.api_endpoint().trim_end_matches('/'),
            latitude,
            longitude
        )
    }
}

fn require_f64(current_weather: &Value, field: &str) -> Result<f64> {
    current_weather
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| EtlError::MissingFieldError {
            field: format!("current_weather.{}", field),
        })
}

#[async_trait::async_trait]
impl<S: RecordSink, C: ConfigProvider> Pipeline for WeatherPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawObservation>> {
        let locations = self.config.locations();
        let mut observations = Vec::with_capacity(locations.len());

        for location in locations {
            let endpoint = self.forecast_url(&location.latitude, &location.longitude);

            tracing::debug!("Requesting weather for {}", location);
            let response = self.client.get(&endpoint).send().await?;

            let status = response.status();
            tracing::debug!("Weather API response status: {}", status);

            // Anything but 200 aborts the run so the scheduler can retry it whole.
            if status != StatusCode::OK {
                return Err(EtlError::FetchFailedError { status, endpoint });
            }

            let payload: Value = response.json().await?;
            observations.push(RawObservation {
                location: location.clone(),
                payload,
            });
        }

        Ok(observations)
    }

    async fn transform(&self, data: Vec<RawObservation>) -> Result<Vec<WeatherRecord>> {
        let mut records = Vec::with_capacity(data.len());

        for observation in data {
            let RawObservation { location, payload } = observation;

            let current_weather =
                payload
                    .get("current_weather")
                    .ok_or_else(|| EtlError::MissingFieldError {
                        field: "current_weather".to_string(),
                    })?;

            records.push(WeatherRecord {
                temperature: require_f64(current_weather, "temperature")?,
                windspeed: require_f64(current_weather, "windspeed")?,
                winddirection: require_f64(current_weather, "winddirection")?,
                weathercode: require_f64(current_weather, "weathercode")?,
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }

        Ok(records)
    }

    async fn load(&self, records: Vec<WeatherRecord>) -> Result<usize> {
        tracing::debug!("Appending {} records to weather_data", records.len());
        let rows = self.sink.append(&records).await?;
        Ok(rows)
    }
}
