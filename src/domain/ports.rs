use crate::domain::model::{Location, RawObservation, WeatherRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait RecordSink: Send + Sync {
    fn append(
        &self,
        records: &[WeatherRecord],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn locations(&self) -> &[Location];
    fn request_timeout_secs(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawObservation>>;
    async fn transform(&self, data: Vec<RawObservation>) -> Result<Vec<WeatherRecord>>;
    async fn load(&self, records: Vec<WeatherRecord>) -> Result<usize>;
}
