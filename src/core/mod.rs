pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{Location, RawObservation, RunReport, WeatherRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSink};
pub use crate::utils::error::Result;
