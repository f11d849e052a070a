use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Run extract, transform and load once, in that order. Any phase error
    /// aborts the run; the caller decides whether to retry the whole thing.
    pub async fn run(&self) -> Result<RunReport> {
        let started_at = chrono::Utc::now();
        let timer = Instant::now();

        tracing::info!("Starting ETL process...");

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        let observations = raw_data.len();
        tracing::info!("Extracted {} observations", observations);
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming data...");
        let records = self.pipeline.transform(raw_data).await?;
        tracing::info!("Transformed {} records", records.len());
        self.monitor.log_stats("Transform");

        tracing::info!("Loading data...");
        let rows_loaded = self.pipeline.load(records).await?;
        tracing::info!("Loaded {} rows into weather_data", rows_loaded);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(RunReport {
            observations,
            rows_loaded,
            started_at,
            duration: timer.elapsed(),
        })
    }
}
