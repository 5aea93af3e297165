use crate::core::Pipeline;
use crate::domain::model::EtlReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<EtlReport> {
        tracing::info!("Starting domain count...");
        self.monitor.log_stats("Start");

        // Extract
        let batch = self.pipeline.extract().await?;
        tracing::info!("Loaded {} customer rows", batch.rows.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(batch).await?;
        if result.invalid_addresses > 0 {
            tracing::warn!(
                "{} rows had an invalid email address ({} skipped)",
                result.invalid_addresses,
                result.rows_skipped
            );
        }
        tracing::info!(
            "Counted {} distinct domains",
            result.domain_counts.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let destination = self.pipeline.load(&result).await?;
        tracing::info!("Output written to: {}", destination);
        self.monitor.log_final_stats();

        Ok(EtlReport {
            destination,
            rows_processed: result.rows_processed,
            invalid_addresses: result.invalid_addresses,
            rows_skipped: result.rows_skipped,
            distinct_domains: result.domain_counts.len(),
        })
    }
}
