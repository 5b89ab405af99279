use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Runs a pipeline's extract, transform and load stages in order.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting report generation");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} records in {:?}",
            records.placements.len() + records.companies.len(),
            started.elapsed()
        );

        // Transform
        let report = self.pipeline.transform(records).await?;
        tracing::info!(
            "Aggregated {} years, report year {:?}",
            report.years.len(),
            report.report_year
        );

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📁 Report saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
