use crate::core::export;
use crate::domain::model::RecordSet;
use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, Storage};
use crate::domain::report::DashboardReport;
use crate::domain::services::audit::audit_records;
use crate::domain::services::dashboard::{build_report, ReportOptions};
use crate::domain::services::years::YearSelection;
use crate::utils::error::{Result, StatsError};
use chrono::Utc;

/// Fetches records, aggregates them and writes the report.
pub struct DashboardPipeline<S: Storage, C: ConfigProvider> {
    source: Box<dyn RecordSource>,
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DashboardPipeline<S, C> {
    pub fn new(source: Box<dyn RecordSource>, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    fn options(&self) -> ReportOptions {
        ReportOptions {
            year: self.config.report_year(),
            top_n: self.config.top_n(),
            trend_years: self.config.trend_years(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DashboardPipeline<S, C> {
    async fn extract(&self) -> Result<RecordSet> {
        tracing::info!("📥 Loading records from {}", self.source.describe());

        let (placements, companies) = tokio::try_join!(
            self.source.placement_records(),
            self.source.company_records()
        )?;
        let records = RecordSet::from_json(placements, companies)?;

        tracing::info!(
            "Loaded {} placement rows and {} company rows",
            records.placements.len(),
            records.companies.len()
        );
        Ok(records)
    }

    async fn transform(&self, records: RecordSet) -> Result<DashboardReport> {
        let warnings = audit_records(&records);
        for warning in &warnings {
            tracing::warn!("⚠️ Data quality: {}", warning);
        }

        let options = self.options();
        if let Some(year) = options.year {
            if !YearSelection::from_records(&records).contains(year) {
                tracing::warn!("No records for requested year {}, metrics will be zero", year);
            }
        }
        if records.is_empty() {
            tracing::warn!("Record set is empty, report will contain zero values");
        }

        let report = build_report(&records, &options, Utc::now());
        tracing::debug!(
            "Report year {:?} (previous {:?}): {} companies, {} offers, placement rate {}%",
            report.report_year,
            report.previous_year,
            report.current.total_companies,
            report.current.total_offers,
            report.current.placement_rate
        );
        Ok(report)
    }

    async fn load(&self, report: DashboardReport) -> Result<String> {
        let artifacts = export::render(&report, self.config.output_formats())?;
        let primary = artifacts
            .iter()
            .map(|a| a.name)
            .find(|name| *name == export::ZIP_FILE)
            .or_else(|| artifacts.first().map(|a| a.name))
            .ok_or_else(|| StatsError::ProcessingError {
                message: "No output format selected".to_string(),
            })?;

        for artifact in &artifacts {
            tracing::debug!(
                "Writing {} ({} bytes) to storage",
                artifact.name,
                artifact.data.len()
            );
            self.storage.write_file(artifact.name, &artifact.data).await?;
        }

        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}
