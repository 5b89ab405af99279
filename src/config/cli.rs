use crate::config::{SourceSpec, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{
    validate_output_formats, validate_path, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "placement-stats")]
#[command(about = "Placement statistics report generator")]
pub struct CliConfig {
    /// Base URL of the dashboard backend
    #[arg(long, conflicts_with_all = ["placement_file", "company_file"])]
    pub api_endpoint: Option<String>,

    /// Local JSON file with placement records
    #[arg(long, requires = "company_file")]
    pub placement_file: Option<String>,

    /// Local JSON file with company records
    #[arg(long, requires = "placement_file")]
    pub company_file: Option<String>,

    /// Bearer token forwarded to the backend
    #[arg(long)]
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Report year (defaults to the most recent year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long, default_value = "10")]
    pub top_n: usize,

    #[arg(long, default_value = "5")]
    pub trend_years: usize,

    /// Output formats: json, csv, zip
    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn source(&self) -> Result<SourceSpec> {
        match (&self.api_endpoint, &self.placement_file, &self.company_file) {
            (Some(endpoint), _, _) => Ok(SourceSpec::Http {
                endpoint: endpoint.clone(),
                auth_token: self.auth_token.clone(),
                timeout: Duration::from_secs(self.timeout_seconds),
            }),
            (None, Some(placement), Some(company)) => Ok(SourceSpec::Files {
                placement_path: placement.clone(),
                company_path: company.clone(),
            }),
            _ => Err(StatsError::MissingConfigError {
                field: "api-endpoint or placement-file/company-file".to_string(),
            }),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_year(&self) -> Option<i32> {
        self.year
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn trend_years(&self) -> usize {
        self.trend_years
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match self.source()? {
            SourceSpec::Http { endpoint, .. } => validate_url("api_endpoint", &endpoint)?,
            SourceSpec::Files {
                placement_path,
                company_path,
            } => {
                validate_path("placement_file", &placement_path)?;
                validate_path("company_file", &company_path)?;
            }
        }
        validate_path("output_path", &self.output_path)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_range("top_n", self.top_n, 1, 100)?;
        validate_range("trend_years", self.trend_years, 1, 20)?;
        validate_output_formats("formats", &self.formats)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["placement-stats"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--api-endpoint", "http://localhost:8000"]);

        assert_eq!(config.top_n, 10);
        assert_eq!(config.trend_years, 5);
        assert_eq!(config.formats, vec!["json".to_string()]);
        assert_eq!(config.report_year(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_source() {
        let config = parse(&[
            "--placement-file",
            "p.json",
            "--company-file",
            "c.json",
            "--formats",
            "csv,zip",
            "--year",
            "2023",
        ]);

        assert_eq!(
            config.source().unwrap(),
            SourceSpec::Files {
                placement_path: "p.json".to_string(),
                company_path: "c.json".to_string(),
            }
        );
        assert_eq!(config.report_year(), Some(2023));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_source_fails_validation() {
        let config = parse(&[]);
        assert!(matches!(
            config.validate(),
            Err(StatsError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_conflicting_sources_rejected_by_parser() {
        let argv = [
            "placement-stats",
            "--api-endpoint",
            "http://localhost:8000",
            "--placement-file",
            "p.json",
            "--company-file",
            "c.json",
        ];
        assert!(CliConfig::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = parse(&["--api-endpoint", "http://localhost:8000", "--top-n", "0"]);
        assert!(config.validate().is_err());

        let config = parse(&["--api-endpoint", "http://localhost:8000", "--formats", "pdf"]);
        assert!(config.validate().is_err());
    }
}
