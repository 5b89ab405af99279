use crate::config::{SourceSpec, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::domain::services::ranking::DEFAULT_TOP_N;
use crate::domain::services::years::DEFAULT_TREND_YEARS;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{
    validate_output_formats, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub year: Option<i32>,
    pub top_n: Option<usize>,
    pub trend_years: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub placement_file: Option<String>,
    pub company_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLACEMENT_API_TOKEN})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_spec(&self) -> Result<SourceSpec> {
        match self.source.r#type.as_str() {
            "api" => {
                let endpoint = self.source.endpoint.clone().ok_or_else(|| {
                    StatsError::MissingConfigError {
                        field: "source.endpoint".to_string(),
                    }
                })?;
                Ok(SourceSpec::Http {
                    endpoint,
                    auth_token: self.auth_token(),
                    timeout: Duration::from_secs(
                        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
                    ),
                })
            }
            "file" => {
                let placement_path = self.source.placement_file.clone().ok_or_else(|| {
                    StatsError::MissingConfigError {
                        field: "source.placement_file".to_string(),
                    }
                })?;
                let company_path = self.source.company_file.clone().ok_or_else(|| {
                    StatsError::MissingConfigError {
                        field: "source.company_file".to_string(),
                    }
                })?;
                Ok(SourceSpec::Files {
                    placement_path,
                    company_path,
                })
            }
            other => Err(StatsError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: other.to_string(),
                reason: "Valid source types: api, file".to_string(),
            }),
        }
    }

    /// Token with an unresolved `${VAR}` placeholder counts as absent.
    fn auth_token(&self) -> Option<String> {
        self.source
            .auth_token
            .as_ref()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
            .cloned()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn report_year(&self) -> Option<i32> {
        self.report.year
    }

    fn top_n(&self) -> usize {
        self.report.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    fn trend_years(&self) -> usize {
        self.report.trend_years.unwrap_or(DEFAULT_TREND_YEARS)
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.source_spec()? {
            SourceSpec::Http { endpoint, timeout, .. } => {
                validate_url("source.endpoint", &endpoint)?;
                validate_range("source.timeout_seconds", timeout.as_secs(), 1, 600)?;
            }
            SourceSpec::Files {
                placement_path,
                company_path,
            } => {
                validate_path("source.placement_file", &placement_path)?;
                validate_path("source.company_file", &company_path)?;
            }
        }
        validate_path("output.path", &self.output.path)?;
        validate_range("report.top_n", self.top_n(), 1, 100)?;
        validate_range("report.trend_years", self.trend_years(), 1, 20)?;
        validate_output_formats("output.formats", &self.output.formats)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const API_CONFIG: &str = r#"
[report]
name = "campus-placements"
year = 2024
top_n = 5

[source]
type = "api"
endpoint = "http://localhost:8000"

[output]
path = "./reports"
formats = ["json", "zip"]
"#;

    #[test]
    fn test_parse_api_config() {
        let config = TomlConfig::from_toml_str(API_CONFIG).unwrap();

        assert_eq!(config.report.name, "campus-placements");
        assert_eq!(config.report_year(), Some(2024));
        assert_eq!(config.top_n(), 5);
        assert_eq!(config.trend_years(), DEFAULT_TREND_YEARS);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.source_spec().unwrap(),
            SourceSpec::Http { auth_token: None, .. }
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PLACEMENT_STATS_TEST_TOKEN", "s3cret");

        let content = API_CONFIG.replace(
            "endpoint = \"http://localhost:8000\"",
            "endpoint = \"http://localhost:8000\"\nauth_token = \"${PLACEMENT_STATS_TEST_TOKEN}\"",
        );
        let config = TomlConfig::from_toml_str(&content).unwrap();

        match config.source_spec().unwrap() {
            SourceSpec::Http { auth_token, .. } => assert_eq!(auth_token.as_deref(), Some("s3cret")),
            other => panic!("unexpected source {:?}", other),
        }

        std::env::remove_var("PLACEMENT_STATS_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_is_dropped() {
        let content = API_CONFIG.replace(
            "endpoint = \"http://localhost:8000\"",
            "endpoint = \"http://localhost:8000\"\nauth_token = \"${PLACEMENT_STATS_UNSET_VAR}\"",
        );
        let config = TomlConfig::from_toml_str(&content).unwrap();

        assert!(matches!(
            config.source_spec().unwrap(),
            SourceSpec::Http { auth_token: None, .. }
        ));
    }

    #[test]
    fn test_file_source_requires_both_paths() {
        let content = r#"
[report]
name = "offline"

[source]
type = "file"
placement_file = "placements.json"

[output]
path = "./out"
formats = ["csv"]
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StatsError::MissingConfigError { ref field }) if field == "source.company_file"
        ));
    }

    #[test]
    fn test_invalid_source_type_and_format() {
        let config =
            TomlConfig::from_toml_str(&API_CONFIG.replace("type = \"api\"", "type = \"ftp\""))
                .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            &API_CONFIG.replace("[\"json\", \"zip\"]", "[\"xlsx\"]"),
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(API_CONFIG.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./reports");
    }
}
