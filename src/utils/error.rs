use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Record source {endpoint} responded with status {status}")]
    SourceError { endpoint: String, status: u16 },

    #[error("Expected an array of {entity} records, found {found}")]
    InputShapeError { entity: String, found: String },

    #[error("Invalid {entity} record: {message}")]
    InvalidRecordError { entity: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::ApiError(_) | StatsError::SourceError { .. } => ErrorCategory::Network,
            StatsError::InputShapeError { .. }
            | StatsError::InvalidRecordError { .. }
            | StatsError::SerializationError(_) => ErrorCategory::Input,
            StatsError::ConfigError { .. }
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StatsError::ZipError(_) | StatsError::CsvError(_) | StatsError::IoError(_) => {
                ErrorCategory::Output
            }
            StatsError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 來源暫時無法連線，可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StatsError::ApiError(_) => {
                "Check that the dashboard backend is running and reachable".to_string()
            }
            StatsError::SourceError { status, .. } if *status == 401 || *status == 403 => {
                "Provide a valid auth token for the record source".to_string()
            }
            StatsError::SourceError { .. } => {
                "Verify the API endpoint and retry once the backend is healthy".to_string()
            }
            StatsError::InputShapeError { .. } => {
                "The record source must return a JSON array (or an object with a `data` array)"
                    .to_string()
            }
            StatsError::InvalidRecordError { .. } | StatsError::SerializationError(_) => {
                "Fix the offending record in the source data and run again".to_string()
            }
            StatsError::ConfigError { .. }
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. } => {
                "Review the configuration values and their allowed ranges".to_string()
            }
            StatsError::MissingConfigError { field } => {
                format!("Set the `{}` option", field)
            }
            StatsError::ZipError(_) | StatsError::CsvError(_) | StatsError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            StatsError::ProcessingError { .. } => {
                "Run with --verbose to inspect the failing stage".to_string()
            }
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not load records: {}", self),
            ErrorCategory::Input => format!("Record data is malformed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write the report: {}", self),
            ErrorCategory::Processing => format!("Report generation failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
