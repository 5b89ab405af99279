#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Where the raw records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Http {
        endpoint: String,
        auth_token: Option<String>,
        timeout: Duration,
    },
    Files {
        placement_path: String,
        company_path: String,
    },
}

impl SourceSpec {
    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Http { endpoint, .. } => format!("api {}", endpoint),
            SourceSpec::Files {
                placement_path,
                company_path,
            } => format!("files {} + {}", placement_path, company_path),
        }
    }
}
