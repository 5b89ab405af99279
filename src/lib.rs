pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LocalStorage};

pub use config::toml_config::TomlConfig;
pub use core::{etl::ReportEngine, pipeline::DashboardPipeline};
pub use domain::model::{Branch, CompanyRecord, PlacementRecord, RecordSet};
pub use domain::report::{DashboardReport, DerivedMetrics, Fixed, RankedEntry, SalaryBucket};
pub use utils::error::{Result, StatsError};
