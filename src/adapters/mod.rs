// Adapters layer: concrete record sources behind the `RecordSource` port.

pub mod file;
pub mod http;

use crate::config::SourceSpec;
use crate::domain::ports::{RecordSource, Storage};
use crate::utils::error::Result;

pub use file::FileRecordSource;
pub use http::HttpRecordSource;

/// 依設定建立對應的資料來源
pub fn build_source<S>(spec: &SourceSpec, storage: S) -> Result<Box<dyn RecordSource>>
where
    S: Storage + 'static,
{
    match spec {
        SourceSpec::Http {
            endpoint,
            auth_token,
            timeout,
        } => Ok(Box::new(HttpRecordSource::new(
            endpoint.clone(),
            auth_token.clone(),
            *timeout,
        )?)),
        SourceSpec::Files {
            placement_path,
            company_path,
        } => Ok(Box::new(FileRecordSource::new(
            storage,
            placement_path.clone(),
            company_path.clone(),
        ))),
    }
}
