use crate::domain::ports::{RecordSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Reads the two record collections from JSON exports on disk.
pub struct FileRecordSource<S: Storage> {
    storage: S,
    placement_path: String,
    company_path: String,
}

impl<S: Storage> FileRecordSource<S> {
    pub fn new(storage: S, placement_path: String, company_path: String) -> Self {
        Self {
            storage,
            placement_path,
            company_path,
        }
    }

    async fn read_json(&self, path: &str) -> Result<Value> {
        tracing::debug!("Reading records from {}", path);
        let data = self.storage.read_file(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[async_trait]
impl<S: Storage> RecordSource for FileRecordSource<S> {
    async fn placement_records(&self) -> Result<Value> {
        self.read_json(&self.placement_path).await
    }

    async fn company_records(&self) -> Result<Value> {
        self.read_json(&self.company_path).await
    }

    fn describe(&self) -> String {
        format!("files {} + {}", self.placement_path, self.company_path)
    }
}
