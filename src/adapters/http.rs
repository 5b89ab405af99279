use crate::domain::ports::RecordSource;
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const PLACEMENT_PATH: &str = "/dashboard/get-data";
pub const COMPANY_PATH: &str = "/dashboard/get-company-data";

/// Reads both record collections from the dashboard backend.
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpRecordSource {
    pub fn new(base_url: String, auth_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("Making API request to: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(StatsError::SourceError {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn placement_records(&self) -> Result<Value> {
        self.fetch(PLACEMENT_PATH).await
    }

    async fn company_records(&self) -> Result<Value> {
        self.fetch(COMPANY_PATH).await
    }

    fn describe(&self) -> String {
        format!("api {}", self.base_url)
    }
}
