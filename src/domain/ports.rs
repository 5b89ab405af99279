use crate::domain::model::RecordSet;
use crate::domain::report::DashboardReport;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read-only access to the record store. Payloads are raw JSON; shape checks
/// happen in [`RecordSet::from_json`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn placement_records(&self) -> Result<Value>;
    async fn company_records(&self) -> Result<Value>;

    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    /// 指定報表年份；未指定時使用最新年份
    fn report_year(&self) -> Option<i32>;
    fn top_n(&self) -> usize;
    fn trend_years(&self) -> usize;
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RecordSet>;
    async fn transform(&self, records: RecordSet) -> Result<DashboardReport>;
    async fn load(&self, report: DashboardReport) -> Result<String>;
}
