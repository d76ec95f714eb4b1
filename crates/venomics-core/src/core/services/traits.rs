use crate::AppError;
use crate::api::client::VenomicsClient;
use crate::api::models::{Dashboard, Query};
use async_trait::async_trait;

/// Read access needed by the sensitive-data scan.
#[async_trait]
pub trait ScanSource: Send + Sync {
    /// Every query, all pages
    async fn all_queries(&self) -> Result<Vec<Query>, AppError>;

    /// Every dashboard, all pages (list records, without widgets)
    async fn all_dashboards(&self) -> Result<Vec<Dashboard>, AppError>;

    /// Full dashboard including widgets
    async fn dashboard(&self, slug: &str) -> Result<Dashboard, AppError>;

    /// Raw body of a cached query result
    async fn query_result_text(&self, result_id: u64) -> Result<String, AppError>;

    fn query_url(&self, query_id: u64) -> String;

    fn dashboard_url(&self, slug: &str) -> String;
}

#[async_trait]
impl ScanSource for VenomicsClient {
    async fn all_queries(&self) -> Result<Vec<Query>, AppError> {
        VenomicsClient::all_queries(self).await
    }

    async fn all_dashboards(&self) -> Result<Vec<Dashboard>, AppError> {
        VenomicsClient::all_dashboards(self).await
    }

    async fn dashboard(&self, slug: &str) -> Result<Dashboard, AppError> {
        VenomicsClient::dashboard(self, slug).await
    }

    async fn query_result_text(&self, result_id: u64) -> Result<String, AppError> {
        VenomicsClient::query_result_text(self, result_id).await
    }

    fn query_url(&self, query_id: u64) -> String {
        VenomicsClient::query_url(self, query_id)
    }

    fn dashboard_url(&self, slug: &str) -> String {
        VenomicsClient::dashboard_url(self, slug)
    }
}
