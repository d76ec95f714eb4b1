use crate::api::client::VenomicsClient;
use crate::api::models::DataSource;
use crate::error::AppError;

impl VenomicsClient {
    pub async fn data_sources(&self) -> Result<Vec<DataSource>, AppError> {
        Ok(self.transport().get_json("data_sources").await?)
    }

    pub async fn data_source(&self, data_source_id: u64) -> Result<DataSource, AppError> {
        Ok(self
            .transport()
            .get_json(&format!("data_sources/{}", data_source_id))
            .await?)
    }
}
