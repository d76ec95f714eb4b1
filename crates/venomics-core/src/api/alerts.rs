use crate::api::client::VenomicsClient;
use crate::api::models::{Alert, AlertUpdate, NewAlert};
use crate::error::AppError;
use serde_json::Value;

impl VenomicsClient {
    /// GET `alerts`. This endpoint is not paginated.
    pub async fn alerts(&self) -> Result<Vec<Alert>, AppError> {
        Ok(self.transport().get_json("alerts").await?)
    }

    pub async fn alert(&self, alert_id: u64) -> Result<Alert, AppError> {
        Ok(self
            .transport()
            .get_json(&format!("alerts/{}", alert_id))
            .await?)
    }

    pub async fn create_alert(
        &self,
        name: &str,
        options: Value,
        query_id: u64,
    ) -> Result<Alert, AppError> {
        let alert = NewAlert {
            name: name.to_string(),
            options,
            query_id,
        };
        Ok(self.transport().post_json("alerts", Some(&alert)).await?)
    }

    /// Partial update; fields left as `None` are not sent.
    pub async fn update_alert(&self, alert_id: u64, update: &AlertUpdate) -> Result<Alert, AppError> {
        Ok(self
            .transport()
            .post_json(&format!("alerts/{}", alert_id), Some(update))
            .await?)
    }

    pub async fn delete_alert(&self, alert_id: u64) -> Result<(), AppError> {
        self.transport()
            .delete(&format!("alerts/{}", alert_id))
            .await?;
        Ok(())
    }
}
