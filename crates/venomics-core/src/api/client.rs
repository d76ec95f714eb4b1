use crate::api::transport::{ClientConfig, Transport};
use crate::core::pagination::PageRequest;
use crate::error::{ApiError, AppError, AuthError};

/// Resource client for one Venomics instance.
///
/// Owns a single [`Transport`]; requests are issued one at a time by the
/// caller that owns the client.
#[derive(Debug, Clone)]
pub struct VenomicsClient {
    transport: Transport,
    first_page: PageRequest,
}

impl VenomicsClient {
    /// Build the client and check the credentials right away with `GET session`.
    pub async fn connect(config: ClientConfig) -> Result<Self, AppError> {
        let client = Self::unchecked(&config)?;
        client.check_credentials().await?;
        log::info!("Authenticated against {}", client.host());
        Ok(client)
    }

    /// Build the client without contacting the server.
    pub fn unchecked(config: &ClientConfig) -> Result<Self, AppError> {
        Ok(Self {
            transport: Transport::new(config)?,
            first_page: PageRequest::new(1, config.page_size),
        })
    }

    /// Starting request for the `all_*` listing helpers.
    pub fn first_page(&self) -> PageRequest {
        self.first_page
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    /// Browser URL of a query.
    pub fn query_url(&self, query_id: u64) -> String {
        format!("{}/queries/{}", self.host(), query_id)
    }

    /// Browser URL of a dashboard.
    pub fn dashboard_url(&self, slug: &str) -> String {
        format!("{}/dashboards/{}", self.host(), slug)
    }

    pub async fn check_credentials(&self) -> Result<(), AuthError> {
        match self.transport.get("session").await {
            Ok(_) => Ok(()),
            Err(ApiError::Endpoint { status, .. }) => Err(AuthError::Rejected {
                host: self.host().to_string(),
                status,
            }),
            Err(e) => Err(AuthError::Unreachable {
                host: self.host().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_client_creation() {
        let client = VenomicsClient::unchecked(&ClientConfig::new("https://bi.example.test/", "key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_browser_urls() {
        let client = VenomicsClient::unchecked(&ClientConfig::new("https://bi.example.test/acme/", "key"))
            .expect("client creation failed");
        assert_eq!(client.query_url(12), "https://bi.example.test/acme/queries/12");
        assert_eq!(
            client.dashboard_url("sales-overview"),
            "https://bi.example.test/acme/dashboards/sales-overview"
        );
    }
}
