//! Authenticated HTTP primitives for the Venomics REST API.
//!
//! Every request goes to `{host}/api/{path}` and carries
//! `Authorization: Key {api_key}`. `get` and `post` accept only `200 OK`,
//! `delete` accepts `200` or `204`; anything else becomes
//! [`ApiError::Endpoint`] tagged with method, path and status.

use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::error::{ApiError, AppError, ConfigError};
use crate::utils::error_helpers::*;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("venomics-core/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a single client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Page size used by the `all_*` listing helpers.
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Persistent connection owned by one caller.
///
/// The underlying `reqwest::Client` pools connections; the authorization
/// header value is computed once here and reused for every request.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    host: String,
    authorization: HeaderValue,
    timeout_secs: u64,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let mut authorization = HeaderValue::from_str(&format!("Key {}", config.api_key))
            .map_err(|e| ConfigError::InvalidValue {
                field: "api_key".to_string(),
                value: "<redacted>".to_string(),
                reason: e.to_string(),
            })?;
        authorization.set_sensitive(true);

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport {
                method: "INIT".to_string(),
                path: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            authorization,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.host, path.trim_start_matches('/'))
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(AUTHORIZATION, self.authorization.clone())
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.build_request(Method::GET, path);
        self.execute(Method::GET, path, request, &[StatusCode::OK])
            .await
    }

    pub async fn get_with_query<Q>(&self, path: &str, query: &Q) -> Result<Response, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.build_request(Method::GET, path).query(query);
        self.execute(Method::GET, path, request, &[StatusCode::OK])
            .await
    }

    /// POST `payload` as a JSON object; absent or non-object payloads are sent as `{}`.
    pub async fn post<P>(&self, path: &str, payload: Option<&P>) -> Result<Response, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = json_object_payload(payload);
        let request = self.build_request(Method::POST, path).json(&body);
        self.execute(Method::POST, path, request, &[StatusCode::OK])
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.build_request(Method::DELETE, path);
        self.execute(
            Method::DELETE,
            path,
            request,
            &[StatusCode::OK, StatusCode::NO_CONTENT],
        )
        .await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.get(path).await?;
        Self::decode(response, path).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.get_with_query(path, query).await?;
        Self::decode(response, path).await
    }

    pub async fn post_json<T, P>(&self, path: &str, payload: Option<&P>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.post(path, payload).await?;
        Self::decode(response, path).await
    }

    pub async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| convert_json_error(e, path))?;
        serde_json::from_slice(&bytes).map_err(|e| convert_json_error(e, path))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        accepted: &[StatusCode],
    ) -> Result<Response, ApiError> {
        log::debug!("[{}] /api/{}", method, path);

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, &method, path, self.timeout_secs))?;

        let status = response.status();
        if accepted.contains(&status) {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        log::debug!("[{}] /api/{} answered {}", method, path, status);

        Err(ApiError::Endpoint {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

/// Serialize a request payload, falling back to an empty JSON object.
pub fn json_object_payload<P>(payload: Option<&P>) -> Value
where
    P: Serialize + ?Sized,
{
    match payload.map(serde_json::to_value) {
        Some(Ok(Value::Object(map))) => Value::Object(map),
        Some(Err(e)) => {
            log::warn!("Payload could not be serialized, sending {{}}: {}", e);
            Value::Object(Map::new())
        }
        _ => Value::Object(Map::new()),
    }
}
