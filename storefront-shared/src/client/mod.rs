//! HTTP plumbing shared by the auth and data clients.

pub mod error;

pub use error::{BackendError, BackendResult};

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::BackendConfig;

const API_KEY_HEADER: &str = "apikey";

/// Thin wrapper around [`reqwest::Client`] that knows the backend's base URL
/// and key headers.
#[derive(Debug, Clone)]
pub struct BackendHttp {
    config: BackendConfig,
    client: Client,
}

impl BackendHttp {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Start a request to `path`, authenticated with `bearer` when given and
    /// with the public key otherwise.
    ///
    /// # Errors
    /// Returns [`BackendError::NotConfigured`] when the URL or key is missing.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
    ) -> BackendResult<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        let key = self.config.require_anon_key()?;
        debug!(%method, %url, "backend request");
        Ok(self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, key)
            .bearer_auth(bearer.unwrap_or(key)))
    }

    /// Send and decode a JSON body.
    ///
    /// # Errors
    /// Transport failures, non-2xx statuses and undecodable bodies.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Send and discard the body.
    ///
    /// # Errors
    /// Transport failures and non-2xx statuses.
    pub async fn send_empty(&self, request: RequestBuilder) -> BackendResult<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::http(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_config_fails_at_boundary() {
        let http = BackendHttp::new(BackendConfig::default());
        let result = http.request(Method::GET, "rest/v1/products", None);
        assert!(matches!(result, Err(BackendError::NotConfigured(_))));
    }

    #[test]
    fn test_request_sets_key_headers() {
        let config = BackendConfig::new("https://abc.backend.example", "anon-key").unwrap();
        let http = BackendHttp::new(config);
        let request = http
            .request(Method::GET, "auth/v1/user", Some("user-token"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://abc.backend.example/auth/v1/user");
        assert_eq!(request.headers()[API_KEY_HEADER], "anon-key");
        assert_eq!(request.headers()["authorization"], "Bearer user-token");
    }

    #[test]
    fn test_request_falls_back_to_key_as_bearer() {
        let config = BackendConfig::new("https://abc.backend.example", "anon-key").unwrap();
        let http = BackendHttp::new(config);
        let request = http
            .request(Method::POST, "rest/v1/orders", None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.headers()["authorization"], "Bearer anon-key");
    }
}
