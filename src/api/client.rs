use crate::domain::ports::ApiClient;
use crate::utils::error::{Result, SioError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Versioned media type the gateway expects on every call.
pub const SIO_MEDIA_TYPE: &str = "application/json;version=1.0";

/// reqwest-backed [`ApiClient`] for the array management gateway.
///
/// Authentication is the gateway's basic-auth scheme: empty username and the
/// session token in the password field. Paths passed to the trait methods are
/// absolute (`/api/...`) and replace the endpoint's path component.
#[derive(Debug)]
pub struct HttpApiClient {
    endpoint: Url,
    token: String,
    client: Client,
}

impl HttpApiClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, token, None)
    }

    pub fn with_timeout(
        endpoint: &str,
        token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| SioError::ConfigError {
            message: format!("Invalid endpoint URL '{}': {}", endpoint, e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            endpoint,
            token: token.into(),
            client,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.endpoint.join(path).map_err(|e| SioError::ConfigError {
            message: format!("Invalid request path '{}': {}", path, e),
        })
    }

    async fn check_resp(response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ API returned {}: {}", status, body);
            return Err(SioError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url_for(path)?;
        tracing::debug!("📡 GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth("", Some(&self.token))
            .header("Accept", SIO_MEDIA_TYPE)
            .send()
            .await?;

        tracing::debug!("📡 API response status: {}", response.status());
        Self::check_resp(response).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = self.url_for(path)?;
        tracing::debug!("📡 POST {}", url);

        let response = self
            .client
            .post(url)
            .basic_auth("", Some(&self.token))
            .header("Accept", SIO_MEDIA_TYPE)
            .header("Content-Type", SIO_MEDIA_TYPE)
            .body(serde_json::to_string(&body)?)
            .send()
            .await?;

        tracing::debug!("📡 API response status: {}", response.status());
        Self::check_resp(response).await
    }
}
