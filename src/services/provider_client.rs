use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::config::Credentials;
use crate::errors::SearchError;

pub const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// Outbound transport to the book search provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issues a GET to `url` with both credential headers and returns the raw
    /// response body. The provider's status code is not inspected.
    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Bytes, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProviderClient {
    client: reqwest::Client,
}

impl ReqwestProviderClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for ReqwestProviderClient {
    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Bytes, SearchError> {
        let response = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, credentials.client_id.as_str())
            .header(CLIENT_SECRET_HEADER, credentials.client_secret.as_str())
            .send()
            .await?;

        debug!(status = %response.status(), "Provider responded");

        Ok(response.bytes().await?)
    }
}
