use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

use crate::config::CredentialSource;
use crate::errors::SearchError;
use crate::models::SearchRequest;
use crate::services::ProviderClient;

/// Forwards search requests to the provider and hands back its payload untouched.
#[derive(Clone)]
pub struct SearchService {
    client: Arc<dyn ProviderClient>,
    credentials: Arc<dyn CredentialSource>,
    endpoint: String,
}

impl SearchService {
    pub fn new(
        client: Arc<dyn ProviderClient>,
        credentials: Arc<dyn CredentialSource>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            endpoint: endpoint.into(),
        }
    }

    /// Provider URL for `query`, percent-encoded exactly once.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}?query={}", self.endpoint, urlencoding::encode(query))
    }

    /// Runs one search for a raw inbound body.
    ///
    /// On success the returned bytes are exactly what the provider sent.
    pub async fn search(&self, body: &[u8]) -> Result<Bytes, SearchError> {
        let request = SearchRequest::from_slice(body)?;
        let query = request.query_text();
        let url = self.search_url(&query);
        let credentials = self.credentials.credentials();

        debug!(url = %url, "Forwarding book search");
        let payload = self.client.get(&url, &credentials).await?;

        serde_json::from_slice::<serde::de::IgnoredAny>(&payload).map_err(|e| {
            SearchError::invalid_provider_response(format!(
                "Provider returned invalid JSON: {}",
                e
            ))
        })?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, StaticCredentials, DEFAULT_SEARCH_ENDPOINT};
    use crate::services::MockProviderClient;
    use rstest::rstest;

    fn service_with(client: MockProviderClient, credentials: Credentials) -> SearchService {
        SearchService::new(
            Arc::new(client),
            Arc::new(StaticCredentials(credentials)),
            DEFAULT_SEARCH_ENDPOINT,
        )
    }

    fn creds(id: &str, secret: &str) -> Credentials {
        Credentials {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
        }
    }

    #[rstest]
    #[case("a b", "a%20b")]
    #[case("rust", "rust")]
    #[case("", "")]
    #[case("100%", "100%25")]
    #[case("a%20b", "a%2520b")]
    #[case("c&d=e", "c%26d%3De")]
    #[case("해리포터", "%ED%95%B4%EB%A6%AC%ED%8F%AC%ED%84%B0")]
    fn query_is_encoded_once(#[case] query: &str, #[case] encoded: &str) {
        let service = service_with(MockProviderClient::new(), Credentials::default());
        assert_eq!(
            service.search_url(query),
            format!("{}?query={}", DEFAULT_SEARCH_ENDPOINT, encoded)
        );
    }

    #[actix_rt::test]
    async fn forwards_query_and_credentials() {
        let mut client = MockProviderClient::new();
        client.expect_get().times(1).returning(|url, credentials| {
            assert_eq!(
                url,
                "https://openapi.naver.com/v1/search/book.json?query=a%20b"
            );
            assert_eq!(credentials.client_id, "id");
            assert_eq!(credentials.client_secret, "secret");
            Ok(Bytes::from_static(br#"{"items":[]}"#))
        });

        let service = service_with(client, creds("id", "secret"));
        let payload = service.search(br#"{"query":"a b"}"#).await.unwrap();
        assert_eq!(payload, Bytes::from_static(br#"{"items":[]}"#));
    }

    #[actix_rt::test]
    async fn unset_credentials_are_sent_as_empty_strings() {
        let mut client = MockProviderClient::new();
        client.expect_get().times(1).returning(|_, credentials| {
            assert_eq!(credentials, &Credentials::default());
            Ok(Bytes::from_static(b"{}"))
        });

        let service = service_with(client, Credentials::default());
        service.search(br#"{"query":"x"}"#).await.unwrap();
    }

    #[actix_rt::test]
    async fn payload_is_returned_byte_for_byte() {
        let raw: &'static [u8] =
            b"{ \"total\" : 1,\n  \"items\": [{\"title\":\"<b>Rust</b>\", \"price\": \"12000\"}] }";
        let mut client = MockProviderClient::new();
        client
            .expect_get()
            .returning(move |_, _| Ok(Bytes::from_static(raw)));

        let service = service_with(client, Credentials::default());
        let payload = service.search(br#"{"query":"rust"}"#).await.unwrap();
        assert_eq!(payload.as_ref(), raw);
    }

    #[actix_rt::test]
    async fn provider_error_payload_passes_through() {
        let raw: &'static [u8] = br#"{"errorMessage":"Authentication failed","errorCode":"024"}"#;
        let mut client = MockProviderClient::new();
        client
            .expect_get()
            .returning(move |_, _| Ok(Bytes::from_static(raw)));

        let service = service_with(client, Credentials::default());
        let payload = service.search(br#"{"query":"rust"}"#).await.unwrap();
        assert_eq!(payload.as_ref(), raw);
    }

    #[actix_rt::test]
    async fn invalid_body_never_reaches_provider() {
        let mut client = MockProviderClient::new();
        client.expect_get().times(0);

        let service = service_with(client, Credentials::default());
        let err = service.search(b"{not json").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidBody(_)));
    }

    #[actix_rt::test]
    async fn transport_failure_is_reported() {
        let mut client = MockProviderClient::new();
        client
            .expect_get()
            .returning(|_, _| Err(SearchError::request("connection reset by peer")));

        let service = service_with(client, Credentials::default());
        let err = service.search(br#"{"query":"rust"}"#).await.unwrap_err();
        assert_eq!(err.message(), "connection reset by peer");
    }

    #[actix_rt::test]
    async fn non_json_provider_body_is_a_failure() {
        let mut client = MockProviderClient::new();
        client
            .expect_get()
            .returning(|_, _| Ok(Bytes::from_static(b"<html>Bad Gateway</html>")));

        let service = service_with(client, Credentials::default());
        let err = service.search(br#"{"query":"rust"}"#).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidProviderResponse(_)));
    }
}
