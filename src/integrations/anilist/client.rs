// src/integrations/anilist/client.rs
//
// AniList Catalog Gateway
//
// ARCHITECTURE:
// - Thin pass-through: a GraphQL body goes in, raw JSON comes out
// - The Origin header is rewritten to the catalog's own origin
// - No validation of the payload shape (see query.rs for that)
// - Used by DiscoveryService and by the /graphql proxy route
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - No retries, no backoff: failures surface to the caller as-is
// - Non-2xx answers still return their JSON body; GraphQL errors
//   live in that body and are interpreted by the caller

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, Url};
use serde_json::Value;

use super::query::GraphQlRequest;
use crate::error::{AppError, AppResult};

/// Default public endpoint of the catalog
pub const ANILIST_GRAPHQL_URL: &str = "https://graphql.anilist.co";

/// Catalog answer as received: HTTP status plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: Value,
}

impl CatalogResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything able to answer a GraphQL request with raw JSON
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Post any JSON body to the catalog, unchanged
    async fn forward(&self, body: &Value) -> AppResult<CatalogResponse>;

    /// Run a built query, keeping only the body
    async fn execute(&self, request: &GraphQlRequest) -> AppResult<Value> {
        let body = serde_json::to_value(request)?;
        let response = self.forward(&body).await?;

        if !response.is_success() {
            warn!("AniList API returned status: {}", response.status);
        }

        Ok(response.body)
    }
}

/// AniList API Client
pub struct AniListClient {
    base_url: String,
    origin: String,
    http_client: Client,
}

impl AniListClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid catalog URL '{}': {}", base_url, e)))?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            origin: parsed.origin().ascii_serialization(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value sent in the `Origin` header
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[async_trait]
impl CatalogGateway for AniListClient {
    async fn forward(&self, body: &Value) -> AppResult<CatalogResponse> {
        debug!("POST {} variables={}", self.base_url, body["variables"]);

        let response = self
            .http_client
            .post(&self.base_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(header::ORIGIN, &self.origin)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("AniList API request failed: {}", e)))?;

        let status = response.status().as_u16();

        let body = response.json::<Value>().await.map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse AniList response: {}", e))
        })?;

        Ok(CatalogResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AniListClient::new(ANILIST_GRAPHQL_URL, Duration::from_secs(30)).unwrap();
        assert_eq!(client.base_url(), "https://graphql.anilist.co");
        assert_eq!(client.origin(), "https://graphql.anilist.co");
    }

    #[test]
    fn test_origin_strips_path() {
        let client = AniListClient::new("http://localhost:4000/graphql/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.origin(), "http://localhost:4000");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = AniListClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_response_success_range() {
        let ok = CatalogResponse { status: 200, body: Value::Null };
        let limited = CatalogResponse { status: 429, body: Value::Null };
        assert!(ok.is_success());
        assert!(!limited.is_success());
    }

    /// Answers every request with the same response
    struct FixedCatalog(CatalogResponse);

    #[async_trait]
    impl CatalogGateway for FixedCatalog {
        async fn forward(&self, _body: &Value) -> AppResult<CatalogResponse> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_execute_keeps_body_of_failed_status() {
        let gateway = FixedCatalog(CatalogResponse {
            status: 429,
            body: serde_json::json!({ "errors": [{ "message": "Too Many Requests" }] }),
        });
        let request = crate::integrations::anilist::query::build_popular_manga_query(2015, 1).unwrap();

        let body = gateway.execute(&request).await.unwrap();
        assert_eq!(body["errors"][0]["message"], "Too Many Requests");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = AniListClient::new("http://127.0.0.1:9/", Duration::from_secs(2)).unwrap();
        let request = crate::integrations::anilist::query::build_popular_manga_query(2015, 1).unwrap();

        let result = client.execute(&request).await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }
}
