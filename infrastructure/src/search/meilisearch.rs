//! Meilisearch HTTP client (`POST /indexes/{index}/search`)

use crate::config::FileSearchConfig;
use agentic_application::{SearchBackend, SearchError};
use agentic_domain::{SearchRequest, SearchResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

pub struct MeilisearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl MeilisearchClient {
    pub fn new(config: &FileSearchConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config.endpoint_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn search_url(&self, index: &str) -> String {
        format!("{}/indexes/{}/search", self.base_url, index)
    }
}

#[async_trait]
impl SearchBackend for MeilisearchClient {
    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        debug!(index, q = %request.q, filter = ?request.filter, "Search request");

        let mut builder = self
            .client
            .post(self.search_url(index))
            .timeout(self.timeout)
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(index, status = status.as_u16(), "Search request failed");
            return Err(SearchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        debug!(index, hits = result.hits.len(), total = result.total(), "Search response");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str, api_key: Option<&str>) -> MeilisearchClient {
        let config = FileSearchConfig {
            endpoint_url: format!("{}/", uri),
            api_key: api_key.map(str::to_string),
            ..Default::default()
        };
        MeilisearchClient::new(&config, reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_search_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/products/search"))
            .and(header("authorization", "Bearer masterKey"))
            .and(body_json(json!({
                "q": "lac parchet",
                "limit": 5,
                "filter": "available = true",
                "attributesToRetrieve": ["id", "name"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"id": 1, "name": "Lac Parchet"}],
                "estimatedTotalHits": 12,
                "processingTimeMs": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = SearchRequest::new("lac parchet")
            .with_limit(5)
            .with_filter("available = true")
            .retrieving(["id", "name"]);
        let response = client(&server.uri(), Some("masterKey"))
            .search("products", &request)
            .await
            .unwrap();

        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.total(), 12);
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("index_not_found"))
            .mount(&server)
            .await;

        let result = client(&server.uri(), None)
            .search("missing", &SearchRequest::new("x"))
            .await;
        assert_eq!(
            result.unwrap_err(),
            SearchError::Http {
                status: 404,
                body: "index_not_found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server.uri(), None)
            .search("products", &SearchRequest::new("x"))
            .await;
        assert!(matches!(result, Err(SearchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let result = client("http://127.0.0.1:1", None)
            .search("products", &SearchRequest::new("x"))
            .await;
        assert!(matches!(result, Err(SearchError::Transport(_))));
    }
}
