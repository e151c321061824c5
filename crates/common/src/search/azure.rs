//! Azure AI Search REST client

use super::{RetrievedDocument, Retriever, SearchOptions};
use crate::config::SearchConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the `docs/search` endpoint of one index
pub struct AzureSearchClient {
    client: reqwest::Client,
    endpoint: String,
    index: String,
    api_key: String,
    api_version: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SearchRequestBody<'a> {
    search: &'a str,
    query_type: &'static str,
    top: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_fields: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    value: Vec<RetrievedDocument>,
}

impl AzureSearchClient {
    /// Create a new search client
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| AppError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint, self.index, self.api_version
        )
    }
}

fn build_request_body<'a>(query: &'a str, options: &SearchOptions) -> SearchRequestBody<'a> {
    let join = |fields: &[String]| (!fields.is_empty()).then(|| fields.join(","));

    SearchRequestBody {
        search: query,
        query_type: "simple",
        top: options.top,
        select: join(&options.select),
        search_fields: join(&options.search_fields),
    }
}

#[async_trait]
impl Retriever for AzureSearchClient {
    async fn retrieve(&self, query: &str, options: &SearchOptions) -> Result<Vec<RetrievedDocument>> {
        let body = build_request_body(query, options);

        let response = self
            .client
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Search {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Search {
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        let parsed: SearchResponseBody = response.json().await.map_err(|e| AppError::Search {
            message: format!("Failed to parse response: {}", e),
        })?;

        tracing::debug!(
            index = %self.index,
            hits = parsed.value.len(),
            top = options.top,
            "Search completed"
        );

        Ok(parsed.value)
    }

    fn name(&self) -> &str {
        "azure-search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Stand-in search service that only accepts the key `secret`
    async fn spawn_search_service() -> String {
        let router = Router::new().route(
            "/indexes/os-notes/docs/search",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if headers.get("api-key").and_then(|v| v.to_str().ok()) != Some("secret") {
                    return (StatusCode::FORBIDDEN, "nope".to_string());
                }
                let hits = json!({
                    "value": [
                        {"@search.score": 2.5, "content": body["search"]},
                        {"@search.score": 1.0, "content": format!("top={}", body["top"])}
                    ]
                });
                (StatusCode::OK, hits.to_string())
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    fn config() -> SearchConfig {
        SearchConfig {
            endpoint: "https://notes.search.windows.net/".to_string(),
            api_key: "key".to_string(),
            index: "os-notes".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_url() {
        let client = AzureSearchClient::new(&config()).unwrap();
        assert_eq!(
            client.search_url(),
            "https://notes.search.windows.net/indexes/os-notes/docs/search?api-version=2023-11-01"
        );
    }

    #[test]
    fn test_content_only_body() {
        let body = build_request_body("ostrich algorithm", &SearchOptions::content_only(3));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "search": "ostrich algorithm",
                "queryType": "simple",
                "top": 3,
                "select": "content"
            })
        );
    }

    #[test]
    fn test_tagged_body_restricts_search_fields() {
        let body = build_request_body("deadlock", &SearchOptions::with_sources(3));
        assert_eq!(body.select.as_deref(), Some("content,source"));
        assert_eq!(body.search_fields.as_deref(), Some("content"));
    }

    #[test]
    fn test_response_parsing_keeps_service_order() {
        let parsed: SearchResponseBody = serde_json::from_str(
            r#"{
                "@odata.context": "ignored",
                "value": [
                    {"@search.score": 3.1, "content": "first"},
                    {"@search.score": 2.0, "content": "second", "source": "b.pdf"}
                ]
            }"#,
        )
        .unwrap();
        let contents: Vec<_> = parsed.value.iter().filter_map(|d| d.readable_content()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_search_error() {
        let client = AzureSearchClient::new(&SearchConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            index: "idx".to_string(),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .retrieve("anything", &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Search { .. }));
    }

    #[tokio::test]
    async fn test_key_and_body_reach_service() {
        let client = AzureSearchClient::new(&SearchConfig {
            endpoint: spawn_search_service().await,
            api_key: "secret".to_string(),
            index: "os-notes".to_string(),
            ..Default::default()
        })
        .unwrap();

        let hits = client
            .retrieve("page replacement", &SearchOptions::content_only(3))
            .await
            .unwrap();
        let contents: Vec<_> = hits.iter().filter_map(|d| d.readable_content()).collect();
        assert_eq!(contents, vec!["page replacement", "top=3"]);
        assert_eq!(hits[0].score, Some(2.5));
    }

    #[tokio::test]
    async fn test_error_status_is_search_error_with_body() {
        let client = AzureSearchClient::new(&SearchConfig {
            endpoint: spawn_search_service().await,
            api_key: "wrong".to_string(),
            index: "os-notes".to_string(),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .retrieve("anything", &SearchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Search service error: status 403: nope");
    }
}
