//! Search index access
//!
//! The index is an external, pre-built full-text store that is only ever
//! queried. `Retriever` is the seam the answer pipeline depends on;
//! `AzureSearchClient` talks to the Azure AI Search REST API.

mod azure;

pub use azure::AzureSearchClient;

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search hit, projected down to the fields the pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Chunk text
    #[serde(default)]
    pub content: Option<String>,

    /// Origin label (file name, lecture, ...)
    #[serde(default)]
    pub source: Option<String>,

    /// Relevance score assigned by the index
    #[serde(rename = "@search.score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Content if present and non-empty
    pub fn readable_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Search request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum hits to return
    pub top: usize,

    /// Fields projected into each hit
    pub select: Vec<String>,

    /// Fields the full-text query runs against (all searchable fields when empty)
    pub search_fields: Vec<String>,
}

impl SearchOptions {
    /// Project `content` only
    pub fn content_only(top: usize) -> Self {
        Self {
            top,
            select: vec!["content".to_string()],
            search_fields: Vec::new(),
        }
    }

    /// Project `content` and `source`, matching against `content`
    pub fn with_sources(top: usize) -> Self {
        Self {
            top,
            select: vec!["content".to_string(), "source".to_string()],
            search_fields: vec!["content".to_string()],
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::content_only(crate::DEFAULT_TOP)
    }
}

/// Common trait for search backends
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Run a full-text query and return hits in service order
    async fn retrieve(&self, query: &str, options: &SearchOptions) -> Result<Vec<RetrievedDocument>>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
