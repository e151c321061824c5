//! In-memory search and completion backends for testing

use crate::errors::{AppError, Result};
use crate::llm::{ChatCompleter, CompletionRequest};
use crate::search::{RetrievedDocument, Retriever, SearchOptions};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Retriever returning a fixed hit list (or a fixed failure)
pub struct MockRetriever {
    result: std::result::Result<Vec<RetrievedDocument>, String>,
    calls: AtomicUsize,
}

impl MockRetriever {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { result: Ok(documents), calls: AtomicUsize::new(0) }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { result: Err(message.into()), calls: AtomicUsize::new(0) }
    }

    /// Number of `retrieve` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn retrieve(&self, _query: &str, options: &SearchOptions) -> Result<Vec<RetrievedDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(documents) => Ok(documents.iter().take(options.top).cloned().collect()),
            Err(message) => Err(AppError::Search { message: message.clone() }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Completer returning a fixed reply and recording every request
pub struct MockCompleter {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompleter {
    pub fn answering(reply: impl Into<String>) -> Self {
        Self { reply: Ok(reply.into()), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { reply: Err(message.into()), requests: Mutex::new(Vec::new()) }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl ChatCompleter for MockCompleter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(AppError::Completion { message: message.clone() }),
        }
    }
}
