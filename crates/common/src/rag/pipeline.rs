//! The answer pipeline
//!
//! `Received -> Normalizing -> {EmptyQuery | Retrieving -> {NoResults |
//! NoContent | Synthesizing -> Answered} | Failed}`. There is no retry edge.

use super::context::{build_context, ContextStyle};
use super::outcome::{Advisory, Outcome};
use super::prompt::build_messages;
use super::query::normalize_query;
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::llm::{ChatCompleter, CompletionRequest, OpenAiCompatibleClient};
use crate::metrics;
use crate::search::{AzureSearchClient, RetrievedDocument, Retriever, SearchOptions};
use std::sync::Arc;
use std::time::Instant;

/// Fixed per-process pipeline settings
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Result cap for the search call
    pub top: usize,
    /// Context rendering
    pub style: ContextStyle,
    /// Completion model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top: crate::DEFAULT_TOP,
            style: ContextStyle::Plain,
            model: crate::DEFAULT_COMPLETION_MODEL.to_string(),
            temperature: 0.2,
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            top: config.search.top,
            style: if config.rag.include_sources {
                ContextStyle::Tagged
            } else {
                ContextStyle::Plain
            },
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
        }
    }

    /// Projection follows the context style: tagged context needs `source`
    pub fn search_options(&self) -> SearchOptions {
        match self.style {
            ContextStyle::Plain => SearchOptions::content_only(self.top),
            ContextStyle::Tagged => SearchOptions::with_sources(self.top),
        }
    }
}

/// Everything one run produced, for front ends that show intermediate steps
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Trimmed question
    pub query: String,
    /// Hits in service order
    pub documents: Vec<RetrievedDocument>,
    /// Assembled context, when the run got that far
    pub context: Option<String>,
    pub outcome: Outcome,
}

/// Retrieval-augmented answering over injected search and completion clients
pub struct RagPipeline {
    retriever: Arc<dyn Retriever>,
    completer: Arc<dyn ChatCompleter>,
    options: PipelineOptions,
}

impl RagPipeline {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        completer: Arc<dyn ChatCompleter>,
        options: PipelineOptions,
    ) -> Self {
        Self { retriever, completer, options }
    }

    /// Build the Azure search and OpenAI-compatible completion clients from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let retriever = Arc::new(AzureSearchClient::new(&config.search)?);
        let completer = Arc::new(OpenAiCompatibleClient::new(&config.llm)?);
        Ok(Self::new(retriever, completer, PipelineOptions::from_config(config)))
    }

    /// Answer a question
    pub async fn answer(&self, raw_query: &str) -> Outcome {
        self.run(raw_query).await.outcome
    }

    /// Answer a question, keeping the retrieved documents and context
    pub async fn run(&self, raw_query: &str) -> PipelineRun {
        let start = Instant::now();

        let mut run = PipelineRun {
            query: raw_query.trim().to_string(),
            documents: Vec::new(),
            context: None,
            outcome: Outcome::Advisory(Advisory::EmptyQuery),
        };

        if let Some(query) = normalize_query(raw_query) {
            let outcome = match self.retrieve_and_synthesize(query, &mut run).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        code = ?e.code(),
                        retriever = self.retriever.name(),
                        "Answer pipeline failed"
                    );
                    e.into()
                }
            };
            run.outcome = outcome;
        }

        metrics::record_outcome(run.outcome.status());
        tracing::info!(
            status = run.outcome.status(),
            query_len = run.query.len(),
            hits = run.documents.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Question processed"
        );

        run
    }

    async fn retrieve_and_synthesize(&self, query: &str, run: &mut PipelineRun) -> Result<Outcome> {
        let search_start = Instant::now();
        run.documents = self
            .retriever
            .retrieve(query, &self.options.search_options())
            .await?;
        metrics::record_search(search_start.elapsed().as_secs_f64(), run.documents.len());

        if run.documents.is_empty() {
            return Ok(Outcome::Advisory(Advisory::NoResults));
        }

        let Some(context) = build_context(&run.documents, self.options.style) else {
            return Ok(Outcome::Advisory(Advisory::NoContent));
        };

        let request = CompletionRequest {
            model: self.options.model.clone(),
            messages: build_messages(&context, query),
            temperature: self.options.temperature,
        };
        run.context = Some(context);

        let answer = self.synthesize(&request).await?;
        Ok(Outcome::Answered { answer })
    }

    async fn synthesize(&self, request: &CompletionRequest) -> Result<String> {
        let start = Instant::now();
        let result = self.completer.complete(request).await;
        metrics::record_completion(start.elapsed().as_secs_f64(), &request.model, result.is_ok());

        let text = result?;
        let answer = text.trim();
        if answer.is_empty() {
            tracing::warn!(model = %request.model, "Completion returned blank text");
        }
        Ok(answer.to_string())
    }
}

impl From<AppError> for Outcome {
    fn from(err: AppError) -> Self {
        Outcome::Failed { detail: err.to_string() }
    }
}
