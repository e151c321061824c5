//! Retrieval-augmented answering
//!
//! The pipeline is linear and runs once per question:
//! - Query normalization (trim, reject empty)
//! - Context retrieval from the search index
//! - Answer synthesis through the completion service
//!
//! Every run ends in an [`Outcome`]; front ends turn that into their own
//! output shape.

mod context;
mod outcome;
mod pipeline;
mod prompt;
mod query;
pub mod mock;

pub use context::{build_context, ContextStyle, CHUNK_SEPARATOR, UNKNOWN_SOURCE};
pub use outcome::{Advisory, Outcome, FAILURE_MESSAGE};
pub use pipeline::{PipelineOptions, PipelineRun, RagPipeline};
pub use prompt::{build_messages, FALLBACK_PHRASE, SYSTEM_INSTRUCTION};
pub use query::normalize_query;
