//! EduRAG Common Library
//!
//! Shared code for the EduRAG gateway and command-line driver:
//! - Configuration management
//! - Error types and handling
//! - Metrics helpers
//! - Search index client (Azure AI Search)
//! - Chat-completion client (OpenAI-compatible, Groq by default)
//! - The retrieval-augmented answer pipeline

pub mod config;
pub mod errors;
pub mod llm;
pub mod metrics;
pub mod rag;
pub mod search;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use llm::ChatCompleter;
pub use rag::{Outcome, RagPipeline};
pub use search::Retriever;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "RAG Education Assistant";

/// Default completion model
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-8b-instant";

/// Default number of search hits fed into the prompt
pub const DEFAULT_TOP: usize = 3;
