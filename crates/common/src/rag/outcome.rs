//! Pipeline outcomes
//!
//! Advisory outcomes are expected terminal states, not errors. Each outcome
//! carries a stable status code next to its human-readable message so
//! callers never need to match on message text.

use serde::Serialize;

/// Answer text returned when a dependency failed
pub const FAILURE_MESSAGE: &str = "Something went wrong on the server.";

/// Degenerate inputs or empty retrievals that end the run early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Question was empty after trimming
    EmptyQuery,
    /// Search returned no hits
    NoResults,
    /// Hits had no readable content
    NoContent,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::EmptyQuery => "Please ask a valid question.",
            Advisory::NoResults => "I couldn't find relevant information in the notes.",
            Advisory::NoContent => "Relevant documents were found, but no readable content.",
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Advisory::EmptyQuery => "empty_query",
            Advisory::NoResults => "no_results",
            Advisory::NoContent => "no_content",
        }
    }
}

/// Terminal state of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The completion service answered
    Answered { answer: String },
    /// Run ended early without calling the completion service
    Advisory(Advisory),
    /// Search, completion or response parsing failed
    Failed { detail: String },
}

impl Outcome {
    /// Machine-readable status code
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Answered { .. } => "answered",
            Outcome::Advisory(advisory) => advisory.status(),
            Outcome::Failed { .. } => "failed",
        }
    }

    /// Text shown to the user
    pub fn answer(&self) -> &str {
        match self {
            Outcome::Answered { answer } => answer,
            Outcome::Advisory(advisory) => advisory.message(),
            Outcome::Failed { .. } => FAILURE_MESSAGE,
        }
    }

    /// Failure description, only for `Failed`
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failed { detail } => Some(detail),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}
