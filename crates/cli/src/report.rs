//! Terminal rendering of a pipeline run

use edurag_common::rag::{PipelineRun, UNKNOWN_SOURCE};
use std::fmt::Write;

/// Characters of each document shown in the listing
pub const PREVIEW_CHARS: usize = 500;

const CONTEXT_BANNER: &str = "================ CONTEXT ================";
const ANSWER_BANNER: &str = "================ FINAL ANSWER ================";
const CONTEXT_RULE: &str = "=========================================";
const ANSWER_RULE: &str = "=============================================";

/// Documents, context and answer, in the order they were produced
pub fn render(run: &PipelineRun) -> String {
    let mut out = String::new();

    for (i, doc) in run.documents.iter().enumerate() {
        let preview: String = doc
            .content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        let _ = writeln!(out, "\nDocument {}", i + 1);
        let _ = writeln!(out, "Source: {}", doc.source.as_deref().unwrap_or(UNKNOWN_SOURCE));
        let _ = writeln!(out, "Content: {}", preview);
    }

    if let Some(context) = &run.context {
        let _ = writeln!(out, "\n{}\n\n{}\n\n{}", CONTEXT_BANNER, context, CONTEXT_RULE);
    }

    let _ = writeln!(out, "\n{}\n\n{}\n\n{}", ANSWER_BANNER, run.outcome.answer(), ANSWER_RULE);
    out
}

/// The answer alone
pub fn render_answer(run: &PipelineRun) -> String {
    format!("{}\n", run.outcome.answer())
}
