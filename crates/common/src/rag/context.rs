//! Context assembly from search hits

use crate::search::RetrievedDocument;

/// Separator between chunks: one blank line
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Label used when a tagged chunk has no source
pub const UNKNOWN_SOURCE: &str = "unknown";

/// How chunks are rendered into the context block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextStyle {
    /// Chunk text only
    #[default]
    Plain,
    /// `[Source {rank}: {source}]` line before each chunk
    Tagged,
}

/// Join the readable chunks in service order.
///
/// Returns `None` when no hit carries non-empty content. In tagged mode the
/// rank is the hit's 1-based position in the search response, so skipped
/// hits leave gaps in the numbering.
pub fn build_context(documents: &[RetrievedDocument], style: ContextStyle) -> Option<String> {
    let parts: Vec<String> = documents
        .iter()
        .enumerate()
        .filter_map(|(i, doc)| {
            let text = doc.readable_content()?;
            Some(match style {
                ContextStyle::Plain => text.to_string(),
                ContextStyle::Tagged => format!(
                    "[Source {}: {}]\n{}",
                    i + 1,
                    doc.source.as_deref().unwrap_or(UNKNOWN_SOURCE),
                    text
                ),
            })
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(CHUNK_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_joins_with_blank_line() {
        let docs = vec![
            RetrievedDocument::new("A is the first."),
            RetrievedDocument::new("B is the second."),
        ];
        assert_eq!(
            build_context(&docs, ContextStyle::Plain).unwrap(),
            "A is the first.\n\nB is the second."
        );
    }

    #[test]
    fn test_empty_content_is_skipped_without_reordering() {
        let docs = vec![
            RetrievedDocument::new("third-ranked text"),
            RetrievedDocument::default(),
            RetrievedDocument::new(""),
            RetrievedDocument::new("first-ranked text"),
        ];
        assert_eq!(
            build_context(&docs, ContextStyle::Plain).unwrap(),
            "third-ranked text\n\nfirst-ranked text"
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let docs = vec![RetrievedDocument::new("same"), RetrievedDocument::new("same")];
        assert_eq!(build_context(&docs, ContextStyle::Plain).unwrap(), "same\n\nsame");
    }

    #[test]
    fn test_no_readable_content() {
        let docs = vec![RetrievedDocument::default(), RetrievedDocument::new("")];
        assert_eq!(build_context(&docs, ContextStyle::Plain), None);
        assert_eq!(build_context(&[], ContextStyle::Tagged), None);
    }

    #[test]
    fn test_tagged_uses_rank_and_unknown_source() {
        let docs = vec![
            RetrievedDocument::new("Ostrich ignores deadlocks.").with_source("os-week5.pdf"),
            RetrievedDocument::new(""),
            RetrievedDocument::new("Cheap but unsafe."),
        ];
        assert_eq!(
            build_context(&docs, ContextStyle::Tagged).unwrap(),
            "[Source 1: os-week5.pdf]\nOstrich ignores deadlocks.\n\n[Source 3: unknown]\nCheap but unsafe."
        );
    }
}
