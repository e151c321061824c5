//! Prompt template for grounded answers

use crate::llm::ChatMessage;

/// Phrase the model is told to use when the context is insufficient
pub const FALLBACK_PHRASE: &str = "I don't know based on the given material.";

/// System-role instruction sent with every question
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful educational assistant. \
Answer strictly using the provided context. \
If the answer is not present in the context, say \
'I don't know based on the given material.'";

/// Build the system + user message pair.
///
/// The output depends only on the inputs.
pub fn build_messages(context: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(format!("Context:\n{}\n\nQuestion:\n{}", context, query)),
    ]
}
