//! # Prompt Construction
//!
//! The fixed prompt templates for both question-answering personas, and the
//! substitution helper that fills them in.

pub mod personas;

/// Fills a persona user-prompt template.
///
/// Substitutes `{context}` with the (already truncated) document text and
/// `{prompt}` with the user's question. Rendering is pure: the same inputs
/// always produce the same prompt text.
pub fn render_user_prompt(template: &str, context: &str, question: &str) -> String {
    template
        .replace("{context}", context)
        .replace("{prompt}", question)
}
