//! # Default Persona Prompts
//!
//! The hardcoded prompt pairs for the two exploration personas. Each pair is
//! a fixed system instruction plus a user template with `{context}` and
//! `{prompt}` placeholders.

// --- Subjective Opinions ---

pub const OPINION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant interpreting subjective opinions about naturalness.";

pub const OPINION_USER_PROMPT: &str = r#"Context: {context}

Question: {prompt}

Please provide an answer based on the subjective opinions in the context. If the context doesn't directly answer the question, explain why and provide insights from the available subjective perspectives."#;

// --- Data-Driven Analysis ---

pub const DATA_SYSTEM_PROMPT: &str =
    "You are a scientific assistant providing objective, data-driven insights.";

pub const DATA_USER_PROMPT: &str = r#"Scientific Data Context: {context}

Question: {prompt}

Please provide a data-driven, objective answer based on the scientific context. Use quantitative insights and empirical observations to support your response."#;
