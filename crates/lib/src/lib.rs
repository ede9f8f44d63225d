//! # duolens: Two-Lens Document Question Answering
//!
//! This crate provides the core pipeline for answering natural-language
//! questions about a document through an OpenAI-compatible completion API,
//! under one of two fixed personas: subjective-opinion interpretation or
//! data-driven analysis.

pub mod context;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::PromptError;
pub use types::{ExploreMode, Persona, QaClient, QaClientBuilder};

use tracing::{debug, info};

impl QaClient {
    /// Answers `question` about `document_text` under `persona`.
    ///
    /// The document text is truncated to the configured character budget,
    /// embedded in the persona's fixed prompt pair, and sent in a single
    /// non-streaming completion request. The model's first message is
    /// returned verbatim as the answer. Each question is independent: no
    /// prior question or answer is carried into the prompt.
    pub async fn answer(
        &self,
        persona: Persona,
        question: &str,
        document_text: &str,
    ) -> Result<String, PromptError> {
        let context = context::truncate(document_text, self.max_context_chars);
        info!(
            ?persona,
            context_chars = context.chars().count(),
            "Generating answer"
        );

        let system_prompt = persona.system_prompt();
        let user_prompt =
            prompts::render_user_prompt(persona.user_prompt_template(), &context, question);

        debug!(system_prompt = %system_prompt, "--> Sending prompts to AI provider");
        self.ai_provider.generate(system_prompt, &user_prompt).await
    }
}
