pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This is the minimal capability surface the answer pipeline needs: one
/// completion round-trip, and one lightweight credential probe. Everything
/// else (persona prompts, truncation, document handling) lives outside the
/// provider, so tests can substitute a deterministic stub.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// Exactly one non-streaming request; the result is the model's answer
    /// text.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;

    /// Checks that the provider's credential is accepted by the remote
    /// service, without generating anything.
    async fn verify_credential(&self) -> Result<(), PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
