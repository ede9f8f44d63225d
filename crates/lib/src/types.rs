//! # Core Types
//!
//! The two question-answering personas, the three-way exploration-mode state,
//! and the `QaClient` with its builder.

use crate::context::DEFAULT_MAX_CONTEXT_CHARS;
use crate::errors::PromptError;
use crate::prompts::personas::{
    DATA_SYSTEM_PROMPT, DATA_USER_PROMPT, OPINION_SYSTEM_PROMPT, OPINION_USER_PROMPT,
};
use crate::providers::ai::AiProvider;
use serde::{Deserialize, Serialize};

/// The two fixed question-answering personas.
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Interprets subjective opinions found in the document.
    Opinion,
    /// Grounds answers in quantitative, empirical content.
    Data,
}

impl Persona {
    /// The fixed system instruction for this persona.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::Opinion => OPINION_SYSTEM_PROMPT,
            Persona::Data => DATA_SYSTEM_PROMPT,
        }
    }

    /// The user-prompt template for this persona.
    pub fn user_prompt_template(&self) -> &'static str {
        match self {
            Persona::Opinion => OPINION_USER_PROMPT,
            Persona::Data => DATA_USER_PROMPT,
        }
    }

    /// The fixed heading shown above this persona's answers.
    pub fn heading(&self) -> &'static str {
        match self {
            Persona::Opinion => "Insight from Subjective Perspectives",
            Persona::Data => "Data-Driven Insight",
        }
    }

    /// The progress label shown while an answer is being generated.
    pub fn progress_label(&self) -> &'static str {
        match self {
            Persona::Opinion => "Analyzing subjective perspectives...",
            Persona::Data => "Analyzing scientific data...",
        }
    }
}

/// The three-way navigation state of the exploration surface.
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExploreMode {
    #[default]
    Home,
    Opinion,
    DataDriven,
}

impl ExploreMode {
    /// Applies a mode-selection event.
    ///
    /// Navigation is a pure function of (previous state, selected mode);
    /// there are no transition side effects and no coupling to any other
    /// session field.
    pub fn navigate(self, selected: ExploreMode) -> ExploreMode {
        selected
    }

    /// The persona behind this mode, if it is an analysis mode.
    pub fn persona(&self) -> Option<Persona> {
        match self {
            ExploreMode::Home => None,
            ExploreMode::Opinion => Some(Persona::Opinion),
            ExploreMode::DataDriven => Some(Persona::Data),
        }
    }
}

/// A client that answers questions about a document under a persona.
///
/// Built via [`QaClientBuilder`]. The client holds no document state: every
/// call to [`QaClient::answer`] receives the full document text and prepares
/// its context from scratch.
#[derive(Clone, Debug)]
pub struct QaClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) max_context_chars: usize,
}

/// Builder for [`QaClient`].
#[derive(Default)]
pub struct QaClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    max_context_chars: Option<usize>,
}

impl QaClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider. Required.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Overrides the default context character budget.
    pub fn max_context_chars(mut self, max_chars: usize) -> Self {
        self.max_context_chars = Some(max_chars);
        self
    }

    pub fn build(self) -> Result<QaClient, PromptError> {
        Ok(QaClient {
            ai_provider: self.ai_provider.ok_or(PromptError::MissingAiProvider)?,
            max_context_chars: self.max_context_chars.unwrap_or(DEFAULT_MAX_CONTEXT_CHARS),
        })
    }
}
