//! # Common Test Utilities
//!
//! Helpers shared across the duolens test suites:
//!
//! - `MockAiProvider`: a deterministic, programmable stand-in for the remote
//!   completion service. Responses are keyed by a substring of the system
//!   prompt, and every call is recorded for later assertions.
//! - `helpers` (feature `pdf`): in-memory generation of small PDFs whose
//!   text survives extraction literally, for exercising the ingestion path
//!   without fixture files.

use async_trait::async_trait;
use duolens::errors::PromptError;
use duolens::providers::ai::AiProvider;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    credential_error: Arc<Mutex<Option<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Makes `verify_credential` fail with the given remote-style message.
    pub fn reject_credential(&self, message: &str) {
        *self.credential_error.lock().unwrap() = Some(message.to_string());
    }

    /// Retrieves the recorded (system, user) prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }

    async fn verify_credential(&self) -> Result<(), PromptError> {
        match self.credential_error.lock().unwrap().clone() {
            Some(message) => Err(PromptError::AiApi(message)),
            None => Ok(()),
        }
    }
}

// --- Test-Specific Helpers ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

    /// Generates a PDF with one page per entry in `pages`.
    ///
    /// Each page draws its text with the built-in Helvetica font and a
    /// literal string, so extraction recovers the input byte-for-byte.
    pub fn generate_test_pdf_pages(pages: &[&str]) -> Result<Vec<u8>> {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let font_id = Ref::new(3);
        let font_name = Name(b"F1");

        pdf.catalog(catalog_id).pages(page_tree_id);

        let mut next_id = 4;
        let mut page_ids = Vec::with_capacity(pages.len());
        let mut content_ids = Vec::with_capacity(pages.len());
        for _ in pages {
            page_ids.push(Ref::new(next_id));
            content_ids.push(Ref::new(next_id + 1));
            next_id += 2;
        }

        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(pages.len() as i32);

        for (idx, text) in pages.iter().enumerate() {
            let mut page = pdf.page(page_ids[idx]);
            page.media_box(Rect::new(0.0, 0.0, 595.0, 842.0));
            page.parent(page_tree_id);
            page.contents(content_ids[idx]);
            page.resources().fonts().pair(font_name, font_id);
            page.finish();

            let mut content = Content::new();
            content.begin_text();
            content.set_font(font_name, 14.0);
            content.next_line(108.0, 734.0);
            content.show(Str(text.as_bytes()));
            content.end_text();
            pdf.stream(content_ids[idx], &content.finish());
        }

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Ok(pdf.finish())
    }

    /// Generates a simple, single-page PDF with the given text content.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        generate_test_pdf_pages(&[text])
    }
}
