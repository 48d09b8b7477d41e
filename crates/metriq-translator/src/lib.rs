//! # Metriq Translator
//!
//! Client for the external language model that translates natural-language
//! prompts into structured metric queries, constrained by the projected
//! ontology grounding context.
//!
//! The [`Translator`] trait is the seam: the production implementation is
//! an OpenAI-compatible chat-completions client, and tests substitute a
//! scripted fake. The translator's output is free text; callers must run
//! it through the validation gate before compiling anything.

pub mod client;
pub mod error;
pub mod prompt;

use async_trait::async_trait;

pub use client::OpenAiTranslator;
pub use error::{Result, TranslatorError};
pub use prompt::{grounding_message, SYSTEM_PROMPT};

/// Translates a free-text prompt into structured-query text, grounded by
/// the projected ontology context.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns the raw model output, expected (but not trusted) to be the
    /// JSON interchange object.
    async fn translate(&self, grounding: &str, prompt: &str) -> Result<String>;
}
