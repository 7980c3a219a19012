//! Generative-language-model seam.

use async_trait::async_trait;

use crate::error::Result;

/// Generative-text-model collaborator, consumed only by the AI rescorer.
///
/// Implementations wrap a specific provider and handle its wire format;
/// the rescorer owns prompting, timeouts, and response parsing.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt under a token budget at a fixed temperature.
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}
