//! Text generation capability trait

use async_trait::async_trait;

use super::ProviderCore;
use crate::types::ProviderResponse;

/// Text generation over one provider backend.
#[async_trait]
pub trait TextCapability: ProviderCore {
    /// Generate text for `prompt` under `system_prompt`.
    ///
    /// `max_tokens` caps the completion length; `temperature` is passed
    /// through to the backend unchanged.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> ProviderResponse;
}
