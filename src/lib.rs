//! # tzgen - Marketplace Listing Spec Generation Core
//!
//! tzgen turns product photos into marketplace listing specs (ТЗ documents
//! for Wildberries/Ozon card designers) through a provider-chained pipeline:
//! vision analysis, text generation, quality validation, and a bounded
//! best-result retry loop.
//!
#![deny(unsafe_code)]
//!
//! ## Features
//!
//! - **Capability Separation**: Vision and text generation are separate traits,
//!   so a provider implements only what its API actually supports.
//! - **Provider Chains**: Ordered fallback across providers with per-provider
//!   retries; one provider outage degrades quality of service, not availability.
//! - **Quality Gate**: Every generated document is scored against the required
//!   section list before it reaches the client; low scores trigger targeted
//!   regeneration with corrective instructions.
//! - **Uniform Envelopes**: Provider calls never surface transport errors to
//!   the orchestration layer; failures travel as data and feed the fallback walk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tzgen::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let openai = Arc::new(OpenAiProvider::new(OpenAiConfig::new("your-api-key"))?);
//!     let gemini = Arc::new(GeminiProvider::new(GeminiConfig::new("your-api-key"))?);
//!
//!     let vision = VisionChain::new(vec![
//!         openai.clone() as Arc<dyn VisionCapability>,
//!         gemini.clone() as Arc<dyn VisionCapability>,
//!     ]);
//!     let text = TextChain::new(vec![
//!         openai as Arc<dyn TextCapability>,
//!         gemini as Arc<dyn TextCapability>,
//!     ]);
//!
//!     let generator = Generator::builder()
//!         .vision_chain(Arc::new(vision))
//!         .text_chain(Arc::new(text))
//!         .build()?;
//!
//!     let photos = vec![std::fs::read("product.jpg")?];
//!     let result = generator.generate(&photos, "кружки", &NoProgress).await;
//!     if result.success {
//!         println!("score {}: {}", result.quality_score, result.tz_text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export the primary API surface at the crate root.
pub use chain::{ChainConfig, ProviderChain, TextChain, VisionChain};
pub use error::{ErrorCategory, GenError};
pub use orchestrator::{
    GenerationOptions, GenerationStage, Generator, GeneratorBuilder, NoProgress, ProgressSink,
};
pub use prompts::PromptBuilder;
pub use traits::{ProviderCore, TextCapability, VisionCapability};
pub use types::{GenerationResult, ProviderResponse, ProviderStatus, ValidationResult};
pub use validator::QualityValidator;

/// Convenience imports for typical usage.
pub mod prelude {
    pub use crate::chain::{ChainConfig, TextChain, VisionChain};
    pub use crate::error::GenError;
    pub use crate::orchestrator::{
        GenerationOptions, GenerationStage, Generator, NoProgress, ProgressSink,
    };
    pub use crate::prompts::PromptBuilder;
    pub use crate::providers::{GeminiConfig, GeminiProvider, OpenAiConfig, OpenAiProvider};
    pub use crate::traits::{ProviderCore, TextCapability, VisionCapability};
    pub use crate::types::{GenerationResult, ProviderResponse, ProviderStatus, ValidationResult};
    pub use crate::validator::QualityValidator;
}
