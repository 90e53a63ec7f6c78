//! Concrete provider implementations.
//!
//! Each provider implements [`ProviderCore`](crate::traits::ProviderCore)
//! plus the capability traits it supports, and converts every transport
//! or API failure into a [`ProviderResponse`](crate::types::ProviderResponse)
//! envelope at the trait boundary.

pub mod gemini;
pub mod openai;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};
