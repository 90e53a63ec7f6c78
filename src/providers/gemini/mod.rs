//! Gemini provider: one multimodal `generateContent` endpoint for both capabilities.

pub mod client;
pub mod config;
pub mod types;

pub use client::GeminiProvider;
pub use config::GeminiConfig;
