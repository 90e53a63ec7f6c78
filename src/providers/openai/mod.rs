//! OpenAI provider: chat completions for text, image content parts for vision.

pub mod client;
pub mod config;
pub mod types;

pub use client::OpenAiProvider;
pub use config::OpenAiConfig;
