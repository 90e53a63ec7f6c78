//! Provider response envelope and health status

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ErrorCategory, GenError};

/// Uniform envelope returned by every provider capability call.
///
/// Provider methods never fail at the type level: recoverable failures
/// (timeouts, HTTP errors, malformed payloads, empty completions) are
/// absorbed into `success = false` plus a human-readable `error_message`.
/// A failed response always carries empty `content`; the constructors
/// enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Whether the call produced usable content
    pub success: bool,
    /// Generated text; empty when `success` is false
    pub content: String,
    /// Name of the provider that produced this response
    pub provider_name: String,
    /// Failure description; `None` when `success` is true
    pub error_message: Option<String>,
    /// Provider-specific extras (token usage, finish reason, model id)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ProviderResponse {
    /// Create a successful response.
    pub fn success(provider: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            provider_name: provider.into(),
            error_message: None,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed response. Content is always empty.
    pub fn failure(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            provider_name: provider.into(),
            error_message: Some(message.into()),
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Attach a batch of metadata entries.
    pub fn with_metadata_map(mut self, entries: HashMap<String, serde_json::Value>) -> Self {
        self.metadata.extend(entries);
        self
    }

    /// Failure description, or an empty string for successful responses.
    pub fn error_text(&self) -> &str {
        self.error_message.as_deref().unwrap_or("")
    }
}

/// Health of a single provider, as reported by its probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderStatus {
    /// Probe succeeded
    Available,
    /// Probe failed with rate-limit or quota signals; likely transient
    RateLimited,
    /// Probe failed for any other reason
    Error,
}

impl ProviderStatus {
    /// Classify a probe failure.
    ///
    /// Typed rate-limit/quota errors map to `RateLimited`, as do errors
    /// whose message carries the usual rate/quota vocabulary. Everything
    /// else is `Error`.
    pub fn classify_failure(err: &GenError) -> Self {
        match err.category() {
            ErrorCategory::RateLimit | ErrorCategory::Quota => Self::RateLimited,
            _ => {
                let text = err.to_string().to_lowercase();
                if text.contains("rate limit") || text.contains("quota") || text.contains("429") {
                    Self::RateLimited
                } else {
                    Self::Error
                }
            }
        }
    }
}
