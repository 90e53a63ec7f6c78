//! Error types for the generation core.
//!
//! One `thiserror`-derived enum covers provider-level failures (HTTP,
//! auth, rate limits), payload problems and orchestration failures.
//! Capability methods absorb recoverable errors into a failed
//! [`ProviderResponse`](crate::types::ProviderResponse); the typed error
//! surfaces only where a whole chain is exhausted or configuration is bad.

use reqwest::header::HeaderMap;

/// Unified error type for provider calls and orchestration.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// HTTP transport error (connection refused, TLS failure, bad URL)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// API returned a non-success status that fits no narrower variant
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Authentication failed (401/403, bad or missing API key)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// Quota exhausted for the current billing period or project
    #[error("Quota exceeded: {0}")]
    QuotaExceededError(String),

    /// Request timed out
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Response body could not be parsed into the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Caller-supplied input is unusable (empty image set, oversized payload)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client construction or configuration problem
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Operation not supported by this provider
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Every provider in the vision chain failed; message carries the
    /// per-provider trail in attempt order
    #[error("Vision analysis failed: {0}")]
    VisionAnalysis(String),

    /// Every provider in the text chain failed
    #[error("Text generation failed: {0}")]
    TextGeneration(String),

    /// Generation pipeline failed outside the provider chains
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Reserved for validator-level failures; scoring itself never throws
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Coarse classification used for retry decisions and status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Quota,
    Client,
    Server,
    Network,
    Parsing,
    Orchestration,
    Other,
}

impl GenError {
    /// Create an API error without structured details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error carrying the provider's response body as details.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, when the error originated from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify into a coarse category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::RateLimitError(_) => ErrorCategory::RateLimit,
            Self::QuotaExceededError(_) => ErrorCategory::Quota,
            Self::TimeoutError(_) | Self::HttpError(_) => ErrorCategory::Network,
            Self::ParseError(_) => ErrorCategory::Parsing,
            Self::ApiError { code, .. } => {
                if (500..=599).contains(code) {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::Client
                }
            }
            Self::InvalidInput(_) | Self::ConfigurationError(_) | Self::UnsupportedOperation(_) => {
                ErrorCategory::Client
            }
            Self::VisionAnalysis(_)
            | Self::TextGeneration(_)
            | Self::Generation(_)
            | Self::Validation(_) => ErrorCategory::Orchestration,
            Self::InternalError(_) => ErrorCategory::Other,
        }
    }

    /// Whether another attempt has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Server | ErrorCategory::Network
        )
    }
}

impl From<reqwest::Error> for GenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Classify an HTTP failure into a typed [`GenError`].
///
/// Inspects status code, response body and headers to derive a narrower
/// variant (rate limit, quota, auth) instead of a generic `ApiError`.
/// Provider-agnostic heuristics; the quota/rate vocabulary covers the
/// common OpenAI and Google error envelopes.
pub fn classify_http_error(
    provider_id: &str,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
    fallback_message: Option<&str>,
) -> GenError {
    let lower = body_text.to_lowercase();
    // Body sample keeps error messages readable when providers return HTML pages
    let body_sample = body_text.chars().take(200).collect::<String>();

    if status == 429 {
        let retry_after = headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        return GenError::RateLimitError(format!(
            "provider={provider_id} http=429 retry_after={retry_after} body_sample={body_sample}"
        ));
    }

    if status == 401 {
        return GenError::AuthenticationError(format!(
            "provider={provider_id} unauthorized body_sample={body_sample}"
        ));
    }

    if status == 413 {
        return GenError::InvalidInput(format!(
            "provider={provider_id} http=413 payload too large body_sample={body_sample}"
        ));
    }

    // 403/400 carry quota and rate-limit envelopes on several backends
    if status == 403 || status == 400 {
        let quota_like = lower.contains("quota") || lower.contains("exceed");
        let rate_like = lower.contains("rate limit")
            || lower.contains("ratelimit")
            || lower.contains("resource_exhausted")
            || lower.contains("rate_limit_exceeded");
        if quota_like {
            return GenError::QuotaExceededError(format!("provider={provider_id} quota exceeded"));
        }
        if rate_like {
            return GenError::RateLimitError(format!("provider={provider_id} rate limited"));
        }
    }

    if status == 403 {
        return GenError::AuthenticationError(format!(
            "provider={provider_id} forbidden body_sample={body_sample}"
        ));
    }

    if status == 400 {
        return GenError::InvalidInput(format!(
            "provider={provider_id} bad request body_sample={body_sample}"
        ));
    }

    if (500..=599).contains(&status) {
        return GenError::api_error(status, fallback_message.unwrap_or("server error"));
    }

    let msg = if let Some(fallback) = fallback_message {
        fallback.to_string()
    } else if body_text.trim().is_empty() {
        "api error".to_string()
    } else {
        body_sample.clone()
    };
    let details = match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json) => serde_json::json!({
            "status": status,
            "provider": provider_id,
            "response": json,
        }),
        Err(_) => serde_json::json!({
            "status": status,
            "provider": provider_id,
            "raw": body_text,
        }),
    };
    GenError::api_error_with_details(status, msg, details)
}
