//! Generation pipeline result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::ValidationResult;

/// Final outcome of one generation or regeneration request.
///
/// The orchestrator never returns `Err`: pipeline failures come back as
/// `success = false` with an `error_message`, so callers handle exactly
/// one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Whether the pipeline produced a document
    pub success: bool,
    /// Analysis text the document was generated from; empty on failure
    pub photo_analysis: String,
    /// The generated document; empty on failure
    pub tz_text: String,
    /// Quality score of `tz_text`, 0 on failure
    pub quality_score: u8,
    /// Validation details for `tz_text`, when a document was produced
    pub validation: Option<ValidationResult>,
    /// Failure description; `None` on success
    pub error_message: Option<String>,
    /// Number of extra generation attempts spent (0 = first try accepted)
    pub retry_count: u32,
    /// Request id for correlating logs and stored results
    pub request_id: Uuid,
    /// When this result was produced
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Create a successful result from a validated document.
    pub fn completed(
        photo_analysis: impl Into<String>,
        tz_text: impl Into<String>,
        validation: ValidationResult,
        retry_count: u32,
    ) -> Self {
        Self {
            success: true,
            photo_analysis: photo_analysis.into(),
            tz_text: tz_text.into(),
            quality_score: validation.score,
            validation: Some(validation),
            error_message: None,
            retry_count,
            request_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Create a failed result carrying only the error description.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            photo_analysis: String::new(),
            tz_text: String::new(),
            quality_score: 0,
            validation: None,
            error_message: Some(message.into()),
            retry_count: 0,
            request_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}
