//! Validation result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of one quality-validation pass over a generated document.
///
/// Created fresh per [`validate`](crate::validator::QualityValidator::validate)
/// call and never mutated afterwards. Section sets are ordered so reports
/// and corrective prompts come out deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the document passes the acceptance gate
    pub is_valid: bool,
    /// Overall quality score in `[0, 100]`
    pub score: u8,
    /// Canonical names of required sections found in the document
    pub found_sections: BTreeSet<String>,
    /// Canonical names of required sections absent from the document
    pub missing_sections: BTreeSet<String>,
    /// Human-readable quality warnings, deterministic order
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Number of required sections the document is missing.
    pub fn missing_count(&self) -> usize {
        self.missing_sections.len()
    }
}
