//! Core data types
//!
//! Data structures shared across the generation core, organized by
//! functionality. The public API is surfaced from this root module.
//!
//! - **`response`** - Provider call envelope and health status
//! - **`validation`** - Quality validation results
//! - **`generation`** - Final pipeline results

pub mod generation;
pub mod response;
pub mod validation;

// Re-export all types for convenience
pub use generation::*;
pub use response::*;
pub use validation::*;
