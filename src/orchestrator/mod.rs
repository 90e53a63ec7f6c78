//! Generation pipeline orchestration.
//!
//! Drives one request through four observable stages: photo analysis via
//! the vision chain, an audience-framing checkpoint, quality-gated text
//! generation with a bounded best-result retry loop, and a final check.
//! Progress is reported through [`ProgressSink`]; failures come back as
//! failed [`GenerationResult`](crate::types::GenerationResult)s, never as
//! `Err`.
//!
//! # Example
//!
//! ```rust,ignore
//! use tzgen::orchestrator::{Generator, NoProgress};
//!
//! let generator = Generator::builder()
//!     .vision_chain(vision)
//!     .text_chain(text)
//!     .build()?;
//! let result = generator.generate(&photos, "рюкзаки", &NoProgress).await;
//! ```

// Public modules
pub mod progress;

// Private modules
mod generator;


// Re-export public types
pub use generator::{GenerationOptions, Generator, GeneratorBuilder};
pub use progress::{GenerationStage, NoProgress, ProgressSink};
