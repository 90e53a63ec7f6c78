//! Vision capability trait

use async_trait::async_trait;

use super::ProviderCore;
use crate::types::ProviderResponse;

/// Image analysis over one provider backend.
///
/// Failures never surface as `Err`; see [`ProviderResponse`] for the
/// envelope contract.
#[async_trait]
pub trait VisionCapability: ProviderCore {
    /// Analyze a single image against the given instruction prompt.
    async fn analyze_image(&self, image: &[u8], prompt: &str) -> ProviderResponse;

    /// Analyze several images in one request.
    ///
    /// Implementations silently truncate the set to [`max_images`](Self::max_images)
    /// and log a warning when they do.
    async fn analyze_images(&self, images: &[Vec<u8>], prompt: &str) -> ProviderResponse;

    /// Largest image count a single request may carry.
    fn max_images(&self) -> usize {
        5
    }
}
