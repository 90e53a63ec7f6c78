//! Capability trait definitions (modular)
//!
//! Traits are organized under `traits/*` and re-exported here for a
//! stable API. A concrete provider implements [`ProviderCore`] plus
//! whichever capability traits its backend supports; chains and the
//! orchestrator only ever see the trait objects.

use async_trait::async_trait;

use crate::types::ProviderStatus;

// Re-export modular traits
mod vision;
pub use vision::VisionCapability;

mod text;
pub use text::TextCapability;

/// Identity and health surface shared by all providers.
#[async_trait]
pub trait ProviderCore: Send + Sync {
    /// Stable provider name used in logs, response envelopes and error trails.
    fn name(&self) -> &str;

    /// Probe the backend with a minimal real call and classify the outcome.
    async fn health_check(&self) -> ProviderStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderResponse;
    use std::sync::Arc;

    // Capability traits must stay usable behind Arc<dyn ...>
    #[test]
    fn capability_traits_are_object_safe() {
        let _: Option<Arc<dyn VisionCapability>> = None;
        let _: Option<Arc<dyn TextCapability>> = None;
        let _: Option<Arc<dyn ProviderCore>> = None;
    }

    struct EchoProvider;

    #[async_trait]
    impl ProviderCore for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn health_check(&self) -> ProviderStatus {
            ProviderStatus::Available
        }
    }

    #[async_trait]
    impl TextCapability for EchoProvider {
        async fn generate(
            &self,
            prompt: &str,
            _system_prompt: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> ProviderResponse {
            ProviderResponse::success(self.name(), prompt.to_string())
        }
    }

    #[tokio::test]
    async fn trait_objects_work_across_tasks() {
        let provider: Arc<dyn TextCapability> = Arc::new(EchoProvider);
        let mut handles = Vec::new();
        for i in 0..4 {
            let p = provider.clone();
            handles.push(tokio::spawn(async move {
                p.generate(&format!("prompt {i}"), "", 100, 0.7).await
            }));
        }
        for handle in handles {
            let resp = handle.await.unwrap();
            assert!(resp.success);
            assert_eq!(resp.provider_name, "echo");
        }
    }
}
