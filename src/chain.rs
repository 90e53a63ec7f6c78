//! Provider chains: ordered fallback with per-provider retry
//!
//! A chain holds same-capability providers in priority order. Each call
//! walks the chain: a provider gets a bounded number of attempts with a
//! fixed delay between them, then the chain falls through to the next
//! provider. The first successful envelope wins and no later provider is
//! contacted. When every provider is exhausted the chain returns a single
//! typed error whose message preserves per-provider attribution in
//! attempt order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, join_all};
use tokio::time::sleep;

use crate::error::GenError;
use crate::traits::{ProviderCore, TextCapability, VisionCapability};
use crate::types::{ProviderResponse, ProviderStatus};

/// Retry and fallback configuration for one chain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Attempts each provider gets before the chain falls through (≥ 1)
    pub max_retries_per_provider: u32,
    /// Fixed delay between attempts on the same provider
    pub retry_delay: Duration,
    /// When set, every provider gets exactly one attempt
    pub fail_fast: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_retries_per_provider: 2,
            retry_delay: Duration::from_secs(1),
            fail_fast: false,
        }
    }
}

impl ChainConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attempts per provider.
    pub const fn with_max_retries_per_provider(mut self, attempts: u32) -> Self {
        self.max_retries_per_provider = attempts;
        self
    }

    /// Set the fixed delay between attempts on the same provider.
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Enable or disable fail-fast mode.
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Effective attempts per provider. A zero retry setting still means
    /// one attempt; fail-fast overrides everything down to one.
    pub fn attempts_per_provider(&self) -> u32 {
        if self.fail_fast {
            1
        } else if self.max_retries_per_provider == 0 {
            1
        } else {
            self.max_retries_per_provider
        }
    }
}

/// Same-capability providers in priority order plus retry configuration.
///
/// The two instantiations used by the orchestrator are [`VisionChain`]
/// and [`TextChain`]; both are cheap to share behind `Arc`.
pub struct ProviderChain<C: ProviderCore + ?Sized> {
    providers: Vec<Arc<C>>,
    config: ChainConfig,
}

/// Fallback chain of vision-capable providers.
pub type VisionChain = ProviderChain<dyn VisionCapability>;
/// Fallback chain of text-capable providers.
pub type TextChain = ProviderChain<dyn TextCapability>;

impl<C: ProviderCore + ?Sized> ProviderChain<C> {
    /// Create a chain with the default [`ChainConfig`].
    pub fn new(providers: Vec<Arc<C>>) -> Self {
        Self::with_config(providers, ChainConfig::default())
    }

    /// Create a chain with an explicit config.
    pub fn with_config(providers: Vec<Arc<C>>, config: ChainConfig) -> Self {
        Self { providers, config }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Probe every provider concurrently.
    ///
    /// Probes are independent; one provider's failure never aborts the
    /// others. Returns a name → status map.
    pub async fn health_check_all(&self) -> HashMap<String, ProviderStatus> {
        let probes = self.providers.iter().map(|p| async move {
            let status = p.health_check().await;
            (p.name().to_string(), status)
        });
        join_all(probes).await.into_iter().collect()
    }

    /// Shared fallback driver.
    ///
    /// `wrap` turns the joined failure trail into the chain's typed error;
    /// `call` invokes the capability method on one provider.
    async fn run_chain<'a>(
        &'a self,
        label: &'static str,
        wrap: fn(String) -> GenError,
        call: impl Fn(&'a C) -> BoxFuture<'a, ProviderResponse>,
    ) -> Result<ProviderResponse, GenError> {
        if self.providers.is_empty() {
            return Err(wrap(format!("no providers configured for {label} chain")));
        }

        let attempts = self.config.attempts_per_provider();
        let mut trail: Vec<String> = Vec::new();

        for (index, provider) in self.providers.iter().enumerate() {
            let name = provider.name();
            for attempt in 1..=attempts {
                let response = call(provider.as_ref()).await;
                if response.success {
                    if index > 0 || attempt > 1 {
                        tracing::info!(
                            chain = label,
                            provider = name,
                            attempt,
                            "chain recovered after fallback"
                        );
                    }
                    return Ok(response);
                }

                let message = response.error_text().to_string();
                tracing::warn!(
                    chain = label,
                    provider = name,
                    attempt,
                    "provider attempt failed: {message}"
                );
                trail.push(format!("{name}: {message}"));

                if attempt < attempts {
                    sleep(self.config.retry_delay).await;
                }
            }
            // Provider exhausted; fall through to the next one
        }

        tracing::warn!(chain = label, "all providers exhausted");
        Err(wrap(trail.join("; ")))
    }
}

impl ProviderChain<dyn VisionCapability> {
    /// Analyze a single image, falling back through the chain.
    pub async fn analyze_image<'a>(
        &'a self,
        image: &'a [u8],
        prompt: &'a str,
    ) -> Result<ProviderResponse, GenError> {
        self.run_chain("vision", GenError::VisionAnalysis, move |p| {
            p.analyze_image(image, prompt)
        })
        .await
    }

    /// Analyze several images in one request, falling back through the chain.
    pub async fn analyze_images<'a>(
        &'a self,
        images: &'a [Vec<u8>],
        prompt: &'a str,
    ) -> Result<ProviderResponse, GenError> {
        self.run_chain("vision", GenError::VisionAnalysis, move |p| {
            p.analyze_images(images, prompt)
        })
        .await
    }
}

impl ProviderChain<dyn TextCapability> {
    /// Generate text, falling back through the chain.
    pub async fn generate<'a>(
        &'a self,
        prompt: &'a str,
        system_prompt: &'a str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<ProviderResponse, GenError> {
        self.run_chain("text", GenError::TextGeneration, move |p| {
            p.generate(prompt, system_prompt, max_tokens, temperature)
        })
        .await
    }
}

static_assertions::assert_impl_all!(VisionChain: Send, Sync);
static_assertions::assert_impl_all!(TextChain: Send, Sync);
