//! Integration tests for provider chain fallback behavior.

mod support;

use std::sync::Arc;
use std::time::Duration;

use tzgen::chain::{ChainConfig, TextChain, VisionChain};
use tzgen::error::GenError;
use tzgen::traits::{TextCapability, VisionCapability};
use tzgen::types::ProviderStatus;

use support::{ScriptedVision, SequenceText};

fn no_delay() -> ChainConfig {
    ChainConfig::new().with_retry_delay(Duration::ZERO)
}

#[tokio::test]
async fn fallback_exhausts_primary_before_secondary() {
    let alpha = Arc::new(SequenceText::failing("alpha"));
    let beta = Arc::new(SequenceText::new("beta", vec!["готово".to_string()]));
    let chain = TextChain::with_config(
        vec![
            alpha.clone() as Arc<dyn TextCapability>,
            beta.clone() as Arc<dyn TextCapability>,
        ],
        no_delay(),
    );

    let response = chain.generate("задание", "система", 1000, 0.7).await.unwrap();

    assert!(response.success);
    assert_eq!(response.provider_name, "beta");
    assert_eq!(response.content, "готово");
    // default config grants two attempts per provider
    assert_eq!(alpha.call_count(), 2);
    assert_eq!(beta.call_count(), 1);
}

#[tokio::test]
async fn success_on_first_provider_skips_the_rest() {
    let alpha = Arc::new(SequenceText::new("alpha", vec!["первый".to_string()]));
    let beta = Arc::new(SequenceText::new("beta", vec!["второй".to_string()]));
    let chain = TextChain::with_config(
        vec![
            alpha.clone() as Arc<dyn TextCapability>,
            beta.clone() as Arc<dyn TextCapability>,
        ],
        no_delay(),
    );

    let response = chain.generate("задание", "система", 1000, 0.7).await.unwrap();

    assert_eq!(response.provider_name, "alpha");
    assert_eq!(alpha.call_count(), 1);
    assert_eq!(beta.call_count(), 0);
}

#[tokio::test]
async fn exhaustion_error_names_every_provider_in_order() {
    let alpha = Arc::new(SequenceText::failing("alpha"));
    let beta = Arc::new(SequenceText::failing("beta"));
    let chain = TextChain::with_config(
        vec![
            alpha.clone() as Arc<dyn TextCapability>,
            beta.clone() as Arc<dyn TextCapability>,
        ],
        no_delay(),
    );

    let err = chain
        .generate("задание", "система", 1000, 0.7)
        .await
        .unwrap_err();

    assert!(matches!(err, GenError::TextGeneration(_)));
    let message = err.to_string();
    let alpha_at = message.find("alpha:").unwrap();
    let beta_at = message.find("beta:").unwrap();
    assert!(alpha_at < beta_at);
    assert!(message.contains("scripted text failure"));
}

#[tokio::test]
async fn fail_fast_grants_one_attempt_per_provider() {
    let alpha = Arc::new(SequenceText::failing("alpha"));
    let beta = Arc::new(SequenceText::new("beta", vec!["готово".to_string()]));
    let chain = TextChain::with_config(
        vec![
            alpha.clone() as Arc<dyn TextCapability>,
            beta.clone() as Arc<dyn TextCapability>,
        ],
        no_delay().with_fail_fast(true),
    );

    let response = chain.generate("задание", "система", 1000, 0.7).await.unwrap();

    assert_eq!(response.provider_name, "beta");
    assert_eq!(alpha.call_count(), 1);
}

#[tokio::test]
async fn vision_chain_recovers_after_primary_outage() {
    let broken = Arc::new(ScriptedVision::failing("vision-alpha"));
    let healthy = Arc::new(ScriptedVision::ok("vision-beta", "белая кружка на столе"));
    let chain = VisionChain::with_config(
        vec![
            broken.clone() as Arc<dyn VisionCapability>,
            healthy.clone() as Arc<dyn VisionCapability>,
        ],
        no_delay(),
    );

    let response = chain.analyze_image(&[1, 2, 3], "опиши товар").await.unwrap();

    assert!(response.success);
    assert_eq!(response.content, "белая кружка на столе");
    assert_eq!(response.provider_name, "vision-beta");
}

#[tokio::test]
async fn health_check_reports_each_provider_independently() {
    let alpha = Arc::new(
        SequenceText::new("alpha", vec!["ok".to_string()])
            .with_status(ProviderStatus::RateLimited),
    );
    let beta = Arc::new(SequenceText::new("beta", vec!["ok".to_string()]));
    let chain = TextChain::new(vec![
        alpha as Arc<dyn TextCapability>,
        beta as Arc<dyn TextCapability>,
    ]);

    let statuses = chain.health_check_all().await;

    assert_eq!(statuses.get("alpha"), Some(&ProviderStatus::RateLimited));
    assert_eq!(statuses.get("beta"), Some(&ProviderStatus::Available));
}
