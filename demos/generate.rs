//! End-to-end generation demo
//!
//! Builds vision and text chains from whichever API keys are present in the
//! environment, then turns product photos into a listing spec with progress
//! printed to stdout.
//!
//! Usage:
//!   OPENAI_API_KEY=sk-... cargo run --example generate -- кружки photo1.jpg photo2.jpg

use std::sync::Arc;

use async_trait::async_trait;
use tzgen::prelude::*;

/// Prints every stage checkpoint as a chat client would.
struct StdoutProgress;

#[async_trait]
impl ProgressSink for StdoutProgress {
    async fn report(&self, stage: GenerationStage, substage: Option<&str>) {
        match substage {
            Some(sub) => println!("[{}/3] {} ({sub})", stage.index(), stage.label()),
            None => println!("[{}/3] {}", stage.index(), stage.label()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for better debugging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let category = match args.next() {
        Some(category) => category,
        None => {
            eprintln!("usage: generate <category> <photo>...");
            std::process::exit(2);
        }
    };
    let photos = args.map(std::fs::read).collect::<Result<Vec<_>, _>>()?;
    if photos.is_empty() {
        eprintln!("usage: generate <category> <photo>...");
        std::process::exit(2);
    }

    // Priority order: whichever key comes first is tried first, the other
    // serves as fallback.
    let mut vision: Vec<Arc<dyn VisionCapability>> = Vec::new();
    let mut text: Vec<Arc<dyn TextCapability>> = Vec::new();
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        let provider = Arc::new(OpenAiProvider::new(OpenAiConfig::new(key))?);
        vision.push(provider.clone());
        text.push(provider);
    }
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        let provider = Arc::new(GeminiProvider::new(GeminiConfig::new(key))?);
        vision.push(provider.clone());
        text.push(provider);
    }
    if vision.is_empty() {
        eprintln!("set OPENAI_API_KEY and/or GEMINI_API_KEY");
        std::process::exit(2);
    }

    let vision_chain = Arc::new(VisionChain::new(vision));
    let text_chain = Arc::new(TextChain::new(text));
    println!(
        "Providers: {} | photos: {} | category: {category}\n",
        vision_chain.provider_names().join(" -> "),
        photos.len()
    );

    let generator = Generator::builder()
        .vision_chain(vision_chain)
        .text_chain(text_chain)
        .build()?;

    let result = generator.generate(&photos, &category, &StdoutProgress).await;

    if !result.success {
        eprintln!(
            "generation failed: {}",
            result.error_message.unwrap_or_default()
        );
        std::process::exit(1);
    }

    println!(
        "\n=== ТЗ | score {} | extra attempts {} ===\n",
        result.quality_score, result.retry_count
    );
    println!("{}", result.tz_text);
    if let Some(validation) = &result.validation {
        for warning in &validation.warnings {
            println!("note: {warning}");
        }
    }

    Ok(())
}
