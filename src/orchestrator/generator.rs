//! Generation pipeline driver.

use std::sync::Arc;

use uuid::Uuid;

use super::progress::{GenerationStage, ProgressSink};
use crate::chain::{TextChain, VisionChain};
use crate::error::GenError;
use crate::prompts::PromptBuilder;
use crate::types::{GenerationResult, ValidationResult};
use crate::validator::QualityValidator;

/// Options for the generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Extra generation attempts after the first one
    pub max_retries: u32,
    /// Completion budget for the text stage
    pub max_tokens: u32,
    /// Sampling temperature for the text stage
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_tokens: 8000,
            temperature: 0.7,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extra generation attempts after the first one.
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the completion budget for the text stage.
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature for the text stage.
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Orchestrates one generation request: photo analysis, audience framing
/// checkpoint, quality-gated generation with best-result retries, final
/// check.
///
/// All per-request state is local to the call; a `Generator` can serve
/// any number of concurrent requests. [`generate`](Self::generate) and
/// [`regenerate`](Self::regenerate) never return `Err`: every pipeline
/// failure is converted into a failed [`GenerationResult`] at the public
/// boundary.
pub struct Generator {
    vision: Arc<VisionChain>,
    text: Arc<TextChain>,
    validator: QualityValidator,
    prompts: PromptBuilder,
    options: GenerationOptions,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The chains hold trait objects without a `Debug` bound
        f.debug_struct("Generator")
            .field("validator", &self.validator)
            .field("prompts", &self.prompts)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Explicit wiring for [`Generator`]. Chains are required; validator,
/// prompt builder and options fall back to their defaults.
#[derive(Default)]
pub struct GeneratorBuilder {
    vision: Option<Arc<VisionChain>>,
    text: Option<Arc<TextChain>>,
    validator: Option<QualityValidator>,
    prompts: Option<PromptBuilder>,
    options: GenerationOptions,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vision_chain(mut self, chain: Arc<VisionChain>) -> Self {
        self.vision = Some(chain);
        self
    }

    pub fn text_chain(mut self, chain: Arc<TextChain>) -> Self {
        self.text = Some(chain);
        self
    }

    pub fn validator(mut self, validator: QualityValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = Some(prompts);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Generator, GenError> {
        let vision = self.vision.ok_or_else(|| {
            GenError::ConfigurationError("generator requires a vision chain".into())
        })?;
        let text = self.text.ok_or_else(|| {
            GenError::ConfigurationError("generator requires a text chain".into())
        })?;
        Ok(Generator {
            vision,
            text,
            validator: self.validator.unwrap_or_default(),
            prompts: self.prompts.unwrap_or_default(),
            options: self.options,
        })
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Run the full pipeline for a set of product photos.
    ///
    /// Stages reported to `progress`: analyzing photos, audience framing,
    /// generating (repeated per attempt with a "попытка N" substage),
    /// final check.
    pub async fn generate(
        &self,
        photos: &[Vec<u8>],
        category: &str,
        progress: &dyn ProgressSink,
    ) -> GenerationResult {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, category, photos = photos.len(), "generation started");

        let mut result = match self.run_pipeline(photos, category, progress).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%request_id, "generation failed: {err}");
                GenerationResult::failed(err.to_string())
            }
        };
        result.request_id = request_id;
        tracing::info!(
            %request_id,
            success = result.success,
            score = result.quality_score,
            retries = result.retry_count,
            "generation finished"
        );
        result
    }

    /// Rework an existing document according to user feedback.
    ///
    /// Skips the vision stage: the caller supplies the stored photo
    /// analysis. One generation call, no retry loop; the feedback is
    /// sanitized before it reaches the prompt.
    pub async fn regenerate(
        &self,
        photo_analysis: &str,
        category: &str,
        previous_tz: &str,
        feedback: &str,
        progress: &dyn ProgressSink,
    ) -> GenerationResult {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, category, "regeneration started");

        let mut result = match self
            .run_regeneration(photo_analysis, category, previous_tz, feedback, progress)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%request_id, "regeneration failed: {err}");
                GenerationResult::failed(err.to_string())
            }
        };
        result.request_id = request_id;
        result
    }

    async fn run_pipeline(
        &self,
        photos: &[Vec<u8>],
        category: &str,
        progress: &dyn ProgressSink,
    ) -> Result<GenerationResult, GenError> {
        progress.report(GenerationStage::AnalyzingPhotos, None).await;
        let analysis = self.analyze_photos(photos).await?;

        // Pure checkpoint: the audience portrait is part of the generated
        // document, not a separate call
        progress.report(GenerationStage::AudienceFraming, None).await;

        let (tz_text, validation, retry_count) = self
            .generate_with_retries(category, &analysis, progress)
            .await?;

        progress.report(GenerationStage::FinalCheck, None).await;

        Ok(GenerationResult::completed(
            analysis,
            tz_text,
            validation,
            retry_count,
        ))
    }

    async fn analyze_photos(&self, photos: &[Vec<u8>]) -> Result<String, GenError> {
        if photos.is_empty() {
            return Err(GenError::InvalidInput("no photos supplied".into()));
        }
        let prompt = self.prompts.analysis_prompt();
        let response = if photos.len() == 1 {
            self.vision.analyze_image(&photos[0], &prompt).await?
        } else {
            self.vision.analyze_images(photos, &prompt).await?
        };
        Ok(response.content)
    }

    /// Bounded best-result retry loop.
    ///
    /// Attempt 0 uses the base prompt; later attempts append corrective
    /// instructions derived from the best validation so far. A valid
    /// attempt returns immediately. Otherwise the highest-scoring attempt
    /// is remembered (strictly greater replaces, ties keep the earlier
    /// one) and returned after the final attempt. An error escapes only
    /// when no attempt ever produced a document.
    async fn generate_with_retries(
        &self,
        category: &str,
        analysis: &str,
        progress: &dyn ProgressSink,
    ) -> Result<(String, ValidationResult, u32), GenError> {
        let system = self.prompts.system_prompt();
        let mut best: Option<(String, ValidationResult)> = None;

        for attempt in 0..=self.options.max_retries {
            let substage = format!("попытка {}", attempt + 1);
            progress
                .report(GenerationStage::Generating, Some(&substage))
                .await;

            let prompt = if attempt == 0 {
                self.prompts.generation_prompt(category, analysis)
            } else {
                let corrections = best
                    .as_ref()
                    .map(|(_, validation)| self.prompts.corrective_instructions(validation))
                    .unwrap_or_default();
                self.prompts.improved_prompt(category, analysis, &corrections)
            };

            let response = match self
                .text
                .generate(
                    &prompt,
                    &system,
                    self.options.max_tokens,
                    self.options.temperature,
                )
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    if attempt == self.options.max_retries {
                        if let Some((text, validation)) = best {
                            tracing::info!(
                                score = validation.score,
                                "text chain failed on final attempt, returning best result"
                            );
                            return Ok((text, validation, attempt));
                        }
                        return Err(err);
                    }
                    tracing::warn!(attempt, "text chain failed, retrying: {err}");
                    continue;
                }
            };

            let validation = self.validator.validate(&response.content);
            tracing::info!(
                attempt,
                score = validation.score,
                valid = validation.is_valid,
                provider = %response.provider_name,
                "generation attempt validated"
            );

            if validation.is_valid {
                return Ok((response.content, validation, attempt));
            }

            let improves = best
                .as_ref()
                .map_or(true, |(_, current)| validation.score > current.score);
            if improves {
                best = Some((response.content, validation));
            }
        }

        match best {
            Some((text, validation)) => {
                tracing::info!(
                    score = validation.score,
                    "retries exhausted, returning best result"
                );
                Ok((text, validation, self.options.max_retries))
            }
            None => Err(GenError::TextGeneration(
                "no attempt produced a document".into(),
            )),
        }
    }

    async fn run_regeneration(
        &self,
        photo_analysis: &str,
        category: &str,
        previous_tz: &str,
        feedback: &str,
        progress: &dyn ProgressSink,
    ) -> Result<GenerationResult, GenError> {
        progress.report(GenerationStage::Generating, None).await;

        let prompt =
            self.prompts
                .regeneration_prompt(category, photo_analysis, previous_tz, feedback);
        let system = self.prompts.system_prompt();
        let response = self
            .text
            .generate(
                &prompt,
                &system,
                self.options.max_tokens,
                self.options.temperature,
            )
            .await?;

        let validation = self.validator.validate(&response.content);
        tracing::info!(score = validation.score, "regenerated document validated");

        progress.report(GenerationStage::FinalCheck, None).await;

        Ok(GenerationResult::completed(
            photo_analysis,
            response.content,
            validation,
            0,
        ))
    }
}

static_assertions::assert_impl_all!(Generator: Send, Sync);
