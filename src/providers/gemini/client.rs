//! Gemini provider implementation.
//!
//! Gemini models are multimodal, so a single `generateContent` endpoint
//! serves both photo analysis and text generation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use super::config::GeminiConfig;
use super::types::{GenerateContentResponse, inline_image_part};
use crate::error::{GenError, classify_http_error};
use crate::traits::{ProviderCore, TextCapability, VisionCapability};
use crate::types::{ProviderResponse, ProviderStatus};

const PROVIDER_NAME: &str = "gemini";

const VISION_MAX_TOKENS: u32 = 2000;
const VISION_TEMPERATURE: f32 = 0.2;

/// Gemini client implementing vision and text capabilities
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    config: GeminiConfig,
    http_client: HttpClient,
}

impl GeminiProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, GenError> {
        let timeout = Duration::from_secs(config.timeout.unwrap_or(30));

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GenError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a new provider with a custom HTTP client
    pub fn with_http_client(config: GeminiConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, GenError> {
        let mut headers = reqwest::header::HeaderMap::new();

        headers.insert(
            "x-goog-api-key",
            reqwest::header::HeaderValue::from_str(self.config.api_key.expose_secret())
                .map_err(|e| GenError::ConfigurationError(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Build the user content parts for a vision request, truncating to
    /// the configured image limit.
    fn vision_parts(&self, images: &[Vec<u8>], prompt: &str) -> Vec<Value> {
        let limit = self.config.max_images.max(1);
        if images.len() > limit {
            tracing::warn!(
                provider = PROVIDER_NAME,
                supplied = images.len(),
                limit,
                "truncating images to provider limit"
            );
        }

        let mut parts = vec![json!({ "text": prompt })];
        parts.extend(images.iter().take(limit).map(|image| inline_image_part(image)));
        parts
    }

    async fn generate_content(
        &self,
        parts: Vec<Value>,
        system_instruction: Option<&str>,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<(String, HashMap<String, Value>), GenError> {
        let mut payload = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "maxOutputTokens": max_tokens,
                "temperature": temperature,
            },
        });
        if let Some(system) = system_instruction {
            payload["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let response = self
            .http_client
            .post(self.generate_url())
            .headers(self.build_headers()?)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(classify_http_error(
                PROVIDER_NAME,
                status.as_u16(),
                &response_text,
                &response_headers,
                None,
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)?;
        let content = parsed
            .first_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                GenError::ParseError("gemini returned an empty completion".to_string())
            })?;

        let mut metadata = HashMap::new();
        if let Some(candidate) = parsed.candidates.first()
            && let Some(reason) = &candidate.finish_reason
        {
            metadata.insert("finish_reason".to_string(), json!(reason));
        }
        if let Some(usage) = &parsed.usage_metadata {
            if let Some(n) = usage.prompt_token_count {
                metadata.insert("prompt_tokens".to_string(), json!(n));
            }
            if let Some(n) = usage.candidates_token_count {
                metadata.insert("completion_tokens".to_string(), json!(n));
            }
            if let Some(n) = usage.total_token_count {
                metadata.insert("total_tokens".to_string(), json!(n));
            }
        }

        Ok((content, metadata))
    }

    fn envelope(&self, outcome: Result<(String, HashMap<String, Value>), GenError>) -> ProviderResponse {
        match outcome {
            Ok((content, metadata)) => {
                ProviderResponse::success(PROVIDER_NAME, content).with_metadata_map(metadata)
            }
            Err(err) => {
                tracing::warn!(provider = PROVIDER_NAME, error = %err, "request failed");
                ProviderResponse::failure(PROVIDER_NAME, err.to_string())
            }
        }
    }
}

#[async_trait]
impl ProviderCore for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn health_check(&self) -> ProviderStatus {
        let headers = match self.build_headers() {
            Ok(headers) => headers,
            Err(err) => return ProviderStatus::classify_failure(&err),
        };

        let response = self
            .http_client
            .get(self.models_url())
            .headers(headers)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => ProviderStatus::Available,
            Ok(resp) => {
                let status = resp.status().as_u16();
                let response_headers = resp.headers().clone();
                let body = resp.text().await.unwrap_or_default();
                let err =
                    classify_http_error(PROVIDER_NAME, status, &body, &response_headers, None);
                ProviderStatus::classify_failure(&err)
            }
            Err(e) => ProviderStatus::classify_failure(&GenError::from(e)),
        }
    }
}

#[async_trait]
impl VisionCapability for GeminiProvider {
    async fn analyze_image(&self, image: &[u8], prompt: &str) -> ProviderResponse {
        let images = [image.to_vec()];
        self.analyze_images(&images, prompt).await
    }

    async fn analyze_images(&self, images: &[Vec<u8>], prompt: &str) -> ProviderResponse {
        let parts = self.vision_parts(images, prompt);
        let outcome = self
            .generate_content(parts, None, VISION_MAX_TOKENS, VISION_TEMPERATURE)
            .await;
        self.envelope(outcome)
    }

    fn max_images(&self) -> usize {
        self.config.max_images
    }
}

#[async_trait]
impl TextCapability for GeminiProvider {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> ProviderResponse {
        let parts = vec![json!({ "text": prompt })];
        let outcome = self
            .generate_content(parts, Some(system_prompt), max_tokens, temperature)
            .await;
        self.envelope(outcome)
    }
}
