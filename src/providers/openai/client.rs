//! OpenAI provider implementation.
//!
//! One client covers both capabilities: chat completions for text
//! generation and the same endpoint with `image_url` content parts for
//! photo analysis.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use super::config::OpenAiConfig;
use super::types::{ChatCompletionResponse, image_part};
use crate::error::{GenError, classify_http_error};
use crate::traits::{ProviderCore, TextCapability, VisionCapability};
use crate::types::{ProviderResponse, ProviderStatus};

const PROVIDER_NAME: &str = "openai";

/// Token and sampling defaults for vision requests. Analysis output is
/// consumed by the next pipeline stage, so it stays short and factual.
const VISION_MAX_TOKENS: u32 = 2000;
const VISION_TEMPERATURE: f32 = 0.2;

/// OpenAI client implementing vision and text capabilities
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: OpenAiConfig,
    http_client: HttpClient,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: OpenAiConfig) -> Result<Self, GenError> {
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
    pub fn with_http_client(config: OpenAiConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, GenError> {
        let mut headers = reqwest::header::HeaderMap::new();

        let auth_value = format!("Bearer {}", self.config.api_key.expose_secret());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_value)
                .map_err(|e| GenError::ConfigurationError(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Build the user message content parts for a vision request,
    /// truncating to the configured image limit.
    fn vision_content(&self, images: &[Vec<u8>], prompt: &str) -> Vec<Value> {
        let limit = self.config.max_images.max(1);
        if images.len() > limit {
            tracing::warn!(
                provider = PROVIDER_NAME,
                supplied = images.len(),
                limit,
                "truncating images to provider limit"
            );
        }

        let mut parts = vec![json!({ "type": "text", "text": prompt })];
        parts.extend(images.iter().take(limit).map(|image| image_part(image)));
        parts
    }

    async fn chat(
        &self,
        model: &str,
        messages: Value,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<(String, HashMap<String, Value>), GenError> {
        let payload = json!({
            "model": model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let response = self
            .http_client
            .post(self.chat_url())
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

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)?;
        let content = parsed
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenError::ParseError("openai returned an empty completion".to_string()))?
            .to_string();

        let mut metadata = HashMap::new();
        if let Some(model) = &parsed.model {
            metadata.insert("model".to_string(), json!(model));
        }
        if let Some(choice) = parsed.choices.first()
            && let Some(reason) = &choice.finish_reason
        {
            metadata.insert("finish_reason".to_string(), json!(reason));
        }
        if let Some(usage) = &parsed.usage {
            if let Some(n) = usage.prompt_tokens {
                metadata.insert("prompt_tokens".to_string(), json!(n));
            }
            if let Some(n) = usage.completion_tokens {
                metadata.insert("completion_tokens".to_string(), json!(n));
            }
            if let Some(n) = usage.total_tokens {
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
impl ProviderCore for OpenAiProvider {
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
impl VisionCapability for OpenAiProvider {
    async fn analyze_image(&self, image: &[u8], prompt: &str) -> ProviderResponse {
        let images = [image.to_vec()];
        self.analyze_images(&images, prompt).await
    }

    async fn analyze_images(&self, images: &[Vec<u8>], prompt: &str) -> ProviderResponse {
        let messages = json!([{
            "role": "user",
            "content": self.vision_content(images, prompt),
        }]);

        let outcome = self
            .chat(
                self.config.vision_model(),
                messages,
                VISION_MAX_TOKENS,
                VISION_TEMPERATURE,
            )
            .await;
        self.envelope(outcome)
    }

    fn max_images(&self) -> usize {
        self.config.max_images
    }
}

#[async_trait]
impl TextCapability for OpenAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> ProviderResponse {
        let messages = json!([
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": prompt },
        ]);

        let outcome = self
            .chat(&self.config.model, messages, max_tokens, temperature)
            .await;
        self.envelope(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(config: OpenAiConfig) -> OpenAiProvider {
        OpenAiProvider::with_http_client(config, HttpClient::new())
    }

    #[test]
    fn chat_url_handles_trailing_slash() {
        let p = provider(OpenAiConfig::new("test-key").with_base_url("https://api.test.com/v1/"));
        assert_eq!(p.chat_url(), "https://api.test.com/v1/chat/completions");
        assert_eq!(p.models_url(), "https://api.test.com/v1/models");
    }

    #[test]
    fn vision_content_truncates_to_limit() {
        let p = provider(OpenAiConfig::new("test-key").with_max_images(2));
        let images = vec![vec![1u8]; 4];

        let parts = p.vision_content(&images, "опиши товар");
        // one text part plus two image parts
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
    }

    #[test]
    fn vision_model_falls_back_to_model() {
        let config = OpenAiConfig::new("test-key").with_model("gpt-4o-mini");
        assert_eq!(config.vision_model(), "gpt-4o-mini");

        let config = config.with_vision_model("gpt-4o");
        assert_eq!(config.vision_model(), "gpt-4o");
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let p = provider(OpenAiConfig::new("sk-super-secret"));
        let rendered = format!("{p:?}");
        assert!(!rendered.contains("sk-super-secret"));
    }
}
