//! OpenAI provider configuration.

use secrecy::SecretString;

/// Default chat completions endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for text generation.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI-specific configuration parameters
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication
    pub api_key: SecretString,
    /// Base URL for the OpenAI API
    pub base_url: String,
    /// Default model for text generation
    pub model: String,
    /// Model used for image analysis; falls back to `model` when unset
    pub vision_model: Option<String>,
    /// Maximum number of images accepted per vision request
    pub max_images: usize,
    /// HTTP timeout in seconds
    pub timeout: Option<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            vision_model: None,
            max_images: 5,
            timeout: Some(30),
        }
    }
}

impl OpenAiConfig {
    /// Create a new OpenAI configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Set the model to use for text generation
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a dedicated model for image analysis
    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = Some(model.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the maximum number of images per vision request
    pub const fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    /// Set HTTP timeout in seconds
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Model used for vision requests
    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.model)
    }
}
