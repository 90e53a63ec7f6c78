//! Gemini provider configuration.

use secrecy::SecretString;

/// Default Generative Language API base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for both vision and text requests.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini-specific configuration parameters
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: SecretString,
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Model to use; Gemini models are multimodal, so one model serves
    /// both capabilities
    pub model: String,
    /// Maximum number of images accepted per vision request
    pub max_images: usize,
    /// HTTP timeout in seconds
    pub timeout: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_images: 5,
            timeout: Some(30),
        }
    }
}

impl GeminiConfig {
    /// Create a new Gemini configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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
}
