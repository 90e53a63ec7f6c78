//! Wire types for the OpenAI chat completions API.

use serde::Deserialize;
use serde_json::{Value, json};

/// Response body of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if the API returned one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Encode raw image bytes as a `data:` URL, sniffing the MIME type.
///
/// Telegram photos are JPEG in practice, so unrecognized bytes fall back
/// to `image/jpeg` rather than failing the request.
pub fn image_data_url(image: &[u8]) -> String {
    use base64::Engine as _;

    let mime = infer::get(image)
        .map(|kind| kind.mime_type())
        .unwrap_or("image/jpeg");
    let encoded = base64::engine::general_purpose::STANDARD.encode(image);
    format!("data:{mime};base64,{encoded}")
}

/// Build the `image_url` content part for a user message.
pub fn image_part(image: &[u8]) -> Value {
    json!({
        "type": "image_url",
        "image_url": { "url": image_data_url(image) }
    })
}
