//! Wire types for the Gemini `generateContent` API.

use serde::Deserialize;
use serde_json::{Value, json};

/// Response body of `POST /models/{model}:generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u64>,
    pub candidates_token_count: Option<u64>,
    pub total_token_count: Option<u64>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = &candidate.content.as_ref()?.parts;

        let text: String = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Build an `inline_data` part carrying base64-encoded image bytes.
///
/// Unrecognized bytes fall back to `image/jpeg`, the format Telegram
/// delivers photos in.
pub fn inline_image_part(image: &[u8]) -> Value {
    use base64::Engine as _;

    let mime = infer::get(image)
        .map(|kind| kind.mime_type())
        .unwrap_or("image/jpeg");
    json!({
        "inline_data": {
            "mime_type": mime,
            "data": base64::engine::general_purpose::STANDARD.encode(image),
        }
    })
}
