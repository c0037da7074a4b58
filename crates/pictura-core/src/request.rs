//! Generation service request/response shapes and data-URL helpers.

use crate::error::EditorError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// JSON body posted to the image generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(rename = "userAPIKey")]
    pub user_api_key: String,
    #[serde(rename = "iterativeMode")]
    pub iterative_mode: bool,
}

impl GenerateRequest {
    /// Build a request, or `None` when the prompt is blank (nothing to submit).
    pub fn new(prompt: &str, user_api_key: &str, iterative_mode: bool) -> Option<Self> {
        if prompt.trim().is_empty() {
            return None;
        }
        Some(Self {
            prompt: prompt.to_string(),
            user_api_key: user_api_key.to_string(),
            iterative_mode,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub inference: f64,
}

/// Response from the generation endpoint: a base64 PNG plus timing info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub b64_json: String,
    #[serde(default)]
    pub timings: Timings,
}

impl ImageResponse {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(|e| EditorError::Decode(e.to_string()))
    }

    /// Decoded image bytes.
    pub fn image_bytes(&self) -> Result<Vec<u8>, EditorError> {
        decode_base64(&self.b64_json)
    }

    pub fn data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", self.b64_json)
    }
}

/// Encode bytes as a data URL with the given MIME type.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// The base64 payload of a data URL (everything after the first comma).
pub fn data_url_payload(url: &str) -> Result<&str, EditorError> {
    url.strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .map(|(_, payload)| payload)
        .ok_or_else(|| EditorError::Decode("not a data URL".to_string()))
}

/// Decode a base64 data URL into raw bytes.
pub fn from_data_url(url: &str) -> Result<Vec<u8>, EditorError> {
    decode_base64(data_url_payload(url)?)
}

/// Decode an image payload given either as a data URL or as bare base64
/// (the form the generation endpoint returns).
pub fn decode_image_payload(data: &str) -> Result<Vec<u8>, EditorError> {
    match data_url_payload(data) {
        Ok(payload) => decode_base64(payload),
        Err(_) => decode_base64(data),
    }
}

fn decode_base64(payload: &str) -> Result<Vec<u8>, EditorError> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| EditorError::Decode(e.to_string()))
}
