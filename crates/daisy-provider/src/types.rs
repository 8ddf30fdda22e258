//! Wire types for the completions and image-search endpoints.
//!
//! Response types make every field optional: a response that is valid JSON
//! but missing pieces is reported as an upstream format error by the caller
//! instead of failing deserialization with an opaque message.

use serde::{Deserialize, Serialize};

// =============================================================================
// CHAT COMPLETION TYPES
// =============================================================================

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub model: String,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }
}

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// =============================================================================
// IMAGE SEARCH TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub images_results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
pub struct ImageResult {
    #[serde(default)]
    pub thumbnail: Option<String>,
}

// =============================================================================
// RECORD SCHEMAS
// =============================================================================

/// One element of the remedies array.
#[derive(Debug, Deserialize)]
pub struct RawRemedy {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub uses: Option<String>,
    pub healing_properties: Option<String>,
}

/// One element of the care array. `care` is a list of objects whose keys
/// are care topics; key order is kept (`preserve_order`).
#[derive(Debug, Deserialize)]
pub struct RawCare {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub care: Option<Vec<serde_json::Map<String, serde_json::Value>>>,
    pub climate: Option<String>,
}
