pub mod error;
pub mod language;
pub mod service;

pub use error::SpeechServiceError;
pub use language::{is_supported_language, language_catalog, DEFAULT_LANGUAGE};
pub use service::{SpeechService, SpeechServiceApi};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for POST /api/text-to-speech
///
/// `text` is left untyped so that `0`, `false` and friends are reported as
/// missing text rather than as a deserialization error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Response for POST /api/text-to-speech
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub success: bool,
    pub file_url: String,
}
