use async_trait::async_trait;
use std::sync::Mutex;
use text_to_speech_api::infrastructure::repositories::{SynthesisError, TtsRepository};

/// Language code the stub provider refuses, like an upstream "language not supported"
pub const REJECTED_LANGUAGE: &str = "xx";

/// Synthesis provider that answers instantly with deterministic fake MP3 bytes
#[derive(Default)]
pub struct StubTtsRepository {
    calls: Mutex<Vec<(String, String)>>,
}

impl StubTtsRepository {
    pub fn audio_for(text: &str, language: &str) -> Vec<u8> {
        format!("ID3|{}|{}", language, text).into_bytes()
    }

    /// Every `(text, language)` pair received, in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsRepository for StubTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));

        if language == REJECTED_LANGUAGE {
            return Err(SynthesisError(format!(
                "Language not supported: {}",
                language
            )));
        }

        Ok(Self::audio_for(text, language))
    }
}
