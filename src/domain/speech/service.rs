use super::error::SpeechServiceError;
use super::language::{is_supported_language, DEFAULT_LANGUAGE};
use super::SpeechRequest;
use crate::domain::artifact::{Artifact, ArtifactId, ArtifactReader};
use crate::infrastructure::repositories::{ArtifactRepository, TtsRepository};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    artifact_repo: Arc<dyn ArtifactRepository>,
    synthesis_timeout: Duration,
}

impl SpeechService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        artifact_repo: Arc<dyn ArtifactRepository>,
        synthesis_timeout: Duration,
    ) -> Self {
        Self {
            tts_repo,
            artifact_repo,
            synthesis_timeout,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn text into a stored audio artifact
    ///
    /// This operation:
    /// - Validates that text is present and not blank
    /// - Calls the synthesis provider once, bounded by the synthesis timeout
    /// - Persists the audio under a freshly generated id
    ///
    /// Exactly one artifact exists afterwards on success, none on failure.
    async fn create_speech(&self, request: SpeechRequest) -> Result<Artifact, SpeechServiceError>;

    /// Open a previously created artifact by its `<id>.mp3` filename
    async fn open_artifact(&self, filename: &str) -> Result<ArtifactReader, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn create_speech(&self, request: SpeechRequest) -> Result<Artifact, SpeechServiceError> {
        // 1. Validate input
        let text = required_text(request.text)?;
        let language = request
            .language
            .filter(|language| !language.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        if !is_supported_language(&language) {
            // Left to the provider to accept or reject
            tracing::warn!(language = %language, "Language not in catalog, passing through");
        }

        // 2. Mint the artifact id
        let id = ArtifactId::generate();

        tracing::info!(
            artifact_id = %id,
            language = %language,
            text_length = text.len(),
            "Speech synthesis request"
        );

        // 3. Synthesize
        let audio = self.synthesize(&text, &language).await?;

        // 4. Persist; the id is only disclosed once the file is complete
        let artifact = self.artifact_repo.create(&id, &audio).await.map_err(|e| {
            tracing::error!(error = %e, artifact_id = %id, "Failed to persist artifact");
            SpeechServiceError::from(e)
        })?;

        tracing::info!(
            artifact_id = %artifact.id,
            audio_size_bytes = artifact.size_bytes,
            "Speech artifact created"
        );

        Ok(artifact)
    }

    async fn open_artifact(&self, filename: &str) -> Result<ArtifactReader, SpeechServiceError> {
        let id = ArtifactId::from_filename(filename).ok_or(SpeechServiceError::NotFound)?;
        Ok(self.artifact_repo.retrieve(&id).await?)
    }
}

impl SpeechService {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechServiceError> {
        let audio = tokio::time::timeout(
            self.synthesis_timeout,
            self.tts_repo.synthesize(text, language),
        )
        .await
        .map_err(|_| {
            tracing::error!(
                timeout_secs = self.synthesis_timeout.as_secs_f64(),
                language = language,
                "Speech synthesis timed out"
            );
            SpeechServiceError::SynthesisFailed("synthesis timed out".to_string())
        })??;

        if audio.is_empty() {
            return Err(SpeechServiceError::SynthesisFailed(
                "provider returned no audio".to_string(),
            ));
        }

        Ok(audio)
    }
}

/// Pull speakable text out of the request body.
///
/// Absent, null, false, zero and blank strings all count as missing.
/// Other numbers are spoken as written; any other shape is rejected.
fn required_text(text: Option<Value>) -> Result<String, SpeechServiceError> {
    let missing = || SpeechServiceError::Invalid("Text is required".to_string());

    match text {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => Ok(n.to_string()),
        None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_))
        | Some(Value::Number(_)) => Err(missing()),
        Some(_) => Err(SpeechServiceError::Invalid(
            "Text must be a string".to_string(),
        )),
    }
}
