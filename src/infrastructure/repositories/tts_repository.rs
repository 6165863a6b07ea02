use async_trait::async_trait;

/// Failure surfaced by a synthesis provider.
///
/// Provider-internal causes (unknown language, upstream outage, network
/// trouble) all collapse into this one type; callers never retry.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SynthesisError(pub String);

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate, a test stub, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into segments if needed
/// - Merging audio chunks into a single MP3 stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language code
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Arguments
    /// * `text` - Non-empty text to synthesize
    /// * `language` - Provider language code (`en`, `pt-br`, ...), passed through unvalidated
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError>;
}
