use crate::error::AppError;
use crate::infrastructure::repositories::{ArtifactRepositoryError, SynthesisError};

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("artifact not found")]
    NotFound,
}

impl From<SynthesisError> for SpeechServiceError {
    fn from(err: SynthesisError) -> Self {
        SpeechServiceError::SynthesisFailed(err.to_string())
    }
}

impl From<ArtifactRepositoryError> for SpeechServiceError {
    fn from(err: ArtifactRepositoryError) -> Self {
        match err {
            ArtifactRepositoryError::NotFound => SpeechServiceError::NotFound,
            ArtifactRepositoryError::Io(e) => SpeechServiceError::Storage(e.to_string()),
        }
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::SynthesisFailed(msg) => AppError::ExternalService(msg),
            SpeechServiceError::Storage(msg) => AppError::Storage(msg),
            SpeechServiceError::NotFound => AppError::NotFound("File not found".to_string()),
        }
    }
}
