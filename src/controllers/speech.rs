use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::{
    domain::{
        artifact::ARTIFACT_CONTENT_TYPE,
        speech::{language_catalog, SpeechRequest, SpeechResponse, SpeechService, SpeechServiceApi},
    },
    error::{AppError, AppResult},
};

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// POST /api/text-to-speech - Convert text to a downloadable MP3
    pub async fn create_speech(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SpeechRequest>, JsonRejection>,
    ) -> AppResult<Json<SpeechResponse>> {
        let Json(request) = payload?;

        let artifact = controller.speech_service.create_speech(request).await?;

        Ok(Json(SpeechResponse {
            success: true,
            file_url: artifact.download_url(),
        }))
    }

    /// GET /download/:filename - Stream a generated MP3 as an attachment
    pub async fn download(
        State(controller): State<Arc<SpeechController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let artifact = controller.speech_service.open_artifact(&filename).await?;

        let disposition = format!("attachment; filename=\"{}\"", artifact.id.filename());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(ARTIFACT_CONTENT_TYPE),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(artifact.size_bytes));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .map_err(|e| AppError::Internal(format!("Invalid disposition header: {}", e)))?,
        );

        tracing::debug!(
            artifact_id = %artifact.id,
            size_bytes = artifact.size_bytes,
            "Streaming artifact"
        );

        let body = Body::from_stream(ReaderStream::new(artifact.reader));
        Ok((StatusCode::OK, headers, body))
    }

    /// GET /api/languages - Supported language codes and their display names
    pub async fn list_languages() -> Json<&'static BTreeMap<&'static str, &'static str>> {
        Json(language_catalog())
    }
}
