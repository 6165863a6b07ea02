use super::tts_repository::{SynthesisError, TtsRepository};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// Google Translate refuses `q` values longer than 100 characters
const MAX_SEGMENT_CHARS: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?;:]+\s+").expect("sentence boundary pattern is valid"));

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the MP3 for one segment
    async fn call_google(
        &self,
        segment: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let segment_length = segment.chars().count();

        tracing::debug!(
            language = language,
            segment_index = index,
            segment_count = total,
            segment_length = segment_length,
            "Calling Google Translate TTS"
        );

        let response = self
            .http_client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::REFERER, "http://translate.google.com/")
            .query(&segment_query(segment, segment_length, language, index, total))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = language, "Google TTS request failed");
                SynthesisError(format!("Google TTS request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = %status.as_u16(),
                language = language,
                "Google TTS returned an error status"
            );
            return Err(SynthesisError(format!(
                "Google TTS returned status {} for language '{}'",
                status.as_u16(),
                language
            )));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError(format!("Failed to read audio stream: {}", e)))?;

        if audio_bytes.is_empty() {
            return Err(SynthesisError(
                "Google TTS returned an empty audio stream".to_string(),
            ));
        }

        Ok(audio_bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();

        let segments = split_into_segments(text);
        if segments.is_empty() {
            return Err(SynthesisError("No text to speak".to_string()));
        }

        let mut merged_audio = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            let audio_data = self
                .call_google(segment, language, index, segments.len())
                .await?;
            merged_audio.extend(audio_data);
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "google",
            language = language,
            latency_ms = duration.as_millis(),
            characters_count = text.chars().count(),
            segment_count = segments.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

/// Split text into segments of at most MAX_SEGMENT_CHARS characters.
/// Sentence boundaries are preferred, then word boundaries, then a hard cut.
fn split_into_segments(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= MAX_SEGMENT_CHARS {
        return vec![text.to_string()];
    }

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in SENTENCE_BOUNDARY.find_iter(text) {
        sentences.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut segments = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if sentence.chars().count() <= MAX_SEGMENT_CHARS {
            push_piece(&mut current, &mut segments, sentence);
            continue;
        }

        for word in sentence.split_whitespace() {
            if word.chars().count() > MAX_SEGMENT_CHARS {
                flush(&mut current, &mut segments);
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(MAX_SEGMENT_CHARS) {
                    segments.push(chunk.iter().collect());
                }
            } else {
                push_piece(&mut current, &mut segments, word);
            }
        }
    }

    flush(&mut current, &mut segments);
    segments
}

fn push_piece(current: &mut String, segments: &mut Vec<String>, piece: &str) {
    if !current.is_empty()
        && current.chars().count() + 1 + piece.chars().count() > MAX_SEGMENT_CHARS
    {
        flush(current, segments);
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(piece);
}

fn flush(current: &mut String, segments: &mut Vec<String>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Query string for one segment request. `textlen` is measured in characters.
fn segment_query(
    segment: &str,
    segment_length: usize,
    language: &str,
    index: usize,
    total: usize,
) -> [(&'static str, String); 7] {
    [
        ("ie", "UTF-8".to_string()),
        ("q", segment.to_string()),
        ("tl", language.to_string()),
        ("total", total.to_string()),
        ("idx", index.to_string()),
        ("textlen", segment_length.to_string()),
        ("client", "tw-ob".to_string()),
    ]
}
