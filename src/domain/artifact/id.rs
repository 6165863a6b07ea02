use super::model::ARTIFACT_EXTENSION;
use std::fmt;
use uuid::Uuid;

const MAX_ID_LEN: usize = 64;
const STAGING_SUFFIX: &str = ".part";

/// Opaque identifier of a generated audio file, used as its filename stem.
///
/// Generated ids are UUIDv7 values (millisecond timestamp + 74 random bits)
/// rendered as 32 lowercase hex characters. Ids parsed from client input are
/// restricted to ASCII alphanumerics and `-` so they can never name a path
/// outside the storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Mint a fresh id. Never fails and needs no shared counter.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Accept an existing id if it is safe to use as a filename stem
    pub fn parse(value: &str) -> Option<Self> {
        let valid = !value.is_empty()
            && value.len() <= MAX_ID_LEN
            && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');

        valid.then(|| Self(value.to_string()))
    }

    /// Parse a `<id>.mp3` filename, as found in download URLs and directory listings
    pub fn from_filename(filename: &str) -> Option<Self> {
        filename
            .strip_suffix(ARTIFACT_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .and_then(Self::parse)
    }

    /// Parse a `.<id>.mp3.part` staging filename left behind by an interrupted write
    pub fn from_staging_filename(filename: &str) -> Option<Self> {
        filename
            .strip_prefix('.')
            .and_then(|rest| rest.strip_suffix(STAGING_SUFFIX))
            .and_then(Self::from_filename)
    }

    pub fn filename(&self) -> String {
        format!("{}.{}", self.0, ARTIFACT_EXTENSION)
    }

    /// Hidden name the bytes are written under before they are published
    pub fn staging_filename(&self) -> String {
        format!(".{}{}", self.filename(), STAGING_SUFFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
