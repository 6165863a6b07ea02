use super::id::ArtifactId;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;

pub const ARTIFACT_EXTENSION: &str = "mp3";
pub const ARTIFACT_CONTENT_TYPE: &str = "audio/mpeg";

/// A generated audio file. The file's mtime is the only record of its age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    /// Relative URL clients use to download this artifact
    pub fn download_url(&self) -> String {
        format!("/download/{}", self.id.filename())
    }
}

/// Open handle on a stored artifact's bytes
pub struct ArtifactReader {
    pub id: ArtifactId,
    pub size_bytes: u64,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl std::fmt::Debug for ArtifactReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactReader")
            .field("id", &self.id)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}
