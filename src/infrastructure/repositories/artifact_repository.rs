use crate::domain::artifact::{Artifact, ArtifactId, ArtifactReader};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactRepositoryError {
    #[error("artifact not found")]
    NotFound,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository for generated audio artifacts.
///
/// The store is the only source of artifact metadata: there is no index,
/// listing the storage area is how artifacts are discovered.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Persist `audio` under `id`. The artifact only becomes visible to
    /// `retrieve` and `list_all` once fully written.
    async fn create(&self, id: &ArtifactId, audio: &[u8])
        -> Result<Artifact, ArtifactRepositoryError>;

    /// Open an artifact for reading. Returns `NotFound` if it does not exist.
    async fn retrieve(&self, id: &ArtifactId) -> Result<ArtifactReader, ArtifactRepositoryError>;

    /// Snapshot of every stored artifact
    async fn list_all(&self) -> Result<Vec<Artifact>, ArtifactRepositoryError>;

    /// Delete an artifact. Removing an absent artifact succeeds.
    async fn remove(&self, id: &ArtifactId) -> Result<(), ArtifactRepositoryError>;

    /// Partial writes left behind by interrupted `create` calls. Never
    /// returned by `list_all` or `retrieve`.
    async fn list_staged(&self) -> Result<Vec<Artifact>, ArtifactRepositoryError>;

    /// Delete a partial write. Removing an absent one succeeds.
    async fn remove_staged(&self, id: &ArtifactId) -> Result<(), ArtifactRepositoryError>;

    /// Whether a new artifact could be written right now
    async fn is_writable(&self) -> bool;
}
