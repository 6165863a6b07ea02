use super::artifact_repository::{ArtifactRepository, ArtifactRepositoryError};
use crate::domain::artifact::{Artifact, ArtifactId, ArtifactReader};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Stores each artifact as `<id>.mp3` inside one directory
pub struct FsArtifactRepository {
    root: PathBuf,
}

impl FsArtifactRepository {
    /// Open the store, creating the directory if it does not exist yet
    pub async fn init(root: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::info!(storage_dir = %root.display(), "Artifact storage ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.filename())
    }

    /// Hidden sibling the bytes are written to before the final rename
    fn staging_path(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.staging_filename())
    }

    async fn write_staged(&self, staging: &Path, audio: &[u8]) -> Result<(), std::io::Error> {
        let mut file = fs::File::create(staging).await?;
        file.write_all(audio).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Write, stat, then rename. Nothing is left at `target` unless every step succeeded.
    async fn stage_and_publish(
        &self,
        id: &ArtifactId,
        staging: &Path,
        target: &Path,
        audio: &[u8],
    ) -> Result<Artifact, std::io::Error> {
        self.write_staged(staging, audio).await?;

        // mtime survives the rename, so the staged metadata describes the artifact
        let metadata = fs::metadata(staging).await?;
        let artifact = Artifact {
            id: id.clone(),
            size_bytes: metadata.len(),
            created_at: modified_at(&metadata)?,
        };

        fs::rename(staging, target).await?;
        Ok(artifact)
    }

    /// Stat every regular file whose name `parse` accepts
    async fn scan(
        &self,
        parse: fn(&str) -> Option<ArtifactId>,
    ) -> Result<Vec<Artifact>, ArtifactRepositoryError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut artifacts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(id) = file_name.to_str().and_then(parse) else {
                continue;
            };

            // The file may vanish between listing and stat; skip it either way
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, artifact_id = %id, "Failed to stat artifact");
                    continue;
                }
            };

            match modified_at(&metadata) {
                Ok(created_at) => artifacts.push(Artifact {
                    id,
                    size_bytes: metadata.len(),
                    created_at,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, artifact_id = %id, "Failed to read artifact mtime");
                }
            }
        }

        Ok(artifacts)
    }

    async fn remove_path(&self, path: &Path) -> Result<(), ArtifactRepositoryError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ArtifactRepository for FsArtifactRepository {
    async fn create(
        &self,
        id: &ArtifactId,
        audio: &[u8],
    ) -> Result<Artifact, ArtifactRepositoryError> {
        let staging = self.staging_path(id);
        let target = self.artifact_path(id);

        match self.stage_and_publish(id, &staging, &target, audio).await {
            Ok(artifact) => Ok(artifact),
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&staging).await {
                    if cleanup.kind() != ErrorKind::NotFound {
                        tracing::warn!(
                            error = %cleanup,
                            path = %staging.display(),
                            "Failed to remove staging file"
                        );
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn retrieve(&self, id: &ArtifactId) -> Result<ArtifactReader, ArtifactRepositoryError> {
        let file = fs::File::open(self.artifact_path(id))
            .await
            .map_err(not_found_or_io)?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(ArtifactRepositoryError::NotFound);
        }

        Ok(ArtifactReader {
            id: id.clone(),
            size_bytes: metadata.len(),
            reader: Box::new(file),
        })
    }

    async fn list_all(&self) -> Result<Vec<Artifact>, ArtifactRepositoryError> {
        self.scan(ArtifactId::from_filename).await
    }

    async fn remove(&self, id: &ArtifactId) -> Result<(), ArtifactRepositoryError> {
        self.remove_path(&self.artifact_path(id)).await
    }

    async fn list_staged(&self) -> Result<Vec<Artifact>, ArtifactRepositoryError> {
        self.scan(ArtifactId::from_staging_filename).await
    }

    async fn remove_staged(&self, id: &ArtifactId) -> Result<(), ArtifactRepositoryError> {
        self.remove_path(&self.staging_path(id)).await
    }

    async fn is_writable(&self) -> bool {
        let check = self.root.join(format!(".ready-{}", Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&check, b"").await {
            tracing::warn!(error = %e, storage_dir = %self.root.display(), "Storage not writable");
            return false;
        }
        if let Err(e) = fs::remove_file(&check).await {
            tracing::warn!(error = %e, path = %check.display(), "Failed to remove readiness check file");
        }
        true
    }
}

fn modified_at(metadata: &std::fs::Metadata) -> Result<DateTime<Utc>, std::io::Error> {
    metadata.modified().map(DateTime::<Utc>::from)
}

fn not_found_or_io(err: std::io::Error) -> ArtifactRepositoryError {
    if err.kind() == ErrorKind::NotFound {
        ArtifactRepositoryError::NotFound
    } else {
        ArtifactRepositoryError::Io(err)
    }
}
