pub mod artifact_repository;
pub mod fs_artifact_repository;
pub mod google_tts_repository;
pub mod tts_repository;

pub use artifact_repository::{ArtifactRepository, ArtifactRepositoryError};
pub use fs_artifact_repository::FsArtifactRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use tts_repository::{SynthesisError, TtsRepository};
