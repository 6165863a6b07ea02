pub mod id;
pub mod model;

pub use id::ArtifactId;
pub use model::{Artifact, ArtifactReader, ARTIFACT_CONTENT_TYPE, ARTIFACT_EXTENSION};
