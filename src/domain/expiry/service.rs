use crate::domain::artifact::Artifact;
use crate::infrastructure::repositories::ArtifactRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Outcome of one sweep pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub scanned: usize,
    pub removed: usize,
    /// Abandoned partial writes cleaned up alongside artifacts
    pub staged_removed: usize,
    pub failed: usize,
}

/// Deletes artifacts older than the retention window
pub struct ExpiryService {
    artifact_repo: Arc<dyn ArtifactRepository>,
    retention: Duration,
}

impl ExpiryService {
    pub fn new(artifact_repo: Arc<dyn ArtifactRepository>, retention: Duration) -> Self {
        Self {
            artifact_repo,
            retention,
        }
    }

    /// An artifact expires once its age is strictly greater than the retention window.
    /// Artifacts dated in the future never expire.
    pub fn is_expired(&self, artifact: &Artifact, now: DateTime<Utc>) -> bool {
        match (now - artifact.created_at).to_std() {
            Ok(age) => age > self.retention,
            Err(_) => false,
        }
    }

    /// Run a single pass over a snapshot of the store.
    ///
    /// Errors never escape: a failed listing ends that part of the pass early,
    /// a failed removal is counted and the pass moves on to the next file.
    pub async fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        self.sweep_artifacts(now, &mut report).await;
        self.sweep_staged(now, &mut report).await;

        tracing::info!(
            scanned = report.scanned,
            removed = report.removed,
            staged_removed = report.staged_removed,
            failed = report.failed,
            retention_secs = self.retention.as_secs(),
            "Artifact sweep completed"
        );

        report
    }

    async fn sweep_artifacts(&self, now: DateTime<Utc>, report: &mut SweepReport) {
        let artifacts = match self.artifact_repo.list_all().await {
            Ok(artifacts) => artifacts,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list artifacts for sweep");
                report.failed += 1;
                return;
            }
        };

        report.scanned = artifacts.len();

        for artifact in artifacts.iter().filter(|a| self.is_expired(a, now)) {
            match self.artifact_repo.remove(&artifact.id).await {
                Ok(()) => {
                    tracing::debug!(
                        artifact_id = %artifact.id,
                        created_at = %artifact.created_at,
                        "Expired artifact removed"
                    );
                    report.removed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        artifact_id = %artifact.id,
                        "Failed to remove expired artifact"
                    );
                    report.failed += 1;
                }
            }
        }
    }

    /// Staging files share the retention window, so a write still in flight
    /// is never touched
    async fn sweep_staged(&self, now: DateTime<Utc>, report: &mut SweepReport) {
        let staged = match self.artifact_repo.list_staged().await {
            Ok(staged) => staged,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list staging files for sweep");
                report.failed += 1;
                return;
            }
        };

        for partial in staged.iter().filter(|p| self.is_expired(p, now)) {
            match self.artifact_repo.remove_staged(&partial.id).await {
                Ok(()) => {
                    tracing::debug!(artifact_id = %partial.id, "Abandoned staging file removed");
                    report.staged_removed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        artifact_id = %partial.id,
                        "Failed to remove abandoned staging file"
                    );
                    report.failed += 1;
                }
            }
        }
    }

    /// Sweep every `interval` until `shutdown` is cancelled.
    /// The first pass happens one full interval after start.
    pub async fn run(self: Arc<Self>, interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = interval.as_secs(),
            retention_secs = self.retention.as_secs(),
            "Artifact sweeper started"
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("Artifact sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.sweep(Utc::now()).await;
                }
            }
        }
    }
}
