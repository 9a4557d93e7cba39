//! Ramp-up difficulty from the span of recent commit history

use super::fetcher::{FailureLatency, measure};
use super::{LOG_TARGET, MetricFetcher, MetricKind, MetricResult, round3};
use crate::Result;
use crate::facts::{CloneDir, RepoIdentity, git};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::io;
use std::path::{Path, PathBuf};

/// Histories shorter than this count as easy to ramp up on
const FULL_SCORE_SPAN_DAYS: f64 = 30.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Score the span between the earliest and the latest commit.
///
/// Spans under 30 days score 1, longer spans decay logarithmically towards 0. An empty
/// history scores 0.
#[must_use]
pub fn score(commits: &[DateTime<Utc>]) -> f64 {
    let (Some(earliest), Some(latest)) = (commits.iter().min(), commits.iter().max()) else {
        return 0.0;
    };

    #[expect(clippy::cast_precision_loss, reason = "commit spans are far below 2^52 seconds")]
    let span_days = (*latest - *earliest).num_seconds() as f64 / SECONDS_PER_DAY;
    if span_days < FULL_SCORE_SPAN_DAYS {
        1.0
    } else {
        round3((1.0 - (span_days / FULL_SCORE_SPAN_DAYS).log10()).max(0.0))
    }
}

/// Combine the analysis outcome with the result of deleting the clone.
///
/// A failed deletion is logged and never changes the outcome.
fn settle(outcome: Result<f64>, cleanup: io::Result<()>, clone_path: &Path) -> Result<f64> {
    if let Err(e) = cleanup {
        log::warn!(target: LOG_TARGET, "Could not delete clone directory '{}': {e}", clone_path.display());
    }

    outcome
}

/// Scores ramp-up by shallow-cloning the repository and inspecting its commit history
#[derive(Debug, Clone)]
pub struct RampUpMetric {
    git_base_url: String,
    clone_root: PathBuf,
    depth: u32,
}

impl RampUpMetric {
    /// `git_base_url` is the prefix clone URLs are built from, e.g. `https://github.com`.
    #[must_use]
    pub fn new(git_base_url: impl Into<String>, clone_root: impl Into<PathBuf>, depth: u32) -> Self {
        Self {
            git_base_url: git_base_url.into(),
            clone_root: clone_root.into(),
            depth,
        }
    }

    #[must_use]
    pub fn clone_url(&self, owner: &str, name: &str) -> String {
        format!("{}/{owner}/{name}.git", self.git_base_url.trim_end_matches('/'))
    }

    async fn compute(&self, owner: &str, name: &str) -> Result<f64> {
        let clone_dir = CloneDir::create(&self.clone_root, name)?;
        let clone_path = clone_dir.path().to_path_buf();

        let outcome = self.analyze(&self.clone_url(owner, name), &clone_path).await;
        let cleanup = clone_dir.release().await;

        settle(outcome, cleanup, &clone_path)
    }

    async fn analyze(&self, repo_url: &str, clone_path: &Path) -> Result<f64> {
        git::shallow_clone(repo_url, clone_path, self.depth).await?;
        let commits = git::commit_timestamps(clone_path).await?;
        Ok(score(&commits))
    }
}

impl MetricFetcher for RampUpMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::RampUp
    }

    fn fetch<'a>(&'a self, identity: &'a RepoIdentity) -> BoxFuture<'a, MetricResult> {
        measure(MetricKind::RampUp, identity, FailureLatency::Measured, |owner, name| self.compute(owner, name)).boxed()
    }
}
