//! Correctness from issue resolution, release cadence, and recent activity

use super::fetcher::{FailureLatency, measure};
use super::{MetricFetcher, MetricKind, MetricResult, round3};
use crate::Result;
use crate::facts::RepoIdentity;
use crate::facts::hosting::Client;
use crate::facts::hosting::queries::{CORRECTNESS_QUERY, CorrectnessRepository, RepositoryData};
use chrono::{SecondsFormat, TimeDelta, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ohno::IntoAppError;

/// Trailing window for counting recent commits
const RECENT_WINDOW_DAYS: i64 = 30;

/// Recent commit count at which the activity ratio saturates
const RECENT_COMMITS_FOR_FULL_SCORE: f64 = 30.0;

/// The counts correctness is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrectnessCounts {
    pub open_issues: u64,
    pub closed_issues: u64,
    pub open_pull_requests: u64,
    pub releases: u64,
    pub recent_commits: u64,
}

impl From<&CorrectnessRepository> for CorrectnessCounts {
    fn from(repo: &CorrectnessRepository) -> Self {
        Self {
            open_issues: repo.issues.total_count,
            closed_issues: repo.closed_issues.total_count,
            open_pull_requests: repo.pull_requests.total_count,
            releases: repo.releases.total_count,
            recent_commits: repo.recent_commits(),
        }
    }
}

#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Mean of the issue, release, and recent-commit ratios, rounded to 3 decimals.
#[must_use]
pub fn score(counts: &CorrectnessCounts) -> f64 {
    let issue_ratio = ratio(counts.closed_issues, counts.open_issues.saturating_add(counts.closed_issues));
    let release_ratio = ratio(counts.releases, counts.open_pull_requests.saturating_add(counts.releases));

    #[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
    let recent_commit_ratio = (counts.recent_commits as f64 / RECENT_COMMITS_FOR_FULL_SCORE).min(1.0);

    round3(((issue_ratio + release_ratio + recent_commit_ratio) / 3.0).clamp(0.0, 1.0))
}

/// Scores correctness from repository-wide counts
#[derive(Debug, Clone)]
pub struct CorrectnessMetric {
    hosting: Client,
}

impl CorrectnessMetric {
    #[must_use]
    pub const fn new(hosting: Client) -> Self {
        Self { hosting }
    }

    async fn compute(&self, owner: &str, name: &str) -> Result<f64> {
        let since = (Utc::now() - TimeDelta::days(RECENT_WINDOW_DAYS)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let data: RepositoryData<CorrectnessRepository> = self
            .hosting
            .query(
                CORRECTNESS_QUERY,
                serde_json::json!({ "owner": owner, "name": name, "since": since }),
            )
            .await?;
        let repo = data
            .repository
            .into_app_err_with(|| format!("repository '{owner}/{name}' not found"))?;

        Ok(score(&CorrectnessCounts::from(&repo)))
    }
}

impl MetricFetcher for CorrectnessMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Correctness
    }

    fn fetch<'a>(&'a self, identity: &'a RepoIdentity) -> BoxFuture<'a, MetricResult> {
        measure(MetricKind::Correctness, identity, FailureLatency::Measured, |owner, name| {
            self.compute(owner, name)
        })
        .boxed()
    }
}
