//! Maintainer responsiveness from the time taken to close issues and pull requests

use super::fetcher::{FailureLatency, measure};
use super::{MetricFetcher, MetricKind, MetricResult};
use crate::Result;
use crate::facts::RepoIdentity;
use crate::facts::hosting::Client;
use crate::facts::hosting::queries::{IssueNode, PullRequestNode, RESPONSIVENESS_QUERY, RepositoryData, ResponsivenessRepository};
use chrono::TimeDelta;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ohno::IntoAppError;

/// Average resolution time below which maintainers count as responsive
const RESPONSIVE_THRESHOLD: TimeDelta = TimeDelta::days(7);

const BOTH_RESPONSIVE: f64 = 1.0;
const ONE_RESPONSIVE: f64 = 0.7;
const NEITHER_RESPONSIVE: f64 = 0.3;

/// Average of the resolution times in milliseconds, `None` when nothing was resolved.
#[expect(clippy::cast_precision_loss, reason = "millisecond durations and item counts are far below 2^52")]
fn average_millis(resolutions: impl Iterator<Item = TimeDelta>) -> Option<f64> {
    let (count, total) = resolutions.fold((0_u64, 0.0_f64), |(count, total), delta| {
        (count + 1, total + delta.num_milliseconds() as f64)
    });

    (count > 0).then(|| total / count as f64)
}

/// Average time to close or merge a pull request, over the resolved ones.
#[must_use]
pub fn pull_request_average_millis(pull_requests: &[PullRequestNode]) -> Option<f64> {
    average_millis(
        pull_requests
            .iter()
            .filter_map(|pr| Some(pr.closed_at.or(pr.merged_at)? - pr.created_at)),
    )
}

/// Average time to close an issue, over the closed ones.
#[must_use]
pub fn issue_average_millis(issues: &[IssueNode]) -> Option<f64> {
    average_millis(issues.iter().filter_map(|issue| Some(issue.closed_at? - issue.created_at)))
}

/// Bucket the two averages: 1.0 when both are fast, 0.7 when one is, 0.3 otherwise.
#[must_use]
pub fn score(pull_request_average: Option<f64>, issue_average: Option<f64>) -> f64 {
    #[expect(clippy::cast_precision_loss, reason = "a week in milliseconds is far below 2^52")]
    let threshold = RESPONSIVE_THRESHOLD.num_milliseconds() as f64;
    let is_fast = |average: Option<f64>| average.is_some_and(|millis| millis < threshold);

    match (is_fast(pull_request_average), is_fast(issue_average)) {
        (true, true) => BOTH_RESPONSIVE,
        (true, false) | (false, true) => ONE_RESPONSIVE,
        (false, false) => NEITHER_RESPONSIVE,
    }
}

/// Scores responsiveness from the most recent issues and pull requests
#[derive(Debug, Clone)]
pub struct ResponsivenessMetric {
    hosting: Client,
}

impl ResponsivenessMetric {
    #[must_use]
    pub const fn new(hosting: Client) -> Self {
        Self { hosting }
    }

    async fn compute(&self, owner: &str, name: &str) -> Result<f64> {
        let data: RepositoryData<ResponsivenessRepository> = self
            .hosting
            .query(RESPONSIVENESS_QUERY, serde_json::json!({ "owner": owner, "name": name }))
            .await?;
        let repo = data
            .repository
            .into_app_err_with(|| format!("repository '{owner}/{name}' not found"))?;

        let pull_requests: Vec<_> = repo.pull_requests.edges.into_iter().map(|e| e.node).collect();
        let issues: Vec<_> = repo.issues.edges.into_iter().map(|e| e.node).collect();

        Ok(score(
            pull_request_average_millis(&pull_requests),
            issue_average_millis(&issues),
        ))
    }
}

impl MetricFetcher for ResponsivenessMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::ResponsiveMaintainer
    }

    fn fetch<'a>(&'a self, identity: &'a RepoIdentity) -> BoxFuture<'a, MetricResult> {
        measure(
            MetricKind::ResponsiveMaintainer,
            identity,
            FailureLatency::Measured,
            |owner, name| self.compute(owner, name),
        )
        .boxed()
    }
}
