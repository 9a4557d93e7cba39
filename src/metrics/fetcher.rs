use super::{LOG_TARGET, MetricKind, MetricResult};
use crate::Result;
use crate::facts::RepoIdentity;
use futures_util::future::BoxFuture;
use std::time::Instant;

/// Fetches the data behind one metric and scores it
///
/// Implementations never fail: problems are logged and mapped to a zero score.
pub trait MetricFetcher: Send + Sync {
    /// Which metric this fetcher produces.
    fn kind(&self) -> MetricKind;

    /// Compute the metric for a repository.
    fn fetch<'a>(&'a self, identity: &'a RepoIdentity) -> BoxFuture<'a, MetricResult>;
}

/// What latency a metric reports when its computation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureLatency {
    Zero,
    Measured,
}

/// Run `compute` for a resolved identity, timing it and applying the fail-closed policy.
///
/// Unresolved identities skip `compute` entirely and report score 0 with zero latency.
pub(crate) async fn measure<'a, F, Fut>(
    kind: MetricKind,
    identity: &'a RepoIdentity,
    on_failure: FailureLatency,
    compute: F,
) -> MetricResult
where
    F: FnOnce(&'a str, &'a str) -> Fut,
    Fut: Future<Output = Result<f64>>,
{
    let Some((owner, name)) = identity.parts() else {
        log::debug!(target: LOG_TARGET, "Skipping {kind}: repository is unresolved");
        return MetricResult::failed();
    };

    let start_time = Instant::now();
    match compute(owner, name).await {
        Ok(value) => {
            let result = MetricResult::new(value, start_time.elapsed());
            log::debug!(
                target: LOG_TARGET,
                "{kind} for '{identity}' is {:.3} ({:.3}s)",
                result.value,
                result.latency.as_secs_f64()
            );
            result
        }

        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not compute {kind} for '{identity}': {e:#}");
            match on_failure {
                FailureLatency::Zero => MetricResult::failed(),
                FailureLatency::Measured => MetricResult::new(0.0, start_time.elapsed()),
            }
        }
    }
}
