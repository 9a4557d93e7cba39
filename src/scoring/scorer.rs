use super::{LOG_TARGET, MetricSet};
use crate::Result;
use crate::commands::Config;
use crate::facts::hosting::Client;
use crate::facts::{Locator, RegistryClient, RepoIdentity};
use crate::metrics::{MetricFetcher, MetricResult, Weights, calculate_net_score};
use crate::reports::ScoredRecord;
use core::panic::AssertUnwindSafe;
use futures_util::FutureExt;
use std::time::Instant;

/// Scores URLs one at a time
#[derive(Debug)]
pub struct Scorer {
    locator: Locator,
    metrics: MetricSet,
    weights: Weights,
}

impl Scorer {
    /// Build a scorer talking to the services named in `config`.
    pub fn new(config: &Config, github_token: Option<&str>) -> Result<Self> {
        config.validate()?;

        let registry = RegistryClient::new(config.registry_url.as_str())?;
        let hosting = Client::new(github_token, config.hosting_api_url.as_str())?;
        let metrics = MetricSet::from_config(config, &hosting, &registry);

        Ok(Self::with_metrics(Locator::new(registry), metrics, config.weights))
    }

    /// Build a scorer from explicit parts.
    #[must_use]
    pub const fn with_metrics(locator: Locator, metrics: MetricSet, weights: Weights) -> Self {
        Self { locator, metrics, weights }
    }

    /// Score every URL in turn, returning records in input order.
    pub async fn score_batch<I, S>(&self, urls: I) -> Vec<ScoredRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for url in urls {
            records.push(self.score_url(url.as_ref()).await);
        }

        records
    }

    /// Resolve one URL, run the four metrics concurrently, and combine them.
    pub async fn score_url(&self, url: &str) -> ScoredRecord {
        let start_time = Instant::now();
        log::info!(target: LOG_TARGET, "Scoring '{url}'");

        let identity = self.locator.resolve(url).await;
        let (license, ramp_up, correctness, responsiveness) = tokio::join!(
            isolated(self.metrics.license.as_ref(), &identity),
            isolated(self.metrics.ramp_up.as_ref(), &identity),
            isolated(self.metrics.correctness.as_ref(), &identity),
            isolated(self.metrics.responsiveness.as_ref(), &identity),
        );

        let net_score = calculate_net_score(
            &self.weights,
            license.value,
            ramp_up.value,
            correctness.value,
            responsiveness.value,
        );
        let elapsed = start_time.elapsed();

        log::debug!(
            target: LOG_TARGET,
            "Net score for '{url}' is {net_score:.3} ({:.3}s)",
            elapsed.as_secs_f64()
        );

        ScoredRecord::new(url, net_score, elapsed, license, ramp_up, correctness, responsiveness)
    }
}

/// Run one fetcher, turning a panic into its fail-closed default.
async fn isolated(fetcher: &dyn MetricFetcher, identity: &RepoIdentity) -> MetricResult {
    AssertUnwindSafe(fetcher.fetch(identity))
        .catch_unwind()
        .await
        .unwrap_or_else(|_panic| {
            log::error!(target: LOG_TARGET, "{} panicked while scoring '{identity}'", fetcher.kind());
            MetricResult::failed()
        })
}
