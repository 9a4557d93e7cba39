//! The four reuse metrics and their aggregation into a net score
//!
//! Each metric pairs one data fetch with one pure scoring function. The scoring
//! functions are exposed on their own so the heuristics can be exercised without any
//! network access; the fetchers wrap them with the fail-closed error policy.
//!
//! # Implementation Model
//!
//! Every fetcher implements [`MetricFetcher`], whose `fetch` never fails: an unresolved
//! [`RepoIdentity`](crate::facts::RepoIdentity) or any error along the way produces a
//! score of 0. Scores are clamped into `[0, 1]` when a [`MetricResult`] is built.
//!
//! - [`license`]: allow-list check of the SPDX id, with a registry fallback
//! - [`ramp_up`]: logarithmic decay over the span of recent commit history
//! - [`correctness`]: mean of issue, release, and recent-commit ratios
//! - [`responsiveness`]: bucketed average time to close issues and pull requests
//! - [`net_score`]: weighted combination of the four

pub mod correctness;
mod fetcher;
mod figure;
pub mod license;
mod metric_kind;
mod metric_result;
pub mod net_score;
pub mod ramp_up;
pub mod responsiveness;

pub use correctness::CorrectnessMetric;
pub use fetcher::MetricFetcher;
pub use figure::Figure;
pub use license::LicenseMetric;
pub use metric_kind::MetricKind;
pub use metric_result::MetricResult;
pub use net_score::{Weights, calculate_net_score};
pub use ramp_up::RampUpMetric;
pub use responsiveness::ResponsivenessMetric;

pub(crate) const LOG_TARGET: &str = "   metrics";

/// Round to 3 decimal places.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
