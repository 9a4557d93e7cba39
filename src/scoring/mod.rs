//! Batch orchestration
//!
//! URLs are scored strictly one after another, so output order always matches input order
//! and at most four requests are in flight at once. For each URL the four metric fetchers
//! start together and are awaited jointly. Each runs behind its own isolation boundary: a
//! panic inside one is caught and reported as that metric's fail-closed default, leaving
//! the others untouched.

mod metric_set;
mod scorer;

pub use metric_set::MetricSet;
pub use scorer::Scorer;

const LOG_TARGET: &str = "   scoring";
