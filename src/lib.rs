//! reuse-score crate
//!
//! Scores open-source packages for reuse-worthiness. Each input URL (a GitHub repository or an npm
//! package page) is resolved to a repository, four quality metrics are fetched concurrently, and
//! the results are combined into a weighted net score.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface, configuration, and logging setup
//! - [`facts`]: Repository identity resolution and the network/git collaborators
//! - [`metrics`]: The per-metric heuristics and the net score aggregation
//! - [`scoring`]: Batch orchestration with per-metric failure isolation
//! - [`reports`]: The per-URL output record and NDJSON emission

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod facts;
pub mod metrics;
pub mod reports;
pub mod scoring;

pub use crate::commands::{Config, Host, run};
