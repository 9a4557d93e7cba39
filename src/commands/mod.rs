//! Command-line interface and orchestration
//!
//! [`run`] is the single entry point: it parses arguments, sets up logging, loads the
//! [`Config`], reads the URL file, scores the batch, and writes NDJSON through the
//! [`Host`]. Batch-level failures (an unreadable URL file, a bad configuration) are
//! reported on the host's error stream and end the process with exit code 1; per-metric
//! failures never get this far.

mod config;
mod host;
mod logging;
mod run;

pub use config::Config;
pub use host::Host;
pub use logging::LogLevel;
pub use run::run;
