use crate::Result;
use camino::Utf8Path;
use clap::ValueEnum;
use ohno::IntoAppError;
use std::fs::File;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// The `env_logger` filter for this level, `None` when logging is off.
    #[must_use]
    pub const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Install the global logger. Logs go to `log_file` when given, stderr otherwise.
///
/// Only the first call in a process takes effect.
pub fn init_logging(log_level: LogLevel, log_file: Option<&Utf8Path>) -> Result<()> {
    let Some(level) = log_level.filter() else {
        return Ok(());
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    let mut builder = env_logger::Builder::from_env(env);
    let _ = builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace));

    if let Some(path) = log_file {
        let file = File::create(path).into_app_err_with(|| format!("creating log file '{path}'"))?;
        let _ = builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // a logger installed by an earlier call stays in place
    let _ = builder.try_init();
    Ok(())
}
