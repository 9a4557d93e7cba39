use super::logging::init_logging;
use super::{Config, Host, LogLevel};
use crate::Result;
use crate::reports::generate_ndjson;
use crate::scoring::Scorer;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "  commands";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "reuse-score", author, version, long_about = None)]
#[command(about = "Score open-source packages for reuse-worthiness")]
#[command(styles = CLAP_STYLES)]
struct Args {
    /// File with one GitHub repository or npm package URL per line
    #[arg(value_name = "URL_FILE")]
    url_file: Utf8PathBuf,

    /// Path to configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", env = "LOG_LEVEL", default_value = "none")]
    log_level: LogLevel,

    /// Write diagnostic output to this file instead of stderr
    #[arg(long, value_name = "PATH", env = "LOG_FILE")]
    log_file: Option<Utf8PathBuf>,
}

/// Parse command-line arguments and score every URL in the given file.
///
/// Results are written to the host's output as NDJSON. Any batch-level failure is
/// written to the host's error stream, followed by `host.exit(1)`.
pub async fn run<I, T, H>(host: &mut H, args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let args = Args::parse_from(args);

    if let Err(e) = process(host, &args).await {
        log::error!(target: LOG_TARGET, "{e:#}");
        let _ = writeln!(host.error(), "error: {e:#}");
        host.exit(1);
    }
}

async fn process<H: Host>(host: &mut H, args: &Args) -> Result<()> {
    init_logging(args.log_level, args.log_file.as_deref())?;

    let config = Config::load(args.config.as_deref())?;
    let urls = read_urls(&args.url_file)?;
    log::info!(target: LOG_TARGET, "Scoring {} URL(s) from '{}'", urls.len(), args.url_file);

    let scorer = Scorer::new(&config, args.github_token.as_deref())?;
    let records = scorer.score_batch(&urls).await;

    let mut report = String::new();
    generate_ndjson(&records, &mut report)?;

    let mut output = host.output();
    output.write_all(report.as_bytes()).into_app_err("writing results")?;
    output.flush().into_app_err("writing results")?;

    Ok(())
}

/// Read the URL file, trimming lines and skipping blank ones.
fn read_urls(path: &Utf8Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading URL file '{path}'"))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
