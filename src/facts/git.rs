//! Shallow clones and commit history via the `git` command-line tool

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, bail};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;

pub(crate) const LOG_TARGET: &str = "       git";

/// Clone the default branch of a repository, at most `depth` commits deep.
///
/// The clone is bare: only commit metadata is needed, never a working tree.
pub async fn shallow_clone(repo_url: &str, dest: &Path, depth: u32) -> Result<()> {
    let start_time = Instant::now();
    let path_str = dest.to_str().into_app_err("invalid UTF-8 in clone path")?;
    let depth = depth.to_string();

    log::info!(target: LOG_TARGET, "Cloning '{repo_url}' with depth {depth}");

    // --bare skips the checkout, --single-branch and --no-tags keep the transfer minimal
    let output = run_git(&[
        "clone",
        "--bare",
        "--quiet",
        "--depth",
        &depth,
        "--single-branch",
        "--no-tags",
        repo_url,
        path_str,
    ])
    .await?;
    check_git_output(&output, "git clone")?;

    log::debug!(target: LOG_TARGET, "Cloned '{repo_url}' in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Committer timestamps of every commit reachable from `HEAD`, newest first.
pub async fn commit_timestamps(repo_path: &Path) -> Result<Vec<DateTime<Utc>>> {
    let path_str = repo_path.to_str().into_app_err("invalid UTF-8 in repository path")?;

    // %ct = committer date as a UNIX timestamp
    let output = run_git(&["-C", path_str, "log", "--format=%ct"]).await?;
    check_git_output(&output, "git log")?;

    parse_timestamps(&String::from_utf8_lossy(&output.stdout))
}

fn parse_timestamps(stdout: &str) -> Result<Vec<DateTime<Utc>>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let secs = line.parse::<i64>().into_app_err_with(|| format!("unexpected git log output '{line}'"))?;
            DateTime::from_timestamp(secs, 0).into_app_err_with(|| format!("commit timestamp {secs} is out of range"))
        })
        .collect()
}

fn check_git_output(output: &Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{operation} failed: {}", stderr.trim());
    }
    Ok(())
}

async fn run_git(args: &[&str]) -> Result<Output> {
    // GIT_TERMINAL_PROMPT=0 turns credential prompts for missing repositories into failures
    Command::new("git")
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .into_app_err_with(|| format!("'git {}' failed to run", args.join(" ")))
}
