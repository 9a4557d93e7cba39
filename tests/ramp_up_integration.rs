//! Integration tests for the ramp-up metric against local git repositories

use reuse_score::facts::RepoIdentity;
use reuse_score::metrics::{MetricFetcher, RampUpMetric};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Helper to check if git is available
fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}

fn git(repo: &Path, args: &[&str], timestamp: i64) {
    let date = format!("@{timestamp} +0000");
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com", "-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(repo)
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

/// Create `root/owner/name.git` with one empty commit per timestamp.
fn create_repo(root: &Path, owner: &str, name: &str, timestamps: &[i64]) {
    let repo = root.join(owner).join(format!("{name}.git"));
    fs::create_dir_all(&repo).expect("Failed to create repo dir");
    git(&repo, &["init", "--quiet"], 0);

    for (i, &timestamp) in timestamps.iter().enumerate() {
        git(&repo, &["commit", "--quiet", "--allow-empty", "-m", &format!("commit {i}")], timestamp);
    }
}

const DAY: i64 = 86_400;
const START: i64 = 1_700_000_000;

#[tokio::test]
async fn test_young_repository_scores_one() {
    if !git_available() {
        eprintln!("Skipping test: git not available");
        return;
    }

    let source = tempfile::tempdir().expect("Failed to create temp dir");
    let clone_root = tempfile::tempdir().expect("Failed to create temp dir");
    create_repo(source.path(), "owner", "young", &[START, START + 3 * DAY, START + 10 * DAY]);

    let metric = RampUpMetric::new(format!("file://{}", source.path().display()), clone_root.path(), 100);
    let result = metric.fetch(&RepoIdentity::new("owner", "young")).await;

    assert!((result.value - 1.0).abs() < f64::EPSILON);
    assert_eq!(fs::read_dir(clone_root.path()).expect("Failed to read clone root").count(), 0);
}

#[tokio::test]
async fn test_older_repository_decays() {
    if !git_available() {
        eprintln!("Skipping test: git not available");
        return;
    }

    let source = tempfile::tempdir().expect("Failed to create temp dir");
    let clone_root = tempfile::tempdir().expect("Failed to create temp dir");
    create_repo(source.path(), "owner", "older", &[START, START + 45 * DAY, START + 90 * DAY]);

    let metric = RampUpMetric::new(format!("file://{}", source.path().display()), clone_root.path(), 100);
    let result = metric.fetch(&RepoIdentity::new("owner", "older")).await;

    // 1 - log10(90 / 30)
    assert!((result.value - 0.523).abs() < 1e-9);
    assert_eq!(fs::read_dir(clone_root.path()).expect("Failed to read clone root").count(), 0);
}

#[tokio::test]
async fn test_depth_limits_history() {
    if !git_available() {
        eprintln!("Skipping test: git not available");
        return;
    }

    let source = tempfile::tempdir().expect("Failed to create temp dir");
    let clone_root = tempfile::tempdir().expect("Failed to create temp dir");
    create_repo(source.path(), "owner", "deep", &[START, START + 400 * DAY, START + 401 * DAY, START + 402 * DAY]);

    // only the newest two commits are fetched, spanning a single day
    let metric = RampUpMetric::new(format!("file://{}", source.path().display()), clone_root.path(), 2);
    let result = metric.fetch(&RepoIdentity::new("owner", "deep")).await;

    assert!((result.value - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_concurrent_clones_of_same_name_do_not_collide() {
    if !git_available() {
        eprintln!("Skipping test: git not available");
        return;
    }

    let source = tempfile::tempdir().expect("Failed to create temp dir");
    let clone_root = tempfile::tempdir().expect("Failed to create temp dir");
    create_repo(source.path(), "alice", "tool", &[START, START + DAY]);
    create_repo(source.path(), "bob", "tool", &[START, START + 90 * DAY]);

    let metric = RampUpMetric::new(format!("file://{}", source.path().display()), clone_root.path(), 100);
    let alice = RepoIdentity::new("alice", "tool");
    let bob = RepoIdentity::new("bob", "tool");
    let (a, b) = tokio::join!(metric.fetch(&alice), metric.fetch(&bob));

    assert!((a.value - 1.0).abs() < f64::EPSILON);
    assert!((b.value - 0.523).abs() < 1e-9);
    assert_eq!(fs::read_dir(clone_root.path()).expect("Failed to read clone root").count(), 0);
}
