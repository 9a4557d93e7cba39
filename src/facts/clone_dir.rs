use crate::Result;
use ohno::IntoAppError;
use std::io;
use std::path::Path;
use tempfile::TempDir;

/// A uniquely named scratch directory holding a single clone.
///
/// Each instance gets a fresh directory, so concurrent clones of repositories sharing a
/// name never collide. The directory is deleted when [`release`](Self::release) is awaited,
/// and also on drop if the owner unwinds or returns before releasing it.
#[derive(Debug)]
pub struct CloneDir {
    dir: TempDir,
}

impl CloneDir {
    /// Create a new empty directory under `root`, named after the repository.
    pub fn create(root: &Path, repo_name: &str) -> Result<Self> {
        let prefix = clone_prefix(repo_name);
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(root)
            .into_app_err_with(|| format!("creating clone directory under '{}'", root.display()))?;

        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory and everything in it, reporting any failure.
    pub async fn release(self) -> io::Result<()> {
        let dir = self.dir;
        match tokio::task::spawn_blocking(move || dir.close()).await {
            Ok(result) => result,
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// Directory-name prefix for a clone of `repo_name`.
///
/// Anything that is not a letter, digit, `-`, `_` or `.` becomes `_`, and a name made only of
/// dots collapses to `_`, so the prefix can never name or leave its parent directory.
fn clone_prefix(repo_name: &str) -> String {
    let mut prefix: String = repo_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();

    if prefix.chars().all(|c| c == '.') {
        prefix = "_".to_string();
    }

    prefix.push('-');
    prefix
}
