//! System git backend - zero dependencies
//!
//! Uses git plumbing commands for all operations:
//! - File reads at arbitrary refs without switching checkouts (git show)
//! - Commit subject listing for changelog generation (git log)
//! - Safe subprocess execution (isolated environment)

use crate::core::error::{GitError, QmError, QmResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to verify the repository exists.
  pub fn open(path: &Path) -> QmResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(QmError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(QmError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Read a file as it exists at a ref (`origin/main`, a tag, a SHA)
  ///
  /// Returns `None` when the ref or the path does not exist there; callers
  /// treat that as "nothing to compare against", not as a failure.
  pub fn read_file_at_ref(&self, reference: &str, path: &Path) -> QmResult<Option<String>> {
    let spec = format!("{}:{}", reference, path.display());

    let output = self
      .git_cmd()
      .args(["show", &spec])
      .output()
      .context("Failed to read file from ref")?;

    if !output.status.success() {
      return Ok(None);
    }

    Ok(Some(String::from_utf8(output.stdout)?))
  }

  /// Most recent tag reachable from HEAD, if any
  pub fn latest_tag(&self) -> QmResult<Option<String>> {
    let output = self
      .git_cmd()
      .args(["describe", "--tags", "--abbrev=0"])
      .output()
      .context("Failed to list tags")?;

    if !output.status.success() {
      // No tags yet
      return Ok(None);
    }

    let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if tag.is_empty() { None } else { Some(tag) })
  }

  /// Commit subjects on HEAD since `since` (exclusive), newest first
  ///
  /// `since = None` lists the whole history. Merge commits are skipped.
  pub fn subjects_since(&self, since: Option<&str>) -> QmResult<Vec<String>> {
    let range = match since {
      Some(anchor) => format!("{}..HEAD", anchor),
      None => "HEAD".to_string(),
    };

    let output = self
      .git_cmd()
      .args(["log", "--no-merges", "--pretty=format:%s", &range])
      .output()
      .context("Failed to list commits")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(QmError::Git(GitError::CommandFailed {
        command: format!("git log {}", range),
        stderr: stderr.to_string(),
      }));
    }

    Ok(parse_subjects(&String::from_utf8_lossy(&output.stdout)))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

/// Split `git log --pretty=format:%s` output into non-empty subject lines
fn parse_subjects(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}
