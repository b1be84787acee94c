//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Addon name used by every test checkout
pub const ADDON: &str = "SpectrumFederation";

/// A test checkout with the standard addon layout and git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a checkout with config, changelog, and a committed addon
  ///
  /// History is two commits: scaffolding first, the addon directory
  /// second, so tests can use `HEAD~1` as a base ref that predates the
  /// addon.
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("quartermaster.toml"),
      r#"[addon]
name = "SpectrumFederation"

[repository]
slug = "wowdev/spectrum-federation"

[board]
project_number = 2
"#,
    )?;
    std::fs::write(
      path.join("CHANGELOG.md"),
      "# Changelog\n\nAll notable changes to SpectrumFederation will be documented in this file.\n",
    )?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial scaffolding"])?;

    let workspace = Self { _root: root, path };
    workspace.write_toc("0.1.0")?;
    std::fs::write(
      workspace.path.join(ADDON).join(format!("{}.lua", ADDON)),
      "local addonName, addon = ...\n",
    )?;
    workspace.commit("Add addon skeleton")?;

    Ok(workspace)
  }

  /// (Re)write the addon TOC with the given version
  pub fn write_toc(&self, version: &str) -> Result<()> {
    let addon_dir = self.path.join(ADDON);
    std::fs::create_dir_all(&addon_dir)?;
    std::fs::write(
      addon_dir.join(format!("{}.toc", ADDON)),
      format!(
        "## Interface: 110207\n## Title: Spectrum Federation\n## Version: {}\n\n{}.lua\n",
        version, ADDON
      ),
    )?;
    Ok(())
  }

  /// Commit everything, returning the new HEAD SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Tag HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run quartermaster, failing the test on a nonzero exit
pub fn run_quartermaster(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = quartermaster_command(cwd, args)
    .output()
    .context("Failed to run quartermaster")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "quartermaster {} failed\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run quartermaster without asserting on the exit status
pub fn run_quartermaster_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  quartermaster_command(cwd, args)
    .output()
    .context("Failed to run quartermaster")
}

/// Run quartermaster with extra environment variables, without asserting
/// on the exit status
pub fn run_quartermaster_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let mut cmd = quartermaster_command(cwd, args);
  for (key, value) in envs {
    cmd.env(key, value);
  }
  cmd.output().context("Failed to run quartermaster")
}

/// Base command with credential env vars scrubbed; CI exports some of
/// these and tests must control them explicitly
fn quartermaster_command(cwd: &Path, args: &[&str]) -> Command {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_quartermaster"));
  cmd
    .current_dir(cwd)
    .args(args)
    .env_remove("GITHUB_TOKEN")
    .env_remove("REPOSITORY")
    .env_remove("PROJECT_NUMBER")
    .env_remove("PR_BODY");
  cmd
}
