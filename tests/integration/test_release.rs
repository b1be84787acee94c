//! Tests for the `release` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_release_check_requires_token() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster_raw(&workspace.path, &["release", "check", "1.0.0"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No GitHub token supplied"));
  assert!(stderr.contains("GITHUB_TOKEN"));

  Ok(())
}

#[test]
fn test_release_check_requires_repository() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_quartermaster_raw(temp.path(), &["release", "check", "1.0.0"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No repository configured"));
  assert!(stderr.contains("--repo"));

  Ok(())
}

#[test]
fn test_release_publish_requires_addon_name() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(
    temp.path().join("quartermaster.toml"),
    "[repository]\nslug = \"wowdev/spectrum-federation\"\n",
  )?;

  let output = run_quartermaster_raw(temp.path(), &["release", "publish", "1.0.0", "--dry-run"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No addon name configured"));

  Ok(())
}
