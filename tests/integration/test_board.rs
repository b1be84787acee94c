//! Tests for the `board reconcile` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_board_reconcile_requires_issue_or_all() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster_raw(&workspace.path, &["board", "reconcile"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Must specify an issue number or use --all flag"));

  Ok(())
}

#[test]
fn test_board_reconcile_rejects_issue_with_all() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster_raw(&workspace.path, &["board", "reconcile", "5", "--all"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Must specify an issue number or use --all flag"));

  Ok(())
}

#[test]
fn test_board_reconcile_requires_token() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster_raw(&workspace.path, &["board", "reconcile", "5"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No GitHub token supplied"));
  assert!(stderr.contains("GITHUB_TOKEN"));

  Ok(())
}
