//! Tests for the `pr validate` command

use crate::helpers::*;
use anyhow::Result;

const GOOD_BODY: &str = "\
## Description

Adds a threat meter.

## Type of Change

- [x] New feature
- [ ] Bug fix
- [ ] Breaking change

## Checklist

- [x] Tested in-game
- [X] Updated CHANGELOG.md
- [x] TOC version bumped
";

#[test]
fn test_pr_validate_accepts_complete_body() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(temp.path().join("body.md"), GOOD_BODY)?;

  let output = run_quartermaster(temp.path(), &["pr", "validate", "--body-file", "body.md"])?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Pull-request template is complete"));

  Ok(())
}

#[test]
fn test_pr_validate_accepts_body_from_env() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_quartermaster_env(temp.path(), &["pr", "validate"], &[("PR_BODY", GOOD_BODY)])?;
  assert!(output.status.success());

  Ok(())
}

#[test]
fn test_pr_validate_rejects_unchecked_checklist() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let body = GOOD_BODY.replace("- [X] Updated CHANGELOG.md", "- [ ] Updated CHANGELOG.md");
  std::fs::write(temp.path().join("body.md"), body)?;

  let output = run_quartermaster_raw(temp.path(), &["pr", "validate", "--body-file", "body.md"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("not all checklist items are checked"));

  Ok(())
}

#[test]
fn test_pr_validate_requires_a_body() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_quartermaster_raw(temp.path(), &["pr", "validate"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No pull-request body configured"));

  Ok(())
}
