//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let path = temp.path();

  run_quartermaster(path, &["init"])?;

  assert!(path.join("quartermaster.toml").exists());

  let config = std::fs::read_to_string(path.join("quartermaster.toml"))?;
  assert!(config.contains("[addon]"));
  assert!(config.contains("[repository]"));
  assert!(config.contains("[release]"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let path = temp.path();

  run_quartermaster(path, &["init"])?;

  let output = run_quartermaster_raw(path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Configuration already exists"));

  Ok(())
}
