//! Pull-request template validation command

use std::fs;
use std::path::PathBuf;

use crate::core::error::{ConfigError, QmError, QmResult, ResultExt};
use crate::quality::pr_template;

/// Run the pr validate command
///
/// The body text comes from `--body-file` when given, otherwise from the
/// `PR_BODY` environment variable (the way the merge workflow passes it).
pub fn run_pr_validate(body: Option<String>, body_file: Option<PathBuf>) -> QmResult<()> {
  let body = match (body_file, body) {
    (Some(path), _) => {
      fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?
    }
    (None, Some(body)) => body,
    (None, None) => {
      return Err(QmError::Config(ConfigError::MissingValue {
        field: "pull-request body".to_string(),
        flag: Some("--body-file".to_string()),
        env: Some("PR_BODY".to_string()),
      }));
    }
  };

  if body.trim().is_empty() {
    return Err(QmError::message("The pull-request body is empty"));
  }

  println!("🔍 Validating pull-request template");
  pr_template::validate(&body)?;

  println!("✅ Pull-request template is complete");
  Ok(())
}
