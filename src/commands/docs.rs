//! Docs build validation command

use std::env;
use std::process::Command;

use crate::core::error::{QmError, QmResult, ValidationError};

/// Run the docs validate command
///
/// Strict mode turns mkdocs warnings (broken links, orphaned pages) into
/// build failures, which is what keeps the published site honest.
pub fn run_docs_validate() -> QmResult<()> {
  let current_dir = env::current_dir()?;

  if !current_dir.join("mkdocs.yml").exists() {
    println!("⏭️  No mkdocs.yml found, no docs configured");
    return Ok(());
  }

  println!("🔍 Building docs with mkdocs --strict");
  let output = Command::new("mkdocs")
    .args(["build", "--clean", "--strict"])
    .current_dir(&current_dir)
    .output()
    .map_err(|e| QmError::message(format!("Failed to run mkdocs: {}", e)))?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if stderr.trim().is_empty() { stdout } else { stderr };
    return Err(QmError::Validation(ValidationError::DocsBuild {
      detail: detail.trim().to_string(),
    }));
  }

  println!("✅ Docs build passed");
  Ok(())
}
