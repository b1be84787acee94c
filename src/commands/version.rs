//! Version-bump check against a base ref

use std::env;
use std::fs;

use crate::core::config::QmConfig;
use crate::core::error::{QmError, QmResult, ResultExt, ValidationError};
use crate::core::vcs::SystemGit;
use crate::quality::toc;

/// Run the version check command
///
/// Compares `## Version:` on the current checkout against the same TOC at
/// `base`. A missing base file (or a base TOC without a version line) means
/// there is nothing to compare against and the check passes.
pub fn run_version_check(base: String) -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let toc_path = config.toc_path()?;

  println!("🔍 Checking for a version bump in {}", toc_path.display());

  let content = fs::read_to_string(current_dir.join(&toc_path))
    .with_context(|| format!("Failed to read {}", toc_path.display()))?;
  let current = toc::parse_version(&content).ok_or_else(|| {
    QmError::Validation(ValidationError::TocInvalid {
      path: toc_path.display().to_string(),
      reason: "no '## Version:' line".to_string(),
    })
  })?;

  let git = SystemGit::open(&current_dir)?;
  let Some(base_content) = git.read_file_at_ref(&base, &toc_path)? else {
    println!("⏭️  No TOC at {}, probably a first release", base);
    return Ok(());
  };

  let Some(base_version) = toc::parse_version(&base_content) else {
    println!("⏭️  No '## Version:' in the TOC at {}, nothing to compare", base);
    return Ok(());
  };

  println!("   Base ({}) version: {}", base, base_version);
  println!("   This branch version: {}", current);

  if current == base_version {
    return Err(QmError::Validation(ValidationError::VersionNotBumped {
      version: current,
      base_ref: base,
    }));
  }

  println!("✅ Version bumped: {} → {}", base_version, current);
  Ok(())
}
