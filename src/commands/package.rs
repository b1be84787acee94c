//! Packaging validation command

use std::env;

use crate::core::config::QmConfig;
use crate::core::error::QmResult;
use crate::release::package;

/// Run the package validate command
pub fn run_package_validate() -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let addon_name = config.addon_name()?;

  println!("🔍 Validating packaging for {}", addon_name);
  package::validate_packaging(&current_dir, addon_name)?;

  println!("✅ Packaging structure looks good for WowUp and CurseForge");
  Ok(())
}
