//! Init command: write a starter configuration file

use std::env;
use std::fs;

use crate::core::config::{QmConfig, default_config_template};
use crate::core::error::{QmError, QmResult};

/// Run the init command
pub fn run_init() -> QmResult<()> {
  let current_dir = env::current_dir()?;

  if let Some(existing) = QmConfig::find_config_path(&current_dir) {
    return Err(QmError::with_help(
      format!("Configuration already exists at {}", existing.display()),
      "Edit the existing file instead, or delete it to start over.",
    ));
  }

  let config_path = current_dir.join("quartermaster.toml");
  fs::write(&config_path, default_config_template())?;

  println!("✅ Created {}", config_path.display());
  println!();
  println!("Next steps:");
  println!("  1. Set [addon] name to your addon's directory name");
  println!("  2. Set [repository] slug to your owner/repo");
  println!("  3. Run `quartermaster package validate` to check the layout");

  Ok(())
}
