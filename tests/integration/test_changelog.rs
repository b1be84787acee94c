//! Tests for the `changelog update` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_changelog_update_creates_section() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  std::fs::write(
    workspace.path.join(ADDON).join("Tracker.lua"),
    "local tracker = {}\n",
  )?;
  workspace.commit("Add raid cooldown tracker")?;
  std::fs::write(
    workspace.path.join(ADDON).join("Tracker.lua"),
    "local tracker = { fixed = true }\n",
  )?;
  workspace.commit("Fix tooltip flicker")?;

  run_quartermaster(&workspace.path, &["changelog", "update"])?;

  let changelog = workspace.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [0.1.0] - "));
  assert!(changelog.contains("### Added"));
  assert!(changelog.contains("### Fixed"));
  assert!(changelog.contains("- Add raid cooldown tracker"));
  assert!(changelog.contains("- Fix tooltip flicker"));

  Ok(())
}

#[test]
fn test_changelog_update_collects_since_last_tag() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.tag("v0.1.0")?;

  std::fs::write(
    workspace.path.join(ADDON).join("Tooltip.lua"),
    "local tooltip = {}\n",
  )?;
  workspace.commit("Fix tooltip flicker")?;
  workspace.write_toc("0.1.1")?;
  workspace.commit("Bump version")?;

  run_quartermaster(&workspace.path, &["changelog", "update"])?;

  let changelog = workspace.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [0.1.1] - "));
  assert!(changelog.contains("- Fix tooltip flicker"));
  // Commits before the tag stay out of the new section
  assert!(!changelog.contains("- Add addon skeleton"));

  Ok(())
}

#[test]
fn test_changelog_update_stable_drops_beta_sections() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  std::fs::write(
    workspace.path.join("CHANGELOG.md"),
    "# Changelog\n\nAll notable changes to SpectrumFederation will be documented in this file.\n\n\
     ## [0.1.0-beta.1] - 2026-01-01\n\n### Added\n\n- Experimental raid module\n",
  )?;
  workspace.write_toc("0.2.0")?;
  workspace.commit("Remove legacy config")?;

  run_quartermaster(&workspace.path, &["changelog", "update"])?;

  let changelog = workspace.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [0.2.0] - "));
  assert!(changelog.contains("- Remove legacy config"));
  assert!(!changelog.contains("-beta"));
  assert!(!changelog.contains("Experimental raid module"));

  Ok(())
}
