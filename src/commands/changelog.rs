//! Changelog update command: record the current TOC version

use std::env;
use std::fs;

use chrono::Local;

use crate::core::config::QmConfig;
use crate::core::error::{QmResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::quality::changelog::{self, ReleaseEntry};
use crate::quality::toc::Toc;
use crate::release::package;

/// Run the changelog update command
///
/// The version comes from the addon TOC, the entry content from commit
/// subjects since the most recent tag (the whole history when no tag
/// exists). Recording a stable version also drops superseded beta sections.
pub fn run_changelog_update() -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let toc_path = config.toc_path()?;

  let toc_content = fs::read_to_string(current_dir.join(&toc_path))
    .with_context(|| format!("Failed to read {}", toc_path.display()))?;
  let toc = Toc::parse(&toc_path.display().to_string(), &toc_content)?;
  println!("Current version: {}", toc.version);

  let git = SystemGit::open(&current_dir)?;
  let last_tag = git.latest_tag()?;
  match &last_tag {
    Some(tag) => println!("Collecting commits since {}", tag),
    None => println!("No tag found, collecting the whole history"),
  }

  let subjects = git.subjects_since(last_tag.as_deref())?;
  let date = Local::now().format("%Y-%m-%d").to_string();
  let entry = ReleaseEntry::from_subjects(&toc.version, &date, &subjects);

  if entry.is_empty() {
    println!("⏭️  No commits to record, changelog left unchanged");
    return Ok(());
  }

  println!("Using section: ## [{}] - {}", toc.version, date);

  let changelog_path = current_dir.join(&config.release.changelog);
  let mut existing = match fs::read_to_string(&changelog_path) {
    Ok(content) => content,
    Err(_) => new_changelog_header(config.addon_name()?),
  };

  if !package::is_prerelease(&toc.version) {
    existing = changelog::drop_beta_sections(&existing);
  }

  let updated = changelog::upsert_section(&existing, &toc.version, &date, &entry.body_markdown());
  fs::write(&changelog_path, updated)
    .with_context(|| format!("Failed to write {}", changelog_path.display()))?;

  println!("✅ {} updated for version {}", config.release.changelog.display(), toc.version);
  Ok(())
}

fn new_changelog_header(addon_name: &str) -> String {
  format!(
    "# Changelog\n\nAll notable changes to {} will be documented in this file.\n",
    addon_name
  )
}
