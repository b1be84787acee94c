//! Release commands: duplicate gating and publishing
//!
//! `release check` runs before a release workflow tags anything;
//! `release publish` packages the addon and creates the GitHub release
//! with the changelog section embedded in the notes.

use std::env;
use std::fs;

use crate::core::config::QmConfig;
use crate::core::error::{QmResult, ResultExt};
use crate::github::rest::RestClient;
use crate::quality::changelog;
use crate::release::{duplicate, package};

/// Run the release check command
pub fn run_release_check(version: String, token: Option<String>, repo: Option<String>) -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let repository = config.repository(repo)?;

  println!("🔍 Checking for an existing release of {}", version);

  let rest = RestClient::new(token, repository)?;
  let releases = rest.list_releases()?;
  let prereleases = releases.iter().filter(|release| release.prerelease).count();
  println!(
    "   Found {} published release(s), {} of them prereleases",
    releases.len(),
    prereleases
  );

  duplicate::check(&version, &releases)?;

  println!("✅ Version {} is clear to release", version);
  Ok(())
}

/// Run the release publish command
pub fn run_release_publish(
  version: String,
  dry_run: bool,
  token: Option<String>,
  repo: Option<String>,
) -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let addon_name = config.addon_name()?;
  let repository = config.repository(repo)?;

  let prerelease = package::is_prerelease(&version);
  println!("Starting release process...");
  println!("Version: {}", version);
  println!("Prerelease: {}", prerelease);

  // Release notes come from the changelog; a missing section is a warning,
  // not a blocker, so a hotfix can still ship
  let changelog_path = current_dir.join(&config.release.changelog);
  let section = fs::read_to_string(&changelog_path)
    .ok()
    .and_then(|content| changelog::notes_for_release(&content, &version));
  match &section {
    Some(_) => println!("✓ Extracted changelog for version {}", version),
    None => println!("⚠️  No changelog entry found for version {}", version),
  }

  println!("Creating release zip...");
  let zip = package::build_zip(&current_dir, addon_name, &version, &config.release.build_dir)?;
  println!("✓ Created {}", zip.path.display());
  println!("  SHA-256: {}", zip.sha256);

  let tag_name = format!("v{}", version);
  let release_name = format!("Release {}", version);
  let notes = package::release_notes(&version, section.as_deref(), &zip.sha256, &repository);

  if dry_run {
    println!();
    println!("DRY RUN - Would create release:");
    println!("  Tag: {}", tag_name);
    println!("  Name: {}", release_name);
    println!("  Prerelease: {}", prerelease);
    println!("  Asset: {}", zip.path.display());
    println!("  Notes:\n{}", notes);
    return Ok(());
  }

  let rest = RestClient::new(token, repository)?;

  println!("Creating GitHub release: {}", tag_name);
  let created = rest.create_release(&tag_name, &release_name, &notes, prerelease)?;

  let file_name = format!("{}-{}.zip", addon_name, version);
  let data = fs::read(&zip.path).with_context(|| format!("Failed to read {}", zip.path.display()))?;
  println!("Uploading {} ({} bytes)", file_name, data.len());
  rest.upload_asset(&created.upload_url, &file_name, &data)?;

  println!();
  println!("✅ Release published: {}", created.html_url);
  Ok(())
}
