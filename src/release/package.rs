//! Addon zip building and packaging checks
//!
//! Release zips hold exactly one top-level directory named after the
//! addon, with its TOC inside; that is the layout the game client expects
//! when a zip is extracted into `Interface/AddOns/`. Zips are built by
//! shelling to `zip` and inspected with `unzip -Z1`, the same tools the
//! release pipeline uses.

use crate::core::error::{QmError, QmResult, ValidationError};
use crate::quality::toc::Toc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A release zip on disk plus its checksum
#[derive(Debug, Clone)]
pub struct BuiltZip {
  pub path: PathBuf,
  pub sha256: String,
}

/// Build `<build_dir>/<addon>-<version>.zip` from `<root>/<addon>`,
/// excluding git metadata, and checksum it
pub fn build_zip(root: &Path, addon_name: &str, version: &str, build_dir: &Path) -> QmResult<BuiltZip> {
  let out_dir = root.join(build_dir);
  fs::create_dir_all(&out_dir)?;

  let zip_path = out_dir.join(format!("{}-{}.zip", addon_name, version));
  if zip_path.exists() {
    fs::remove_file(&zip_path)?;
  }

  run_zip(root, &zip_path, addon_name)?;

  let mut hasher = Sha256::new();
  hasher.update(fs::read(&zip_path)?);
  let sha256 = format!("{:x}", hasher.finalize());

  Ok(BuiltZip { path: zip_path, sha256 })
}

/// Structural checks on the addon layout and a scratch zip
pub fn validate_packaging(root: &Path, addon_name: &str) -> QmResult<()> {
  let mut problems = Vec::new();

  let addon_dir = root.join(addon_name);
  if !addon_dir.is_dir() {
    problems.push(format!("addon directory '{}/' not found", addon_name));
    return Err(QmError::Validation(ValidationError::Packaging { problems }));
  }

  let toc_name = format!("{}.toc", addon_name);
  let toc_path = addon_dir.join(&toc_name);
  if !toc_path.is_file() {
    problems.push(format!("'{}/{}' not found", addon_name, toc_name));
  } else {
    let content = fs::read_to_string(&toc_path)?;
    if let Err(err) = Toc::parse(&format!("{}/{}", addon_name, toc_name), &content) {
      problems.push(err.to_string());
    }
  }

  // Build a throwaway zip the same way a release would and check its shape
  match scratch_zip_entries(root, addon_name) {
    Ok(entries) => problems.extend(structure_problems(&entries, addon_name, &toc_name)),
    Err(err) => problems.push(format!("could not build test zip: {}", err)),
  }

  if problems.is_empty() {
    Ok(())
  } else {
    Err(QmError::Validation(ValidationError::Packaging { problems }))
  }
}

/// Prerelease iff the version carries a beta, alpha, or rc suffix
pub fn is_prerelease(version: &str) -> bool {
  version.contains("-beta") || version.contains("-alpha") || version.contains("-rc")
}

/// Release-notes body: kind line, changelog section when one was found,
/// zip checksum, and a changelog link on the matching branch
pub fn release_notes(
  version: &str,
  changelog_section: Option<&str>,
  sha256: &str,
  repository: &str,
) -> String {
  let (kind, branch) = if version.contains("-beta") {
    ("Beta", "beta")
  } else {
    ("Stable", "main")
  };

  let mut notes = format!("{} release {}\n\n", kind, version);
  if let Some(section) = changelog_section {
    notes.push_str(section.trim());
    notes.push_str("\n\n");
  }
  notes.push_str(&format!("SHA-256 (zip): `{}`\n\n", sha256));
  notes.push_str(&format!(
    "[View Full Changelog](https://github.com/{}/blob/{}/CHANGELOG.md)",
    repository, branch
  ));
  notes
}

fn run_zip(root: &Path, zip_path: &Path, addon_name: &str) -> QmResult<()> {
  let output = Command::new("zip")
    .arg("-r")
    .arg(zip_path)
    .arg(addon_name)
    .args(["-x", "*.git*"])
    .current_dir(root)
    .output()?;

  if !output.status.success() {
    return Err(QmError::message(format!(
      "zip failed: {}",
      String::from_utf8_lossy(&output.stderr).trim()
    )));
  }
  Ok(())
}

fn scratch_zip_entries(root: &Path, addon_name: &str) -> QmResult<Vec<String>> {
  let scratch = tempfile::tempdir()?;
  let zip_path = scratch.path().join(format!("{}-validate.zip", addon_name));
  run_zip(root, &zip_path, addon_name)?;
  zip_entries(&zip_path)
}

fn zip_entries(zip_path: &Path) -> QmResult<Vec<String>> {
  let output = Command::new("unzip").arg("-Z1").arg(zip_path).output()?;
  if !output.status.success() {
    return Err(QmError::message(format!(
      "unzip failed: {}",
      String::from_utf8_lossy(&output.stderr).trim()
    )));
  }

  Ok(
    String::from_utf8_lossy(&output.stdout)
      .lines()
      .filter(|line| !line.is_empty())
      .map(str::to_string)
      .collect(),
  )
}

/// Layout rules checked against a zip's entry list
fn structure_problems(entries: &[String], addon_name: &str, toc_name: &str) -> Vec<String> {
  let mut problems = Vec::new();

  let mut top_level: Vec<&str> = entries
    .iter()
    .filter_map(|entry| entry.split('/').next())
    .filter(|part| !part.is_empty())
    .collect();
  top_level.sort_unstable();
  top_level.dedup();

  if top_level != [addon_name] {
    let found = if top_level.is_empty() {
      "nothing".to_string()
    } else {
      top_level.join(", ")
    };
    problems.push(format!(
      "zip should contain exactly one top-level directory '{}', found: {}",
      addon_name, found
    ));
  }

  let expected_toc = format!("{}/{}", addon_name, toc_name);
  if !entries.iter().any(|entry| entry == &expected_toc) {
    problems.push(format!("'{}' missing from the zip", expected_toc));
  }

  problems
}
