//! Keep-a-Changelog surgery and entry generation
//!
//! `CHANGELOG.md` is a top header followed by `## [<version>] - <date>`
//! sections, newest first. Everything here works on in-memory text and
//! returns new strings; callers decide when to write the file back.

use regex::Regex;
use std::collections::BTreeMap;

/// Keep-a-Changelog buckets, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
  Added,
  Changed,
  Fixed,
  Removed,
}

impl Bucket {
  /// Categorize a commit subject by keyword; first match wins
  pub fn categorize(subject: &str) -> Self {
    let lower = subject.to_lowercase();
    if ["add", "new", "create", "implement"].iter().any(|k| lower.contains(k)) {
      Self::Added
    } else if ["fix", "bug", "issue", "resolve"].iter().any(|k| lower.contains(k)) {
      Self::Fixed
    } else if ["remove", "delete", "deprecate"].iter().any(|k| lower.contains(k)) {
      Self::Removed
    } else {
      Self::Changed
    }
  }

  pub fn heading(self) -> &'static str {
    match self {
      Self::Added => "Added",
      Self::Changed => "Changed",
      Self::Fixed => "Fixed",
      Self::Removed => "Removed",
    }
  }
}

/// One release's worth of categorized changes
#[derive(Debug, Clone)]
pub struct ReleaseEntry {
  pub version: String,
  /// ISO date, e.g. `2026-08-25`
  pub date: String,
  buckets: BTreeMap<Bucket, Vec<String>>,
}

impl ReleaseEntry {
  /// Build an entry from commit subjects; merge and empty subjects are
  /// dropped
  pub fn from_subjects(version: &str, date: &str, subjects: &[String]) -> Self {
    let mut buckets: BTreeMap<Bucket, Vec<String>> = BTreeMap::new();
    for subject in subjects {
      let subject = subject.trim();
      if subject.is_empty() || subject.starts_with("Merge ") {
        continue;
      }
      buckets
        .entry(Bucket::categorize(subject))
        .or_default()
        .push(subject.to_string());
    }

    Self {
      version: version.to_string(),
      date: date.to_string(),
      buckets,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.buckets.is_empty()
  }

  /// Section body without the `## [version]` heading; one `###` block per
  /// non-empty bucket, in [`Bucket`] order
  pub fn body_markdown(&self) -> String {
    let mut body = String::new();
    for (bucket, subjects) in &self.buckets {
      if !body.is_empty() {
        body.push('\n');
      }
      body.push_str(&format!("### {}\n\n", bucket.heading()));
      for subject in subjects {
        body.push_str(&format!("- {}\n", subject));
      }
    }
    body
  }
}

/// The section for `label` (a version, or a literal heading like
/// `Unreleased - Beta`), heading line included, trimmed
pub fn extract_section(changelog: &str, label: &str) -> Option<String> {
  let (start, end) = section_bounds(changelog, label)?;
  Some(changelog[start..end].trim().to_string())
}

/// Release notes for a version: its exact section, or the legacy
/// `[Unreleased - Beta]` section for a beta without one
pub fn notes_for_release(changelog: &str, version: &str) -> Option<String> {
  if let Some(section) = extract_section(changelog, version) {
    return Some(section);
  }
  if version.contains("-beta") {
    return extract_section(changelog, "Unreleased - Beta");
  }
  None
}

/// Replace the section for `version`, or insert a new one before the first
/// existing section, keeping newest-first order
pub fn upsert_section(changelog: &str, version: &str, date: &str, body: &str) -> String {
  let section = format!("## [{}] - {}\n\n{}\n", version, date, body.trim_end());

  if let Some((start, end)) = section_bounds(changelog, version) {
    return splice(changelog, start, end, &section);
  }

  match first_section_start(changelog) {
    Some(pos) => splice(changelog, pos, pos, &section),
    None => {
      let mut out = changelog.trim_end().to_string();
      if !out.is_empty() {
        out.push_str("\n\n");
      }
      out.push_str(&section);
      out
    }
  }
}

/// Drop every `*-beta*` section and any legacy `[Unreleased - Beta]`
/// section; run when a stable release supersedes the beta line
pub fn drop_beta_sections(changelog: &str) -> String {
  let Ok(heading) = Regex::new(r"(?m)^## \[(?:[^\]\n]*-beta[^\]\n]*|Unreleased - Beta)\]") else {
    return changelog.to_string();
  };

  let mut out = changelog.to_string();
  while let Some(found) = heading.find(&out) {
    let start = found.start();
    let end = next_section_start(&out, start);
    out.replace_range(start..end, "");
  }

  let mut trimmed = out.trim_end().to_string();
  trimmed.push('\n');
  trimmed
}

fn section_bounds(changelog: &str, label: &str) -> Option<(usize, usize)> {
  let heading = Regex::new(&format!(r"(?m)^## \[{}\]", regex::escape(label))).ok()?;
  let start = heading.find(changelog)?.start();
  Some((start, next_section_start(changelog, start)))
}

/// Start of the next `## [` heading strictly after the one at `from`, or
/// end of text
fn next_section_start(changelog: &str, from: usize) -> usize {
  match changelog[from..].find("\n## [") {
    Some(offset) => from + offset + 1,
    None => changelog.len(),
  }
}

fn first_section_start(changelog: &str) -> Option<usize> {
  if changelog.starts_with("## [") {
    return Some(0);
  }
  changelog.find("\n## [").map(|pos| pos + 1)
}

fn splice(changelog: &str, start: usize, end: usize, section: &str) -> String {
  let after = changelog[end..].trim_start_matches('\n');
  let mut out = String::with_capacity(changelog.len() + section.len());
  out.push_str(&changelog[..start]);
  out.push_str(section);
  if !after.is_empty() {
    out.push('\n');
    out.push_str(after);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  const CHANGELOG: &str = "\
# Changelog

All notable changes to this addon.

## [1.4.2] - 2026-08-01

### Fixed

- Fix raid frame flicker

## [1.4.1] - 2026-07-20

### Added

- Add guild bank tab

## [1.4.0] - 2026-07-01

### Changed

- Rework options panel
";

  #[test]
  fn test_categorize_keywords() {
    assert_eq!(Bucket::categorize("Add spell tracker"), Bucket::Added);
    assert_eq!(Bucket::categorize("Implement new options panel"), Bucket::Added);
    assert_eq!(Bucket::categorize("Fix nil error on login"), Bucket::Fixed);
    assert_eq!(Bucket::categorize("Resolve tooltip overlap"), Bucket::Fixed);
    assert_eq!(Bucket::categorize("Remove legacy minimap icon"), Bucket::Removed);
    assert_eq!(Bucket::categorize("Update TOC for 11.2"), Bucket::Changed);
  }

  #[test]
  fn test_categorize_first_match_wins() {
    // has both "add" and "fix"; Added is checked first
    assert_eq!(Bucket::categorize("Add fix for combat log"), Bucket::Added);
  }

  #[test]
  fn test_entry_from_subjects() {
    let subjects = vec![
      "Add threat meter".to_string(),
      "Fix cooldown text overlap".to_string(),
      "Merge pull request #12 from beta".to_string(),
      "Bump TOC interface".to_string(),
    ];
    let entry = ReleaseEntry::from_subjects("1.5.0", "2026-08-25", &subjects);
    let body = entry.body_markdown();

    let added = body.find("### Added").unwrap();
    let changed = body.find("### Changed").unwrap();
    let fixed = body.find("### Fixed").unwrap();
    assert!(added < changed && changed < fixed);
    assert!(body.contains("- Add threat meter"));
    assert!(body.contains("- Bump TOC interface"));
    assert!(!body.contains("Merge pull request"));
    assert!(!body.contains("### Removed"));
  }

  #[test]
  fn test_entry_empty_when_only_merges() {
    let subjects = vec!["Merge branch 'beta'".to_string()];
    let entry = ReleaseEntry::from_subjects("1.5.0", "2026-08-25", &subjects);
    assert!(entry.is_empty());
    assert_eq!(entry.body_markdown(), "");
  }

  #[test]
  fn test_extract_middle_section() {
    let section = extract_section(CHANGELOG, "1.4.1").unwrap();
    assert!(section.starts_with("## [1.4.1] - 2026-07-20"));
    assert!(section.contains("- Add guild bank tab"));
    assert!(!section.contains("1.4.0"));
  }

  #[test]
  fn test_extract_last_section_runs_to_end() {
    let section = extract_section(CHANGELOG, "1.4.0").unwrap();
    assert!(section.contains("- Rework options panel"));
  }

  #[test]
  fn test_extract_missing_section() {
    assert_eq!(extract_section(CHANGELOG, "9.9.9"), None);
  }

  #[test]
  fn test_notes_beta_falls_back_to_unreleased_section() {
    let changelog = "\
# Changelog

## [Unreleased - Beta]

### Added

- Experimental raid module

## [1.4.2] - 2026-08-01

### Fixed

- Fix raid frame flicker
";
    let notes = notes_for_release(changelog, "1.5.0-beta.1").unwrap();
    assert!(notes.contains("Experimental raid module"));

    // Exact section wins when it exists
    let notes = notes_for_release(changelog, "1.4.2").unwrap();
    assert!(notes.contains("Fix raid frame flicker"));

    // Stable versions never fall back
    assert_eq!(notes_for_release(changelog, "1.5.0"), None);
  }

  #[test]
  fn test_upsert_inserts_newest_first() {
    let updated = upsert_section(CHANGELOG, "1.5.0", "2026-08-25", "### Added\n\n- New thing");

    let new_pos = updated.find("## [1.5.0] - 2026-08-25").unwrap();
    let old_pos = updated.find("## [1.4.2]").unwrap();
    assert!(new_pos < old_pos);
    // Header text stays above the new section
    assert!(updated.find("# Changelog").unwrap() < new_pos);
    // Old sections intact
    assert!(updated.contains("- Rework options panel"));
  }

  #[test]
  fn test_upsert_replaces_existing_section() {
    let updated = upsert_section(CHANGELOG, "1.4.1", "2026-07-21", "### Fixed\n\n- Repaired entry");

    assert!(updated.contains("## [1.4.1] - 2026-07-21"));
    assert!(updated.contains("- Repaired entry"));
    assert!(!updated.contains("- Add guild bank tab"));
    assert_eq!(updated.matches("## [1.4.1]").count(), 1);
    // Neighbors untouched
    assert!(updated.contains("- Fix raid frame flicker"));
    assert!(updated.contains("- Rework options panel"));
  }

  #[test]
  fn test_upsert_into_changelog_without_sections() {
    let updated = upsert_section("# Changelog\n", "1.0.0", "2026-08-25", "### Added\n\n- Everything");
    assert!(updated.starts_with("# Changelog\n\n## [1.0.0] - 2026-08-25"));
    assert!(updated.contains("- Everything"));
  }

  #[test]
  fn test_drop_beta_sections() {
    let changelog = "\
# Changelog

## [1.5.0-beta.2] - 2026-08-20

### Added

- Beta only thing

## [Unreleased - Beta]

### Changed

- Older beta note

## [1.4.2] - 2026-08-01

### Fixed

- Fix raid frame flicker
";
    let cleaned = drop_beta_sections(changelog);

    assert!(!cleaned.contains("beta.2"));
    assert!(!cleaned.contains("Unreleased - Beta"));
    assert!(!cleaned.contains("Beta only thing"));
    assert!(!cleaned.contains("Older beta note"));
    assert!(cleaned.contains("# Changelog"));
    assert!(cleaned.contains("## [1.4.2] - 2026-08-01"));
    assert!(cleaned.contains("- Fix raid frame flicker"));
  }

  #[test]
  fn test_drop_beta_sections_when_none_exist() {
    let cleaned = drop_beta_sections(CHANGELOG);
    assert!(cleaned.contains("## [1.4.2]"));
    assert!(cleaned.contains("## [1.4.0]"));
  }
}
