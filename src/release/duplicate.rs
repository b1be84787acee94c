//! Duplicate-release detection
//!
//! Guards against shipping a version twice and against opening a new beta
//! line for a base version that already went stable. Tags are compared
//! with any leading `v` stripped; tags that are not version-shaped are
//! ignored.

use crate::core::error::{QmError, QmResult, ValidationError};
use crate::github::rest::Release;
use regex::Regex;

/// Split `X.Y.Z[-suffix]` into base and suffix; `None` for anything else
pub fn parse_version(input: &str) -> Option<(String, Option<String>)> {
  let pattern = Regex::new(r"^(\d+\.\d+\.\d+)(?:-(.+))?$").ok()?;
  let captures = pattern.captures(input)?;
  Some((
    captures[1].to_string(),
    captures.get(2).map(|m| m.as_str().to_string()),
  ))
}

/// Validate a candidate version against the published releases
pub fn check(version: &str, releases: &[Release]) -> QmResult<()> {
  let Some((base, suffix)) = parse_version(version) else {
    return Err(QmError::with_help(
      format!("'{}' is not a valid release version", version),
      "Use X.Y.Z or X.Y.Z-beta.N, e.g. 1.4.2 or 1.5.0-beta.1.",
    ));
  };

  println!(
    "   Base version: {}, suffix: {}",
    base,
    suffix.as_deref().unwrap_or("none (stable)")
  );

  for release in releases {
    let tag = release.tag_name.trim_start_matches('v');
    let Some((release_base, release_suffix)) = parse_version(tag) else {
      continue;
    };

    if version == tag {
      return Err(QmError::Validation(ValidationError::DuplicateRelease {
        tag: release.tag_name.clone(),
        suggestion: next_patch(&base),
      }));
    }

    // A beta for a base version that already shipped stable is stale by
    // definition
    if let Some(suffix) = &suffix
      && suffix.starts_with("beta")
      && base == release_base
      && release_suffix.is_none()
    {
      return Err(QmError::Validation(ValidationError::BetaAfterStable {
        version: version.to_string(),
        stable: tag.to_string(),
      }));
    }
  }

  println!("✓ No existing release found for version {}", version);
  Ok(())
}

fn next_patch(base: &str) -> String {
  match semver::Version::parse(base) {
    Ok(mut version) => {
      version.patch += 1;
      version.to_string()
    }
    Err(_) => base.to_string(),
  }
}
