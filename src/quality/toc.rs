//! Addon `.toc` metadata
//!
//! A TOC file opens with `## Key: Value` metadata lines followed by the
//! file list. Only `## Version:` and `## Interface:` matter here; parsing
//! works on in-memory text so a file pulled from another git commit can be
//! inspected without touching the working tree.

use crate::core::error::{QmError, QmResult, ValidationError};
use regex::Regex;

/// The metadata lines the toolkit cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
  /// `## Version:` value, e.g. `1.4.2` or `1.5.0-beta2`
  pub version: String,
  /// `## Interface:` builds, e.g. `110207` or `110200, 110207`
  pub interface: Vec<u64>,
}

impl Toc {
  /// Parse TOC text; `source` names the file in error messages
  pub fn parse(source: &str, content: &str) -> QmResult<Self> {
    let version = parse_version(content).ok_or_else(|| invalid(source, "no '## Version:' line"))?;

    let interface_line =
      parse_line(content, "Interface").ok_or_else(|| invalid(source, "no '## Interface:' line"))?;

    let mut interface = Vec::new();
    for piece in interface_line.split(',') {
      let piece = piece.trim();
      let build = piece.parse::<u64>().map_err(|_| {
        invalid(source, &format!("interface build '{}' is not numeric", piece))
      })?;
      interface.push(build);
    }

    Ok(Self { version, interface })
  }
}

/// Just the `## Version:` value, for callers that compare versions
pub fn parse_version(content: &str) -> Option<String> {
  parse_line(content, "Version")
}

fn parse_line(content: &str, key: &str) -> Option<String> {
  // TOC metadata keys are fixed words; the regex is infallible for them
  let pattern = Regex::new(&format!(r"(?m)^## {}:\s*(\S[^\r\n]*?)\s*$", key)).ok()?;
  pattern
    .captures(content)
    .map(|captures| captures[1].to_string())
}

fn invalid(source: &str, reason: &str) -> QmError {
  QmError::Validation(ValidationError::TocInvalid {
    path: source.to_string(),
    reason: reason.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = "\
## Interface: 110207
## Title: Spectrum Federation
## Notes: Guild quality-of-life helpers
## Version: 1.4.2
## Author: osulivan

SpectrumFederation.lua
";

  #[test]
  fn test_parse_full_toc() {
    let toc = Toc::parse("SpectrumFederation.toc", SAMPLE).unwrap();
    assert_eq!(toc.version, "1.4.2");
    assert_eq!(toc.interface, vec![110207]);
  }

  #[test]
  fn test_parse_multiple_interface_builds() {
    let content = "## Interface: 110200, 110207\n## Version: 2.0.0\n";
    let toc = Toc::parse("test.toc", content).unwrap();
    assert_eq!(toc.interface, vec![110200, 110207]);
  }

  #[test]
  fn test_parse_crlf_line_endings() {
    let content = "## Interface: 110207\r\n## Version: 1.0.0-beta2\r\n";
    let toc = Toc::parse("test.toc", content).unwrap();
    assert_eq!(toc.version, "1.0.0-beta2");
    assert_eq!(toc.interface, vec![110207]);
  }

  #[test]
  fn test_missing_version_fails() {
    let content = "## Interface: 110207\n## Title: X\n";
    let err = Toc::parse("test.toc", content).unwrap_err();
    assert!(err.to_string().contains("## Version"));
  }

  #[test]
  fn test_missing_interface_fails() {
    let content = "## Version: 1.0.0\n";
    let err = Toc::parse("test.toc", content).unwrap_err();
    assert!(err.to_string().contains("## Interface"));
  }

  #[test]
  fn test_non_numeric_interface_fails() {
    let content = "## Interface: 110207, next\n## Version: 1.0.0\n";
    let err = Toc::parse("test.toc", content).unwrap_err();
    assert!(err.to_string().contains("'next'"));
  }

  #[test]
  fn test_version_only_helper() {
    assert_eq!(parse_version(SAMPLE).as_deref(), Some("1.4.2"));
    assert_eq!(parse_version("SpectrumFederation.lua\n"), None);
  }
}
