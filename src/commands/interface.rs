//! Game-version probe against Blizzard's patch servers
//!
//! The patch endpoints serve a pipe-delimited table, one row per region,
//! with a header row naming each column as `Name!TYPE:len`:
//!
//! ```text
//! Region!STRING:0|BuildConfig!HEX:16|...|BuildId!DEC:4|VersionsName!String:0|...
//! us|e2e46...|5a7c2...|...|64978|11.2.7.64978|53020...
//! ```
//!
//! The `us` row's `VersionsName` column carries the game version; the TOC
//! interface build is its first three components, two digits each for
//! minor and patch (`11.2.7` is interface `110207`). No authentication,
//! plain HTTP.

use std::env;
use std::fs;

use regex::Regex;

use crate::core::config::QmConfig;
use crate::core::error::{ApiError, QmError, QmResult, ValidationError};
use crate::quality::toc::Toc;

const LIVE_ENDPOINT: &str = "http://us.patch.battle.net:1119/wow/versions";
const BETA_ENDPOINT: &str = "http://us.patch.battle.net:1119/wow_beta/versions";

/// Run the interface fetch command
pub fn run_interface_fetch(channel: String, check_toc: bool) -> QmResult<()> {
  let endpoint = match channel.as_str() {
    "live" => LIVE_ENDPOINT,
    "beta" => BETA_ENDPOINT,
    other => {
      return Err(QmError::with_help(
        format!("Unknown channel '{}'", other),
        "Use --channel live or --channel beta.",
      ));
    }
  };

  println!("🔍 Querying {} endpoint: {}", channel, endpoint);
  let body = ureq::get(endpoint)
    .call()
    .map_err(|e| QmError::Api(ApiError::Request { detail: e.to_string() }))?
    .into_string()
    .map_err(|e| QmError::Api(ApiError::Malformed { detail: e.to_string() }))?;

  let version = us_version(&body)?;
  let build = interface_build(&version)?;
  println!("Game version: {}", version);
  println!("Interface version: {}", build);

  if check_toc {
    let current_dir = env::current_dir()?;
    let config = QmConfig::load(&current_dir)?;
    let toc_path = config.toc_path()?;
    let content = fs::read_to_string(current_dir.join(&toc_path))?;
    let toc = Toc::parse(&toc_path.display().to_string(), &content)?;

    let listed = toc
      .interface
      .iter()
      .map(u64::to_string)
      .collect::<Vec<_>>()
      .join(", ");
    if !toc.interface.contains(&build) {
      return Err(QmError::Validation(ValidationError::InterfaceMismatch {
        expected: build.to_string(),
        toc: listed,
      }));
    }
    println!("✅ TOC lists interface {} ({})", build, listed);
  }

  Ok(())
}

/// The `us` region's `VersionsName` value from a versions table
fn us_version(body: &str) -> QmResult<String> {
  // `## seqn = N` lines are metadata, not rows
  let mut rows = body
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'));

  let header = rows.next().ok_or_else(|| malformed("versions response is empty"))?;
  let column = header
    .split('|')
    .position(|cell| cell.split('!').next() == Some("VersionsName"))
    .ok_or_else(|| malformed("versions response has no VersionsName column"))?;

  let shape = Regex::new(r"^\d+\.\d+\.\d+\.\d+$").map_err(|e| QmError::message(e.to_string()))?;
  for row in rows {
    let cells: Vec<&str> = row.split('|').collect();
    if cells.first().copied() != Some("us") {
      continue;
    }
    let value = cells.get(column).map(|cell| cell.trim()).unwrap_or("");
    if shape.is_match(value) {
      return Ok(value.to_string());
    }
    return Err(malformed(&format!("'{}' does not look like a game version", value)));
  }

  Err(malformed("versions response has no 'us' region row"))
}

/// Interface build for a `major.minor.patch[.build]` game version
fn interface_build(version: &str) -> QmResult<u64> {
  let parts: Vec<u64> = version
    .split('.')
    .take(3)
    .filter_map(|part| part.parse().ok())
    .collect();

  match parts.as_slice() {
    // Minor and patch occupy two digits each in the build number
    [major, minor, patch] if *minor < 100 && *patch < 100 => Ok(major * 10_000 + minor * 100 + patch),
    _ => Err(malformed(&format!(
      "cannot derive an interface build from '{}'",
      version
    ))),
  }
}

fn malformed(detail: &str) -> QmError {
  QmError::Api(ApiError::Malformed {
    detail: detail.to_string(),
  })
}
