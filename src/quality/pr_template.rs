//! Pull-request description checks
//!
//! The PR template carries a `## Type of Change` section (pick at least
//! one) and a `## Checklist` section (complete every item). Checkbox
//! matching accepts `x` or `X`.

use crate::core::error::{QmError, QmResult, ValidationError};
use regex::Regex;

/// Validate a PR body against the template rules
pub fn validate(body: &str) -> QmResult<()> {
  let mut problems = Vec::new();

  match section(body, "Type of Change") {
    None => problems.push("missing '## Type of Change' section".to_string()),
    Some(text) => {
      let (total, checked) = count_checkboxes(text);
      println!("✓ Found 'Type of Change' section with {} option(s)", total);
      if checked == 0 {
        problems.push("no checkbox is selected in 'Type of Change'".to_string());
      }
    }
  }

  match section(body, "Checklist") {
    None => problems.push("missing '## Checklist' section".to_string()),
    Some(text) => {
      let (total, checked) = count_checkboxes(text);
      println!("✓ Found 'Checklist' section with {} item(s)", total);
      if total == 0 {
        problems.push("no checklist items found in 'Checklist'".to_string());
      } else if checked < total {
        problems.push(format!(
          "not all checklist items are checked: {}/{} completed",
          checked, total
        ));
      }
    }
  }

  if problems.is_empty() {
    Ok(())
  } else {
    Err(QmError::Validation(ValidationError::PrTemplate { problems }))
  }
}

/// Text between a `## <heading>` line and the next `##`; an empty section
/// counts as missing
fn section<'a>(body: &'a str, heading: &str) -> Option<&'a str> {
  let pattern = Regex::new(&format!(r"(?i)## {}", regex::escape(heading))).ok()?;
  let found = pattern.find(body)?;
  let rest = &body[found.end()..];
  let end = rest.find("##").unwrap_or(rest.len());
  let text = rest[..end].trim();
  if text.is_empty() { None } else { Some(text) }
}

/// (total, checked) checkbox counts in a section
fn count_checkboxes(text: &str) -> (usize, usize) {
  let (Ok(any), Ok(checked)) = (
    Regex::new(r"-\s*\[[\sxX]\]"),
    Regex::new(r"-\s*\[[xX]\]"),
  ) else {
    return (0, 0);
  };
  (any.find_iter(text).count(), checked.find_iter(text).count())
}

#[cfg(test)]
mod tests {
  use super::*;

  const GOOD_BODY: &str = "\
## Description

Adds a threat meter.

## Type of Change

- [x] New feature
- [ ] Bug fix
- [ ] Breaking change

## Checklist

- [x] Tested in-game
- [X] Updated CHANGELOG.md
- [x] TOC version bumped
";

  fn problems(err: QmError) -> Vec<String> {
    match err {
      QmError::Validation(ValidationError::PrTemplate { problems }) => problems,
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[test]
  fn test_valid_body_passes() {
    assert!(validate(GOOD_BODY).is_ok());
  }

  #[test]
  fn test_unchecked_checklist_items_fail() {
    let body = GOOD_BODY.replace("- [X] Updated CHANGELOG.md", "- [ ] Updated CHANGELOG.md");
    let problems = problems(validate(&body).unwrap_err());
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("2/3 completed"));
  }

  #[test]
  fn test_no_change_type_selected_fails() {
    let body = GOOD_BODY.replace("- [x] New feature", "- [ ] New feature");
    let problems = problems(validate(&body).unwrap_err());
    assert!(problems.iter().any(|p| p.contains("Type of Change")));
  }

  #[test]
  fn test_missing_sections_are_both_reported() {
    let problems = problems(validate("Just a description, no template.").unwrap_err());
    assert_eq!(problems.len(), 2);
    assert!(problems[0].contains("Type of Change"));
    assert!(problems[1].contains("Checklist"));
  }

  #[test]
  fn test_heading_match_is_case_insensitive() {
    let body = GOOD_BODY
      .replace("## Type of Change", "## type of change")
      .replace("## Checklist", "## CHECKLIST");
    assert!(validate(&body).is_ok());
  }

  #[test]
  fn test_empty_section_counts_as_missing() {
    let body = "## Type of Change\n\n## Checklist\n\n- [x] Done\n";
    let problems = problems(validate(body).unwrap_err());
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("missing '## Type of Change'"));
  }
}
