//! GraphQL transport seam
//!
//! Board code talks to the API through the `GraphQl` trait so tests can
//! substitute a scripted in-memory transport. The real implementation is a
//! single blocking POST per query; rate limiting is handled by keeping the
//! whole run sequential, not by retrying.

use crate::core::error::{ApiError, BoardError, QmError, QmResult};
use serde_json::Value;

const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// One GraphQL round-trip: query text plus variables in, `data` object out
///
/// Implementations must report GraphQL-level errors (the `errors` array) as
/// `Err`, so callers only ever see a usable `data` payload.
pub trait GraphQl {
  fn execute(&self, query: &str, variables: Value) -> QmResult<Value>;
}

/// Real transport against api.github.com
#[derive(Debug)]
pub struct GitHubGraphQl {
  token: String,
}

impl GitHubGraphQl {
  /// Build the transport; no credential means nothing board-related can run
  pub fn new(token: Option<String>) -> QmResult<Self> {
    match token {
      Some(token) if !token.trim().is_empty() => Ok(Self { token }),
      _ => Err(QmError::Board(BoardError::AuthMissing)),
    }
  }
}

impl GraphQl for GitHubGraphQl {
  fn execute(&self, query: &str, variables: Value) -> QmResult<Value> {
    let response = ureq::post(GRAPHQL_URL)
      .set("Authorization", &format!("Bearer {}", self.token))
      .set("User-Agent", super::USER_AGENT)
      .send_json(serde_json::json!({
        "query": query,
        "variables": variables,
      }))?;

    let mut payload: Value = response.into_json()?;

    if let Some(errors) = payload.get("errors").and_then(Value::as_array)
      && !errors.is_empty()
    {
      let message = errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("; ");
      let message = if message.is_empty() {
        errors.iter().map(Value::to_string).collect::<Vec<_>>().join("; ")
      } else {
        message
      };
      return Err(QmError::Api(ApiError::GraphQl { message }));
    }

    match payload.get_mut("data") {
      Some(data) if !data.is_null() => Ok(data.take()),
      _ => Err(QmError::Api(ApiError::Malformed {
        detail: "response has no data object".to_string(),
      })),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::testing::ScriptedGraphQl;
  use super::*;

  #[test]
  fn test_missing_token_is_auth_error() {
    assert!(matches!(
      GitHubGraphQl::new(None).unwrap_err(),
      QmError::Board(BoardError::AuthMissing)
    ));
    assert!(matches!(
      GitHubGraphQl::new(Some("  ".to_string())).unwrap_err(),
      QmError::Board(BoardError::AuthMissing)
    ));
  }

  #[test]
  fn test_scripted_transport_records_calls() {
    let graph = ScriptedGraphQl::new();
    graph.push_data(serde_json::json!({"ok": true}));

    let data = graph
      .execute("query { viewer { login } }", serde_json::json!({}))
      .unwrap();
    assert_eq!(data["ok"], true);

    let calls = graph.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("viewer"));
  }
}
