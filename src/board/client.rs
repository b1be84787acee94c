//! GraphQL client for Projects-v2 boards
//!
//! One instance per run. Project id and status-field schema are resolved
//! lazily on first need, then reused; nothing here survives across runs.

use crate::core::error::{ApiError, BoardError, ConfigError, QmError, QmResult};
use crate::github::graphql::GraphQl;
use serde_json::{Value, json};
use std::cell::OnceCell;

use super::relations::RawEdges;
use super::{ItemRef, ItemState, ProjectItem, StatusField, StatusOption};

const PROJECT_BY_USER_QUERY: &str = r#"
query($owner: String!, $number: Int!) {
  user(login: $owner) {
    projectV2(number: $number) {
      id
      title
    }
  }
}"#;

const PROJECT_BY_ORG_QUERY: &str = r#"
query($owner: String!, $number: Int!) {
  organization(login: $owner) {
    projectV2(number: $number) {
      id
      title
    }
  }
}"#;

const STATUS_FIELD_QUERY: &str = r#"
query($projectId: ID!) {
  node(id: $projectId) {
    ... on ProjectV2 {
      fields(first: 20) {
        nodes {
          ... on ProjectV2SingleSelectField {
            id
            name
            options {
              id
              name
            }
          }
        }
      }
    }
  }
}"#;

const PROJECT_ITEM_QUERY: &str = r#"
query($owner: String!, $repo: String!, $issueNumber: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $issueNumber) {
      id
      number
      title
      state
      projectItems(first: 10) {
        nodes {
          id
          project {
            number
          }
          fieldValues(first: 20) {
            nodes {
              ... on ProjectV2ItemFieldSingleSelectValue {
                name
                field {
                  ... on ProjectV2SingleSelectField {
                    name
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}"#;

const RELATIONSHIPS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $issueNumber: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $issueNumber) {
      trackedInIssues(first: 20) {
        nodes {
          number
          title
          state
        }
      }
      trackedIssues(first: 20) {
        nodes {
          number
          title
          state
        }
      }
    }
  }
}"#;

const UPDATE_STATUS_MUTATION: &str = r#"
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: ProjectV2FieldValue!) {
  updateProjectV2ItemFieldValue(
    input: {
      projectId: $projectId
      itemId: $itemId
      fieldId: $fieldId
      value: $value
    }
  ) {
    projectV2Item {
      id
    }
  }
}"#;

const LIST_ITEMS_QUERY: &str = r#"
query($projectId: ID!, $cursor: String) {
  node(id: $projectId) {
    ... on ProjectV2 {
      items(first: 50, after: $cursor) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          content {
            ... on Issue {
              number
              state
            }
          }
        }
      }
    }
  }
}"#;

/// Project resolution is tried for both owner kinds, in this order
#[derive(Debug, Clone, Copy)]
enum OwnerKind {
  User,
  Organization,
}

impl OwnerKind {
  fn query(self) -> &'static str {
    match self {
      OwnerKind::User => PROJECT_BY_USER_QUERY,
      OwnerKind::Organization => PROJECT_BY_ORG_QUERY,
    }
  }

  fn root(self) -> &'static str {
    match self {
      OwnerKind::User => "user",
      OwnerKind::Organization => "organization",
    }
  }
}

/// Synchronous access to one project board
pub struct BoardClient<'g, G: GraphQl> {
  graph: &'g G,
  owner: String,
  repo_name: String,
  project_number: u64,
  project_id: OnceCell<String>,
  status_field: OnceCell<StatusField>,
}

impl<'g, G: GraphQl> BoardClient<'g, G> {
  /// `repository` is an `owner/name` slug
  pub fn new(graph: &'g G, repository: &str, project_number: u64) -> QmResult<Self> {
    let Some((owner, repo_name)) = repository.split_once('/') else {
      return Err(QmError::Config(ConfigError::Invalid {
        field: "repository".to_string(),
        reason: format!("'{}' is not an owner/repo pair", repository),
      }));
    };

    Ok(Self {
      graph,
      owner: owner.to_string(),
      repo_name: repo_name.to_string(),
      project_number,
      project_id: OnceCell::new(),
      status_field: OnceCell::new(),
    })
  }

  /// Project node id, resolved on first call and cached for the run
  ///
  /// The owner is tried as a user first, then as an organization; if both
  /// lookups fail the last failure is surfaced.
  pub fn project_id(&self) -> QmResult<&str> {
    if let Some(id) = self.project_id.get() {
      return Ok(id.as_str());
    }

    let id = self.lookup_project_id()?;
    Ok(self.project_id.get_or_init(|| id).as_str())
  }

  fn lookup_project_id(&self) -> QmResult<String> {
    let variables = json!({
      "owner": self.owner,
      "number": self.project_number,
    });

    let mut last_error = String::new();
    for kind in [OwnerKind::User, OwnerKind::Organization] {
      match self.graph.execute(kind.query(), variables.clone()) {
        Ok(data) => {
          let project = data.pointer(&format!("/{}/projectV2", kind.root()));
          if let Some(project) = project
            && let Some(id) = project.get("id").and_then(Value::as_str)
          {
            let title = project.get("title").and_then(Value::as_str).unwrap_or("(untitled)");
            println!("📌 Found project: {} ({})", title, id);
            return Ok(id.to_string());
          }
          last_error = format!("no project {} under {} '{}'", self.project_number, kind.root(), self.owner);
        }
        Err(err) => {
          last_error = err.to_string();
        }
      }
    }

    Err(QmError::Board(BoardError::ProjectNotFound {
      owner: self.owner.clone(),
      number: self.project_number,
      last_error,
    }))
  }

  /// The board's "Status" field schema, fetched once and cached for the run
  pub fn status_field(&self) -> QmResult<&StatusField> {
    if let Some(field) = self.status_field.get() {
      return Ok(field);
    }

    let field = self.lookup_status_field()?;
    Ok(self.status_field.get_or_init(|| field))
  }

  fn lookup_status_field(&self) -> QmResult<StatusField> {
    let project_id = self.project_id()?.to_string();
    let data = self
      .graph
      .execute(STATUS_FIELD_QUERY, json!({ "projectId": project_id }))?;

    let nodes = data
      .pointer("/node/fields/nodes")
      .and_then(Value::as_array)
      .ok_or_else(|| QmError::Api(ApiError::Malformed {
        detail: "project field list missing from response".to_string(),
      }))?;

    for node in nodes {
      // Non-single-select fields come back as empty objects
      if node.get("name").and_then(Value::as_str) != Some("Status") {
        continue;
      }

      let id = node
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| QmError::Api(ApiError::Malformed {
          detail: "Status field has no id".to_string(),
        }))?
        .to_string();

      let options = node
        .get("options")
        .and_then(Value::as_array)
        .map(|options| {
          options
            .iter()
            .filter_map(|option| {
              Some(StatusOption {
                id: option.get("id")?.as_str()?.to_string(),
                name: option.get("name")?.as_str()?.to_string(),
              })
            })
            .collect()
        })
        .unwrap_or_default();

      let field = StatusField { id, options };
      println!("📋 Status options: {}", field.option_names().join(", "));
      return Ok(field);
    }

    Err(QmError::Board(BoardError::StatusFieldMissing { project_id }))
  }

  /// The issue's placement on this board, or `None` when the issue does not
  /// exist or is not a member of this project
  pub fn fetch_project_item(&self, issue_number: u64) -> QmResult<Option<ProjectItem>> {
    let data = self.graph.execute(
      PROJECT_ITEM_QUERY,
      json!({
        "owner": self.owner,
        "repo": self.repo_name,
        "issueNumber": issue_number,
      }),
    )?;

    let issue = match data.pointer("/repository/issue") {
      Some(issue) if !issue.is_null() => issue,
      _ => return Ok(None),
    };

    let item = ItemRef {
      number: issue.get("number").and_then(Value::as_u64).unwrap_or(issue_number),
      title: issue
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string(),
      state: ItemState::from_api(issue.get("state").and_then(Value::as_str).unwrap_or("OPEN")),
    };

    let memberships = issue
      .pointer("/projectItems/nodes")
      .and_then(Value::as_array)
      .cloned()
      .unwrap_or_default();

    for membership in &memberships {
      let number = membership.pointer("/project/number").and_then(Value::as_u64);
      if number != Some(self.project_number) {
        continue;
      }

      let item_id = membership
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| QmError::Api(ApiError::Malformed {
          detail: format!("project item for issue #{} has no id", issue_number),
        }))?
        .to_string();

      let status = membership
        .pointer("/fieldValues/nodes")
        .and_then(Value::as_array)
        .and_then(|values| {
          values.iter().find_map(|value| {
            if value.pointer("/field/name").and_then(Value::as_str) == Some("Status") {
              value.get("name").and_then(Value::as_str).map(str::to_string)
            } else {
              None
            }
          })
        });

      return Ok(Some(ProjectItem { item_id, item, status }));
    }

    Ok(None)
  }

  /// Raw tracking edges for an issue; nulls are preserved for the resolver
  pub fn fetch_relationships(&self, issue_number: u64) -> QmResult<RawEdges> {
    let data = self.graph.execute(
      RELATIONSHIPS_QUERY,
      json!({
        "owner": self.owner,
        "repo": self.repo_name,
        "issueNumber": issue_number,
      }),
    )?;

    let issue = match data.pointer("/repository/issue") {
      Some(issue) if !issue.is_null() => issue,
      _ => return Ok(RawEdges::default()),
    };

    let nodes_at = |path: &str| -> Vec<Value> {
      issue
        .pointer(path)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
    };

    Ok(RawEdges {
      tracked_in: nodes_at("/trackedInIssues/nodes"),
      tracks: nodes_at("/trackedIssues/nodes"),
    })
  }

  /// Set the status field of one project item to one option
  pub fn set_status(&self, item_id: &str, field_id: &str, option_id: &str) -> QmResult<()> {
    let project_id = self.project_id()?.to_string();
    let data = self
      .graph
      .execute(
        UPDATE_STATUS_MUTATION,
        json!({
          "projectId": project_id,
          "itemId": item_id,
          "fieldId": field_id,
          "value": { "singleSelectOptionId": option_id },
        }),
      )
      .map_err(|err| {
        QmError::Board(BoardError::MutationFailed {
          detail: err.to_string(),
        })
      })?;

    if data.pointer("/updateProjectV2ItemFieldValue/projectV2Item/id").is_none() {
      return Err(QmError::Board(BoardError::MutationFailed {
        detail: "mutation response did not confirm the update".to_string(),
      }));
    }

    Ok(())
  }

  /// Numbers of all open issues on the board, across every page
  ///
  /// Follows the cursor until the API reports no further pages; the result
  /// is exhaustive no matter how many pages it took.
  pub fn list_open_items(&self) -> QmResult<Vec<u64>> {
    let project_id = self.project_id()?.to_string();
    let mut numbers = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
      let data = self.graph.execute(
        LIST_ITEMS_QUERY,
        json!({
          "projectId": project_id,
          "cursor": cursor,
        }),
      )?;

      let items = data.pointer("/node/items").ok_or_else(|| {
        QmError::Api(ApiError::Malformed {
          detail: "project item page missing from response".to_string(),
        })
      })?;

      if let Some(nodes) = items.get("nodes").and_then(Value::as_array) {
        for node in nodes {
          let content = node.get("content");
          let state = content.and_then(|c| c.get("state")).and_then(Value::as_str);
          if state == Some("OPEN")
            && let Some(number) = content.and_then(|c| c.get("number")).and_then(Value::as_u64)
          {
            numbers.push(number);
          }
        }
      }

      let has_next = items
        .pointer("/pageInfo/hasNextPage")
        .and_then(Value::as_bool)
        .unwrap_or(false);
      if !has_next {
        return Ok(numbers);
      }
      cursor = items
        .pointer("/pageInfo/endCursor")
        .and_then(Value::as_str)
        .map(str::to_string);
    }
  }

  #[cfg(test)]
  pub(crate) fn seed_schema(&self, project_id: &str, field: StatusField) {
    let _ = self.project_id.set(project_id.to_string());
    let _ = self.status_field.set(field);
  }
}
