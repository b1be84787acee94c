//! Status policy for blocked issues
//!
//! Every rule about which column an issue belongs in lives in [`decide`].
//! [`apply`] turns a decision into at most one board mutation and never
//! fails the run over a single item: a missing status option or a rejected
//! mutation becomes an outcome, not an error.

use crate::core::error::QmResult;
use crate::github::graphql::GraphQl;

use super::batch::Outcome;
use super::client::BoardClient;
use super::relations::Relationships;
use super::{BoardStatus, ItemRef, ItemState, ProjectItem};

/// What the rules concluded for one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  /// Closed issues keep whatever status they have
  ClosedItem,
  /// No rule applies; statuses we do not manage stay untouched
  LeaveAlone,
  /// A rule picked the status the issue already carries
  AlreadyThere(BoardStatus),
  /// Move the issue, with a human-readable reason
  Move { target: BoardStatus, reason: String },
}

/// Apply the rules in order and return the first that matches
///
/// The order is load-bearing: an open blocker wins over everything else,
/// and a stale `Blocked` status is only cleaned up when no blocker
/// relationship remains at all.
pub fn decide(state: ItemState, current_status: Option<&str>, blocked_by: &[ItemRef]) -> Decision {
  if state == ItemState::Closed {
    return Decision::ClosedItem;
  }

  let unresolved = blocked_by.iter().filter(|b| b.state == ItemState::Open).count();

  let (target, reason) = if unresolved > 0 {
    (
      BoardStatus::Blocked,
      format!("has {} unresolved blocker(s)", unresolved),
    )
  } else if !blocked_by.is_empty() {
    (BoardStatus::Todo, "all blockers are resolved".to_string())
  } else if current_status == Some(BoardStatus::Blocked.name()) {
    (BoardStatus::Todo, "no longer has blockers".to_string())
  } else {
    return Decision::LeaveAlone;
  };

  if current_status == Some(target.name()) {
    return Decision::AlreadyThere(target);
  }

  Decision::Move { target, reason }
}

/// Decide for one issue and perform the move when one is due
pub fn apply<G: GraphQl>(
  client: &BoardClient<'_, G>,
  project_item: &ProjectItem,
  relationships: &Relationships,
) -> QmResult<Outcome> {
  let issue = &project_item.item;
  let current = project_item.status.as_deref();

  println!("   Blocked by: {} issue(s)", relationships.blocked_by.len());
  println!("   Blocks: {} issue(s)", relationships.blocks.len());
  let unresolved: Vec<&ItemRef> = relationships
    .blocked_by
    .iter()
    .filter(|b| b.state == ItemState::Open)
    .collect();
  for blocker in &unresolved {
    println!("     - #{}: {} ({})", blocker.number, blocker.title, blocker.state);
  }

  match decide(issue.state, current, &relationships.blocked_by) {
    Decision::ClosedItem => {
      println!("⏭️  Issue #{} is closed, leaving its status alone", issue.number);
      Ok(Outcome::Skipped("issue is closed".to_string()))
    }
    Decision::LeaveAlone => {
      println!("✨ No blockers and not marked '{}', no change needed", BoardStatus::Blocked);
      Ok(Outcome::Skipped("no status change needed".to_string()))
    }
    Decision::AlreadyThere(target) => {
      println!("✨ Already in '{}', no change needed", target);
      Ok(Outcome::Skipped(format!("already in '{}'", target)))
    }
    Decision::Move { target, reason } => {
      let field = client.status_field()?;
      let Some(option_id) = field.option_id(target.name()) else {
        println!("⚠️  This board has no '{}' status option", target);
        println!("   Available: {}", field.option_names().join(", "));
        return Ok(Outcome::Skipped(format!("board has no '{}' status option", target)));
      };

      println!("🔄 Moving issue #{} to '{}' ({})", issue.number, target, reason);
      match client.set_status(&project_item.item_id, &field.id, option_id) {
        Ok(()) => {
          println!("✅ Issue #{} is now '{}'", issue.number, target);
          Ok(Outcome::Reconciled)
        }
        Err(err) => {
          println!("❌ Failed to move issue #{}: {}", issue.number, err);
          Ok(Outcome::Failed(format!("status update failed: {}", err)))
        }
      }
    }
  }
}
