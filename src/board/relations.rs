//! Raw tracking edges to blocked-by/blocks mapping
//!
//! The tracker exposes a generic "tracks / tracked-in" relation. This
//! project reads it asymmetrically: an issue that tracks another is treated
//! as a *blocker* of the tracked issue. So `trackedInIssues` (issues
//! tracking this one) become `blocked_by`, and `trackedIssues` (issues this
//! one tracks) become `blocks`. That reading is a project convention, not a
//! property of the relation itself; keep it exactly as is.

use super::{ItemRef, ItemState};
use serde_json::Value;

/// Edge sets exactly as the API returned them, nulls and all
#[derive(Debug, Default)]
pub struct RawEdges {
  /// `trackedInIssues` nodes: issues that track (block) this one
  pub tracked_in: Vec<Value>,
  /// `trackedIssues` nodes: issues this one tracks (blocks)
  pub tracks: Vec<Value>,
}

/// The view the reconciler consumes
#[derive(Debug, Default)]
pub struct Relationships {
  pub blocked_by: Vec<ItemRef>,
  pub blocks: Vec<ItemRef>,
}

/// Pure mapping from raw edges to the blocked-by/blocks view, dropping
/// null and malformed entries
pub fn resolve(raw: RawEdges) -> Relationships {
  Relationships {
    blocked_by: raw.tracked_in.iter().filter_map(parse_item).collect(),
    blocks: raw.tracks.iter().filter_map(parse_item).collect(),
  }
}

fn parse_item(node: &Value) -> Option<ItemRef> {
  Some(ItemRef {
    number: node.get("number")?.as_u64()?,
    title: node.get("title")?.as_str()?.to_string(),
    state: ItemState::from_api(node.get("state")?.as_str()?),
  })
}
