//! Merged-branch cleanup command

use std::env;

use crate::core::config::QmConfig;
use crate::core::error::QmResult;
use crate::github::rest::{RefDeletion, RestClient};

/// Run the branch cleanup command
///
/// Deletes the head branch of the pull request merged at `sha`. Commits
/// without an associated PR (direct pushes, promotion merges) and
/// protected branches are left alone; a branch someone already deleted is
/// not an error.
pub fn run_branch_cleanup(sha: String, token: Option<String>, repo: Option<String>) -> QmResult<()> {
  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let repository = config.repository(repo)?;
  let rest = RestClient::new(token, repository)?;

  let short_sha = if sha.len() > 7 { &sha[..7] } else { sha.as_str() };
  println!("🔍 Looking for the PR associated with commit {}", short_sha);

  let pulls = rest.pulls_for_commit(&sha)?;
  let Some(pull) = pulls.first() else {
    println!("⏭️  No PR found for this commit, skipping branch cleanup");
    return Ok(());
  };
  println!("   Found PR #{}", pull.number);

  let branch = rest.pull_head_branch(pull.number)?;
  if config.release.protected_branches.iter().any(|p| p == &branch) {
    println!("⏭️  Branch '{}' is protected, skipping deletion", branch);
    return Ok(());
  }

  println!("   Target branch for deletion: {}", branch);
  match rest.delete_branch_ref(&branch)? {
    RefDeletion::Deleted => println!("✅ Branch '{}' deleted successfully", branch),
    RefDeletion::AlreadyGone => println!("⏭️  Branch '{}' already deleted", branch),
    RefDeletion::Refused => println!("⚠️  Branch '{}' is protected or cannot be deleted", branch),
  }

  Ok(())
}
