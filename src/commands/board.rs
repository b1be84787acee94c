//! Board reconcile command: drive the blocked-issue reconciler

use std::env;

use crate::board::{BatchRunner, BoardClient, Outcome, batch};
use crate::core::config::QmConfig;
use crate::core::error::{QmError, QmResult};
use crate::github::graphql::GitHubGraphQl;

/// Run the board reconcile command
///
/// Exactly one of `issue` or `all` selects the run mode. Per-issue
/// failures in a sweep are reported in the summary, not as an exit
/// status; only run-level failures (auth, project lookup, board schema)
/// abort the command.
pub fn run_board_reconcile(
  issue: Option<u64>,
  all: bool,
  token: Option<String>,
  repo: Option<String>,
  project: Option<u64>,
) -> QmResult<()> {
  if (issue.is_none() && !all) || (issue.is_some() && all) {
    return Err(QmError::message("Must specify an issue number or use --all flag"));
  }

  let current_dir = env::current_dir()?;
  let config = QmConfig::load(&current_dir)?;
  let repository = config.repository(repo)?;
  let project_number = config.project_number(project)?;

  println!("Repository: {}", repository);
  println!("Project Number: {}", project_number);

  let graph = GitHubGraphQl::new(token)?;
  let client = BoardClient::new(&graph, &repository, project_number)?;
  let runner = BatchRunner::new(&client);

  let outcomes = if let Some(number) = issue {
    println!("Processing single issue: #{}", number);
    vec![runner.run_single(number)?]
  } else {
    println!("Processing all open issues in the project");
    runner.run_sweep()?
  };

  let (reconciled, skipped, failed) = batch::summarize(&outcomes);
  println!("\n{}", "=".repeat(60));
  println!("📋 {} updated, {} skipped, {} failed", reconciled, skipped, failed);
  for entry in &outcomes {
    if let Outcome::Failed(reason) = &entry.outcome {
      println!("   - #{}: {}", entry.number, reason);
    }
  }
  println!("Blocked issue management complete");
  println!("{}", "=".repeat(60));

  Ok(())
}
