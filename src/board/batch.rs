//! Sequential runs over one issue or the whole board

use crate::core::error::QmResult;
use crate::github::graphql::GraphQl;

use super::client::BoardClient;
use super::reconcile;
use super::relations;

/// How one issue fared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// A status mutation was performed
  Reconciled,
  /// Nothing to do, with the reason
  Skipped(String),
  /// The issue could not be processed; the run moves on
  Failed(String),
}

/// One issue's result in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
  pub number: u64,
  pub outcome: Outcome,
}

/// Drives reconciliation over a single issue or a whole-board sweep
pub struct BatchRunner<'c, 'g, G: GraphQl> {
  client: &'c BoardClient<'g, G>,
}

impl<'c, 'g, G: GraphQl> BatchRunner<'c, 'g, G> {
  pub fn new(client: &'c BoardClient<'g, G>) -> Self {
    Self { client }
  }

  /// Reconcile one issue; wiring failures propagate to the caller
  pub fn run_single(&self, issue_number: u64) -> QmResult<ItemOutcome> {
    let outcome = self.process(issue_number)?;
    Ok(ItemOutcome { number: issue_number, outcome })
  }

  /// Reconcile every open issue on the board, one at a time
  ///
  /// Board discovery and schema failures abort the sweep before any issue
  /// is touched. A failure on one issue is recorded as its outcome and the
  /// sweep continues with the next.
  pub fn run_sweep(&self) -> QmResult<Vec<ItemOutcome>> {
    self.client.status_field()?;

    let numbers = self.client.list_open_items()?;
    println!("🔍 Found {} open issue(s) on the board", numbers.len());

    let mut outcomes = Vec::with_capacity(numbers.len());
    for number in numbers {
      let outcome = match self.process(number) {
        Ok(outcome) => outcome,
        Err(err) => {
          println!("❌ Error processing issue #{}: {}", number, err);
          Outcome::Failed(err.to_string())
        }
      };
      outcomes.push(ItemOutcome { number, outcome });
    }

    Ok(outcomes)
  }

  fn process(&self, issue_number: u64) -> QmResult<Outcome> {
    println!("\n{}", "=".repeat(60));
    println!("Processing issue #{}", issue_number);
    println!("{}", "=".repeat(60));

    let Some(project_item) = self.client.fetch_project_item(issue_number)? else {
      println!("⏭️  Issue #{} is not on the project board", issue_number);
      return Ok(Outcome::Skipped("not on the project board".to_string()));
    };

    println!("   Issue: #{} - {}", project_item.item.number, project_item.item.title);
    println!("   State: {}", project_item.item.state);
    println!("   Status: {}", project_item.status.as_deref().unwrap_or("(none)"));

    let raw = self.client.fetch_relationships(issue_number)?;
    let relationships = relations::resolve(raw);

    reconcile::apply(self.client, &project_item, &relationships)
  }
}

/// Tally of a run as (reconciled, skipped, failed)
pub fn summarize(outcomes: &[ItemOutcome]) -> (usize, usize, usize) {
  let mut reconciled = 0;
  let mut skipped = 0;
  let mut failed = 0;
  for entry in outcomes {
    match &entry.outcome {
      Outcome::Reconciled => reconciled += 1,
      Outcome::Skipped(_) => skipped += 1,
      Outcome::Failed(_) => failed += 1,
    }
  }
  (reconciled, skipped, failed)
}
