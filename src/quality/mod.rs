//! Text-level checks and transforms
//!
//! Everything here is pure string work: TOC metadata, changelog surgery,
//! and PR-template validation. File IO and subprocesses stay in the
//! command layer so these stay trivially testable.

pub mod changelog;
pub mod pr_template;
pub mod toc;
