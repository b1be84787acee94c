//! CLI commands for quartermaster
//!
//! This module contains all user-facing command implementations:
//!
//! ## Setup
//! - **init**: Write a starter quartermaster.toml
//!
//! ## Project board
//! - **board reconcile**: Keep issue Status in step with tracked-in blockers
//!
//! ## Release pipeline
//! - **version check**: Require a TOC version bump against a base ref
//! - **changelog update**: Record the current TOC version in CHANGELOG.md
//! - **release check**: Reject duplicate or out-of-order release versions
//! - **release publish**: Zip the addon and publish a GitHub release
//! - **package validate**: Structural checks on the addon layout and zip
//!
//! ## Repository hygiene
//! - **pr validate**: Enforce the pull-request template sections
//! - **docs validate**: Build the mkdocs site in strict mode
//! - **branch cleanup**: Delete the merged head branch behind a commit
//!
//! ## Game data
//! - **interface fetch**: Current game version from Blizzard's patch servers
//!
//! Commands that talk to GitHub take their token and repository from flags,
//! environment variables, or quartermaster.toml (flag > env > config).

pub mod board;
pub mod branch;
pub mod changelog;
pub mod docs;
pub mod init;
pub mod interface;
pub mod package;
pub mod pr;
pub mod release;
pub mod version;

pub use board::run_board_reconcile;
pub use branch::run_branch_cleanup;
pub use changelog::run_changelog_update;
pub use docs::run_docs_validate;
pub use init::run_init;
pub use interface::run_interface_fetch;
pub use package::run_package_validate;
pub use pr::run_pr_validate;
pub use release::{run_release_check, run_release_publish};
pub use version::run_version_check;
