//! Core building blocks shared by every quartermaster command
//!
//! - **config**: quartermaster.toml parsing, validation, and value resolution
//! - **error**: Comprehensive error types with contextual help messages
//! - **vcs**: Git operations abstraction (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
