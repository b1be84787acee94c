//! GitHub API access
//!
//! - **graphql**: the `GraphQl` transport seam plus the real api.github.com
//!   implementation
//! - **rest**: thin REST client for releases, PR lookup, and ref deletion

pub mod graphql;
pub mod rest;

/// Sent with every request so GitHub can attribute traffic
pub const USER_AGENT: &str = concat!("quartermaster/", env!("CARGO_PKG_VERSION"));
