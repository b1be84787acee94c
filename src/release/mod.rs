//! Release gating and packaging
//!
//! Two concerns: refusing releases that would collide with published ones
//! (`duplicate`) and producing the zip plus notes a release ships with
//! (`package`). The publish orchestration itself lives in the command
//! layer; these modules never talk to the network.

pub mod duplicate;
pub mod package;

pub use package::BuiltZip;
