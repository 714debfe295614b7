//! Test infrastructure for FortiOS configuration resources
//!
//! Provides:
//! - An in-memory [`MockClient`] standing in for the management API
//! - Wire and attribute fixtures for common `router bgp` shapes
//! - Call verification helpers

pub mod fixtures;
mod mock;
mod verification;

pub use fixtures::*;
pub use mock::{ClientCall, MockClient};
pub use verification::*;
