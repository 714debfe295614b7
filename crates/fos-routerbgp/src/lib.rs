//! FortiOS `router bgp` configuration resource
//!
//! Manages the BGP routing configuration of a FortiGate through a
//! FortiManager: the resource is a singleton per device and VDOM, read and
//! written as one object whose neighbors, networks, redistribution and VRF
//! settings are nested tables.

mod error;
mod provider;
mod resource;
mod schema;
mod state;
mod types;

pub use error::{ResourceError, ResourceResult};
pub use provider::{ProviderConfig, ProviderDefaults};
pub use resource::{Resource, RouterBgpResource};
pub use schema::*;
pub use state::StateFile;
pub use types::*;
