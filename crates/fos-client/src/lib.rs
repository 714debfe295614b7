//! Object client for FortiManager managed devices.
//!
//! This crate provides the client side used by configuration resources:
//!
//! - [`ObjectClient`]: Trait for reading, updating and deleting objects
//! - [`ContextParams`] / [`ObjectPath`]: Device/VDOM scoping of objects
//! - [`JsonRpcClient`]: FortiManager JSON-RPC implementation over `reqwest`
//! - [`ClientError`]: Error type, with not-found detection
//!
//! # Example
//!
//! ```ignore
//! use fos_client::{ClientConfig, ContextParams, JsonRpcClient, ObjectClient, ObjectPath};
//!
//! let client = JsonRpcClient::new(&ClientConfig::new("https://fmg.example.net", token))?;
//! let ctx = ContextParams::new("FGT-01", "root");
//! if let Some(obj) = client.read_object(&ObjectPath("router/bgp"), "RouterBgp", &ctx).await? {
//!     println!("as = {}", obj["as"]);
//! }
//! ```

mod client;
mod config;
mod context;
mod error;
mod jsonrpc;

pub use client::{ObjectClient, DEFAULT_RETRIES};
pub use config::ClientConfig;
pub use context::{ContextParams, ObjectPath};
pub use error::{ClientError, ClientResult, STATUS_OBJECT_NOT_FOUND};
pub use jsonrpc::{build_request, parse_response, JsonRpcClient, RpcMethod};

/// Wire object exchanged with the management API.
pub type WireObject = serde_json::Map<String, serde_json::Value>;
