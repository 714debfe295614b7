//! Test fixtures for `router bgp` objects
//!
//! Provides wire objects as the management API returns them and the
//! attribute trees a configuration would hold for the same object.

use fos_client::{ContextParams, WireObject};
use fos_objmap::{ConfigObject, ConfigValue};
use serde_json::{json, Value};

/// Device used by the fixtures.
pub const TEST_DEVICE: &str = "FGT-TEST";

/// VDOM used by the fixtures.
pub const TEST_VDOM: &str = "root";

/// Context matching [`TEST_DEVICE`] and [`TEST_VDOM`].
pub fn test_context() -> ContextParams {
    ContextParams::new(TEST_DEVICE, TEST_VDOM)
}

/// Builder for wire objects.
#[derive(Debug, Clone, Default)]
pub struct WireBuilder {
    object: WireObject,
}

impl WireBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key to a value.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.object.insert(key.into(), value);
        self
    }

    /// Appends a record to a table key, creating the table if needed.
    pub fn with_record(mut self, table: impl Into<String>, record: Value) -> Self {
        let entry = self
            .object
            .entry(table.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(records) = entry {
            records.push(record);
        } else {
            *entry = Value::Array(vec![record]);
        }
        self
    }

    pub fn build(self) -> WireObject {
        self.object
    }
}

/// Converts a `json!` object literal into a wire object.
///
/// Non-object values produce an empty object.
pub fn wire(value: Value) -> WireObject {
    match value {
        Value::Object(map) => map,
        _ => WireObject::new(),
    }
}

/// Common wire fixtures
pub mod wire_fixtures {
    use super::*;

    /// AS, router ID and one neighbor.
    pub fn bgp_minimal() -> WireObject {
        WireBuilder::new()
            .with_field("as", json!(65000))
            .with_field("router-id", json!("1.1.1.1"))
            .with_record("neighbor", neighbor("10.0.0.1", 65001))
            .build()
    }

    /// A neighbor record.
    pub fn neighbor(ip: &str, remote_as: i64) -> Value {
        json!({"ip": ip, "remote-as": remote_as})
    }

    /// A neighbor record with route maps, interfaces and a password.
    pub fn neighbor_full(ip: &str, remote_as: i64) -> Value {
        json!({
            "ip": ip,
            "remote-as": remote_as,
            "route-map-in": ["rm-in-b", "rm-in-a"],
            "interface": ["port1"],
            "password": "ENC XXXX",
            "conditional-advertise": [{
                "advertise-routemap": ["adv"],
                "condition-routemap": ["cond"],
                "condition-type": "exist"
            }]
        })
    }

    /// A network record with an `[address, mask]` prefix.
    pub fn network(id: i64, address: &str, mask: &str) -> Value {
        json!({"id": id, "prefix": [address, mask], "route-map": []})
    }

    /// Several tables populated, as a device with full BGP config returns.
    pub fn bgp_full() -> WireObject {
        WireBuilder::new()
            .with_field("as", json!(65000))
            .with_field("router-id", json!("1.1.1.1"))
            .with_field("keepalive-timer", json!(60))
            .with_field("holdtime-timer", json!(180))
            .with_field("ebgp-multipath", json!("enable"))
            .with_field("dampening-route-map", json!(["damp-rm"]))
            .with_record("neighbor", neighbor_full("10.0.0.1", 65001))
            .with_record("neighbor", neighbor("10.0.0.2", 65002))
            .with_record("network", network(1, "192.168.0.0", "255.255.255.0"))
            .with_record("redistribute", json!({"name": "connected", "status": "enable"}))
            .with_record(
                "vrf",
                json!({
                    "vrf": "blue",
                    "rd": "65000:1",
                    "export-rt": ["65000:20", "65000:10"],
                    "leak-target": [{"vrf": "red", "route-map": ["leak"], "interface": ["vlan10"]}]
                }),
            )
            .build()
    }
}

/// Common attribute fixtures
pub mod config_fixtures {
    use super::*;

    /// Attribute tree matching [`wire_fixtures::bgp_minimal`].
    pub fn bgp_minimal() -> ConfigObject {
        ConfigObject::new()
            .with("as", 65000)
            .with("router_id", "1.1.1.1")
            .with("neighbor", vec![neighbor("10.0.0.1", 65001)])
    }

    pub fn neighbor(ip: &str, remote_as: i64) -> ConfigObject {
        ConfigObject::new()
            .with("ip", ip)
            .with("remote_as", remote_as)
    }

    pub fn network(id: i64, address: &str, mask: &str) -> ConfigObject {
        ConfigObject::new()
            .with("id", id)
            .with("prefix", ConfigValue::list([address, mask]))
    }
}
