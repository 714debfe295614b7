//! Mapping properties of the router bgp object
//!
//! Flatten and expand against the full descriptor table, without a client.

use fos_objmap::{
    expand_object, flatten_object, ConfigObject, ConfigValue, ExpandAll, FlattenOptions,
    ResourceDiff,
};
use fos_routerbgp::ROUTER_BGP_SCHEMA;
use fos_test::{config_fixtures, wire, wire_fixtures};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn import(w: &serde_json::Map<String, Value>) -> ConfigObject {
    flatten_object(&ROUTER_BGP_SCHEMA, w, &ConfigObject::new(), &FlattenOptions::import())
        .expect("flatten")
}

/// Wire object → attributes → wire object reproduces the input.
#[test]
fn test_end_to_end_minimal() {
    let w = wire_fixtures::bgp_minimal();

    let obj = import(&w);
    assert_eq!(obj, config_fixtures::bgp_minimal());

    let back = expand_object(&ROUTER_BGP_SCHEMA, &obj, &ExpandAll).unwrap();
    assert_eq!(
        Value::Object(back),
        json!({"as": 65000, "router-id": "1.1.1.1", "neighbor": [{"ip": "10.0.0.1", "remote-as": 65001}]})
    );
}

/// Flattening the expansion of a flattened object changes nothing.
#[test]
fn test_round_trip_idempotence() {
    let first = import(&wire_fixtures::bgp_full());
    let expanded = expand_object(&ROUTER_BGP_SCHEMA, &first, &ExpandAll).unwrap();
    let second = import(&expanded);

    assert_eq!(first, second);
    assert_eq!(
        second.get_path("vrf.0.export_rt"),
        Some(&ConfigValue::set(["65000:10", "65000:20"]))
    );
}

#[test]
fn test_missing_wire_keys_are_omitted() {
    let obj = import(&wire(json!({
        "as": 65000,
        "neighbor": [{"ip": "10.0.0.1"}],
        "not-a-field": true
    })));

    assert_eq!(obj.len(), 2);
    assert!(obj.get("router_id").is_none());
    assert_eq!(
        obj.get_path("neighbor.0.ip"),
        Some(&ConfigValue::from("10.0.0.1"))
    );
    assert_eq!(obj.get_path("neighbor.0.remote_as"), None);
}

#[test]
fn test_empty_tables() {
    for empty in [json!(null), json!([]), json!([null])] {
        let obj = import(&wire(json!({ "network": empty })));
        assert_eq!(obj.get("network"), Some(&ConfigValue::Blocks(Vec::new())));
    }
}

#[test]
fn test_set_and_list_ordering() {
    let a = import(&wire(json!({
        "vrf": [{"vrf": "blue", "import-rt": ["65000:1", "65000:2"]}],
        "network": [{"id": 1, "prefix": ["10.0.0.0", "255.0.0.0"]}]
    })));
    let b = import(&wire(json!({
        "vrf": [{"vrf": "blue", "import-rt": ["65000:2", "65000:1"]}],
        "network": [{"id": 1, "prefix": ["10.0.0.0", "255.0.0.0"]}]
    })));
    let c = import(&wire(json!({
        "vrf": [{"vrf": "blue", "import-rt": ["65000:1", "65000:2"]}],
        "network": [{"id": 1, "prefix": ["255.0.0.0", "10.0.0.0"]}]
    })));

    assert_eq!(a, b);
    assert_ne!(a, c);
}

/// Only set or changed fields reach the payload; empty records are dropped.
#[test]
fn test_selective_emission() {
    let config = ConfigObject::new().with(
        "neighbor",
        vec![
            ConfigObject::new(),
            ConfigObject::new().with("ip", "10.0.0.2"),
        ],
    );
    let prior = ConfigObject::new();

    let payload =
        expand_object(&ROUTER_BGP_SCHEMA, &config, &ResourceDiff::new(&config, &prior)).unwrap();

    assert_eq!(Value::Object(payload), json!({"neighbor": [{"ip": "10.0.0.2"}]}));
}

#[test]
fn test_removed_fields_are_cleared() {
    let prior = config_fixtures::bgp_minimal()
        .with("network", vec![config_fixtures::network(1, "10.0.0.0", "255.0.0.0")]);
    let config = ConfigObject::new().with("as", 65001);

    let payload =
        expand_object(&ROUTER_BGP_SCHEMA, &config, &ResourceDiff::new(&config, &prior)).unwrap();

    assert_eq!(
        Value::Object(payload),
        json!({"as": 65001, "router-id": "", "neighbor": [], "network": []})
    );
}

#[test]
fn test_table_gating_outside_import() {
    let w = wire_fixtures::bgp_full();
    let existing = ConfigObject::new()
        .with("as", 65000)
        .with("network", vec![config_fixtures::network(1, "192.168.0.0", "255.255.255.0")]);

    let obj = flatten_object(&ROUTER_BGP_SCHEMA, &w, &existing, &FlattenOptions::default()).unwrap();

    assert!(obj.get("network").is_some());
    assert!(obj.get("neighbor").is_none());
    assert!(obj.get("vrf").is_none());
    assert_eq!(obj.get("keepalive_timer"), Some(&ConfigValue::Int(60)));
}

#[test]
fn test_passwords_are_never_read() {
    let obj = import(&wire_fixtures::bgp_full());
    assert_eq!(obj.get_path("neighbor.0.password"), None);
    assert_eq!(
        obj.get_path("neighbor.0.conditional_advertise.0.condition_type"),
        Some(&ConfigValue::from("exist"))
    );
}

/// Values only the device holds never show up as changes.
#[test]
fn test_unconfigured_device_values_are_not_cleared() {
    let state = import(&wire(json!({
        "as": 65000,
        "holdtime-timer": 180,
        "keepalive-timer": 60,
        "router-id": "9.9.9.9",
        "network": [{"id": 1, "prefix": ["10.0.0.0", "255.0.0.0"]}]
    })));
    let applied = ConfigObject::new().with("as", 65000);
    let config = ConfigObject::new().with("as", 65001);

    let payload =
        expand_object(&ROUTER_BGP_SCHEMA, &config, &ResourceDiff::new(&config, &applied)).unwrap();
    assert_eq!(Value::Object(payload), json!({"as": 65001}));

    let against_state =
        expand_object(&ROUTER_BGP_SCHEMA, &config, &ResourceDiff::new(&config, &state)).unwrap();
    assert_eq!(against_state.get("holdtime-timer"), Some(&json!(0)));
    assert_eq!(against_state.get("network"), Some(&json!([])));
}
