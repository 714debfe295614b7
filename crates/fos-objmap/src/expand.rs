//! Attribute tree to wire object.
//!
//! Sets become plain arrays on the wire, so order that is insignificant in
//! the attribute tree becomes significant in the payload. Sets are emitted
//! in sorted order to keep payloads stable.

use serde_json::{Map, Number, Value};

use crate::diff::ChangeSource;
use crate::error::{MapError, MapResult};
use crate::names::{index_path, join_path};
use crate::schema::{FieldDescriptor, ObjectSchema};
use crate::value::{ConfigObject, ConfigValue};

/// Expands a configured object into an update payload.
pub fn expand_object(
    schema: &ObjectSchema,
    config: &ConfigObject,
    changes: &dyn ChangeSource,
) -> MapResult<Map<String, Value>> {
    expand_record(schema.fields, config, "", changes)
}

/// Expands one record; fields that are neither set nor changed are left out.
pub fn expand_record(
    fields: &[FieldDescriptor],
    record: &ConfigObject,
    prefix: &str,
    changes: &dyn ChangeSource,
) -> MapResult<Map<String, Value>> {
    let mut out = Map::new();

    for desc in fields {
        let path = join_path(prefix, desc.name);
        let value = match record.get(desc.name) {
            Some(value) if changes.is_set_or_changed(&path) => value.clone(),
            None if changes.has_change(&path) => ConfigValue::zero_of(&desc.kind),
            _ => continue,
        };
        out.insert(desc.wire_name(), expand_value(desc, &value, &path, changes)?);
    }

    Ok(out)
}

/// Expands the records of a repeated block.
///
/// Records that contribute no fields are dropped rather than sent as empty
/// placeholders.
pub fn expand_block(
    fields: &[FieldDescriptor],
    records: &[ConfigObject],
    path: &str,
    changes: &dyn ChangeSource,
) -> MapResult<Vec<Value>> {
    let mut out = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let map = expand_record(fields, record, &index_path(path, i), changes)?;
        if !map.is_empty() {
            out.push(Value::Object(map));
        }
    }
    Ok(out)
}

/// Converts a string list or set into a wire array.
pub fn expand_string_list<'a>(items: impl IntoIterator<Item = &'a String>) -> Value {
    Value::Array(items.into_iter().cloned().map(Value::String).collect())
}

fn expand_value(
    desc: &FieldDescriptor,
    value: &ConfigValue,
    path: &str,
    changes: &dyn ChangeSource,
) -> MapResult<Value> {
    let mismatch = || {
        MapError::invalid_value(
            path,
            format!("expected {}, found {}", desc.kind.name(), value.kind_name()),
        )
    };
    if !value.matches_kind(&desc.kind) {
        return Err(mismatch());
    }

    let wire = match value {
        ConfigValue::String(s) => Value::String(s.clone()),
        ConfigValue::Int(i) => Value::Number(Number::from(*i)),
        ConfigValue::Bool(b) => Value::Bool(*b),
        ConfigValue::List(items) => expand_string_list(items),
        ConfigValue::Set(items) => expand_string_list(items),
        ConfigValue::Blocks(records) => {
            let fields = desc.block_fields().ok_or_else(mismatch)?;
            Value::Array(expand_block(fields, records, path, changes)?)
        }
    };

    Ok(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ExpandAll, ResourceDiff};
    use crate::flatten::{flatten_object, FlattenOptions};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const TARGET: &[FieldDescriptor] = &[
        FieldDescriptor::string("vrf"),
        FieldDescriptor::set("route_map"),
    ];

    const VRF: &[FieldDescriptor] = &[
        FieldDescriptor::string("vrf"),
        FieldDescriptor::string("rd"),
        FieldDescriptor::set("export_rt"),
        FieldDescriptor::block("leak_target", TARGET),
    ];

    const NEIGHBOR: &[FieldDescriptor] = &[
        FieldDescriptor::string("ip"),
        FieldDescriptor::int("remote_as"),
        FieldDescriptor::int("weight"),
    ];

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::int("as"),
        FieldDescriptor::string("router_id"),
        FieldDescriptor::int("keepalive_timer"),
        FieldDescriptor::block("neighbor", NEIGHBOR),
        FieldDescriptor::block("vrf", VRF),
    ];

    const SCHEMA: ObjectSchema = ObjectSchema {
        name: "Test",
        path: "test",
        fields: FIELDS,
    };

    #[test]
    fn test_end_to_end_round_trip() {
        let input = json!({
            "as": 65000,
            "router-id": "1.1.1.1",
            "neighbor": [{"ip": "10.0.0.1", "remote-as": 65001}]
        });
        let wire = input.as_object().unwrap();

        let obj = flatten_object(&SCHEMA, wire, &ConfigObject::new(), &FlattenOptions::import())
            .unwrap();
        let out = expand_object(&SCHEMA, &obj, &ExpandAll).unwrap();

        assert_eq!(Value::Object(out), input);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let cfg = ConfigObject::new()
            .with("as", 65000)
            .with("keepalive_timer", 0)
            .with(
                "neighbor",
                vec![
                    ConfigObject::new().with("ip", "10.0.0.1"),
                    ConfigObject::new().with("weight", 0),
                ],
            );
        let prior = ConfigObject::new();
        let out = expand_object(&SCHEMA, &cfg, &ResourceDiff::new(&cfg, &prior)).unwrap();

        assert_eq!(
            Value::Object(out),
            json!({"as": 65000, "neighbor": [{"ip": "10.0.0.1"}]})
        );
    }

    #[test]
    fn test_changed_fields_are_sent() {
        let prior = ConfigObject::new()
            .with("as", 65000)
            .with("router_id", "1.1.1.1")
            .with("keepalive_timer", 30);
        let cfg = ConfigObject::new().with("as", 65000).with("keepalive_timer", 0);
        let out = expand_object(&SCHEMA, &cfg, &ResourceDiff::new(&cfg, &prior)).unwrap();

        assert_eq!(
            Value::Object(out),
            json!({"as": 65000, "router-id": "", "keepalive-timer": 0})
        );
    }

    #[test]
    fn test_removed_table_is_cleared() {
        let prior = ConfigObject::new().with(
            "neighbor",
            vec![ConfigObject::new().with("ip", "10.0.0.1")],
        );
        let cfg = ConfigObject::new();
        let out = expand_object(&SCHEMA, &cfg, &ResourceDiff::new(&cfg, &prior)).unwrap();

        assert_eq!(Value::Object(out), json!({"neighbor": []}));
    }

    #[test]
    fn test_nested_blocks_and_sets() {
        let cfg = ConfigObject::new().with(
            "vrf",
            vec![ConfigObject::new()
                .with("vrf", "blue")
                .with("export_rt", ConfigValue::set(["65000:2", "65000:1"]))
                .with(
                    "leak_target",
                    vec![ConfigObject::new()
                        .with("vrf", "red")
                        .with("route_map", ConfigValue::set(["rm-leak"]))],
                )],
        );
        let out = expand_object(&SCHEMA, &cfg, &ExpandAll).unwrap();

        assert_eq!(
            Value::Object(out),
            json!({"vrf": [{
                "vrf": "blue",
                "export-rt": ["65000:1", "65000:2"],
                "leak-target": [{"vrf": "red", "route-map": ["rm-leak"]}]
            }]})
        );
    }

    #[test]
    fn test_kind_mismatch() {
        let cfg = ConfigObject::new().with(
            "neighbor",
            vec![ConfigObject::new().with("remote_as", "sixty-five")],
        );
        let err = expand_object(&SCHEMA, &cfg, &ExpandAll).unwrap_err();
        assert_eq!(err.path(), "neighbor.0.remote_as");
    }

    #[test]
    fn test_expand_string_list() {
        let items = vec!["10.0.0.0".to_string(), "255.0.0.0".to_string()];
        assert_eq!(expand_string_list(&items), json!(["10.0.0.0", "255.0.0.0"]));

        let set: std::collections::BTreeSet<String> =
            ["rm-b", "rm-a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(expand_string_list(&set), json!(["rm-a", "rm-b"]));
    }
}
