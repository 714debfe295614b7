//! Attribute-named JSON.
//!
//! Configuration files and persisted state use attribute names rather than
//! wire keys. Decoding is strict: unknown attributes and values of the
//! wrong shape are rejected instead of being coerced.

use serde_json::{Map, Number, Value};

use crate::error::{MapError, MapResult};
use crate::expand::expand_string_list;
use crate::names::{index_path, join_path};
use crate::patch;
use crate::schema::{find_field, FieldDescriptor, FieldKind};
use crate::value::{ConfigObject, ConfigValue};

/// Decodes an attribute-named JSON object against a descriptor table.
pub fn decode_attr_object(fields: &[FieldDescriptor], value: &Value) -> MapResult<ConfigObject> {
    decode_record(fields, value, "")
}

/// Encodes an attribute tree as attribute-named JSON.
pub fn encode_attr_object(obj: &ConfigObject) -> Value {
    let map: Map<String, Value> = obj
        .iter()
        .map(|(name, value)| (name.to_string(), encode_value(value)))
        .collect();
    Value::Object(map)
}

fn decode_record(fields: &[FieldDescriptor], value: &Value, path: &str) -> MapResult<ConfigObject> {
    let map = value
        .as_object()
        .ok_or_else(|| MapError::invalid_value(display_path(path), "expected an object"))?;

    if let Some(unknown) = map.keys().find(|key| find_field(fields, key).is_none()) {
        return Err(MapError::unknown_attribute(join_path(path, unknown)));
    }

    let mut obj = ConfigObject::new();
    for desc in fields {
        let Some(value) = map.get(desc.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let field_path = join_path(path, desc.name);
        let decoded = match desc.kind {
            FieldKind::Block(nested) => {
                let items = value.as_array().ok_or_else(|| {
                    MapError::invalid_value(&field_path, "expected a list of blocks")
                })?;
                let records = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| decode_record(nested, item, &index_path(&field_path, i)))
                    .collect::<MapResult<Vec<_>>>()?;
                ConfigValue::Blocks(records)
            }
            ref kind => patch::direct(kind, value).ok_or_else(|| {
                MapError::invalid_value(&field_path, format!("expected {}", kind.name()))
            })?,
        };
        obj.insert(desc.name, decoded);
    }

    Ok(obj)
}

fn encode_value(value: &ConfigValue) -> Value {
    match value {
        ConfigValue::String(s) => Value::String(s.clone()),
        ConfigValue::Int(i) => Value::Number(Number::from(*i)),
        ConfigValue::Bool(b) => Value::Bool(*b),
        ConfigValue::List(items) => expand_string_list(items),
        ConfigValue::Set(items) => expand_string_list(items),
        ConfigValue::Blocks(records) => Value::Array(records.iter().map(encode_attr_object).collect()),
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
