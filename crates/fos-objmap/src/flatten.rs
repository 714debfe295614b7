//! Wire object to attribute tree.
//!
//! Absent wire keys are skipped, never errors. Repeated blocks keep wire
//! order. Top-level tables are only read when importing or when the caller
//! already holds a non-empty value for them.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{MapError, MapResult};
use crate::names::{index_path, join_path, to_attr_name};
use crate::patch;
use crate::schema::{find_field, FieldDescriptor, FieldKind, ObjectSchema};
use crate::value::{ConfigObject, ConfigValue};

/// Policy for a flatten pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Read every top-level table regardless of the existing value.
    pub import: bool,
}

impl FlattenOptions {
    pub fn import() -> Self {
        Self { import: true }
    }
}

/// Returns true when tables are read unconditionally.
pub fn is_import_table(opts: &FlattenOptions) -> bool {
    opts.import
}

/// Flattens a wire object into a fresh attribute tree.
///
/// `existing` is the caller's current view of the object; it only gates
/// which top-level tables are read.
pub fn flatten_object(
    schema: &ObjectSchema,
    wire: &Map<String, Value>,
    existing: &ConfigObject,
    opts: &FlattenOptions,
) -> MapResult<ConfigObject> {
    let mut obj = ConfigObject::new();

    for desc in schema.fields {
        if matches!(desc.kind, FieldKind::Block(_)) && !is_import_table(opts) {
            let present = existing.get(desc.name).is_some_and(|v| !v.is_zero());
            if !present {
                trace!(object = schema.name, table = desc.name, "Table not configured, skipped");
                continue;
            }
        }
        flatten_field(desc, wire, "", &mut obj)?;
    }

    for key in wire.keys() {
        if find_field(schema.fields, &to_attr_name(key)).is_none() {
            trace!(object = schema.name, key = %key, "Ignoring unknown wire key");
        }
    }

    Ok(obj)
}

/// Flattens one record of a repeated block.
pub fn flatten_record(
    fields: &[FieldDescriptor],
    wire: &Map<String, Value>,
    path: &str,
) -> MapResult<ConfigObject> {
    let mut record = ConfigObject::new();
    for desc in fields {
        flatten_field(desc, wire, path, &mut record)?;
    }
    Ok(record)
}

/// Flattens the wire value of a repeated block field.
pub fn flatten_block(
    fields: &[FieldDescriptor],
    value: &Value,
    path: &str,
) -> MapResult<Vec<ConfigObject>> {
    let records =
        patch::block_records(value).ok_or_else(|| MapError::assign(path, "block", value))?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let record_path = index_path(path, i);
            let map = record
                .as_object()
                .ok_or_else(|| MapError::not_an_object(&record_path))?;
            flatten_record(fields, map, &record_path)
        })
        .collect()
}

/// Converts a wire array of strings into a string list.
///
/// `null` yields an empty list and a bare string a single item.
pub fn flatten_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Attributes identifying a record within its table, in order of preference.
const RECORD_KEYS: &[&str] = &["ip", "id", "name", "vrf", "prefix6"];

fn record_key(fields: &[FieldDescriptor]) -> Option<&'static str> {
    RECORD_KEYS
        .iter()
        .copied()
        .find(|key| find_field(fields, key).is_some())
}

/// Copies sensitive values the device never returns from `configured` into
/// a freshly flattened tree.
///
/// Block records are matched on their key attribute, so a device that
/// reorders a table keeps each secret with its record. Records without a
/// key are matched by position.
pub fn retain_sensitive(
    fields: &[FieldDescriptor],
    flattened: &mut ConfigObject,
    configured: &ConfigObject,
) {
    for desc in fields {
        if desc.sensitive {
            if let Some(value) = configured.get(desc.name) {
                flattened.insert(desc.name, value.clone());
            }
            continue;
        }

        let Some(nested) = desc.block_fields() else {
            continue;
        };
        let (Some(ConfigValue::Blocks(records)), Some(ConfigValue::Blocks(known))) =
            (flattened.get(desc.name), configured.get(desc.name))
        else {
            continue;
        };
        let key = record_key(nested);
        let records = records
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, mut record)| {
                let matched = match key.and_then(|key| record.get(key).map(|id| (key, id))) {
                    Some((key, id)) => known.iter().find(|k| k.get(key) == Some(id)),
                    None => known.get(i),
                };
                if let Some(known) = matched {
                    retain_sensitive(nested, &mut record, known);
                }
                record
            })
            .collect::<Vec<_>>();
        flattened.insert(desc.name, ConfigValue::Blocks(records));
    }
}

fn flatten_field(
    desc: &FieldDescriptor,
    wire: &Map<String, Value>,
    prefix: &str,
    out: &mut ConfigObject,
) -> MapResult<()> {
    if desc.sensitive {
        return Ok(());
    }

    let Some(value) = wire.get(&desc.wire_name()) else {
        return Ok(());
    };
    let path = join_path(prefix, desc.name);

    match desc.kind {
        FieldKind::Block(fields) => {
            let records = flatten_block(fields, value, &path)?;
            out.insert(desc.name, ConfigValue::Blocks(records));
        }
        _ if value.is_null() => {}
        ref kind => {
            out.insert(desc.name, patch::assign(kind, value, &path)?);
        }
    }

    Ok(())
}
