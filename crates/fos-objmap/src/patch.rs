//! Alternate wire representations.
//!
//! The management API does not always return a value in the shape its field
//! declares: single references come back as one-element arrays, integers
//! sometimes arrive as strings, flags as `enable`/`disable`, and a table
//! holding one entry may be returned as a bare object. Values are first
//! assigned directly; only when that fails is the alternate form tried.

use serde_json::Value;

use crate::error::{MapError, MapResult};
use crate::flatten::flatten_string_list;
use crate::schema::FieldKind;
use crate::value::ConfigValue;

/// Assigns a non-block wire value to a field of the given kind.
///
/// Tries the direct representation, then the alternate ones, and fails
/// with [`MapError::Assign`] when neither fits.
pub fn assign(kind: &FieldKind, value: &Value, path: &str) -> MapResult<ConfigValue> {
    direct(kind, value)
        .or_else(|| coerce(kind, value))
        .ok_or_else(|| MapError::assign(path, kind.name(), value))
}

/// Direct assignment: the wire value already has the declared shape.
pub fn direct(kind: &FieldKind, value: &Value) -> Option<ConfigValue> {
    match (kind, value) {
        (FieldKind::String, Value::String(s)) => Some(ConfigValue::String(s.clone())),
        (FieldKind::Int, Value::Number(n)) => n.as_i64().map(ConfigValue::Int),
        (FieldKind::Bool, Value::Bool(b)) => Some(ConfigValue::Bool(*b)),
        (FieldKind::List, Value::Array(items)) => {
            string_items(items).map(ConfigValue::List)
        }
        (FieldKind::Set, Value::Array(items)) => {
            string_items(items).map(|items| ConfigValue::Set(items.into_iter().collect()))
        }
        _ => None,
    }
}

/// Alternate assignment for values the API returns in another shape.
pub fn coerce(kind: &FieldKind, value: &Value) -> Option<ConfigValue> {
    if kind.is_scalar() {
        if let Value::Array(items) = value {
            return match items.as_slice() {
                [] if matches!(kind, FieldKind::String) => Some(ConfigValue::String(String::new())),
                [single] => direct(kind, single).or_else(|| coerce(kind, single)),
                _ => None,
            };
        }
    }

    match (kind, value) {
        (FieldKind::String, Value::Number(n)) => Some(ConfigValue::String(n.to_string())),
        (FieldKind::String, Value::Bool(b)) => Some(ConfigValue::String(flag_name(*b).to_string())),
        (FieldKind::Int, Value::String(s)) => s.trim().parse().ok().map(ConfigValue::Int),
        (FieldKind::Int, Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| ConfigValue::Int(f as i64)),
        (FieldKind::Bool, Value::String(s)) => match s.as_str() {
            "enable" | "true" => Some(ConfigValue::Bool(true)),
            "disable" | "false" => Some(ConfigValue::Bool(false)),
            _ => None,
        },
        (FieldKind::Bool, Value::Number(n)) => match n.as_i64() {
            Some(1) => Some(ConfigValue::Bool(true)),
            Some(0) => Some(ConfigValue::Bool(false)),
            _ => None,
        },
        (FieldKind::List, Value::String(_)) => Some(ConfigValue::List(flatten_string_list(value))),
        (FieldKind::Set, Value::String(_)) => {
            Some(ConfigValue::Set(flatten_string_list(value).into_iter().collect()))
        }
        (FieldKind::List, Value::Array(items)) => {
            scalar_items(items).map(ConfigValue::List)
        }
        (FieldKind::Set, Value::Array(items)) => {
            scalar_items(items).map(|items| ConfigValue::Set(items.into_iter().collect()))
        }
        _ => None,
    }
}

/// Normalizes a block field's wire value to its records.
///
/// `null`, `[]` and an array whose first element is `null` all mean an empty
/// table; a bare object is a table holding one record. Returns `None` for
/// anything else.
pub fn block_records(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => match items.first() {
            None | Some(Value::Null) => Some(Vec::new()),
            Some(_) => Some(items.iter().collect()),
        },
        Value::Object(_) => Some(vec![value]),
        _ => None,
    }
}

fn flag_name(b: bool) -> &'static str {
    if b {
        "enable"
    } else {
        "disable"
    }
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn scalar_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_assignment() {
        assert_eq!(
            assign(&FieldKind::Int, &json!(65000), "as").unwrap(),
            ConfigValue::Int(65000)
        );
        assert_eq!(
            assign(&FieldKind::String, &json!("1.1.1.1"), "router_id").unwrap(),
            ConfigValue::from("1.1.1.1")
        );
        assert_eq!(
            assign(&FieldKind::List, &json!(["10.0.0.0", "255.0.0.0"]), "prefix").unwrap(),
            ConfigValue::list(["10.0.0.0", "255.0.0.0"])
        );
    }

    #[test]
    fn test_single_element_array_unwraps() {
        assert_eq!(
            assign(&FieldKind::String, &json!(["rm-in"]), "route_map").unwrap(),
            ConfigValue::from("rm-in")
        );
        assert_eq!(
            assign(&FieldKind::Int, &json!(["30"]), "keepalive_timer").unwrap(),
            ConfigValue::Int(30)
        );
        assert_eq!(
            assign(&FieldKind::String, &json!([]), "description").unwrap(),
            ConfigValue::from("")
        );
    }

    #[test]
    fn test_scalar_coercions() {
        assert_eq!(coerce(&FieldKind::Int, &json!("180")), Some(ConfigValue::Int(180)));
        assert_eq!(coerce(&FieldKind::Int, &json!(60.0)), Some(ConfigValue::Int(60)));
        assert_eq!(coerce(&FieldKind::String, &json!(3)), Some(ConfigValue::from("3")));
        assert_eq!(coerce(&FieldKind::Bool, &json!("enable")), Some(ConfigValue::Bool(true)));
        assert_eq!(coerce(&FieldKind::Bool, &json!(0)), Some(ConfigValue::Bool(false)));
        assert_eq!(coerce(&FieldKind::Bool, &json!(7)), None);
    }

    #[test]
    fn test_collection_coercions() {
        assert_eq!(
            coerce(&FieldKind::Set, &json!("rm1")),
            Some(ConfigValue::set(["rm1"]))
        );
        assert_eq!(
            coerce(&FieldKind::List, &json!("port1")),
            Some(ConfigValue::list(["port1"]))
        );
        assert_eq!(
            coerce(&FieldKind::List, &json!([10, "x"])),
            Some(ConfigValue::list(["10", "x"]))
        );
    }

    #[test]
    fn test_assign_failure() {
        let err = assign(&FieldKind::Int, &json!("sixty"), "as").unwrap_err();
        assert!(matches!(err, MapError::Assign { expected: "int", .. }));
        assert!(assign(&FieldKind::Set, &json!([{"a": 1}]), "s").is_err());
    }

    #[test]
    fn test_block_records() {
        assert!(block_records(&json!(null)).unwrap().is_empty());
        assert!(block_records(&json!([])).unwrap().is_empty());
        assert!(block_records(&json!([null, {"ip": "10.0.0.1"}])).unwrap().is_empty());
        assert_eq!(block_records(&json!({"ip": "10.0.0.1"})).unwrap().len(), 1);
        assert_eq!(block_records(&json!([{"ip": "a"}, {"ip": "b"}])).unwrap().len(), 2);
        assert!(block_records(&json!("x")).is_none());
    }
}
