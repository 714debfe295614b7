//! Attribute and wire name translation.
//!
//! Attribute names use underscores (`router_id`), the management API uses
//! hyphens (`router-id`). Attribute paths are dotted, with numeric segments
//! selecting a record of a repeated block (`neighbor.0.remote_as`).

/// Translates an attribute name to its wire key.
pub fn to_wire_name(attr: &str) -> String {
    attr.replace('_', "-")
}

/// Translates a wire key to its attribute name.
pub fn to_attr_name(wire: &str) -> String {
    wire.replace('-', "_")
}

/// Appends a field name to a dotted attribute path.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Appends a record index to a dotted attribute path.
pub fn index_path(prefix: &str, index: usize) -> String {
    format!("{}.{}", prefix, index)
}
