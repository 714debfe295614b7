//! Declarative field-descriptor tables.
//!
//! An object is described by a static table of [`FieldDescriptor`]s. Nested
//! repeated blocks point at their own static table, so a whole object tree
//! is plain `const` data that the mapper walks.

use crate::names;

/// Shape of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// String scalar.
    String,
    /// Integer scalar.
    Int,
    /// Boolean scalar.
    Bool,
    /// Ordered list of strings.
    List,
    /// Unordered set of strings.
    Set,
    /// Repeated block of nested records.
    Block(&'static [FieldDescriptor]),
}

impl FieldKind {
    /// Returns the kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::List => "list",
            FieldKind::Set => "set",
            FieldKind::Block(_) => "block",
        }
    }

    /// Returns true for scalar kinds.
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldKind::String | FieldKind::Int | FieldKind::Bool)
    }
}

/// One named field of an object or block record.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Attribute name (underscore form).
    pub name: &'static str,
    /// Field shape.
    pub kind: FieldKind,
    /// The device never returns the cleartext value.
    pub sensitive: bool,
}

impl FieldDescriptor {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            sensitive: false,
        }
    }

    /// String scalar field.
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Integer scalar field.
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// Boolean scalar field.
    pub const fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Ordered string list field.
    pub const fn list(name: &'static str) -> Self {
        Self::new(name, FieldKind::List)
    }

    /// Unordered string set field.
    pub const fn set(name: &'static str) -> Self {
        Self::new(name, FieldKind::Set)
    }

    /// Repeated block field.
    pub const fn block(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self::new(name, FieldKind::Block(fields))
    }

    /// Marks the field as sensitive.
    pub const fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    /// Returns the wire key of this field.
    pub fn wire_name(&self) -> String {
        names::to_wire_name(self.name)
    }

    /// Returns the nested descriptor table for block fields.
    pub fn block_fields(&self) -> Option<&'static [FieldDescriptor]> {
        match self.kind {
            FieldKind::Block(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Looks up a descriptor by attribute name.
pub fn find_field<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.name == name)
}

/// Top-level description of an API object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectSchema {
    /// Object name, also its singleton identifier.
    pub name: &'static str,
    /// API path of the object below the device/vdom scope.
    pub path: &'static str,
    /// Top-level fields.
    pub fields: &'static [FieldDescriptor],
}

impl ObjectSchema {
    /// Looks up a top-level descriptor by attribute name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        find_field(self.fields, name)
    }

    /// Resolves a dotted attribute path (`neighbor.0.ip`) to its descriptor.
    pub fn resolve(&self, path: &str) -> Option<&FieldDescriptor> {
        let mut fields = self.fields;
        let mut found = None;
        for segment in path.split('.') {
            if segment.parse::<usize>().is_ok() {
                continue;
            }
            let desc = find_field(fields, segment)?;
            if let Some(nested) = desc.block_fields() {
                fields = nested;
            }
            found = Some(desc);
        }
        found
    }
}
