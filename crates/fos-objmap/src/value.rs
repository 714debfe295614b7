//! Attribute tree values.
//!
//! A [`ConfigObject`] is an ordered list of uniquely named values, in the
//! same spirit as a field-value tuple list, but with typed values and
//! nested records for repeated blocks.

use std::collections::BTreeSet;

use crate::schema::FieldKind;

/// Value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// Ordered list; order is significant.
    List(Vec<String>),
    /// Unordered set; compared as a set.
    Set(BTreeSet<String>),
    /// Records of a repeated block, in wire order.
    Blocks(Vec<ConfigObject>),
}

impl ConfigValue {
    /// Returns the zero value for a field kind.
    pub fn zero_of(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::String => ConfigValue::String(String::new()),
            FieldKind::Int => ConfigValue::Int(0),
            FieldKind::Bool => ConfigValue::Bool(false),
            FieldKind::List => ConfigValue::List(Vec::new()),
            FieldKind::Set => ConfigValue::Set(BTreeSet::new()),
            FieldKind::Block(_) => ConfigValue::Blocks(Vec::new()),
        }
    }

    /// Returns true for the zero value of the value's kind.
    pub fn is_zero(&self) -> bool {
        match self {
            ConfigValue::String(s) => s.is_empty(),
            ConfigValue::Int(i) => *i == 0,
            ConfigValue::Bool(b) => !*b,
            ConfigValue::List(l) => l.is_empty(),
            ConfigValue::Set(s) => s.is_empty(),
            ConfigValue::Blocks(b) => b.is_empty(),
        }
    }

    /// Returns the kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Int(_) => "int",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::List(_) => "list",
            ConfigValue::Set(_) => "set",
            ConfigValue::Blocks(_) => "block",
        }
    }

    /// Returns true if the value has the shape a field kind declares.
    pub fn matches_kind(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (ConfigValue::String(_), FieldKind::String)
                | (ConfigValue::Int(_), FieldKind::Int)
                | (ConfigValue::Bool(_), FieldKind::Bool)
                | (ConfigValue::List(_), FieldKind::List)
                | (ConfigValue::Set(_), FieldKind::Set)
                | (ConfigValue::Blocks(_), FieldKind::Block(_))
        )
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The records of a repeated block.
    pub fn as_blocks(&self) -> Option<&[ConfigObject]> {
        match self {
            ConfigValue::Blocks(b) => Some(b),
            _ => None,
        }
    }

    /// Builds a set value from string-like items.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigValue::Set(items.into_iter().map(Into::into).collect())
    }

    /// Builds a list value from string-like items.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<Vec<ConfigObject>> for ConfigValue {
    fn from(value: Vec<ConfigObject>) -> Self {
        ConfigValue::Blocks(value)
    }
}

/// Ordered collection of uniquely named attribute values.
///
/// Field order is kept for output only; equality compares by name.
#[derive(Debug, Clone, Default)]
pub struct ConfigObject {
    fields: Vec<(String, ConfigValue)>,
}

impl PartialEq for ConfigObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for ConfigObject {}

impl ConfigObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Sets a field, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`ConfigObject::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ConfigValue> {
        let pos = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(pos).1)
    }

    /// Checks if a field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Looks up a dotted attribute path such as `neighbor.0.remote_as`.
    ///
    /// Numeric segments select a record of the preceding block field.
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let mut value = self.get(segments.next()?)?;
        while let Some(index) = segments.next() {
            let record = value.as_blocks()?.get(index.parse::<usize>().ok()?)?;
            value = record.get(segments.next()?)?;
        }
        Some(value)
    }

    /// Copies every field of `other` over this object.
    pub fn merge_from(&mut self, other: &ConfigObject) {
        for (name, value) in other.iter() {
            self.insert(name, value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = ConfigObject::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}
