//! Descriptor-driven mapping between FortiOS API objects and attribute trees.
//!
//! The management API exchanges nested JSON keyed by hyphenated field names
//! (the *wire object*). Configuration and state use a typed attribute tree
//! keyed by underscore names (the [`ConfigObject`]). Rather than a pair of
//! hand-written functions per field, every object is described once by a
//! static table of [`FieldDescriptor`]s and a single recursive mapper walks
//! it in both directions:
//!
//! - [`flatten`]: wire object → attribute tree (reads)
//! - [`expand`]: attribute tree → wire object (updates), guided by a
//!   [`ChangeSource`] deciding which fields are set or changed
//! - [`patch`]: alternate wire representations tried when direct
//!   assignment fails
//! - [`codec`]: attribute-named JSON for configuration files and state
//!
//! # Example
//!
//! ```
//! use fos_objmap::{
//!     expand_object, flatten_object, ConfigObject, ExpandAll, FieldDescriptor,
//!     FlattenOptions, ObjectSchema,
//! };
//! use serde_json::json;
//!
//! const NEIGHBOR: &[FieldDescriptor] = &[
//!     FieldDescriptor::string("ip"),
//!     FieldDescriptor::int("remote_as"),
//! ];
//! const FIELDS: &[FieldDescriptor] = &[
//!     FieldDescriptor::int("as"),
//!     FieldDescriptor::block("neighbor", NEIGHBOR),
//! ];
//! const SCHEMA: ObjectSchema = ObjectSchema { name: "Bgp", path: "router/bgp", fields: FIELDS };
//!
//! let wire = json!({"as": 65000, "neighbor": [{"ip": "10.0.0.1", "remote-as": 65001}]});
//! let obj = flatten_object(
//!     &SCHEMA,
//!     wire.as_object().unwrap(),
//!     &ConfigObject::new(),
//!     &FlattenOptions::import(),
//! )
//! .unwrap();
//! assert_eq!(obj.get_path("neighbor.0.remote_as").and_then(|v| v.as_int()), Some(65001));
//!
//! let back = expand_object(&SCHEMA, &obj, &ExpandAll).unwrap();
//! assert_eq!(serde_json::Value::Object(back), wire);
//! ```

pub mod codec;
pub mod diff;
pub mod error;
pub mod expand;
pub mod flatten;
pub mod names;
pub mod patch;
pub mod schema;
pub mod value;

// Re-export commonly used items at crate root
pub use codec::{decode_attr_object, encode_attr_object};
pub use diff::{ChangeSource, ExpandAll, ResourceDiff};
pub use error::{MapError, MapResult};
pub use expand::{expand_object, expand_string_list};
pub use flatten::{
    flatten_object, flatten_string_list, is_import_table, retain_sensitive, FlattenOptions,
};
pub use schema::{FieldDescriptor, FieldKind, ObjectSchema};
pub use value::{ConfigObject, ConfigValue};

/// Wire object exchanged with the management API.
pub type WireObject = serde_json::Map<String, serde_json::Value>;
