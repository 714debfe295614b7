//! Persisted resource state.
//!
//! ```json
//! {"id": "RouterBgp", "device_name": "FGT-01", "device_vdom": "root",
//!  "import": false, "applied": {"as": 65000},
//!  "attributes": {"as": 65000, "router_id": "1.1.1.1"}}
//! ```

use std::path::Path;

use fos_objmap::{decode_attr_object, encode_attr_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::schema::ROUTER_BGP_FIELDS;
use crate::types::ResourceData;

/// On-disk form of [`ResourceData`] state.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StateFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_vdom: Option<String>,
    #[serde(default)]
    pub import: bool,
    /// Attribute-named configuration last written to the device.
    #[serde(default = "empty_attributes")]
    pub applied: Value,
    /// Attribute-named state tree.
    #[serde(default = "empty_attributes")]
    pub attributes: Value,
}

fn empty_attributes() -> Value {
    Value::Object(Default::default())
}

impl StateFile {
    /// Captures the state side of resource data.
    pub fn from_data(data: &ResourceData) -> Self {
        Self {
            id: data.id().map(str::to_string),
            device_name: data.device_name().map(str::to_string),
            device_vdom: data.device_vdom().map(str::to_string),
            import: data.is_import(),
            applied: encode_attr_object(data.applied()),
            attributes: encode_attr_object(data.state()),
        }
    }

    /// Restores state onto `data`.
    ///
    /// Context attributes already set on `data` take precedence.
    pub fn restore_into(&self, data: &mut ResourceData) -> ResourceResult<()> {
        let applied = decode_attr_object(ROUTER_BGP_FIELDS, &self.applied)?;
        let state = decode_attr_object(ROUTER_BGP_FIELDS, &self.attributes)?;
        data.set_applied(applied);
        data.set_state(state);
        data.set_import(self.import);
        if let Some(id) = &self.id {
            data.set_id(id.clone());
        }
        if data.device_name().is_none() {
            if let Some(name) = &self.device_name {
                data.set_device_name(name.clone());
            }
        }
        if data.device_vdom().is_none() {
            if let Some(vdom) = &self.device_vdom {
                data.set_device_vdom(vdom.clone());
            }
        }
        Ok(())
    }

    /// Resource data whose configuration is the last applied one.
    ///
    /// Used by operations run without a configuration file.
    pub fn to_data(&self) -> ResourceResult<ResourceData> {
        let config = decode_attr_object(ROUTER_BGP_FIELDS, &self.applied)?;
        let mut data = ResourceData::new(config);
        self.restore_into(&mut data)?;
        Ok(data)
    }

    /// Loads a state file; a missing file yields `None`.
    pub fn load(path: &Path) -> ResourceResult<Option<Self>> {
        let origin = path.display().to_string();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ResourceError::config(origin, e.to_string())),
        };
        let state =
            serde_json::from_str(&text).map_err(|e| ResourceError::config(&origin, e.to_string()))?;
        debug!(path = %origin, "Loaded state");
        Ok(Some(state))
    }

    pub fn save(&self, path: &Path) -> ResourceResult<()> {
        let origin = path.display().to_string();
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| ResourceError::config(&origin, e.to_string()))?;
        std::fs::write(path, text).map_err(|e| ResourceError::config(&origin, e.to_string()))?;
        debug!(path = %origin, id = ?self.id, "Saved state");
        Ok(())
    }
}
