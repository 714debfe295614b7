//! Type definitions for the router bgp resource

use fos_objmap::{decode_attr_object, ConfigObject};
use serde_json::Value;

use crate::error::{ResourceError, ResourceResult};
use crate::schema::{ROUTER_BGP, ROUTER_BGP_FIELDS};

/// Identifier of the singleton object.
pub const ROUTER_BGP_ID: &str = ROUTER_BGP;

/// Attempts per call pinned on the client by every operation.
pub const CLIENT_RETRIES: u32 = 1;

/// Context attribute naming the managed device.
pub const ATTR_DEVICE_NAME: &str = "device_name";

/// Context attribute naming the VDOM.
pub const ATTR_DEVICE_VDOM: &str = "device_vdom";

/// Configuration and state of one resource instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: Option<String>,
    config: ConfigObject,
    applied: ConfigObject,
    state: ConfigObject,
    import: bool,
    device_name: Option<String>,
    device_vdom: Option<String>,
}

impl ResourceData {
    /// Creates resource data from a configuration.
    pub fn new(config: ConfigObject) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Decodes an attribute-named JSON configuration.
    ///
    /// `device_name` and `device_vdom` are taken out as context attributes;
    /// everything else must be an attribute of the object.
    pub fn from_attr_value(value: &Value) -> ResourceResult<Self> {
        let mut map = value
            .as_object()
            .cloned()
            .ok_or_else(|| ResourceError::config("<root>", "configuration must be an object"))?;

        let device_name = take_string(&mut map, ATTR_DEVICE_NAME)?;
        let device_vdom = take_string(&mut map, ATTR_DEVICE_VDOM)?;
        let config = decode_attr_object(ROUTER_BGP_FIELDS, &Value::Object(map))?;

        let mut data = Self::new(config);
        data.device_name = device_name;
        data.device_vdom = device_vdom;
        Ok(data)
    }

    pub fn with_context(mut self, device_name: impl Into<String>, device_vdom: impl Into<String>) -> Self {
        self.device_name = Some(device_name.into());
        self.device_vdom = Some(device_vdom.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Marks the resource as gone.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn config(&self) -> &ConfigObject {
        &self.config
    }

    pub fn set_config(&mut self, config: ConfigObject) {
        self.config = config;
    }

    /// The configuration last written to the device.
    ///
    /// Updates diff against this, never against the refreshed state.
    pub fn applied(&self) -> &ConfigObject {
        &self.applied
    }

    pub fn set_applied(&mut self, applied: ConfigObject) {
        self.applied = applied;
    }

    pub fn state(&self) -> &ConfigObject {
        &self.state
    }

    pub fn set_state(&mut self, state: ConfigObject) {
        self.state = state;
    }

    pub fn is_import(&self) -> bool {
        self.import
    }

    pub fn set_import(&mut self, import: bool) {
        self.import = import;
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    pub fn set_device_name(&mut self, name: impl Into<String>) {
        self.device_name = Some(name.into());
    }

    pub fn device_vdom(&self) -> Option<&str> {
        self.device_vdom.as_deref()
    }

    pub fn set_device_vdom(&mut self, vdom: impl Into<String>) {
        self.device_vdom = Some(vdom.into());
    }

    /// The configuration laid over the last known state.
    pub fn current(&self) -> ConfigObject {
        let mut current = self.state.clone();
        current.merge_from(&self.config);
        current
    }
}

fn take_string(
    map: &mut serde_json::Map<String, Value>,
    key: &str,
) -> ResourceResult<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ResourceError::config(
            key,
            format!("expected a string, got {}", other),
        )),
    }
}
