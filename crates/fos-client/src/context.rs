//! Device and VDOM scoping of API objects.

use std::fmt;

/// Device/VDOM scope an object lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextParams {
    /// Managed device name.
    pub device: String,
    /// Virtual domain on the device.
    pub vdom: String,
}

impl ContextParams {
    pub fn new(device: impl Into<String>, vdom: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            vdom: vdom.into(),
        }
    }

    /// Builds the JSON-RPC URL of an object in this scope.
    pub fn url_for(&self, path: &ObjectPath) -> String {
        format!(
            "/pm/config/device/{}/vdom/{}/{}",
            self.device, self.vdom, path.0
        )
    }
}

impl fmt::Display for ContextParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device, self.vdom)
    }
}

/// API path of an object type below the device/VDOM scope (`router/bgp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectPath(pub &'static str);

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
