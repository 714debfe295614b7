//! Provider configuration.
//!
//! ```yaml
//! client:
//!   url: https://fmg.example.net
//!   token: 0123abcd
//!   insecure: true
//! device_name: FGT-01
//! device_vdom: root
//! ```

use std::path::Path;

use fos_client::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResourceError, ResourceResult};

/// Connection settings plus context defaults shared by every resource.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub client: ClientConfig,

    /// Device used when a resource does not name one.
    #[serde(default)]
    pub device_name: Option<String>,

    /// VDOM used when a resource does not name one.
    #[serde(default)]
    pub device_vdom: Option<String>,
}

/// Context defaults consulted after the resource's own attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub device_name: Option<String>,
    pub device_vdom: Option<String>,
}

impl ProviderConfig {
    /// Loads and validates a YAML provider file.
    pub fn load(path: &Path) -> ResourceResult<Self> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::config(&origin, e.to_string()))?;
        let config = Self::from_yaml(&text, &origin)?;
        debug!(path = %origin, url = %config.client.url, "Loaded provider configuration");
        Ok(config)
    }

    /// Parses and validates YAML text; `origin` names it in errors.
    pub fn from_yaml(text: &str, origin: &str) -> ResourceResult<Self> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ResourceError::config(origin, e.to_string()))?;
        config
            .client
            .validate()
            .map_err(|e| ResourceError::config(origin, e.to_string()))?;
        Ok(config)
    }

    pub fn defaults(&self) -> ProviderDefaults {
        ProviderDefaults {
            device_name: non_empty(&self.device_name),
            device_vdom: non_empty(&self.device_vdom),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROVIDER_YAML: &str = r#"
client:
  url: https://fmg.example.net
  token: abc123
  retries: 3
device_name: FGT-01
device_vdom: ""
"#;

    #[test]
    fn test_load_provider_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PROVIDER_YAML.as_bytes()).unwrap();

        let config = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(config.client.url, "https://fmg.example.net");
        assert_eq!(config.client.retries, 3);
        assert_eq!(
            config.defaults(),
            ProviderDefaults {
                device_name: Some("FGT-01".to_string()),
                device_vdom: None,
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = ProviderConfig::load(Path::new("/nonexistent/provider.yaml")).unwrap_err();
        assert!(matches!(err, ResourceError::Config { ref path, .. } if path == "/nonexistent/provider.yaml"));
    }

    #[test]
    fn test_invalid_provider() {
        assert!(ProviderConfig::from_yaml("client: [1, 2]", "inline").is_err());

        let err = ProviderConfig::from_yaml("client:\n  url: https://fmg\n", "inline").unwrap_err();
        assert!(err.to_string().contains("token is required"));
    }
}
