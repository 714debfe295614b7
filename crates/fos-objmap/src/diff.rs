//! "Set or changed" tests used when expanding.
//!
//! A field is sent to the device when the configuration holds a non-zero
//! value for it or when its value differs from the previously applied
//! configuration. Everything else is left to the device's own defaults.

use crate::value::ConfigObject;

/// Answers whether an attribute path should be part of an update payload.
pub trait ChangeSource {
    /// The configuration holds a non-zero value at `path`.
    fn get_ok(&self, path: &str) -> bool;

    /// The value at `path` differs from the previously applied configuration.
    fn has_change(&self, path: &str) -> bool;

    fn is_set_or_changed(&self, path: &str) -> bool {
        self.get_ok(path) || self.has_change(path)
    }
}

/// Desired configuration compared against the previously applied one.
///
/// `prior` must be what was last written, not state read back from the
/// device: values the device holds on its own would otherwise be cleared.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDiff<'a> {
    config: &'a ConfigObject,
    prior: &'a ConfigObject,
}

impl<'a> ResourceDiff<'a> {
    pub fn new(config: &'a ConfigObject, prior: &'a ConfigObject) -> Self {
        Self { config, prior }
    }

    /// Returns the dotted paths of every top-level field that changed.
    pub fn changed_fields(&self) -> Vec<&'a str> {
        let mut changed: Vec<&str> = self
            .config
            .iter()
            .map(|(name, _)| name)
            .filter(|name| self.has_change(name))
            .collect();
        for (name, _) in self.prior.iter() {
            if !self.config.contains(name) && self.has_change(name) {
                changed.push(name);
            }
        }
        changed
    }
}

impl ChangeSource for ResourceDiff<'_> {
    fn get_ok(&self, path: &str) -> bool {
        self.config.get_path(path).is_some_and(|v| !v.is_zero())
    }

    /// An absent value and a zero value are the same state.
    fn has_change(&self, path: &str) -> bool {
        match (self.config.get_path(path), self.prior.get_path(path)) {
            (Some(current), Some(prior)) => current != prior,
            (Some(value), None) | (None, Some(value)) => !value.is_zero(),
            (None, None) => false,
        }
    }
}

/// Selects every field present in the configuration, zero or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandAll;

impl ChangeSource for ExpandAll {
    fn get_ok(&self, _path: &str) -> bool {
        true
    }

    fn has_change(&self, _path: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConfigObject {
        ConfigObject::new()
            .with("as", 65000)
            .with("keepalive_timer", 0)
            .with(
                "neighbor",
                vec![ConfigObject::new().with("ip", "10.0.0.1").with("weight", 10)],
            )
    }

    #[test]
    fn test_get_ok_ignores_zero_values() {
        let prior = ConfigObject::new();
        let cfg = config();
        let diff = ResourceDiff::new(&cfg, &prior);

        assert!(diff.get_ok("as"));
        assert!(!diff.get_ok("keepalive_timer"));
        assert!(diff.get_ok("neighbor.0.weight"));
        assert!(!diff.get_ok("router_id"));
    }

    #[test]
    fn test_has_change_against_prior() {
        let prior = config().with("router_id", "1.1.1.1");
        let mut cfg = config();
        cfg.insert("as", 65010);
        cfg.remove("keepalive_timer");
        let diff = ResourceDiff::new(&cfg, &prior);

        assert!(diff.has_change("as"));
        assert!(diff.has_change("router_id"));
        assert!(!diff.has_change("keepalive_timer"));
        assert!(!diff.has_change("neighbor"));
        assert!(!diff.has_change("neighbor.0.ip"));
        assert!(!diff.has_change("neighbor.0.remote_as"));
        assert_eq!(diff.changed_fields(), vec!["as", "router_id"]);
    }

    #[test]
    fn test_expand_all() {
        assert!(ExpandAll.is_set_or_changed("anything"));
        assert!(!ExpandAll.has_change("anything"));
    }
}
