//! Tagged command descriptors.
//!
//! A command is a name plus a parameter map. The engine never interprets
//! either; it only carries the descriptor from a registered binding to the
//! `ActionHandler` that owns the actual operation. Keeping actions as plain
//! data keeps binding tables serializable and testable in isolation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to an external operation plus its captured parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    name: String,
    /// BTreeMap for deterministic serialization.
    #[serde(default)]
    params: BTreeMap<String, Value>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a named parameter, replacing any previous value for the key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_replaces_previous_value() {
        let cmd = Command::new("move").with("relative", 1).with("relative", -1);
        assert_eq!(cmd.param("relative"), Some(&Value::from(-1)));
    }

    #[test]
    fn test_serde_round_trip() {
        let cmd = Command::new("sort").with("key", "size").with("reverse", true);
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn test_params_default_to_empty() {
        let cmd: Command = serde_json::from_str(r#"{"name":"quit"}"#).unwrap();
        assert_eq!(cmd.name(), "quit");
        assert!(cmd.params().is_empty());
    }
}
