//! User keybinding override types.
//!
//! Responsibilities:
//! - Define the remappable action identifiers (`OverrideAction`).
//! - Define `KeymapOverrides` for persisted user customizations.
//!
//! Does NOT handle:
//! - Notation parsing or validation (see `notation` module).
//! - Applying overrides to binding tables (see input crate).
//!
//! Invariants:
//! - `OverrideAction` uses snake_case serialization for config file
//!   consistency.
//! - `KeymapOverrides` uses `BTreeMap` for deterministic serialization.
//! - Only actions explicitly listed in overrides override the defaults.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A remappable action identifier.
///
/// This enum represents the subset of bindings users can customize.
/// Starting with global entry points only; may expand in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OverrideAction {
    /// Quit the file manager
    Quit,
    /// Show the help pager
    Help,
    /// Open the command console
    OpenConsole,
    /// Open the task view
    OpenTaskView,
}

impl fmt::Display for OverrideAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "quit"),
            Self::Help => write!(f, "help"),
            Self::OpenConsole => write!(f, "open_console"),
            Self::OpenTaskView => write!(f, "open_task_view"),
        }
    }
}

/// User-defined keybinding overrides.
///
/// Maps action identifiers to key sequences in notation form. Only actions
/// explicitly listed here override the defaults; all others keep their
/// built-in bindings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeymapOverrides {
    /// Map of action -> key sequence string.
    #[serde(default)]
    pub overrides: BTreeMap<OverrideAction, String>,
}

impl KeymapOverrides {
    /// Returns true if there are no overrides configured.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Get the override sequence for a specific action, if any.
    pub fn get(&self, action: OverrideAction) -> Option<&str> {
        self.overrides.get(&action).map(|s| s.as_str())
    }

    /// Parse an override table from its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON; sequence validity is checked separately by
    /// [`crate::notation::validate_overrides`].
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse keybinding overrides")
    }
}
