//! User keybinding override application.
//!
//! Responsibilities:
//! - Validate a persisted override table and rebind the affected entry
//!   points before the browser keymap is finalized.
//! - Fall back to the defaults, with a warning, when the table is invalid.
//!
//! Does NOT handle:
//! - Parsing key notation (wren-config) or persisting the table.

use tracing::{debug, info, warn};
use wren_config::notation::validate_overrides;
use wren_config::{KeymapOverrides, OverrideAction};
use wren_keymap::{Command, KeyMap};

use super::convert;
use crate::commands;

/// The command an override action rebinds.
pub fn command_for(action: OverrideAction) -> Command {
    match action {
        OverrideAction::Quit => commands::quit(),
        OverrideAction::Help => commands::display_help(),
        OverrideAction::OpenConsole => commands::open_console("command", ""),
        OverrideAction::OpenTaskView => commands::open_taskview(),
    }
}

/// Applies `overrides` to `map`.
///
/// An invalid table is rejected as a whole: partial application would leave
/// the bindings in a state the user never wrote down.
pub(crate) fn apply(map: &mut KeyMap, overrides: &KeymapOverrides) {
    if overrides.is_empty() {
        debug!("no keybinding overrides configured");
        return;
    }

    if let Err(e) = validate_overrides(&overrides.overrides) {
        warn!("keybinding validation failed: {}. Using default keybindings.", e);
        return;
    }

    let mut applied = 0;
    for (action, sequence) in &overrides.overrides {
        match convert::parse_path(sequence) {
            Ok((path, background)) => {
                map.bind_full([path], command_for(*action), None, background);
                applied += 1;
            }
            Err(e) => {
                // validate_overrides already parsed the table, so this is
                // unreachable in practice; skip the entry rather than abort.
                warn!("skipping override for '{}': {}", action, e);
            }
        }
    }
    info!("loaded {} keybinding override(s)", applied);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wren_keymap::KeyPath;

    fn overrides(entries: &[(OverrideAction, &str)]) -> KeymapOverrides {
        let mut table = KeymapOverrides::default();
        for (action, sequence) in entries {
            table.overrides.insert(*action, sequence.to_string());
        }
        table
    }

    #[test]
    fn test_apply_rebinds_the_action() {
        let mut map = KeyMap::new("browser");
        apply(&mut map, &overrides(&[(OverrideAction::Quit, "<f12>")]));

        let bound = map
            .bindings()
            .find(|b| b.command.name() == "quit")
            .expect("quit binding");
        assert_eq!(bound.path.to_string(), "<f12>");
    }

    #[test]
    fn test_invalid_table_is_rejected_as_a_whole() {
        let mut map = KeyMap::new("browser");
        apply(
            &mut map,
            &overrides(&[
                (OverrideAction::Quit, "<f12>"),
                (OverrideAction::Help, "<broken"),
            ]),
        );
        assert_eq!(map.bindings().count(), 0);
    }

    #[test]
    fn test_reserved_sequence_is_rejected() {
        let mut map = KeyMap::new("browser");
        apply(&mut map, &overrides(&[(OverrideAction::Quit, "<C-c>")]));
        assert_eq!(map.bindings().count(), 0);
    }

    #[test]
    fn test_override_takes_precedence_over_default() {
        let mut map = KeyMap::new("browser");
        map.bind([KeyPath::chars("Q")], commands::quit());
        apply(&mut map, &overrides(&[(OverrideAction::Quit, "Q")]));

        // Rebinding the same path is a silent replace, not a duplicate.
        assert_eq!(map.bindings().count(), 1);
    }
}
