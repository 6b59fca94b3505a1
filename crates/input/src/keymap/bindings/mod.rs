//! Default binding tables grouped by UI context.
//!
//! Responsibilities:
//! - Provide one keymap builder per context plus the blocks they share.
//!
//! Does NOT handle:
//! - Resolving input events (the engine does).
//! - Applying user overrides (see the overrides module).
//!
//! Invariants:
//! - Registration order is stable for deterministic help/docs output.
//! - Every alias registered here targets a path the same table binds.

pub(crate) mod browser;
pub(crate) mod console;
pub(crate) mod pager;
pub(crate) mod taskview;

use anyhow::{Context, Result};
use wren_keymap::{Command, KeyMap};

use super::convert;
use crate::commands;

/// Registers `command` under every notation sequence in `sequences`.
pub(crate) fn bind<I, S>(map: &mut KeyMap, sequences: I, command: Command) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for sequence in sequences {
        let sequence = sequence.as_ref();
        let (path, background) = convert::parse_path(sequence)
            .with_context(|| format!("bad key sequence '{}'", sequence))?;
        map.bind_full([path], command.clone(), None, background);
    }
    Ok(())
}

/// Registers `command` with hint text; the sequences are background entries
/// so the hint shows while the chord is still open.
pub(crate) fn bind_hint<I, S>(
    map: &mut KeyMap,
    sequences: I,
    command: Command,
    text: &str,
) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for sequence in sequences {
        let sequence = sequence.as_ref();
        let (path, _) = convert::parse_path(sequence)
            .with_context(|| format!("bad key sequence '{}'", sequence))?;
        map.bind_full([path], command.clone(), Some(text), true);
    }
    Ok(())
}

/// Pure guidance entries: the bound command only re-displays the hint.
pub(crate) fn hint<I, S>(map: &mut KeyMap, sequences: I, text: &str) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    bind_hint(map, sequences, commands::show_hint(text), text)
}

/// Registers every sequence in `new_sequences` as an alias of `target`.
pub(crate) fn alias<I, S>(map: &mut KeyMap, target: &str, new_sequences: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (target, _) = convert::parse_path(target)
        .with_context(|| format!("bad alias target '{}'", target))?;
    for sequence in new_sequences {
        let sequence = sequence.as_ref();
        let (path, _) = convert::parse_path(sequence)
            .with_context(|| format!("bad key sequence '{}'", sequence))?;
        map.alias(target.clone(), [path]);
    }
    Ok(())
}

/// Bindings every context carries.
pub(crate) fn system_keys() -> Result<KeyMap> {
    let mut map = KeyMap::new("system");
    bind(&mut map, ["Q"], commands::quit())?;
    bind(&mut map, ["<C-l>"], commands::redraw())?;
    Ok(map)
}

/// Cursor movement over a vertical list.
pub(crate) fn basic_movement(map: &mut KeyMap) -> Result<()> {
    bind(map, ["<down>"], commands::move_rel(1))?;
    bind(map, ["<up>"], commands::move_rel(-1))?;
    bind(map, ["<home>"], commands::move_abs(0))?;
    bind(map, ["<end>"], commands::move_abs(-1))?;
    bind(map, ["<pagedown>"], commands::move_pages(1.0))?;
    bind(map, ["<pageup>"], commands::move_pages(-1.0))?;
    Ok(())
}

/// The vim-style spellings of the vertical movement keys.
///
/// Horizontal aliases (`h`/`l`) are registered per context, since not every
/// context binds the arrow keys they redirect to.
pub(crate) fn vim_aliases(map: &mut KeyMap) -> Result<()> {
    alias(map, "<down>", ["j"])?;
    alias(map, "<up>", ["k"])?;
    alias(map, "<home>", ["gg"])?;
    alias(map, "<end>", ["G"])?;
    alias(map, "<pagedown>", ["<C-f>"])?;
    alias(map, "<pageup>", ["<C-b>"])?;
    Ok(())
}
