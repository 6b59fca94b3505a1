//! Task view keybindings.
//!
//! Responsibilities:
//! - Define task reordering and close bindings for the task view.

use anyhow::Result;
use wren_keymap::KeyMap;

use super::{basic_movement, bind, system_keys, vim_aliases};
use crate::commands;

pub(crate) fn keymap() -> Result<KeyMap> {
    let mut map = KeyMap::new("taskview");
    map.merge(&system_keys()?);

    // -------------------------------------------------------- movement
    basic_movement(&mut map)?;
    vim_aliases(&mut map)?;

    // -------------------------------------------------- (re)move tasks
    bind(&mut map, ["K"], commands::task_move(0))?;
    bind(&mut map, ["J"], commands::task_move(-1))?;
    bind(&mut map, ["dd"], commands::task_remove())?;

    // ------------------------------------------------ system functions
    bind(&mut map, ["?"], commands::display_help())?;
    bind(
        &mut map,
        ["w", "q", "<esc>", "<C-d>", "<C-c>"],
        commands::close_taskview(),
    )?;

    Ok(map)
}
