//! Pager keybindings.
//!
//! Responsibilities:
//! - Define scrolling and close bindings for the full-screen pager.
//!
//! Invariants:
//! - Less-like `d`/`u` are aliases of the page keys, not separate bindings.

use anyhow::Result;
use wren_keymap::KeyMap;

use super::{alias, basic_movement, bind, system_keys, vim_aliases};
use crate::commands;

pub(crate) fn keymap() -> Result<KeyMap> {
    let mut map = KeyMap::new("pager");
    map.merge(&system_keys()?);

    // -------------------------------------------------------- movement
    basic_movement(&mut map)?;
    vim_aliases(&mut map)?;

    bind(&mut map, ["<left>"], commands::scroll_horizontal(-4))?;
    bind(&mut map, ["<right>"], commands::scroll_horizontal(4))?;
    alias(&mut map, "<left>", ["h"])?;
    alias(&mut map, "<right>", ["l"])?;

    bind(&mut map, ["<C-d>"], commands::move_pages(0.5))?;
    bind(&mut map, ["<C-u>"], commands::move_pages(-0.5))?;
    bind(&mut map, ["<space>"], commands::move_pages(0.8))?;

    // --------------------------------------------- less-like shortcuts
    alias(&mut map, "<pagedown>", ["d"])?;
    alias(&mut map, "<pageup>", ["u"])?;

    // ---------------------------------------------------------- others
    bind(&mut map, ["E"], commands::edit_file())?;
    bind(&mut map, ["?"], commands::display_help())?;

    bind(&mut map, ["q", "i", "<esc>", "<f1>"], commands::close_pager())?;

    Ok(map)
}
