//! Command console keybindings.
//!
//! Responsibilities:
//! - Define line-editing chords and the catch-all typing binding.
//!
//! Non-responsibilities:
//! - Editing the console line itself (handler's job).
//!
//! Invariants:
//! - Count parsing is disabled: digits are text, not prefixes.
//! - Only non-printable chords are bound literally, so the `<char>`
//!   wildcard never shadows typed input.

use anyhow::Result;
use wren_keymap::KeyMap;

use super::bind;
use crate::commands;

pub(crate) fn keymap() -> Result<KeyMap> {
    let mut map = KeyMap::new("console");
    map.set_count_parsing(false);

    // ----------------------------------------------------- typing keys
    bind(&mut map, ["<char>"], commands::console_type())?;

    // -------------------------------------------------------- movement
    bind(&mut map, ["<up>"], commands::console_history(-1))?;
    bind(&mut map, ["<down>"], commands::console_history(1))?;

    bind(&mut map, ["<C-b>", "<left>"], commands::console_move_rel(-1))?;
    bind(&mut map, ["<C-f>", "<right>"], commands::console_move_rel(1))?;
    bind(&mut map, ["<C-a>", "<home>"], commands::console_move_abs(0))?;
    bind(&mut map, ["<C-e>", "<end>"], commands::console_move_abs(-1))?;

    // ----------------------------------------- deleting / pasting text
    bind(&mut map, ["<C-d>", "<del>"], commands::console_delete(0))?;
    bind(&mut map, ["<C-h>", "<backspace>"], commands::console_delete(-1))?;
    bind(&mut map, ["<C-w>"], commands::console_delete_word())?;
    bind(&mut map, ["<C-k>"], commands::console_delete_rest(1))?;
    bind(&mut map, ["<C-u>"], commands::console_delete_rest(-1))?;
    bind(&mut map, ["<C-y>"], commands::console_paste())?;

    // ------------------------------------------------ system functions
    bind(&mut map, ["<f1>"], commands::display_help())?;
    bind(&mut map, ["<C-c>", "<esc>"], commands::console_close())?;
    bind(&mut map, ["<C-j>", "<cr>"], commands::console_execute())?;
    bind(&mut map, ["<tab>"], commands::console_tab(1))?;
    bind(&mut map, ["<backtab>"], commands::console_tab(-1))?;
    bind(&mut map, ["<C-l>"], commands::redraw())?;

    Ok(map)
}
