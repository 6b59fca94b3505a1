//! File browser keybindings.
//!
//! Responsibilities:
//! - Define the default binding table for the main browser view.
//!
//! Non-responsibilities:
//! - Resolving input events or running any file operation.
//!
//! Invariants:
//! - Ordering follows the original grouping so help output stays stable.

use anyhow::Result;
use wren_keymap::KeyMap;

use super::{alias, basic_movement, bind, bind_hint, hint, system_keys, vim_aliases};
use crate::commands;

pub(crate) fn keymap() -> Result<KeyMap> {
    let mut map = KeyMap::new("browser");
    map.merge(&system_keys()?);

    // -------------------------------------------------------- movement
    basic_movement(&mut map)?;
    vim_aliases(&mut map)?;

    bind(&mut map, ["<right>", "<cr>", "<C-j>"], commands::move_right())?;
    bind(&mut map, ["<left>", "<backspace>"], commands::move_left())?;
    alias(&mut map, "<left>", ["h"])?;
    alias(&mut map, "<right>", ["l"])?;

    bind(&mut map, ["%"], commands::move_percent(50))?;
    bind(&mut map, ["<C-d>", "J"], commands::move_pages(0.5))?;
    bind(&mut map, ["<C-u>", "K"], commands::move_pages(-0.5))?;

    bind(&mut map, ["]"], commands::traverse())?;
    bind(&mut map, ["["], commands::history_go(-1))?;

    // --------------------------------------------------------- history
    bind(&mut map, ["H"], commands::history_go(-1))?;
    bind(&mut map, ["L"], commands::history_go(1))?;

    // ----------------------------------------------- tagging / marking
    bind(&mut map, ["t"], commands::tag_toggle())?;
    bind(&mut map, ["T"], commands::tag_remove())?;

    bind(&mut map, ["<space>"], commands::mark_toggle())?;
    bind(&mut map, ["v"], commands::mark_all_toggle())?;
    bind(&mut map, ["V"], commands::unmark_all())?;

    // ------------------------------------------ file system operations
    bind(&mut map, ["yy"], commands::copy())?;
    bind(&mut map, ["dd"], commands::cut())?;
    bind(&mut map, ["pp"], commands::paste())?;
    bind(&mut map, ["po"], commands::paste_overwrite())?;
    bind(&mut map, ["pl"], commands::paste_symlink())?;
    hint(
        &mut map,
        ["p<bg>"],
        "press p once again to confirm pasting, or l to create symlinks",
    )?;

    // ---------------------------------------------------- run programs
    let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
    bind(&mut map, ["s"], commands::execute(&shell))?;
    bind(&mut map, ["E"], commands::edit_file())?;
    bind(&mut map, [".term"], commands::execute_detached("x-terminal-emulator"))?;
    bind(&mut map, ["du"], commands::execute("du --max-depth=1 -h | less"))?;

    // -------------------------------------------------- toggle options
    hint(
        &mut map,
        ["b<bg>"],
        "toggle show_hidden, preview_files, preview_directories, flushinput, directories_first, collapse_preview",
    )?;
    bind(&mut map, ["bh"], commands::toggle_option("show_hidden"))?;
    bind(&mut map, ["bp"], commands::toggle_option("preview_files"))?;
    bind(&mut map, ["bP"], commands::toggle_option("preview_directories"))?;
    bind(&mut map, ["bi"], commands::toggle_option("flushinput"))?;
    bind(&mut map, ["bd"], commands::toggle_option("directories_first"))?;
    bind(&mut map, ["bc"], commands::toggle_option("collapse_preview"))?;

    // ------------------------------------------------------------ sort
    hint(
        &mut map,
        ["o<bg>", "O<bg>"],
        "sort by: size basename mtime type, capital letter or r reverses",
    )?;
    let sort_fields = [
        ('s', "size"),
        ('b', "basename"),
        ('n', "basename"),
        ('m', "mtime"),
        ('t', "type"),
    ];
    for (key, field) in sort_fields {
        for (key, reverse) in [(key, false), (key.to_ascii_uppercase(), true)] {
            bind(&mut map, [format!("o{}", key)], commands::sort(field, reverse))?;
            bind(&mut map, [format!("O{}", key)], commands::sort(field, true))?;
        }
    }
    bind(
        &mut map,
        ["or", "Or", "oR", "OR"],
        commands::toggle_sort_reverse(),
    )?;

    // ----------------------------------------------- console shortcuts
    bind(&mut map, ["A", "cw"], commands::open_console("command", "rename "))?;
    bind(&mut map, ["cd"], commands::open_console("command", "cd "))?;
    bind(&mut map, ["f"], commands::open_console("quick", "find "))?;
    bind(&mut map, ["bf"], commands::open_console("command", "filter "))?;
    hint(&mut map, ["d<bg>"], "du: disk usage, dd: cut")?;

    // --------------------------------------------- jump to directories
    bind(&mut map, ["gh"], commands::cd("~"))?;
    bind(&mut map, ["ge"], commands::cd("/etc"))?;
    bind(&mut map, ["gu"], commands::cd("/usr"))?;
    bind(&mut map, ["gd"], commands::cd("/dev"))?;
    bind(&mut map, ["gl"], commands::cd("/lib"))?;
    bind(&mut map, ["go"], commands::cd("/opt"))?;
    bind(&mut map, ["gv"], commands::cd("/var"))?;
    bind(&mut map, ["gr", "g/"], commands::cd("/"))?;
    bind(&mut map, ["gm"], commands::cd("/media"))?;
    bind(&mut map, ["gn"], commands::cd("/mnt"))?;
    bind(&mut map, ["gt"], commands::cd("/tmp"))?;
    bind(&mut map, ["gs"], commands::cd("/srv"))?;

    // ------------------------------------------------------- searching
    bind(&mut map, ["/"], commands::open_console("search", ""))?;
    bind(&mut map, ["n"], commands::search_next(true))?;
    bind(&mut map, ["N"], commands::search_next(false))?;

    bind(&mut map, ["<tab>"], commands::search_by("tag"))?;
    bind(&mut map, ["cc"], commands::search_by("ctime"))?;
    bind(&mut map, ["cm"], commands::search_by("mimetype"))?;
    bind(&mut map, ["cs"], commands::search_by("size"))?;
    hint(&mut map, ["c<bg>"], "search by: ctime mimetype size")?;

    // ------------------------------------------------------- bookmarks
    bind(&mut map, ["`<any>", "'<any>"], commands::enter_bookmark())?;
    bind(&mut map, ["m<any>"], commands::set_bookmark())?;
    bind(&mut map, ["um<any>"], commands::unset_bookmark())?;
    bind_hint(
        &mut map,
        ["`<bg>", "'<bg>", "m<bg>"],
        commands::draw_bookmarks(),
        "press a bookmark key",
    )?;

    // ---------------------------------------------------- change views
    bind(&mut map, ["i"], commands::display_file())?;
    bind(&mut map, ["<C-p>"], commands::display_log())?;
    bind(&mut map, ["?", "<f1>"], commands::display_help())?;
    bind(&mut map, ["w"], commands::open_taskview())?;

    // ------------------------------------------------ system functions
    bind(&mut map, ["ZZ", "<C-c>"], commands::quit())?;
    bind(&mut map, ["<C-r>"], commands::reset())?;
    bind(&mut map, ["R"], commands::reload_dir())?;

    bind(&mut map, [":", ";"], commands::open_console("command", ""))?;
    bind(&mut map, [">"], commands::open_console("quick", ""))?;
    bind(&mut map, ["!"], commands::open_console("open", ""))?;
    bind(&mut map, ["r"], commands::open_console("open_quick", ""))?;

    Ok(map)
}
