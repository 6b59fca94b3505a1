//! The file-manager command catalog.
//!
//! Responsibilities:
//! - Provide one constructor per operation the binding tables refer to.
//!
//! Non-responsibilities:
//! - Executing anything. Commands are tagged descriptors; the application's
//!   `ActionHandler` owns the semantics.
//!
//! Invariants:
//! - Command names are stable snake_case identifiers; handlers and persisted
//!   override tables both rely on them.

use wren_keymap::Command;

// -------------------------------------------------------------- movement

/// Move the selection by `n` entries; the dispatch count multiplies.
pub fn move_rel(n: i64) -> Command {
    Command::new("move").with("relative", n)
}

/// Move the selection to an absolute position; -1 is the last entry.
pub fn move_abs(n: i64) -> Command {
    Command::new("move").with("absolute", n)
}

/// Move by a page fraction (0.5 is half a page).
pub fn move_pages(n: f64) -> Command {
    Command::new("move").with("pages", n)
}

/// Move to a percentage of the list.
pub fn move_percent(n: i64) -> Command {
    Command::new("move").with("percent", n)
}

pub fn move_left() -> Command {
    Command::new("move_left")
}

pub fn move_right() -> Command {
    Command::new("move_right")
}

/// Horizontal scroll, used by the pager.
pub fn scroll_horizontal(n: i64) -> Command {
    Command::new("scroll_horizontal").with("relative", n)
}

pub fn traverse() -> Command {
    Command::new("traverse")
}

pub fn history_go(n: i64) -> Command {
    Command::new("history_go").with("relative", n)
}

// ----------------------------------------------- tagging / marking

pub fn tag_toggle() -> Command {
    Command::new("tag_toggle")
}

pub fn tag_remove() -> Command {
    Command::new("tag_remove")
}

pub fn mark_toggle() -> Command {
    Command::new("mark").with("toggle", true)
}

pub fn mark_all_toggle() -> Command {
    Command::new("mark").with("all", true).with("toggle", true)
}

pub fn unmark_all() -> Command {
    Command::new("mark").with("all", true).with("value", false)
}

// ------------------------------------------ file system operations

pub fn copy() -> Command {
    Command::new("copy")
}

pub fn cut() -> Command {
    Command::new("cut")
}

pub fn paste() -> Command {
    Command::new("paste")
}

pub fn paste_overwrite() -> Command {
    Command::new("paste").with("overwrite", true)
}

pub fn paste_symlink() -> Command {
    Command::new("paste_symlink")
}

// ---------------------------------------------------- run programs

pub fn execute(command: &str) -> Command {
    Command::new("execute").with("command", command)
}

pub fn execute_detached(command: &str) -> Command {
    Command::new("execute").with("command", command).with("detach", true)
}

pub fn edit_file() -> Command {
    Command::new("edit_file")
}

// -------------------------------------------------- toggle options

pub fn toggle_option(name: &str) -> Command {
    Command::new("toggle_option").with("option", name)
}

// ------------------------------------------------------------ sort

pub fn sort(field: &str, reverse: bool) -> Command {
    Command::new("sort").with("field", field).with("reverse", reverse)
}

pub fn toggle_sort_reverse() -> Command {
    Command::new("toggle_sort_reverse")
}

// ----------------------------------------------- console / search

/// Open the console in `mode`, optionally pre-filled with `text`.
pub fn open_console(mode: &str, text: &str) -> Command {
    Command::new("open_console").with("mode", mode).with("text", text)
}

pub fn search_next(forward: bool) -> Command {
    Command::new("search").with("forward", forward)
}

/// Jump to the next entry in a non-filename order (tag, ctime, ...).
pub fn search_by(order: &str) -> Command {
    Command::new("search").with("order", order)
}

// --------------------------------------------- jump to directories

pub fn cd(path: &str) -> Command {
    Command::new("cd").with("path", path)
}

// ------------------------------------------------------- bookmarks

/// The bookmark letter arrives as the dispatch capture.
pub fn enter_bookmark() -> Command {
    Command::new("enter_bookmark")
}

pub fn set_bookmark() -> Command {
    Command::new("set_bookmark")
}

pub fn unset_bookmark() -> Command {
    Command::new("unset_bookmark")
}

pub fn draw_bookmarks() -> Command {
    Command::new("draw_bookmarks")
}

// ---------------------------------------------------- change views

pub fn display_file() -> Command {
    Command::new("display_file")
}

pub fn display_log() -> Command {
    Command::new("display_log")
}

pub fn display_help() -> Command {
    Command::new("display_help")
}

pub fn open_taskview() -> Command {
    Command::new("open_taskview")
}

pub fn close_taskview() -> Command {
    Command::new("close_taskview")
}

pub fn close_pager() -> Command {
    Command::new("close_pager")
}

// ----------------------------------------------------------- tasks

pub fn task_move(to: i64) -> Command {
    Command::new("task_move").with("to", to)
}

pub fn task_remove() -> Command {
    Command::new("task_remove")
}

// -------------------------------------------------- console editing

pub fn console_move_rel(n: i64) -> Command {
    Command::new("console_move").with("relative", n)
}

pub fn console_move_abs(n: i64) -> Command {
    Command::new("console_move").with("absolute", n)
}

pub fn console_history(n: i64) -> Command {
    Command::new("console_history").with("relative", n)
}

/// Delete the character at the cursor (0) or before it (-1).
pub fn console_delete(at: i64) -> Command {
    Command::new("console_delete").with("at", at)
}

pub fn console_delete_word() -> Command {
    Command::new("console_delete_word")
}

/// Delete from the cursor to either end of the line.
pub fn console_delete_rest(direction: i64) -> Command {
    Command::new("console_delete_rest").with("direction", direction)
}

pub fn console_paste() -> Command {
    Command::new("console_paste")
}

/// The typed character arrives as the dispatch capture.
pub fn console_type() -> Command {
    Command::new("console_type")
}

pub fn console_execute() -> Command {
    Command::new("console_execute")
}

pub fn console_close() -> Command {
    Command::new("console_close")
}

pub fn console_tab(n: i64) -> Command {
    Command::new("console_tab").with("relative", n)
}

// ------------------------------------------------ system functions

pub fn quit() -> Command {
    Command::new("quit")
}

pub fn reset() -> Command {
    Command::new("reset")
}

pub fn redraw() -> Command {
    Command::new("redraw")
}

pub fn reload_dir() -> Command {
    Command::new("reload_dir")
}

/// Passive guidance display for background bindings.
pub fn show_hint(text: &str) -> Command {
    Command::new("show_hint").with("text", text)
}
