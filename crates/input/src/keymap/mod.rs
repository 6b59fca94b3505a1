//! Keymap assembly for the wren UI contexts.
//!
//! Responsibilities:
//! - Build the default binding table for each context, apply user
//!   overrides, finalize, and install everything into a context registry.
//!
//! Does NOT handle:
//! - Resolving input events (wren-keymap) or notation parsing (wren-config).
//!
//! Invariants:
//! - The registry is an explicit value returned to the caller; there is no
//!   process-wide binding state.

pub mod bindings;
pub mod convert;
mod overrides;

use anyhow::{Context, Result};
use wren_config::KeymapOverrides;
use wren_keymap::{ContextId, ContextRegistry};

pub use overrides::command_for;

/// Builds the full context registry from the default tables and the user's
/// overrides.
///
/// # Errors
///
/// Fails when a default table has a bad sequence (a bug, not user input) or
/// when finalize rejects a table; override problems only log a warning.
pub fn build_registry(overrides: &KeymapOverrides) -> Result<ContextRegistry> {
    let mut registry = ContextRegistry::new();

    let mut browser = bindings::browser::keymap().context("building browser keymap")?;
    overrides::apply(&mut browser, overrides);
    browser.finalize().context("finalizing browser keymap")?;
    registry.install(ContextId::Browser, browser)?;

    let mut console = bindings::console::keymap().context("building console keymap")?;
    console.finalize().context("finalizing console keymap")?;
    registry.install(ContextId::Console, console)?;

    let mut pager = bindings::pager::keymap().context("building pager keymap")?;
    pager.finalize().context("finalizing pager keymap")?;
    registry.install(ContextId::Pager, pager)?;

    let mut taskview = bindings::taskview::keymap().context("building taskview keymap")?;
    taskview.finalize().context("finalizing taskview keymap")?;
    registry.install(ContextId::TaskView, taskview)?;

    Ok(registry)
}
