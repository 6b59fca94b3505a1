//! Dispatch: bridging a resolved match to an action invocation.
//!
//! Responsibilities:
//! - Build the per-dispatch argument bundle.
//! - Invoke the bound command through the `ActionHandler` seam, exactly once
//!   per resolution.
//!
//! Does NOT handle:
//! - Executing file-manager operations (owned by the handler).
//! - Catching or classifying handler failures (they propagate to the event
//!   loop that called `feed`).
//!
//! Invariants:
//! - The buffer is reset to `Empty` before the handler runs, so a failing
//!   action never leaves stale input state behind.

use tracing::debug;

use crate::buffer::{KeyBuffer, Resolution};
use crate::command::Command;
use crate::key::{KeyPath, KeyPress};
use crate::registry::{ContextId, WidgetId};
use crate::trie::KeySequenceTrie;

/// The argument bundle a command is invoked with.
///
/// Created per dispatch and discarded when the handler returns.
#[derive(Debug)]
pub struct CommandArgument<'a> {
    /// The UI context the sequence was resolved in.
    pub context: ContextId,
    /// Opaque handle of the widget the event was routed for.
    pub widget: WidgetId,
    /// Resolved count prefix; 1 when none was typed.
    pub count: u32,
    /// The literal presses that matched the binding.
    pub keys: &'a KeyPath,
    /// The press captured by a wildcard token, if the path had one.
    pub capture: Option<KeyPress>,
    /// The context's key buffer, for inspection or an explicit reset.
    pub keybuffer: &'a mut KeyBuffer,
}

/// The capability seam commands are invoked through.
///
/// Implementations own the actual operations; the engine only promises one
/// synchronous call per resolved sequence and does not await or supervise
/// anything the handler starts.
pub trait ActionHandler {
    /// Invoke `command` with the dispatch arguments.
    ///
    /// # Errors
    ///
    /// Failures are not interpreted by the engine; they surface unchanged
    /// from the `feed` call that triggered the dispatch.
    fn invoke(&mut self, command: &Command, arg: CommandArgument<'_>) -> anyhow::Result<()>;
}

pub(crate) fn dispatch(
    trie: &KeySequenceTrie,
    buffer: &mut KeyBuffer,
    resolution: Resolution,
    context: ContextId,
    widget: WidgetId,
    handler: &mut dyn ActionHandler,
) -> anyhow::Result<()> {
    let binding = trie.binding(resolution.binding);
    buffer.reset();
    debug!(
        context = %context,
        keys = %resolution.keys,
        command = binding.command.name(),
        count = resolution.count,
        "dispatching"
    );
    handler.invoke(
        &binding.command,
        CommandArgument {
            context,
            widget,
            count: resolution.count,
            keys: &resolution.keys,
            capture: resolution.capture,
            keybuffer: buffer,
        },
    )
}
