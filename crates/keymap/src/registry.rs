//! Context registry: routing events to the active context's keymap.
//!
//! Responsibilities:
//! - Hold one finalized keymap and key buffer per UI context.
//! - Feed raw key events through count parsing, matching and dispatch.
//! - Replay a press that completed a best-so-far match as the start of the
//!   next resolution cycle, inside the same `feed` call.
//!
//! Does NOT handle:
//! - Deciding which context is active (the surrounding event loop routes).
//! - Rendering hint text (only reports it).
//!
//! Invariants:
//! - One event is fully resolved (buffer update, possible dispatch, reset)
//!   before the next is accepted; there is no concurrency inside the core.
//! - Exactly one handler invocation per resolved sequence.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::buffer::{FeedResult, KeyBuffer};
use crate::dispatch::{self, ActionHandler};
use crate::error::KeymapError;
use crate::key::KeyPress;
use crate::map::KeyMap;

/// The UI contexts the file manager routes key input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextId {
    Browser,
    Console,
    Pager,
    TaskView,
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Browser => "browser",
            Self::Console => "console",
            Self::Pager => "pager",
            Self::TaskView => "taskview",
        };
        write!(f, "{}", name)
    }
}

/// Opaque handle of the widget an event is dispatched for.
///
/// The engine never inspects it; it is carried into the argument bundle so
/// handlers can address the right widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

/// What a `feed` call did with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The sequence is still open; `hint` carries the pending node's
    /// guidance text when it has any.
    Pending { hint: Option<String> },
    /// At least one binding was dispatched during this call.
    Dispatched,
    /// Nothing matched; the buffer was reset for a fresh attempt.
    Failed,
}

#[derive(Debug)]
struct ContextSlot {
    map: KeyMap,
    buffer: KeyBuffer,
}

/// One finalized keymap/key buffer pair per UI context.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: HashMap<ContextId, ContextSlot>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a finalized keymap for `context`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::NotFinalized`] if `finalize()` has not run
    /// since the map's last mutation.
    pub fn install(&mut self, context: ContextId, map: KeyMap) -> Result<(), KeymapError> {
        if !map.is_finalized() {
            return Err(KeymapError::NotFinalized {
                name: map.name().to_string(),
            });
        }
        debug!(context = %context, keymap = map.name(), "installing keymap");
        let buffer = KeyBuffer::with_counts(map.count_parsing());
        self.contexts.insert(context, ContextSlot { map, buffer });
        Ok(())
    }

    /// Feeds one key event into `context`'s resolution cycle.
    ///
    /// # Errors
    ///
    /// Fails for an unknown context, and propagates handler failures
    /// unchanged; the buffer is already reset when a handler runs, so a
    /// failed action never corrupts subsequent input.
    pub fn feed(
        &mut self,
        context: ContextId,
        event: KeyEvent,
        widget: WidgetId,
        handler: &mut dyn ActionHandler,
    ) -> anyhow::Result<FeedOutcome> {
        let slot = self.slot_mut(context)?;
        let trie = slot.map.trie().ok_or_else(|| KeymapError::NotFinalized {
            name: slot.map.name().to_string(),
        })?;

        let mut dispatched = false;
        let mut next = Some(KeyPress::from(event));
        while let Some(key) = next.take() {
            match slot.buffer.feed(trie, key) {
                FeedResult::Pending { hint } => {
                    return Ok(if dispatched {
                        FeedOutcome::Dispatched
                    } else {
                        FeedOutcome::Pending { hint }
                    });
                }
                FeedResult::Done { replay } => {
                    let Some(resolution) = slot.buffer.take_resolution() else {
                        slot.buffer.reset();
                        return Ok(FeedOutcome::Failed);
                    };
                    dispatch::dispatch(trie, &mut slot.buffer, resolution, context, widget, handler)?;
                    dispatched = true;
                    next = replay;
                }
                FeedResult::Failed => {
                    trace!(context = %context, key = %key, "no binding matches");
                    slot.buffer.reset();
                    return Ok(if dispatched {
                        FeedOutcome::Dispatched
                    } else {
                        FeedOutcome::Failed
                    });
                }
            }
        }
        Ok(FeedOutcome::Dispatched)
    }

    /// Completes a pending best-so-far match without waiting for more input.
    ///
    /// Dispatches when the open sequence already reached a usable binding;
    /// otherwise the buffer resets and the call reports `Failed`.
    ///
    /// # Errors
    ///
    /// Same failure channels as [`ContextRegistry::feed`].
    pub fn flush(
        &mut self,
        context: ContextId,
        widget: WidgetId,
        handler: &mut dyn ActionHandler,
    ) -> anyhow::Result<FeedOutcome> {
        let slot = self.slot_mut(context)?;
        let trie = slot.map.trie().ok_or_else(|| KeymapError::NotFinalized {
            name: slot.map.name().to_string(),
        })?;

        if slot.buffer.flush().is_none() {
            return Ok(FeedOutcome::Failed);
        }
        let Some(resolution) = slot.buffer.take_resolution() else {
            slot.buffer.reset();
            return Ok(FeedOutcome::Failed);
        };
        dispatch::dispatch(trie, &mut slot.buffer, resolution, context, widget, handler)?;
        Ok(FeedOutcome::Dispatched)
    }

    /// Abandons any pending sequence in `context`.
    ///
    /// # Errors
    ///
    /// Fails only for an unknown context.
    pub fn reset(&mut self, context: ContextId) -> Result<(), KeymapError> {
        self.slot_mut(context)?.buffer.reset();
        Ok(())
    }

    /// The installed keymap for `context`, for help/docs rendering.
    pub fn keymap(&self, context: ContextId) -> Option<&KeyMap> {
        self.contexts.get(&context).map(|slot| &slot.map)
    }

    fn slot_mut(&mut self, context: ContextId) -> Result<&mut ContextSlot, KeymapError> {
        self.contexts
            .get_mut(&context)
            .ok_or(KeymapError::UnknownContext {
                context: context.to_string(),
            })
    }
}
