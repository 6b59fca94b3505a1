//! The key buffer state machine.
//!
//! Responsibilities:
//! - Consume one key press at a time and drive the trie walk.
//! - Extract an optional leading numeric count before matching starts.
//! - Track the best usable binding seen so far, so that a dead end can still
//!   resolve to it and hand the unmatched press back for replay.
//!
//! Does NOT handle:
//! - Invoking commands or resetting after dispatch (see dispatch module).
//! - Routing between UI contexts (see registry module).
//!
//! Invariants:
//! - One press is fully processed before the next is accepted.
//! - `Done` and `Failed` are terminal until `reset()`; further presses are
//!   rejected rather than silently mixed into a stale resolution.

use tracing::trace;

use crate::key::{KeyPath, KeyPress};
use crate::trie::{BindingId, KeySequenceTrie, NodeId};

/// Observable buffer states.
///
/// The hint-bearing pending condition is part of `Matching`, not a state of
/// its own: it is reported through [`FeedResult::Pending`] while the walk is
/// at a node that carries hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Nothing consumed since the last reset.
    Empty,
    /// Consuming a leading digit run.
    Counting,
    /// Walking the trie.
    Matching,
    /// A binding was resolved and waits to be dispatched.
    Done,
    /// No binding can match the consumed presses.
    Failed,
}

/// A resolved match, ready for dispatch.
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub(crate) binding: BindingId,
    pub(crate) count: u32,
    pub(crate) keys: KeyPath,
    pub(crate) capture: Option<KeyPress>,
}

/// Outcome of feeding one press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FeedResult {
    /// More input is needed; `hint` is the current node's guidance text.
    Pending { hint: Option<String> },
    /// A binding resolved. `replay` carries a press that was examined but
    /// not consumed; it must start the next resolution cycle.
    Done { replay: Option<KeyPress> },
    /// No literal or wildcard edge matches and nothing usable was recorded.
    Failed,
}

#[derive(Debug, Clone)]
struct BestMatch {
    binding: BindingId,
    keys: Vec<KeyPress>,
    capture: Option<KeyPress>,
}

/// Converts a stream of presses into resolutions, one key path at a time.
#[derive(Debug)]
pub struct KeyBuffer {
    state: BufferState,
    counting: bool,
    count: Option<u32>,
    node: NodeId,
    consumed: Vec<KeyPress>,
    capture: Option<KeyPress>,
    best: Option<BestMatch>,
    resolution: Option<Resolution>,
}

impl KeyBuffer {
    /// A buffer with leading-count parsing enabled.
    pub fn new() -> Self {
        Self::with_counts(true)
    }

    /// `counts = false` disables the digit prefix entirely, so digit presses
    /// go straight to matching. Used by contexts that type text, where every
    /// printable character is input.
    pub fn with_counts(counts: bool) -> Self {
        Self {
            state: BufferState::Empty,
            counting: counts,
            count: None,
            node: KeySequenceTrie::ROOT,
            consumed: Vec::new(),
            capture: None,
            best: None,
            resolution: None,
        }
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    /// The accumulated count prefix, if any digits were consumed.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// The presses consumed by the current walk, for echo display.
    pub fn pending_keys(&self) -> &[KeyPress] {
        &self.consumed
    }

    /// Clears all consumed input and returns to `Empty`.
    pub fn reset(&mut self) {
        self.state = BufferState::Empty;
        self.count = None;
        self.node = KeySequenceTrie::ROOT;
        self.consumed.clear();
        self.capture = None;
        self.best = None;
        self.resolution = None;
    }

    /// Feeds one press through count parsing and the trie walk.
    pub(crate) fn feed(&mut self, trie: &KeySequenceTrie, key: KeyPress) -> FeedResult {
        match self.state {
            BufferState::Empty | BufferState::Counting => {
                if self.counting && let Some(digit) = key.digit() {
                    let count = self.count.unwrap_or(0);
                    self.count = Some(count.saturating_mul(10).saturating_add(digit));
                    self.state = BufferState::Counting;
                    return FeedResult::Pending { hint: None };
                }
                self.state = BufferState::Matching;
                self.node = KeySequenceTrie::ROOT;
                self.advance(trie, key)
            }
            BufferState::Matching => self.advance(trie, key),
            // A finished buffer accepts nothing until the dispatcher resets it.
            BufferState::Done | BufferState::Failed => FeedResult::Failed,
        }
    }

    /// Resolves a pending best-so-far match on an explicit "complete now"
    /// signal. Without one, the buffer resets as if the sequence was
    /// abandoned.
    pub(crate) fn flush(&mut self) -> Option<()> {
        if self.state != BufferState::Matching {
            return None;
        }
        match self.best.take() {
            Some(best) => {
                self.finish(best);
                Some(())
            }
            None => {
                trace!("key buffer flushed with no usable match");
                self.reset();
                None
            }
        }
    }

    /// Takes the resolution out of a `Done` buffer.
    pub(crate) fn take_resolution(&mut self) -> Option<Resolution> {
        self.resolution.take()
    }

    fn advance(&mut self, trie: &KeySequenceTrie, key: KeyPress) -> FeedResult {
        match trie.step(self.node, key) {
            Some(step) => {
                self.node = step.node;
                self.consumed.push(key);
                if step.captured {
                    self.capture = Some(key);
                }
                if let Some(binding) = trie.terminal(step.node) {
                    if !trie.has_children(step.node) {
                        let best = self.snapshot(binding);
                        self.finish(best);
                        return FeedResult::Done { replay: None };
                    }
                    // Terminal with continuations: usable, but longer
                    // sequences may still override it.
                    self.best = Some(self.snapshot(binding));
                }
                FeedResult::Pending {
                    hint: trie.hint(step.node).map(String::from),
                }
            }
            None => match self.best.take() {
                Some(best) => {
                    trace!(key = %key, "dead end, resolving to recorded match");
                    self.finish(best);
                    FeedResult::Done { replay: Some(key) }
                }
                None => {
                    self.state = BufferState::Failed;
                    FeedResult::Failed
                }
            },
        }
    }

    fn snapshot(&self, binding: BindingId) -> BestMatch {
        BestMatch {
            binding,
            keys: self.consumed.clone(),
            capture: self.capture,
        }
    }

    fn finish(&mut self, best: BestMatch) {
        self.state = BufferState::Done;
        self.resolution = Some(Resolution {
            binding: best.binding,
            count: self.count.unwrap_or(1),
            keys: KeyPath::from_presses(&best.keys),
            capture: best.capture,
        });
    }
}

impl Default for KeyBuffer {
    fn default() -> Self {
        Self::new()
    }
}
