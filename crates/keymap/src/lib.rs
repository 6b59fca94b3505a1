//! Key-sequence resolution engine for the wren file manager.
//!
//! This crate turns a stream of terminal key events into exactly one command
//! invocation per resolved sequence. It understands multi-key chords
//! (`gg`, `yy`, `ZZ`), numeric count prefixes (`23j`), single-event
//! wildcards (bookmark letters, console typing) and registration-time
//! aliases, and reports hint text while a sequence is still open.
//!
//! What any bound command *does* is out of scope: commands are opaque tagged
//! descriptors handed to an [`ActionHandler`] owned by the surrounding
//! application.
//!
//! # Example
//!
//! ```rust
//! use wren_keymap::{Command, ContextId, ContextRegistry, KeyMap, KeyPath};
//!
//! let mut map = KeyMap::new("browser");
//! map.bind([KeyPath::chars("gg")], Command::new("move").with("absolute", 0));
//! map.alias(KeyPath::chars("gg"), [KeyPath::chars("K")]);
//! map.finalize().unwrap();
//!
//! let mut registry = ContextRegistry::new();
//! registry.install(ContextId::Browser, map).unwrap();
//! ```

pub mod buffer;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod key;
pub mod map;
pub mod registry;
mod trie;

pub use buffer::{BufferState, KeyBuffer};
pub use command::Command;
pub use dispatch::{ActionHandler, CommandArgument};
pub use error::KeymapError;
pub use key::{KeyPath, KeyPress, KeyToken};
pub use map::{Binding, KeyMap};
pub use registry::{ContextId, ContextRegistry, FeedOutcome, WidgetId};
pub use trie::KeySequenceTrie;
