//! Error types for keymap construction and installation.

use thiserror::Error;

/// Result type alias for keymap operations.
pub type Result<T> = std::result::Result<T, KeymapError>;

/// Errors reported when a keymap is finalized or installed.
///
/// Registration itself never fails: rebinding a path silently replaces the
/// previous binding. Inconsistencies surface through the `finalize()` caller
/// so the engine never starts serving from an inconsistent trie.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// An alias chain ends at a path with no binding.
    #[error("alias '{path}' targets '{target}', which has no binding")]
    UnresolvedAlias {
        /// The aliased path that cannot be resolved.
        path: String,
        /// The end of the chain that has no binding.
        target: String,
    },

    /// An alias chain loops back onto itself.
    #[error("alias chain starting at '{path}' is cyclic")]
    AliasCycle {
        /// The path whose chain never terminates.
        path: String,
    },

    /// Two different wildcard kinds registered at the same trie position.
    #[error("conflicting wildcard kinds after '{prefix}'")]
    WildcardCollision {
        /// The sequence prefix leading to the conflicting node.
        prefix: String,
    },

    /// A binding was registered with an empty key path.
    #[error("empty key path bound to command '{command}'")]
    EmptyPath {
        /// Name of the command the empty path was bound to.
        command: String,
    },

    /// A keymap was installed without a prior successful finalize().
    #[error("keymap '{name}' was installed before finalize()")]
    NotFinalized {
        /// Name of the offending keymap.
        name: String,
    },

    /// An event was fed to a context no keymap is installed for.
    #[error("no keymap installed for context '{context}'")]
    UnknownContext {
        /// The context the event was routed to.
        context: String,
    },
}
