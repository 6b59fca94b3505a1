//! The key-sequence trie.
//!
//! Responsibilities:
//! - Build an immutable matching structure from a keymap's resolved bindings.
//! - Answer single-step queries: from this node, does this press descend, and
//!   where to.
//!
//! Does NOT handle:
//! - Count prefixes, best-so-far tracking, or replay (see buffer module).
//! - Alias resolution (resolved before the trie is built).
//!
//! Invariants:
//! - Literal edges take precedence over the wildcard edge at every node.
//! - At most one wildcard child per node; mixing wildcard kinds at one node
//!   is a build error.
//! - Nodes and edges never change after `build()` returns.

use std::collections::HashMap;

use crate::error::{KeymapError, Result};
use crate::key::{KeyPath, KeyPress, KeyToken};
use crate::map::Binding;

/// Index of a node within the trie's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// Index of a resolved binding within the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BindingId(usize);

/// The wildcard classes a node's single wildcard slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WildcardKind {
    Any,
    AnyChar,
}

impl WildcardKind {
    fn accepts(self, key: KeyPress) -> bool {
        match self {
            Self::Any => true,
            Self::AnyChar => key.is_printable(),
        }
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    literal: HashMap<KeyPress, usize>,
    wildcard: Option<(WildcardKind, usize)>,
    terminal: Option<usize>,
    hint: Option<String>,
}

impl TrieNode {
    fn has_children(&self) -> bool {
        !self.literal.is_empty() || self.wildcard.is_some()
    }
}

/// Result of descending one edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step {
    pub(crate) node: NodeId,
    /// True when the edge taken was a wildcard, i.e. the press was captured.
    pub(crate) captured: bool,
}

/// Deterministic matcher built once per `finalize()`.
#[derive(Debug)]
pub struct KeySequenceTrie {
    nodes: Vec<TrieNode>,
    bindings: Vec<Binding>,
}

impl KeySequenceTrie {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Builds the trie from a keymap's resolved bindings.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::EmptyPath`] for a binding with no tokens and
    /// [`KeymapError::WildcardCollision`] when two bindings require different
    /// wildcard kinds at the same node.
    pub(crate) fn build(bindings: Vec<Binding>) -> Result<Self> {
        let mut nodes: Vec<TrieNode> = vec![TrieNode::default()];

        for (id, binding) in bindings.iter().enumerate() {
            if binding.path.is_empty() {
                return Err(KeymapError::EmptyPath {
                    command: binding.command.name().to_string(),
                });
            }
            let mut node = 0;
            for (depth, token) in binding.path.tokens().iter().enumerate() {
                node = match token {
                    KeyToken::Literal(press) => match nodes[node].literal.get(press) {
                        Some(&child) => child,
                        None => {
                            let child = push_node(&mut nodes);
                            nodes[node].literal.insert(*press, child);
                            child
                        }
                    },
                    KeyToken::Any | KeyToken::AnyChar => {
                        let kind = if matches!(token, KeyToken::Any) {
                            WildcardKind::Any
                        } else {
                            WildcardKind::AnyChar
                        };
                        match nodes[node].wildcard {
                            Some((existing, child)) if existing == kind => child,
                            Some(_) => {
                                return Err(KeymapError::WildcardCollision {
                                    prefix: prefix_of(&binding.path, depth),
                                });
                            }
                            None => {
                                let child = push_node(&mut nodes);
                                nodes[node].wildcard = Some((kind, child));
                                child
                            }
                        }
                    }
                };
            }
            nodes[node].terminal = Some(id);
        }

        attach_hints(&mut nodes, &bindings);

        Ok(Self { nodes, bindings })
    }

    /// Single matching step: descend from `from` along `key`.
    ///
    /// Literal edges win over the wildcard edge; returns `None` when neither
    /// matches.
    pub(crate) fn step(&self, from: NodeId, key: KeyPress) -> Option<Step> {
        let node = &self.nodes[from.0];
        if let Some(&child) = node.literal.get(&key) {
            return Some(Step {
                node: NodeId(child),
                captured: false,
            });
        }
        if let Some((kind, child)) = node.wildcard
            && kind.accepts(key)
        {
            return Some(Step {
                node: NodeId(child),
                captured: true,
            });
        }
        None
    }

    pub(crate) fn terminal(&self, node: NodeId) -> Option<BindingId> {
        self.nodes[node.0].terminal.map(BindingId)
    }

    pub(crate) fn has_children(&self, node: NodeId) -> bool {
        self.nodes[node.0].has_children()
    }

    pub(crate) fn hint(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].hint.as_deref()
    }

    pub(crate) fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0]
    }
}

fn push_node(nodes: &mut Vec<TrieNode>) -> usize {
    nodes.push(TrieNode::default());
    nodes.len() - 1
}

fn prefix_of(path: &KeyPath, depth: usize) -> String {
    KeyPath::new(path.tokens()[..=depth].to_vec()).to_string()
}

/// Re-walks an already-inserted path and returns the node after each token.
fn node_chain(nodes: &[TrieNode], path: &KeyPath) -> Vec<usize> {
    let mut chain = Vec::with_capacity(path.len());
    let mut node = 0;
    for token in path.tokens() {
        node = match token {
            KeyToken::Literal(press) => nodes[node].literal[press],
            KeyToken::Any | KeyToken::AnyChar => nodes[node].wildcard.map(|(_, c)| c).unwrap_or(0),
        };
        chain.push(node);
    }
    chain
}

/// Attaches hint text to nodes.
///
/// A hint whose binding path ends exactly at a node always wins there.
/// Background bindings additionally project their hint onto ancestor nodes
/// that have no hint of their own; when several background bindings reach
/// the same ancestor, the nearest (most specific) one wins.
fn attach_hints(nodes: &mut Vec<TrieNode>, bindings: &[Binding]) {
    // distance 0 marks an exact hint, larger values a propagated one
    let mut distance: HashMap<usize, usize> = HashMap::new();

    for binding in bindings {
        let Some(hint) = &binding.hint else { continue };
        let chain = node_chain(nodes, &binding.path);
        let Some(&last) = chain.last() else { continue };
        nodes[last].hint = Some(hint.clone());
        distance.insert(last, 0);
    }

    for binding in bindings {
        if !binding.background {
            continue;
        }
        let Some(hint) = &binding.hint else { continue };
        let chain = node_chain(nodes, &binding.path);
        let len = chain.len();
        for (consumed, &node) in chain.iter().enumerate().take(len.saturating_sub(1)) {
            let dist = len - consumed - 1;
            let closer = distance.get(&node).is_none_or(|&d| dist < d);
            if closer {
                nodes[node].hint = Some(hint.clone());
                distance.insert(node, dist);
            }
        }
    }
}
