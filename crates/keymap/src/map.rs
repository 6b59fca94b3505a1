//! Named, mutable binding registries.
//!
//! Responsibilities:
//! - Register bindings and aliases for one UI context.
//! - Merge another keymap's contents with the documented precedence.
//! - Resolve aliases and build the matching trie in a one-shot finalize step.
//!
//! Does NOT handle:
//! - Matching input events (see trie and buffer modules).
//! - Deciding which keymap is active (see registry module).
//!
//! Invariants:
//! - Rebinding a path replaces the previous binding silently; last write wins.
//! - Merged-in entries never override entries the target map registers
//!   itself, regardless of whether those were registered before or after the
//!   merge call.
//! - A direct binding shadows an alias registered for the same path.
//! - The built trie reflects the registrations present at the last
//!   successful `finalize()`; any mutation invalidates it.

use std::collections::HashMap;

use tracing::debug;

use crate::command::Command;
use crate::error::{KeymapError, Result};
use crate::key::KeyPath;
use crate::trie::KeySequenceTrie;

/// One registered key path and the command it invokes.
#[derive(Debug, Clone)]
pub struct Binding {
    pub path: KeyPath,
    pub command: Command,
    /// Guidance text shown while this binding's node is pending.
    pub hint: Option<String>,
    /// Background bindings project their hint onto the prefix nodes leading
    /// to them, so the hint is visible before the sequence completes.
    pub background: bool,
}

/// A mutable registry of bindings and aliases for one UI context.
#[derive(Debug)]
pub struct KeyMap {
    name: String,
    bindings: Vec<Binding>,
    index: HashMap<KeyPath, usize>,
    aliases: Vec<(KeyPath, KeyPath)>,
    alias_index: HashMap<KeyPath, usize>,
    counts: bool,
    trie: Option<KeySequenceTrie>,
}

impl KeyMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
            index: HashMap::new(),
            aliases: Vec::new(),
            alias_index: HashMap::new(),
            counts: true,
            trie: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `command` under every path in `paths`.
    pub fn bind(&mut self, paths: impl IntoIterator<Item = KeyPath>, command: Command) {
        self.bind_full(paths, command, None, false);
    }

    /// Registers `command` with hint text and the background flag.
    ///
    /// Later registrations for an already-bound path silently replace the
    /// prior binding; conflicting registration is not an error.
    pub fn bind_full(
        &mut self,
        paths: impl IntoIterator<Item = KeyPath>,
        command: Command,
        hint: Option<&str>,
        background: bool,
    ) {
        for path in paths {
            let binding = Binding {
                path: path.clone(),
                command: command.clone(),
                hint: hint.map(String::from),
                background,
            };
            match self.index.get(&path) {
                Some(&i) => self.bindings[i] = binding,
                None => {
                    self.index.insert(path, self.bindings.len());
                    self.bindings.push(binding);
                }
            }
        }
        self.trie = None;
    }

    /// Registers each path in `new_paths` as a redirect to whatever `target`
    /// resolves to at finalize time.
    pub fn alias(&mut self, target: KeyPath, new_paths: impl IntoIterator<Item = KeyPath>) {
        for path in new_paths {
            match self.alias_index.get(&path) {
                Some(&i) => self.aliases[i].1 = target.clone(),
                None => {
                    self.alias_index.insert(path.clone(), self.aliases.len());
                    self.aliases.push((path, target.clone()));
                }
            }
        }
        self.trie = None;
    }

    /// Copies `other`'s bindings and aliases into this map.
    ///
    /// Entries this map already has, or registers later, take precedence over
    /// everything merged in.
    pub fn merge(&mut self, other: &KeyMap) {
        for binding in &other.bindings {
            if self.index.contains_key(&binding.path) || self.alias_index.contains_key(&binding.path)
            {
                continue;
            }
            self.index.insert(binding.path.clone(), self.bindings.len());
            self.bindings.push(binding.clone());
        }
        for (path, target) in &other.aliases {
            if self.index.contains_key(path) || self.alias_index.contains_key(path) {
                continue;
            }
            self.alias_index.insert(path.clone(), self.aliases.len());
            self.aliases.push((path.clone(), target.clone()));
        }
        self.trie = None;
    }

    /// Disables or re-enables leading-count parsing for this context.
    pub fn set_count_parsing(&mut self, enabled: bool) {
        self.counts = enabled;
    }

    pub fn count_parsing(&self) -> bool {
        self.counts
    }

    /// Resolves every alias and (re)builds the matching trie.
    ///
    /// Calling again after further mutation rebuilds from scratch; calling
    /// without prior mutation is a no-op rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::AliasCycle`] or [`KeymapError::UnresolvedAlias`]
    /// for bad alias chains, and propagates trie build errors
    /// ([`KeymapError::WildcardCollision`], [`KeymapError::EmptyPath`]).
    pub fn finalize(&mut self) -> Result<()> {
        let mut resolved = self.bindings.clone();
        for (path, target) in &self.aliases {
            if self.index.contains_key(path) {
                continue;
            }
            let source = self.resolve_alias(path, target)?;
            resolved.push(Binding {
                path: path.clone(),
                ..source
            });
        }
        let trie = KeySequenceTrie::build(resolved)?;
        debug!(
            keymap = %self.name,
            bindings = self.bindings.len(),
            aliases = self.aliases.len(),
            "finalized keymap"
        );
        self.trie = Some(trie);
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.trie.is_some()
    }

    /// Registered bindings in registration order, for help/docs rendering.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub(crate) fn trie(&self) -> Option<&KeySequenceTrie> {
        self.trie.as_ref()
    }

    fn resolve_alias(&self, origin: &KeyPath, target: &KeyPath) -> Result<Binding> {
        let mut seen = vec![origin];
        let mut current = target;
        loop {
            if seen.contains(&current) {
                return Err(KeymapError::AliasCycle {
                    path: origin.to_string(),
                });
            }
            if let Some(&i) = self.index.get(current) {
                return Ok(self.bindings[i].clone());
            }
            seen.push(current);
            match self.alias_index.get(current) {
                Some(&i) => current = &self.aliases[i].1,
                None => {
                    return Err(KeymapError::UnresolvedAlias {
                        path: origin.to_string(),
                        target: current.to_string(),
                    });
                }
            }
        }
    }
}
