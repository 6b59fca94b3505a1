//! Configuration types for wren key bindings.
//!
//! This crate parses the human-readable key notation used by binding tables
//! and user overrides, and defines the persisted override types. It is
//! deliberately terminal-agnostic: conversion to runtime key events lives in
//! the input crate.

pub mod notation;
pub mod overrides;

pub use notation::{
    KeyCodeName, ModifierFlags, NotationError, ParsedKey, ParsedSequence, SpecToken,
    parse_sequence, validate_overrides,
};
pub use overrides::{KeymapOverrides, OverrideAction};
