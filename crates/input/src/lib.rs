//! Input layer for the wren file manager.
//!
//! This crate owns the default binding tables for every UI context, the
//! file-manager command catalog they refer to, and the bridge between the
//! human-readable notation in configuration and the key-sequence engine.
//!
//! # Example
//!
//! ```rust
//! use wren_config::KeymapOverrides;
//! use wren_input::build_registry;
//!
//! let registry = build_registry(&KeymapOverrides::default()).unwrap();
//! ```

pub mod commands;
pub mod keymap;

pub use keymap::{build_registry, command_for};
