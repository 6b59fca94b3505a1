//! Notation-to-engine conversion.
//!
//! Bridges the config crate's parsed notation with the engine's
//! crossterm-based key paths. The config crate stays terminal-agnostic; the
//! mapping to `crossterm` codes lives here.

use crossterm::event::{KeyCode, KeyModifiers};
use wren_config::notation::{
    KeyCodeName, ModifierFlags, NotationError, ParsedKey, ParsedSequence, SpecToken,
    parse_sequence,
};
use wren_keymap::{KeyPath, KeyPress, KeyToken};

/// Converts a parsed key from config notation into an engine press.
pub fn key_press(parsed: &ParsedKey) -> KeyPress {
    let code = match parsed.code {
        KeyCodeName::Char(c) => KeyCode::Char(c),
        KeyCodeName::F(n) => KeyCode::F(n),
        KeyCodeName::Esc => KeyCode::Esc,
        KeyCodeName::Enter => KeyCode::Enter,
        KeyCodeName::Space => KeyCode::Char(' '),
        KeyCodeName::Tab => KeyCode::Tab,
        KeyCodeName::BackTab => KeyCode::BackTab,
        KeyCodeName::Backspace => KeyCode::Backspace,
        KeyCodeName::Delete => KeyCode::Delete,
        KeyCodeName::Insert => KeyCode::Insert,
        KeyCodeName::Home => KeyCode::Home,
        KeyCodeName::End => KeyCode::End,
        KeyCodeName::PageUp => KeyCode::PageUp,
        KeyCodeName::PageDown => KeyCode::PageDown,
        KeyCodeName::Up => KeyCode::Up,
        KeyCodeName::Down => KeyCode::Down,
        KeyCodeName::Left => KeyCode::Left,
        KeyCodeName::Right => KeyCode::Right,
    };
    KeyPress::new(code, modifiers(&parsed.modifiers))
}

fn modifiers(flags: &ModifierFlags) -> KeyModifiers {
    let mut modifiers = KeyModifiers::NONE;
    if flags.ctrl {
        modifiers |= KeyModifiers::CONTROL;
    }
    if flags.alt {
        modifiers |= KeyModifiers::ALT;
    }
    if flags.shift {
        modifiers |= KeyModifiers::SHIFT;
    }
    modifiers
}

fn token(spec: &SpecToken) -> KeyToken {
    match spec {
        SpecToken::Key(key) => KeyToken::Literal(key_press(key)),
        SpecToken::Any => KeyToken::Any,
        SpecToken::AnyChar => KeyToken::AnyChar,
    }
}

/// Converts a parsed sequence into an engine key path.
pub fn path(sequence: &ParsedSequence) -> KeyPath {
    KeyPath::new(sequence.tokens.iter().map(token).collect())
}

/// Parses notation straight to a key path plus its background flag.
///
/// # Errors
///
/// Propagates [`NotationError`] from the notation parser.
pub fn parse_path(notation: &str) -> Result<(KeyPath, bool), NotationError> {
    let sequence = parse_sequence(notation)?;
    Ok((path(&sequence), sequence.background))
}
