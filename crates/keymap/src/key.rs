//! Key press, token and path types.
//!
//! Responsibilities:
//! - Define the vocabulary a binding is made of: literal presses, wildcards,
//!   and ordered sequences of both.
//! - Normalize crossterm events into hashable `KeyPress` values.
//!
//! Does NOT handle:
//! - Parsing human-readable key notation (see wren-config).
//! - Matching presses against registered sequences (see trie module).
//!
//! Invariants:
//! - Two `KeyPath`s are equal iff their token sequences are equal.
//! - `KeyPress` values built from events never carry SHIFT for character
//!   keys; the case of the character itself encodes shift.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One literal key chord: a key code plus modifiers.
///
/// This is the unit the trie matches on. Unlike `crossterm::event::KeyEvent`
/// it ignores the event kind and state, so press/repeat events with the same
/// chord compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }.normalized()
    }

    /// A bare printable character with no modifiers.
    pub fn char(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A Ctrl+character chord.
    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// A named key (arrow, function key, ...) with no modifiers.
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Returns true for an unmodified printable character.
    ///
    /// This is the class the `AnyChar` wildcard accepts: console-style
    /// "type this key" input.
    pub fn is_printable(&self) -> bool {
        matches!(self.code, KeyCode::Char(c) if !c.is_control()) && self.modifiers.is_empty()
    }

    /// Returns the digit value if this press is an unmodified '0'..='9'.
    pub fn digit(&self) -> Option<u32> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.is_empty() => c.to_digit(10),
            _ => None,
        }
    }

    // Terminals report shifted characters both through the character case and
    // the SHIFT flag. Folding the flag away for Char codes keeps 'G' bindings
    // matching however the terminal chose to report them.
    fn normalized(mut self) -> Self {
        if matches!(self.code, KeyCode::Char(_)) {
            self.modifiers.remove(KeyModifiers::SHIFT);
        }
        self
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) if self.modifiers.is_empty() => return write!(f, "{}", c),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("f{}", n),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Enter => "cr".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "backtab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Insert => "insert".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pageup".to_string(),
            KeyCode::PageDown => "pagedown".to_string(),
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            other => format!("{:?}", other).to_ascii_lowercase(),
        };

        write!(f, "<")?;
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "c-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "a-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "s-")?;
        }
        write!(f, "{}>", name)
    }
}

/// One element of a key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// Matches exactly this press.
    Literal(KeyPress),
    /// Matches any single press and captures it.
    Any,
    /// Matches any single unmodified printable character and captures it.
    AnyChar,
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(press) => write!(f, "{}", press),
            Self::Any => write!(f, "<any>"),
            Self::AnyChar => write!(f, "<char>"),
        }
    }
}

/// An ordered sequence of key tokens identifying one binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<KeyToken>);

impl KeyPath {
    pub fn new(tokens: Vec<KeyToken>) -> Self {
        Self(tokens)
    }

    /// A path of bare character literals, one token per char.
    ///
    /// Convenient for chord paths like `"gg"` or `"ZZ"`.
    pub fn chars(s: &str) -> Self {
        Self(s.chars().map(|c| KeyToken::Literal(KeyPress::char(c))).collect())
    }

    /// A single-token path.
    pub fn single(token: KeyToken) -> Self {
        Self(vec![token])
    }

    /// The literal sequence actually pressed, as a path.
    pub fn from_presses(presses: &[KeyPress]) -> Self {
        Self(presses.iter().copied().map(KeyToken::Literal).collect())
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
