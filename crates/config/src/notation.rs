//! Key notation parsing and validation.
//!
//! Responsibilities:
//! - Parse human-readable key sequences into structured representations.
//! - Validate user override tables for reserved sequences and conflicts.
//!
//! Does NOT handle:
//! - Conversion to crossterm events (that's in the input crate).
//! - Runtime key event matching.
//!
//! Invariants:
//! - Bare characters are consecutive tokens: `"gg"` is two presses.
//! - Angle-bracket groups name one special key, wildcard or marker:
//!   `<C-r>`, `<up>`, `<any>`, `<char>`, `<bg>`.
//! - `<bg>` marks a background binding and may only close a sequence.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

use crate::overrides::OverrideAction;

/// Errors that can occur when parsing or validating key notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Invalid sequence syntax
    #[error("invalid key syntax: '{sequence}'. Expected notation like 'gg', '<C-r>' or 'm<any>'")]
    InvalidSyntax {
        /// The invalid sequence string
        sequence: String,
    },

    /// Unknown key name inside an angle-bracket group
    #[error("unknown key name: '{name}'")]
    UnknownKey {
        /// The unknown key name
        name: String,
    },

    /// A sequence with no key tokens
    #[error("empty key sequence")]
    EmptySequence,

    /// `<bg>` somewhere other than the end of the sequence
    #[error("'<bg>' must close the sequence: '{sequence}'")]
    MisplacedBackground {
        /// The offending sequence
        sequence: String,
    },

    /// Conflicting override sequences
    #[error("conflicting overrides: '{sequence}' is assigned to both {action1} and {action2}")]
    Conflict {
        /// The conflicting sequence
        sequence: String,
        /// First action using this sequence
        action1: String,
        /// Second action using this sequence
        action2: String,
    },

    /// Reserved sequence
    #[error("reserved sequence: '{sequence}' cannot be overridden")]
    Reserved {
        /// The reserved sequence
        sequence: String,
    },
}

/// Key code names that can be parsed from notation strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCodeName {
    /// A character key (e.g. 'a', '1', '?')
    Char(char),
    /// Function key F1-F20
    F(u8),
    /// Escape key
    Esc,
    /// Enter/Return key
    Enter,
    /// Space key
    Space,
    /// Tab key
    Tab,
    /// BackTab (Shift+Tab) key
    BackTab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Insert key
    Insert,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
}

impl KeyCodeName {
    fn notation_name(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::F(n) => format!("f{}", n),
            Self::Esc => "esc".to_string(),
            Self::Enter => "cr".to_string(),
            Self::Space => "space".to_string(),
            Self::Tab => "tab".to_string(),
            Self::BackTab => "backtab".to_string(),
            Self::Backspace => "backspace".to_string(),
            Self::Delete => "delete".to_string(),
            Self::Insert => "insert".to_string(),
            Self::Home => "home".to_string(),
            Self::End => "end".to_string(),
            Self::PageUp => "pageup".to_string(),
            Self::PageDown => "pagedown".to_string(),
            Self::Up => "up".to_string(),
            Self::Down => "down".to_string(),
            Self::Left => "left".to_string(),
            Self::Right => "right".to_string(),
        }
    }
}

/// Modifier flags for key combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierFlags {
    /// Control key pressed
    pub ctrl: bool,
    /// Alt/Meta key pressed
    pub alt: bool,
    /// Shift key pressed
    pub shift: bool,
}

impl ModifierFlags {
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}

/// A parsed key combination: one press of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedKey {
    /// The key code name
    pub code: KeyCodeName,
    /// Modifier flags
    pub modifiers: ModifierFlags,
}

impl fmt::Display for ParsedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let KeyCodeName::Char(c) = self.code
            && !self.modifiers.any()
            && c != ' '
        {
            return write!(f, "{}", c);
        }
        write!(f, "<")?;
        if self.modifiers.ctrl {
            write!(f, "c-")?;
        }
        if self.modifiers.alt {
            write!(f, "a-")?;
        }
        if self.modifiers.shift {
            write!(f, "s-")?;
        }
        write!(f, "{}>", self.code.notation_name())
    }
}

/// One element of a parsed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecToken {
    /// A literal key combination
    Key(ParsedKey),
    /// `<any>`: matches any single press and captures it
    Any,
    /// `<char>`: matches any unmodified printable character
    AnyChar,
}

impl fmt::Display for SpecToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{}", key),
            Self::Any => write!(f, "<any>"),
            Self::AnyChar => write!(f, "<char>"),
        }
    }
}

/// A fully parsed key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSequence {
    /// The sequence tokens, in press order.
    pub tokens: Vec<SpecToken>,
    /// True when the sequence closed with `<bg>`.
    pub background: bool,
}

impl fmt::Display for ParsedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        if self.background {
            write!(f, "<bg>")?;
        }
        Ok(())
    }
}

enum Group {
    Token(SpecToken),
    Background,
}

/// Parse a sequence string like `"gg"`, `"<C-r>"` or `"m<any>"`.
///
/// # Examples
///
/// ```
/// use wren_config::notation::{SpecToken, parse_sequence};
///
/// let seq = parse_sequence("gg").unwrap();
/// assert_eq!(seq.tokens.len(), 2);
///
/// let seq = parse_sequence("p<bg>").unwrap();
/// assert!(seq.background);
///
/// let seq = parse_sequence("m<any>").unwrap();
/// assert_eq!(seq.tokens[1], SpecToken::Any);
/// ```
pub fn parse_sequence(input: &str) -> Result<ParsedSequence, NotationError> {
    let mut tokens = Vec::new();
    let mut background = false;
    let mut pos = 0;

    while let Some(c) = input[pos..].chars().next() {
        if background {
            // Anything after <bg> cannot be part of the sequence.
            return Err(NotationError::MisplacedBackground {
                sequence: input.to_string(),
            });
        }
        if c != '<' {
            tokens.push(SpecToken::Key(ParsedKey {
                code: KeyCodeName::Char(c),
                modifiers: ModifierFlags::default(),
            }));
            pos += c.len_utf8();
            continue;
        }
        let rest = &input[pos + 1..];
        let Some(end) = rest.find('>') else {
            return Err(NotationError::InvalidSyntax {
                sequence: input.to_string(),
            });
        };
        match parse_group(&rest[..end], input)? {
            Group::Token(token) => tokens.push(token),
            Group::Background => background = true,
        }
        // Past the opening '<', the group body and the closing '>'.
        pos += end + 2;
    }

    if tokens.is_empty() {
        return Err(NotationError::EmptySequence);
    }
    Ok(ParsedSequence { tokens, background })
}

fn parse_group(body: &str, whole: &str) -> Result<Group, NotationError> {
    if body.is_empty() {
        return Err(NotationError::InvalidSyntax {
            sequence: whole.to_string(),
        });
    }

    let mut modifiers = ModifierFlags::default();
    let mut name = body;
    loop {
        let lower = name.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("c-") {
            modifiers.ctrl = true;
            name = &name[name.len() - rest.len()..];
        } else if let Some(rest) = lower.strip_prefix("a-").or_else(|| lower.strip_prefix("m-")) {
            modifiers.alt = true;
            name = &name[name.len() - rest.len()..];
        } else if let Some(rest) = lower.strip_prefix("s-") {
            modifiers.shift = true;
            name = &name[name.len() - rest.len()..];
        } else {
            break;
        }
    }
    if name.is_empty() {
        return Err(NotationError::InvalidSyntax {
            sequence: whole.to_string(),
        });
    }

    match name.to_ascii_lowercase().as_str() {
        "any" | "char" | "bg" if modifiers.any() => {
            return Err(NotationError::InvalidSyntax {
                sequence: whole.to_string(),
            });
        }
        "any" => return Ok(Group::Token(SpecToken::Any)),
        "char" => return Ok(Group::Token(SpecToken::AnyChar)),
        "bg" => return Ok(Group::Background),
        _ => {}
    }

    let code = parse_key_name(name)?;

    // Shift folds into the character itself; <S-tab> means BackTab.
    let (code, modifiers) = match code {
        KeyCodeName::Char(c) if modifiers.shift => (
            KeyCodeName::Char(c.to_ascii_uppercase()),
            ModifierFlags {
                shift: false,
                ..modifiers
            },
        ),
        KeyCodeName::Tab if modifiers.shift => (
            KeyCodeName::BackTab,
            ModifierFlags {
                shift: false,
                ..modifiers
            },
        ),
        code => (code, modifiers),
    };

    Ok(Group::Token(SpecToken::Key(ParsedKey { code, modifiers })))
}

/// Parse a key name (without modifiers) from inside an angle-bracket group.
fn parse_key_name(name: &str) -> Result<KeyCodeName, NotationError> {
    let lower = name.to_ascii_lowercase();

    match lower.as_str() {
        "esc" | "escape" => return Ok(KeyCodeName::Esc),
        "enter" | "return" | "cr" => return Ok(KeyCodeName::Enter),
        "space" => return Ok(KeyCodeName::Space),
        "tab" => return Ok(KeyCodeName::Tab),
        "backtab" => return Ok(KeyCodeName::BackTab),
        "backspace" | "bs" => return Ok(KeyCodeName::Backspace),
        "delete" | "del" => return Ok(KeyCodeName::Delete),
        "insert" | "ins" => return Ok(KeyCodeName::Insert),
        "home" => return Ok(KeyCodeName::Home),
        "end" => return Ok(KeyCodeName::End),
        "pageup" | "pgup" => return Ok(KeyCodeName::PageUp),
        "pagedown" | "pgdn" => return Ok(KeyCodeName::PageDown),
        "up" => return Ok(KeyCodeName::Up),
        "down" => return Ok(KeyCodeName::Down),
        "left" => return Ok(KeyCodeName::Left),
        "right" => return Ok(KeyCodeName::Right),
        _ => {}
    }

    if let Some(num) = lower.strip_prefix('f')
        && let Ok(num) = num.parse::<u8>()
        && (1..=20).contains(&num)
    {
        return Ok(KeyCodeName::F(num));
    }

    let chars: Vec<char> = name.chars().collect();
    if chars.len() == 1 {
        return Ok(KeyCodeName::Char(chars[0]));
    }

    Err(NotationError::UnknownKey {
        name: name.to_string(),
    })
}

/// Sequences that must not be remapped by user overrides.
pub const RESERVED_SEQUENCES: &[&str] = &["<C-c>", "<C-z>"];

/// Validate a user override table for reserved sequences and conflicts.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use wren_config::notation::validate_overrides;
/// use wren_config::overrides::OverrideAction;
///
/// let mut overrides = BTreeMap::new();
/// overrides.insert(OverrideAction::Quit, "ZZ".to_string());
/// overrides.insert(OverrideAction::Help, "<f1>".to_string());
///
/// assert!(validate_overrides(&overrides).is_ok());
/// ```
pub fn validate_overrides(
    overrides: &BTreeMap<OverrideAction, String>,
) -> Result<(), NotationError> {
    let mut seen: HashMap<String, OverrideAction> = HashMap::new();

    for (action, sequence) in overrides {
        let normalized = parse_sequence(sequence)?.to_string();

        for reserved in RESERVED_SEQUENCES {
            let reserved_normalized = parse_sequence(reserved)
                .map(|s| s.to_string())
                .unwrap_or_default();
            if normalized.eq_ignore_ascii_case(&reserved_normalized) {
                return Err(NotationError::Reserved {
                    sequence: sequence.clone(),
                });
            }
        }

        if let Some(existing) = seen.get(&normalized) {
            return Err(NotationError::Conflict {
                sequence: sequence.clone(),
                action1: existing.to_string(),
                action2: action.to_string(),
            });
        }
        seen.insert(normalized, *action);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seq: &str, i: usize) -> ParsedKey {
        match parse_sequence(seq).unwrap().tokens[i] {
            SpecToken::Key(key) => key,
            other => panic!("expected a key token, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_chars() {
        let seq = parse_sequence("gg").unwrap();
        assert_eq!(seq.tokens.len(), 2);
        assert_eq!(key("gg", 0).code, KeyCodeName::Char('g'));
        assert_eq!(key("gg", 1).code, KeyCodeName::Char('g'));
        assert!(!seq.background);
    }

    #[test]
    fn test_parse_case_sensitive_chars() {
        assert_eq!(key("ZZ", 0).code, KeyCodeName::Char('Z'));
        assert_ne!(key("z", 0).code, key("Z", 0).code);
    }

    #[test]
    fn test_parse_ctrl_combo() {
        let k = key("<C-r>", 0);
        assert_eq!(k.code, KeyCodeName::Char('r'));
        assert!(k.modifiers.ctrl);
        assert!(!k.modifiers.alt);
    }

    #[test]
    fn test_parse_modifiers_case_insensitive() {
        assert_eq!(key("<c-r>", 0), key("<C-r>", 0));
        assert_eq!(key("<a-x>", 0), key("<M-x>", 0));
    }

    #[test]
    fn test_parse_all_modifiers() {
        let k = key("<C-A-up>", 0);
        assert!(k.modifiers.ctrl);
        assert!(k.modifiers.alt);
        assert_eq!(k.code, KeyCodeName::Up);
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(key("<up>", 0).code, KeyCodeName::Up);
        assert_eq!(key("<cr>", 0).code, KeyCodeName::Enter);
        assert_eq!(key("<enter>", 0).code, KeyCodeName::Enter);
        assert_eq!(key("<esc>", 0).code, KeyCodeName::Esc);
        assert_eq!(key("<space>", 0).code, KeyCodeName::Space);
        assert_eq!(key("<pgdn>", 0).code, KeyCodeName::PageDown);
        assert_eq!(key("<pagedown>", 0).code, KeyCodeName::PageDown);
        assert_eq!(key("<del>", 0).code, KeyCodeName::Delete);
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(key("<f1>", 0).code, KeyCodeName::F(1));
        assert_eq!(key("<F12>", 0).code, KeyCodeName::F(12));
        assert!(matches!(
            parse_sequence("<f0>"),
            Err(NotationError::UnknownKey { .. })
        ));
        assert!(matches!(
            parse_sequence("<f21>"),
            Err(NotationError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_shift_folds_into_char_case() {
        let k = key("<S-g>", 0);
        assert_eq!(k.code, KeyCodeName::Char('G'));
        assert!(!k.modifiers.shift);
    }

    #[test]
    fn test_shift_tab_is_backtab() {
        let k = key("<S-tab>", 0);
        assert_eq!(k.code, KeyCodeName::BackTab);
        assert!(!k.modifiers.shift);
    }

    #[test]
    fn test_parse_wildcards() {
        let seq = parse_sequence("m<any>").unwrap();
        assert_eq!(seq.tokens[1], SpecToken::Any);
        let seq = parse_sequence("<char>").unwrap();
        assert_eq!(seq.tokens[0], SpecToken::AnyChar);
    }

    #[test]
    fn test_modified_wildcard_is_invalid() {
        assert!(matches!(
            parse_sequence("<C-any>"),
            Err(NotationError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_background_marker() {
        let seq = parse_sequence("p<bg>").unwrap();
        assert!(seq.background);
        assert_eq!(seq.tokens.len(), 1);
    }

    #[test]
    fn test_background_must_close_the_sequence() {
        assert!(matches!(
            parse_sequence("p<bg>p"),
            Err(NotationError::MisplacedBackground { .. })
        ));
    }

    #[test]
    fn test_bare_background_is_empty() {
        assert_eq!(parse_sequence("<bg>"), Err(NotationError::EmptySequence));
    }

    #[test]
    fn test_empty_and_malformed_sequences() {
        assert_eq!(parse_sequence(""), Err(NotationError::EmptySequence));
        assert!(matches!(
            parse_sequence("<C-r"),
            Err(NotationError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_sequence("<>"),
            Err(NotationError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_sequence("<C->"),
            Err(NotationError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_unknown_key_name() {
        assert_eq!(
            parse_sequence("<C-unknown>"),
            Err(NotationError::UnknownKey {
                name: "unknown".to_string()
            })
        );
    }

    #[test]
    fn test_mixed_sequence() {
        let seq = parse_sequence("g<C-x><up>").unwrap();
        assert_eq!(seq.tokens.len(), 3);
        assert_eq!(key("g<C-x><up>", 2).code, KeyCodeName::Up);
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["gg", "<c-r>", "m<any>", "p<bg>", "ZZ", "<up><up>", "<space>"] {
            let parsed = parse_sequence(input).unwrap();
            assert_eq!(parse_sequence(&parsed.to_string()).unwrap(), parsed);
        }
    }

    #[test]
    fn test_validate_conflicts() {
        let mut overrides = BTreeMap::new();
        overrides.insert(OverrideAction::Quit, "ZZ".to_string());
        overrides.insert(OverrideAction::Help, "ZZ".to_string());

        assert!(matches!(
            validate_overrides(&overrides),
            Err(NotationError::Conflict { .. })
        ));
    }

    #[test]
    fn test_validate_detects_equivalent_spellings() {
        let mut overrides = BTreeMap::new();
        overrides.insert(OverrideAction::Quit, "<C-r>".to_string());
        overrides.insert(OverrideAction::Help, "<c-r>".to_string());

        assert!(matches!(
            validate_overrides(&overrides),
            Err(NotationError::Conflict { .. })
        ));
    }

    #[test]
    fn test_validate_reserved_sequence() {
        let mut overrides = BTreeMap::new();
        overrides.insert(OverrideAction::Quit, "<c-c>".to_string());

        assert!(matches!(
            validate_overrides(&overrides),
            Err(NotationError::Reserved { .. })
        ));
    }

    #[test]
    fn test_validate_invalid_syntax() {
        let mut overrides = BTreeMap::new();
        overrides.insert(OverrideAction::Quit, "<broken".to_string());

        assert!(matches!(
            validate_overrides(&overrides),
            Err(NotationError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_distinct_sequences() {
        let mut overrides = BTreeMap::new();
        overrides.insert(OverrideAction::Quit, "ZZ".to_string());
        overrides.insert(OverrideAction::Help, "<f1>".to_string());
        overrides.insert(OverrideAction::OpenConsole, ";".to_string());

        assert!(validate_overrides(&overrides).is_ok());
    }
}
