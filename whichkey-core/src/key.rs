//! Key symbols fed to the command trie.
//!
//! A sequence is a flat list of single symbols: printable characters are
//! case-sensitive, and a handful of named keys cover the rest. Modifier keys
//! exist only so the session can recognize and skip them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single key symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    Char(char),
    Tab,
    Enter,
    Backspace,
    Esc,
    Shift,
    Control,
    Alt,
    Super,
}

/// An ordered path of key symbols from the trie root.
pub type KeySequence = Vec<KeyCode>;

impl KeyCode {
    /// Whether this is a bare modifier press with no printable effect.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Shift | Self::Control | Self::Alt | Self::Super)
    }

    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

/// Helper to create a `KeyCode` from a character.
#[must_use]
pub fn key(ch: char) -> KeyCode {
    KeyCode::Char(ch)
}

/// Render a sequence for display, e.g. `Space f o`.
#[must_use]
pub fn format_sequence(keys: &[KeyCode]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("Space"),
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Tab => f.write_str("Tab"),
            Self::Enter => f.write_str("Enter"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Esc => f.write_str("Esc"),
            Self::Shift => f.write_str("Shift"),
            Self::Control => f.write_str("Ctrl"),
            Self::Alt => f.write_str("Alt"),
            Self::Super => f.write_str("Super"),
        }
    }
}

impl FromStr for KeyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(ch));
        }

        match s.to_ascii_lowercase().as_str() {
            "space" => Ok(Self::Char(' ')),
            "tab" => Ok(Self::Tab),
            "enter" | "ret" => Ok(Self::Enter),
            "backspace" => Ok(Self::Backspace),
            "esc" | "escape" => Ok(Self::Esc),
            "shift" => Ok(Self::Shift),
            "ctrl" | "control" => Ok(Self::Control),
            "alt" => Ok(Self::Alt),
            "super" | "meta" => Ok(Self::Super),
            _ => Err(Error::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for KeyCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        key.to_string()
    }
}
