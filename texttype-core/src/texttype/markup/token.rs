//! Token definitions for texttype markup
//!
//! A token is one unit of parsed markup: a run of literal text, a timed pause,
//! a formatting scope boundary, or a delete region carrying its own nested
//! token sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Formatting scope kinds recognized by the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeTag {
    #[serde(rename = "b")]
    Bold,
    #[serde(rename = "i")]
    Italic,
    /// Muted color. Renders as a styling-only container.
    #[serde(rename = "gray")]
    Gray,
}

impl ScopeTag {
    pub const ALL: [ScopeTag; 3] = [ScopeTag::Bold, ScopeTag::Italic, ScopeTag::Gray];

    /// Tag name as written in markup, without angle brackets.
    pub fn name(self) -> &'static str {
        match self {
            ScopeTag::Bold => "b",
            ScopeTag::Italic => "i",
            ScopeTag::Gray => "gray",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ScopeTag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    pub fn open_tag(self) -> String {
        format!("<{}>", self.name())
    }

    pub fn close_tag(self) -> String {
        format!("</{}>", self.name())
    }
}

impl fmt::Display for ScopeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One unit of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// Literal characters to type.
    Text { value: String },
    /// Timing delay with no visible output.
    Pause { duration_ms: u64 },
    /// Opens a formatting scope.
    ScopeStart { tag: ScopeTag },
    /// Closes the nearest open scope with the same tag.
    ScopeEnd { tag: ScopeTag },
    /// Typed in full, held, then erased.
    Delete { inner: Vec<Token> },
}

impl Token {
    pub fn text(value: impl Into<String>) -> Self {
        Token::Text {
            value: value.into(),
        }
    }

    pub fn pause(duration_ms: u64) -> Self {
        Token::Pause { duration_ms }
    }

    pub fn start(tag: ScopeTag) -> Self {
        Token::ScopeStart { tag }
    }

    pub fn end(tag: ScopeTag) -> Self {
        Token::ScopeEnd { tag }
    }

    pub fn delete(inner: Vec<Token>) -> Self {
        Token::Delete { inner }
    }

    /// Number of characters this token would type, counting nested regions.
    pub fn typed_len(&self) -> usize {
        match self {
            Token::Text { value } => value.chars().count(),
            Token::Delete { inner } => inner.iter().map(Token::typed_len).sum(),
            _ => 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text { value } => write!(f, "Text({:?})", value),
            Token::Pause { duration_ms } => write!(f, "Pause({}ms)", duration_ms),
            Token::ScopeStart { tag } => write!(f, "Start({})", tag),
            Token::ScopeEnd { tag } => write!(f, "End({})", tag),
            Token::Delete { inner } => {
                f.write_str("Delete[")?;
                for (i, token) in inner.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", token)?;
                }
                f.write_str("]")
            }
        }
    }
}
