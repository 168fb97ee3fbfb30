//! Markup tokenizer
//!
//! A single left-to-right scan with a byte cursor. At each step the earliest
//! marker at or after the cursor is located, everything before it becomes a
//! `Text` token, and the marker is handled by kind:
//!
//!     <delete> ... </delete>   nested region, inner part tokenized recursively
//!     <pause ... duration=N>   pause, attributes in any order, any quoting
//!     <b> </b> <i> </i>        bold / italic scope boundaries
//!     <gray> </gray>           muted color scope boundaries
//!
//! Marker discovery is a logos lexer over the remaining input: every marker
//! tag is a token, everything else is filler. Because the markers are distinct
//! literals no two of them can start at the same index.
//!
//! The scan never fails. An unmatched `<delete>` becomes literal text, a
//! `<pause` that doesn't carry an integer `duration` attribute degrades to a
//! literal `<` and scanning resumes one byte later.

use super::token::{ScopeTag, Token};
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

pub const DELETE_OPEN: &str = "<delete>";
pub const DELETE_CLOSE: &str = "</delete>";

/// `<pause` followed by anything up to `>` that includes `duration = N`.
static PAUSE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^<pause(?-u:\b)[^>]*(?-u:\b)duration\s*=\s*["']?([0-9]+)["']?[^>]*/?>"#)
        .expect("pause tag pattern is valid")
});

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    #[token("<delete>")]
    Delete,
    #[token("<pause")]
    Pause,
    #[token("<b>")]
    BoldOpen,
    #[token("</b>")]
    BoldClose,
    #[token("<i>")]
    ItalicOpen,
    #[token("</i>")]
    ItalicClose,
    #[token("<gray>")]
    GrayOpen,
    #[token("</gray>")]
    GrayClose,

    // Anything that doesn't start a marker, including a lone `<`
    #[regex(r"[^<]+")]
    #[token("<")]
    Filler,
}

impl Marker {
    /// Scope boundary emitted by simple tag markers.
    fn boundary(self) -> Option<Token> {
        match self {
            Marker::BoldOpen => Some(Token::start(ScopeTag::Bold)),
            Marker::BoldClose => Some(Token::end(ScopeTag::Bold)),
            Marker::ItalicOpen => Some(Token::start(ScopeTag::Italic)),
            Marker::ItalicClose => Some(Token::end(ScopeTag::Italic)),
            Marker::GrayOpen => Some(Token::start(ScopeTag::Gray)),
            Marker::GrayClose => Some(Token::end(ScopeTag::Gray)),
            Marker::Delete | Marker::Pause | Marker::Filler => None,
        }
    }

    /// Byte length of the matched marker text.
    fn width(self) -> usize {
        match self {
            Marker::Delete => DELETE_OPEN.len(),
            Marker::Pause => "<pause".len(),
            Marker::BoldOpen | Marker::ItalicOpen => 3,
            Marker::BoldClose | Marker::ItalicClose => 4,
            Marker::GrayOpen => 6,
            Marker::GrayClose => 7,
            Marker::Filler => 1,
        }
    }
}

/// Find the earliest marker at or after `from`, returning its absolute offset.
fn next_marker(input: &str, from: usize) -> Option<(usize, Marker)> {
    Marker::lexer(&input[from..])
        .spanned()
        .find_map(|(marker, span)| match marker {
            Ok(Marker::Filler) | Err(_) => None,
            Ok(marker) => Some((from + span.start, marker)),
        })
}

/// Tokenize a markup string into an ordered token sequence.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while cursor < input.len() {
        let Some((at, marker)) = next_marker(input, cursor) else {
            tokens.push(Token::text(&input[cursor..]));
            break;
        };

        if at > cursor {
            tokens.push(Token::text(&input[cursor..at]));
        }

        cursor = match marker {
            Marker::Delete => scan_delete(input, at, &mut tokens),
            Marker::Pause => scan_pause(input, at, &mut tokens),
            simple => {
                tokens.extend(simple.boundary());
                at + simple.width()
            }
        };
    }

    tokens
}

/// Handle a `<delete>` marker at `at`, returning the new cursor.
fn scan_delete(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let body_start = at + DELETE_OPEN.len();

    match find_delete_close(input, body_start) {
        Some(body_end) => {
            let inner = tokenize(&input[body_start..body_end]);
            tokens.push(Token::delete(inner));
            body_end + DELETE_CLOSE.len()
        }
        None => {
            trace!(offset = at, "unmatched <delete>, keeping it as text");
            tokens.push(Token::text(DELETE_OPEN));
            body_start
        }
    }
}

/// Locate the `</delete>` closing a region whose body starts at `from`.
///
/// Nested regions are balanced by counting opens. When the nesting never
/// balances out, the first `</delete>` closes the region early.
fn find_delete_close(input: &str, from: usize) -> Option<usize> {
    let first_close = input[from..].find(DELETE_CLOSE)? + from;

    let mut depth = 0usize;
    let mut pos = from;
    while let Some(offset) = input[pos..].find(DELETE_CLOSE) {
        let close = pos + offset;
        match input[pos..close].find(DELETE_OPEN) {
            Some(open) => {
                depth += 1;
                pos += open + DELETE_OPEN.len();
            }
            None if depth == 0 => return Some(close),
            None => {
                depth -= 1;
                pos = close + DELETE_CLOSE.len();
            }
        }
    }

    Some(first_close)
}

/// Handle a `<pause` marker at `at`, returning the new cursor.
fn scan_pause(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let tail = &input[at..];
    match PAUSE_TAG_REGEX.captures(tail) {
        Some(caps) => {
            let duration_ms = caps[1].parse::<u64>().unwrap_or(u64::MAX);
            tokens.push(Token::pause(duration_ms));
            at + caps[0].len()
        }
        None => {
            trace!(offset = at, "malformed <pause> tag, keeping '<' as text");
            tokens.push(Token::text("<"));
            at + 1
        }
    }
}
