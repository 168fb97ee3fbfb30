//! Detokenizer for texttype markup
//!
//! Converts a token stream back into markup text. Useful for:
//!
//! - Round-trip testing (source -> tokens -> source)
//! - Showing what a normalized stream will actually type
//!
//! Pauses are written in their canonical form `<pause duration="N"/>`, so the
//! round trip is exact only for sources that already use that form.

use super::token::Token;
use super::tokenizer::{DELETE_CLOSE, DELETE_OPEN};

/// Trait for converting a token to its markup representation
pub trait ToMarkup {
    fn to_markup(&self) -> String;
}

impl ToMarkup for Token {
    fn to_markup(&self) -> String {
        match self {
            Token::Text { value } => value.clone(),
            Token::Pause { duration_ms } => format!("<pause duration=\"{}\"/>", duration_ms),
            Token::ScopeStart { tag } => tag.open_tag(),
            Token::ScopeEnd { tag } => tag.close_tag(),
            Token::Delete { inner } => {
                format!("{}{}{}", DELETE_OPEN, detokenize(inner), DELETE_CLOSE)
            }
        }
    }
}

/// Detokenize a stream of tokens into a markup string
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(ToMarkup::to_markup).collect()
}
