//! Whitespace fix-up around delete regions
//!
//! Authors tend to put a line break after `</delete>` to keep the markup
//! readable. Once the region has been erased that break would show up as a
//! blank line, so the first text token following a delete region loses its
//! leading line breaks. Pauses and scope boundaries between the region and the
//! text keep the suppression armed. A text token that was nothing but line
//! breaks is dropped and suppression stays armed for the next one; the first
//! text with anything left disarms it. That keeps the pass idempotent.
//!
//! Only the top-level sequence is normalized. Region bodies run as authored.

use super::token::Token;

/// Strip leading line breaks from the first text following each delete region.
///
/// Text that becomes empty is dropped and does not count as the first text.
pub fn normalize(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut suppress_line_breaks = false;

    for token in tokens {
        match token {
            Token::Delete { .. } => {
                suppress_line_breaks = true;
                out.push(token);
            }
            Token::Text { value } if suppress_line_breaks => {
                let rest = strip_leading_line_breaks(&value);
                if !rest.is_empty() {
                    suppress_line_breaks = false;
                    out.push(Token::text(rest));
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// Strip a leading run of `\n` / `\r\n` line breaks.
fn strip_leading_line_breaks(text: &str) -> &str {
    let mut rest = text;
    loop {
        let after_cr = rest.strip_prefix('\r').unwrap_or(rest);
        match after_cr.strip_prefix('\n') {
            Some(after_lf) => rest = after_lf,
            None => return rest,
        }
    }
}
