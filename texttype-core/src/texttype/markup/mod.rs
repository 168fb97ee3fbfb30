//! Markup processing: from a raw string to the token stream the engine runs.
//!
//! The tokenizer produces a flat sequence in source order, with the exception
//! of delete regions which carry their own nested sequence. The normalizer is a
//! single fix-up pass over that output. The detokenizer goes the other way and
//! is mostly useful for round-trip testing and the CLI token dumps.

pub mod detokenizer;
pub mod normalize;
pub mod token;
pub mod tokenizer;

pub use detokenizer::{detokenize, ToMarkup};
pub use normalize::normalize;
pub use token::{ScopeTag, Token};
pub use tokenizer::tokenize;
