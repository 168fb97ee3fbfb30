//! An explicitly constructed engine instance.

use super::cancel::CancelToken;
use super::clock::{Clock, TokioClock};
use super::error::{RunSummary, TypeError};
use super::interpreter::execute_with_cancel;
use super::options::TypingOptions;
use crate::texttype::markup::{normalize, tokenize, Token};
use crate::texttype::sink::RenderSink;

/// Bundles options, a clock and a cancel token so a caller can type several
/// pieces of markup with the same settings.
///
/// Every call starts from a fresh scope stack and ledger; nothing carries over
/// between runs except the cancel token. Once cancelled, later runs stop at
/// their first suspension point.
#[derive(Debug, Clone)]
pub struct Typewriter<C = TokioClock> {
    options: TypingOptions,
    clock: C,
    cancel: CancelToken,
}

impl Typewriter<TokioClock> {
    pub fn new(options: TypingOptions) -> Self {
        Self::with_clock(options, TokioClock)
    }
}

impl<C: Clock> Typewriter<C> {
    pub fn with_clock(options: TypingOptions, clock: C) -> Self {
        Self {
            options,
            clock,
            cancel: CancelToken::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// A handle that stops this typewriter's runs when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Tokenize, normalize and type `markup` into `sink`.
    pub async fn type_markup<S: RenderSink>(
        &self,
        markup: &str,
        sink: &mut S,
    ) -> Result<RunSummary, TypeError> {
        let tokens = normalize(tokenize(markup));
        self.type_tokens(&tokens, sink).await
    }

    /// Type an already prepared token sequence.
    pub async fn type_tokens<S: RenderSink>(
        &self,
        tokens: &[Token],
        sink: &mut S,
    ) -> Result<RunSummary, TypeError> {
        execute_with_cancel(tokens, sink, &self.clock, &self.options, &self.cancel).await
    }
}
