//! The typing interpreter
//!
//! Walks a token sequence and turns it into time-ordered sink mutations. Two
//! pieces of state live for the duration of one run:
//!
//!     scope stack   open containers, bottom is the sink root (never popped)
//!     ledger        every typed text unit still visible, in typing order
//!
//! Delete regions recurse into the same run, sharing both. Erasing prunes
//! every container it leaves empty, including ones still open on the scope
//! stack: a scope opened inside a region and left open stays the insertion
//! point, but its container is detached, so whatever is typed into it until
//! it closes never shows. The ledger grows by exactly the region's net visible
//! output, since nested regions undo their own units before returning, and the
//! outer region pops that many units back off.
//!
//! Close tags are matched against the stack from the top down rather than
//! requiring strict nesting. `<b><i>x</b>` closes both scopes at `</b>`.

use super::cancel::CancelToken;
use super::clock::Clock;
use super::error::{RunSummary, TypeError};
use super::jitter::{jitter, DELETE_JITTER_SCALE};
use super::options::TypingOptions;
use crate::texttype::markup::{ScopeTag, Token};
use crate::texttype::sink::RenderSink;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info, trace};

type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Raised at a suspension point once the run has been cancelled.
#[derive(Debug)]
struct Interrupted;

/// Run `tokens` against `sink` to completion.
///
/// Tokens are executed as given; callers wanting the leading-newline fix-up
/// should pass them through [normalize](crate::texttype::markup::normalize)
/// first.
pub async fn execute<S, C>(
    tokens: &[Token],
    sink: &mut S,
    clock: &C,
    options: &TypingOptions,
) -> Result<RunSummary, TypeError>
where
    S: RenderSink,
    C: Clock,
{
    execute_with_cancel(tokens, sink, clock, options, &CancelToken::new()).await
}

/// Like [execute], stopping at the first suspension point after `cancel` fires.
///
/// On cancellation the sink is left exactly as it was at that point.
pub async fn execute_with_cancel<S, C>(
    tokens: &[Token],
    sink: &mut S,
    clock: &C,
    options: &TypingOptions,
    cancel: &CancelToken,
) -> Result<RunSummary, TypeError>
where
    S: RenderSink,
    C: Clock,
{
    debug!(tokens = tokens.len(), "typing run started");
    let mut run = Run::new(sink, clock, options, cancel);

    match run.run(tokens).await {
        Ok(()) => {
            debug!(
                typed = run.summary.typed_units,
                deleted = run.summary.deleted_units,
                "typing run finished"
            );
            Ok(run.summary)
        }
        Err(Interrupted) => {
            info!(
                typed = run.summary.typed_units,
                deleted = run.summary.deleted_units,
                "typing run cancelled"
            );
            Err(TypeError::Cancelled {
                summary: run.summary,
            })
        }
    }
}

struct Run<'a, S: RenderSink, C> {
    sink: &'a mut S,
    clock: &'a C,
    options: &'a TypingOptions,
    cancel: &'a CancelToken,
    scopes: Vec<S::Node>,
    ledger: Vec<S::Node>,
    rng: StdRng,
    summary: RunSummary,
}

impl<'a, S, C> Run<'a, S, C>
where
    S: RenderSink,
    C: Clock,
{
    fn new(
        sink: &'a mut S,
        clock: &'a C,
        options: &'a TypingOptions,
        cancel: &'a CancelToken,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let root = sink.root();
        Self {
            sink,
            clock,
            options,
            cancel,
            scopes: vec![root],
            ledger: Vec::new(),
            rng,
            summary: RunSummary::default(),
        }
    }

    /// Boxed so delete regions can recurse.
    fn run<'t>(&'t mut self, tokens: &'t [Token]) -> LocalBoxFuture<'t, Result<(), Interrupted>> {
        Box::pin(async move {
            for token in tokens {
                self.step(token).await?;
            }
            Ok(())
        })
    }

    async fn step(&mut self, token: &Token) -> Result<(), Interrupted> {
        match token {
            Token::Text { value } => self.type_text(value).await,
            Token::Pause { duration_ms } => {
                self.summary.pauses += 1;
                self.suspend(Duration::from_millis(*duration_ms)).await
            }
            Token::ScopeStart { tag } => {
                self.open_scope(*tag);
                Ok(())
            }
            Token::ScopeEnd { tag } => {
                self.close_scope(*tag);
                Ok(())
            }
            Token::Delete { inner } => self.delete_region(inner).await,
        }
    }

    fn current_container(&self) -> S::Node {
        // The root is never popped.
        self.scopes[self.scopes.len() - 1]
    }

    async fn type_text(&mut self, value: &str) -> Result<(), Interrupted> {
        for ch in value.chars() {
            let unit = self.sink.create_text(ch);
            let container = self.current_container();
            self.sink.append_child(container, unit);
            self.ledger.push(unit);
            self.summary.typed_units += 1;

            let delay = jitter(
                self.options.typing_speed,
                self.options.random_jitter,
                &mut self.rng,
            );
            self.suspend(delay).await?;
        }
        Ok(())
    }

    fn open_scope(&mut self, tag: ScopeTag) {
        let container = self.sink.create_container(tag);
        let parent = self.current_container();
        self.sink.append_child(parent, container);
        self.scopes.push(container);
    }

    /// Pop everything down to and including the nearest scope tagged `tag`.
    fn close_scope(&mut self, tag: ScopeTag) {
        let sink = &*self.sink;
        let matched = self
            .scopes
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|&(_, &node)| sink.tag(node) == Some(tag))
            .map(|(depth, _)| depth);

        let Some(depth) = matched else {
            trace!(%tag, "close tag without an open scope, ignoring");
            self.summary.ignored_closes += 1;
            return;
        };

        let closed: Vec<S::Node> = self.scopes.drain(depth..).rev().collect();
        for container in closed {
            if self.sink.child_count(container) > 0 {
                continue;
            }
            if let Some(parent) = self.sink.parent(container) {
                self.sink.remove_child(parent, container);
            }
        }
    }

    async fn delete_region(&mut self, inner: &[Token]) -> Result<(), Interrupted> {
        self.summary.delete_regions += 1;
        let before = self.ledger.len();
        trace!(tokens = inner.len(), "delete region: typing");

        self.run(inner).await?;
        self.suspend(Duration::from_millis(self.options.after_delete_pause))
            .await?;

        let added = self.ledger.len().saturating_sub(before);
        debug!(units = added, "delete region: erasing");
        for _ in 0..added {
            self.delete_last_unit().await?;
        }
        Ok(())
    }

    async fn delete_last_unit(&mut self) -> Result<(), Interrupted> {
        let Some(unit) = self.ledger.pop() else {
            return Ok(());
        };

        if let Some(parent) = self.sink.parent(unit) {
            self.sink.remove_child(parent, unit);
            self.prune_empty_containers(parent);
        }
        self.summary.deleted_units += 1;

        let delay = jitter(
            self.options.deleting_speed,
            self.options.random_jitter * DELETE_JITTER_SCALE,
            &mut self.rng,
        );
        self.suspend(delay).await
    }

    /// Walk up from `start`, removing containers left empty.
    ///
    /// Stops at the root or at the first container with children left. The
    /// scope stack is not consulted: an open scope may end up detached.
    fn prune_empty_containers(&mut self, start: S::Node) {
        let root = self.sink.root();
        let mut current = Some(start);
        while let Some(node) = current {
            if node == root || self.sink.child_count(node) > 0 {
                break;
            }
            let parent = self.sink.parent(node);
            if let Some(parent) = parent {
                self.sink.remove_child(parent, node);
            }
            current = parent;
        }
    }

    async fn suspend(&mut self, delay: Duration) -> Result<(), Interrupted> {
        if self.cancel.is_cancelled() {
            return Err(Interrupted);
        }
        self.summary.requested_delay = self.summary.requested_delay.saturating_add(delay);

        let clock = self.clock;
        let cancel = self.cancel;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupted),
            _ = clock.after(delay) => Ok(()),
        }
    }
}
