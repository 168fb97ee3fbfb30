//! Suspension source for the engine.
//!
//! The engine awaits [Clock::after] at every suspension point. Delays are
//! requests: a clock may resume late, early or immediately.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

pub trait Clock {
    /// Resolve after roughly `delay`.
    fn after(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock suspension on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn after(&self, delay: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(delay)
    }
}

/// Resolves immediately and remembers every requested delay.
///
/// Lets a run be played to completion in no time, e.g. to compute its final
/// rendering or to inspect its timing.
#[derive(Debug, Default)]
pub struct InstantClock {
    requests: RefCell<Vec<Duration>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<Duration> {
        self.requests.borrow().clone()
    }
}

impl Clock for InstantClock {
    fn after(&self, delay: Duration) -> impl Future<Output = ()> {
        self.requests.borrow_mut().push(delay);
        std::future::ready(())
    }
}

impl<C: Clock> Clock for &C {
    fn after(&self, delay: Duration) -> impl Future<Output = ()> {
        (**self).after(delay)
    }
}
