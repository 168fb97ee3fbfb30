//! Execution engine
//!
//! Single-threaded and cooperative: a run is one async task whose only
//! suspension points are
//!
//!     one per typed character
//!     one per pause token
//!     one per erased character
//!     one after each delete region's typed phase
//!
//! Everything else is an immediate sink mutation. Typing of a region always
//! completes before any of its erasure begins.

mod cancel;
mod clock;
mod error;
mod interpreter;
pub mod jitter;
mod options;
mod typewriter;

pub use cancel::CancelToken;
pub use clock::{Clock, InstantClock, TokioClock};
pub use error::{RunSummary, TypeError};
pub use interpreter::{execute, execute_with_cancel};
pub use options::TypingOptions;
pub use typewriter::Typewriter;
