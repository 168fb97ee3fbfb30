//! Root module for the texttype pipeline.
//!
//! Layout
//!
//!     markup   Token model, tokenizer, normalizer, detokenizer
//!     sink     Render sink contract and the in-memory tree sink
//!     engine   Clock, cancellation, timing jitter and the interpreter
//!     slides   Splitting a larger document into slides

pub mod engine;
pub mod markup;
pub mod sink;
pub mod slides;

pub use engine::{
    execute, execute_with_cancel, CancelToken, Clock, InstantClock, RunSummary, TokioClock,
    TypeError, Typewriter, TypingOptions,
};
pub use markup::{detokenize, normalize, tokenize, ScopeTag, Token};
pub use sink::{NodeId, RenderSink, Style, TreeSink};
pub use slides::{parse_slides, Slide, DEFAULT_SLIDE_MARKER};
