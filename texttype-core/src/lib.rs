//! # texttype-core
//!
//! Markup tokenizer and typing animation engine.
//!
//! A markup string flows through three stages:
//!
//!     raw markup -> tokenize -> normalize -> execute -> RenderSink
//!
//! The first two stages are pure functions living in [texttype::markup]. The
//! engine in [texttype::engine] walks the normalized tokens over time, driving a
//! [texttype::sink::RenderSink] and suspending on a [texttype::engine::Clock]
//! between every visible step.
//!
//! Supported markup:
//!
//!     <b>bold</b> <i>italic</i> <gray>muted</gray>
//!     <pause duration="300"/>
//!     <delete>typed, held, then erased</delete>
//!
//! Nothing in this crate fails on input: malformed markup degrades to literal
//! text and unmatched close tags are ignored.

#![allow(rustdoc::invalid_html_tags)]

pub mod texttype;
