//! Render sink contract
//!
//! The engine never touches a concrete tree. It creates single-character text
//! units and tagged containers through a [RenderSink], links and unlinks them,
//! and asks the sink for child counts and tags when matching close tags and
//! pruning empty containers. Any medium that can answer those questions can
//! show a typing run: a DOM, a terminal buffer, or the in-memory [TreeSink]
//! used by the CLI and the tests.

pub mod tree;

pub use tree::{NodeId, TreeSink};

use super::markup::ScopeTag;
use std::fmt;

/// Capabilities the engine needs from a rendering medium.
///
/// Handles are owned by the sink. The engine only ever holds copies of them in
/// its scope stack and typed-unit ledger.
pub trait RenderSink {
    type Node: Copy + Eq + fmt::Debug;

    /// The content container. Never removed.
    fn root(&self) -> Self::Node;

    /// Create a detached text unit holding a single character.
    fn create_text(&mut self, ch: char) -> Self::Node;

    /// Create a detached, empty formatting container.
    fn create_container(&mut self, tag: ScopeTag) -> Self::Node;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Current parent of a node, `None` once detached (and for the root).
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn child_count(&self, node: Self::Node) -> usize;

    /// Scope tag of a container, `None` for text units and the root.
    fn tag(&self, node: Self::Node) -> Option<ScopeTag>;
}

/// Visual style accumulated from the containers enclosing a character.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub gray: bool,
}

impl Style {
    pub fn with(mut self, tag: ScopeTag) -> Self {
        match tag {
            ScopeTag::Bold => self.bold = true,
            ScopeTag::Italic => self.italic = true,
            ScopeTag::Gray => self.gray = true,
        }
        self
    }
}
