//! Arena-backed in-memory render sink
//!
//! Nodes live in a flat vector and are addressed by [NodeId]. Removing a node
//! only unlinks it from its parent; the slot stays in the arena so stale handles
//! held by a caller still resolve (to a detached node).

use super::{RenderSink, Style};
use crate::texttype::markup::ScopeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Root,
    Text(char),
    Container(ScopeTag),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeSink {
    nodes: Vec<NodeData>,
    revision: u64,
}

impl TreeSink {
    const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Root)],
            revision: 0,
        }
    }

    /// Bumped by every structural mutation. Renderers compare it to skip
    /// redundant redraws.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Whether a node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == Self::ROOT {
                return true;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Visible characters in document order.
    pub fn text(&self) -> String {
        self.spans().into_iter().map(|(ch, _)| ch).collect()
    }

    /// Visible characters paired with the style of their enclosing containers.
    pub fn spans(&self) -> Vec<(char, Style)> {
        let mut out = Vec::new();
        self.collect_spans(Self::ROOT, Style::default(), &mut out);
        out
    }

    fn collect_spans(&self, id: NodeId, style: Style, out: &mut Vec<(char, Style)>) {
        for &child in &self.node(id).children {
            match self.node(child).kind {
                NodeKind::Text(ch) => out.push((ch, style)),
                NodeKind::Container(tag) => self.collect_spans(child, style.with(tag), out),
                NodeKind::Root => {}
            }
        }
    }

    /// Serialize the visible tree back to markup, containers as tags.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(Self::ROOT, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        for &child in &self.node(id).children {
            match self.node(child).kind {
                NodeKind::Text(ch) => out.push(ch),
                NodeKind::Container(tag) => {
                    out.push_str(&tag.open_tag());
                    self.write_markup(child, out);
                    out.push_str(&tag.close_tag());
                }
                NodeKind::Root => {}
            }
        }
    }

    /// Number of attached containers, empty ones included.
    pub fn container_count(&self) -> usize {
        self.count_containers(Self::ROOT)
    }

    fn count_containers(&self, id: NodeId) -> usize {
        self.node(id)
            .children
            .iter()
            .filter(|&&child| matches!(self.node(child).kind, NodeKind::Container(_)))
            .map(|&child| 1 + self.count_containers(child))
            .sum()
    }
}

impl Default for TreeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for TreeSink {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn create_text(&mut self, ch: char) -> NodeId {
        self.push(NodeKind::Text(ch))
    }

    fn create_container(&mut self, tag: ScopeTag) -> NodeId {
        self.push(NodeKind::Container(tag))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.node(child).parent;
        if let Some(previous) = previous {
            self.remove_child(previous, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.revision += 1;
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let siblings = &mut self.nodes[parent.0].children;
        if let Some(pos) = siblings.iter().position(|&id| id == child) {
            siblings.remove(pos);
            self.nodes[child.0].parent = None;
            self.revision += 1;
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children.len()
    }

    fn tag(&self, node: NodeId) -> Option<ScopeTag> {
        match self.node(node).kind {
            NodeKind::Container(tag) => Some(tag),
            NodeKind::Root | NodeKind::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_serializes_nested_containers() {
        let mut sink = TreeSink::new();
        let root = sink.root();
        let bold = sink.create_container(ScopeTag::Bold);
        sink.append_child(root, bold);
        let a = sink.create_text('a');
        sink.append_child(bold, a);
        let b = sink.create_text('b');
        sink.append_child(root, b);

        assert_eq!(sink.to_markup(), "<b>a</b>b");
        assert_eq!(sink.text(), "ab");
        assert_eq!(sink.tag(bold), Some(ScopeTag::Bold));
        assert_eq!(sink.tag(a), None);
        assert_eq!(sink.parent(a), Some(bold));
    }

    #[test]
    fn removal_detaches_but_keeps_handle_valid() {
        let mut sink = TreeSink::new();
        let root = sink.root();
        let x = sink.create_text('x');
        sink.append_child(root, x);
        sink.remove_child(root, x);

        assert_eq!(sink.child_count(root), 0);
        assert_eq!(sink.parent(x), None);
        assert!(!sink.is_attached(x));
    }

    #[test]
    fn spans_accumulate_styles() {
        let mut sink = TreeSink::new();
        let root = sink.root();
        let gray = sink.create_container(ScopeTag::Gray);
        sink.append_child(root, gray);
        let italic = sink.create_container(ScopeTag::Italic);
        sink.append_child(gray, italic);
        let ch = sink.create_text('q');
        sink.append_child(italic, ch);

        let spans = sink.spans();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].1.gray && spans[0].1.italic && !spans[0].1.bold);
    }

    #[test]
    fn revision_tracks_mutations() {
        let mut sink = TreeSink::new();
        let root = sink.root();
        let start = sink.revision();
        let x = sink.create_text('x');
        assert_eq!(sink.revision(), start);
        sink.append_child(root, x);
        sink.remove_child(root, x);
        assert_eq!(sink.revision(), start + 2);
    }

    #[test]
    fn reappending_moves_the_node() {
        let mut sink = TreeSink::new();
        let root = sink.root();
        let bold = sink.create_container(ScopeTag::Bold);
        sink.append_child(root, bold);
        let x = sink.create_text('x');
        sink.append_child(root, x);
        sink.append_child(bold, x);

        assert_eq!(sink.to_markup(), "<b>x</b>");
        assert_eq!(sink.container_count(), 1);
    }
}
