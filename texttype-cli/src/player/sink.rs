//! A render sink that repaints the terminal after every visible change.

use super::ui::{self, Chrome, Phase};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io;
use texttype_core::texttype::{NodeId, RenderSink, ScopeTag, TreeSink};

/// Wraps a [TreeSink] and redraws the slide whenever a node is linked or
/// unlinked.
///
/// [RenderSink] methods can't fail, so the first draw error is parked and
/// later draws are skipped until [TerminalSink::take_error] hands it back.
pub struct TerminalSink<'t, B: Backend> {
    tree: TreeSink,
    terminal: &'t mut Terminal<B>,
    chrome: Chrome,
    phase: Phase,
    drawn_revision: Option<u64>,
    error: Option<io::Error>,
}

impl<'t, B: Backend> TerminalSink<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, chrome: Chrome) -> Self {
        Self {
            tree: TreeSink::new(),
            terminal,
            chrome,
            phase: Phase::Typing,
            drawn_revision: None,
            error: None,
        }
    }

    pub fn tree(&self) -> &TreeSink {
        &self.tree
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.redraw();
    }

    /// Repaint unconditionally, e.g. after a resize.
    pub fn redraw(&mut self) {
        if self.error.is_some() {
            return;
        }
        let spans = self.tree.spans();
        let result = self
            .terminal
            .draw(|frame| ui::render(frame, &self.chrome, &spans, self.phase));
        match result {
            Ok(_) => self.drawn_revision = Some(self.tree.revision()),
            Err(err) => self.error = Some(err),
        }
    }

    fn redraw_if_changed(&mut self) {
        if self.drawn_revision != Some(self.tree.revision()) {
            self.redraw();
        }
    }

    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<B: Backend> RenderSink for TerminalSink<'_, B> {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.tree.root()
    }

    fn create_text(&mut self, ch: char) -> NodeId {
        self.tree.create_text(ch)
    }

    fn create_container(&mut self, tag: ScopeTag) -> NodeId {
        self.tree.create_container(tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
        self.redraw_if_changed();
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.remove_child(parent, child);
        self.redraw_if_changed();
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.tree.child_count(node)
    }

    fn tag(&self, node: NodeId) -> Option<ScopeTag> {
        self.tree.tag(node)
    }
}
