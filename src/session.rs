//! A host that keeps a flow laid out while it is being edited.

use crate::editor::{EditorPhase, FlowEditor};
use crate::error::InvalidGraphError;
use crate::forms::ValidInitialNode;
use crate::graph::{FlowGraph, NodeKind};
use crate::layout::TreeLayout;
use std::borrow::Cow;
use tracing::debug;

/// Couples a [`FlowEditor`] with a [`TreeLayout`].
///
/// After each structural edit the session compares the editor's revision
/// with the one it last laid out and re-runs the layout if they differ.
pub struct Session {
    editor: FlowEditor,
    layout: TreeLayout,
    laid_out_revision: u64,
}

impl Session {
    pub fn new(editor: FlowEditor, layout: TreeLayout) -> Self {
        let laid_out_revision = editor.revision();
        Self {
            editor,
            layout,
            laid_out_revision,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        self.editor.graph()
    }

    pub fn editor(&self) -> &FlowEditor {
        &self.editor
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn phase(&self) -> EditorPhase {
        self.editor.phase()
    }

    pub fn create_root(&mut self, values: &ValidInitialNode) -> bool {
        let created = self.editor.create_root(values);
        self.sync_layout();
        created
    }

    pub fn request_new_node(&mut self, source_node_id: &str, source_handle_id: &str) {
        self.editor.request_new_node(source_node_id, source_handle_id);
    }

    pub fn create_child(&mut self, kind: NodeKind) -> Result<Option<String>, InvalidGraphError> {
        let id = self.editor.create_child(kind)?;
        self.sync_layout();
        Ok(id)
    }

    pub fn reset(&mut self) {
        self.editor.reset();
    }

    pub fn clear(&mut self) {
        self.editor.clear();
        self.sync_layout();
    }

    /// Re-runs the layout if the flow changed since the last run.
    ///
    /// Returns the number of nodes that moved.
    pub fn sync_layout(&mut self) -> usize {
        let revision = self.editor.revision();
        if revision == self.laid_out_revision {
            return 0;
        }
        self.laid_out_revision = revision;

        let graph = self.editor.graph();
        let laid_out = match self.layout.layout(graph.nodes(), graph.edges()) {
            Cow::Borrowed(_) => None,
            Cow::Owned(nodes) => Some(nodes),
        };

        let Some(nodes) = laid_out else {
            debug!(revision, "layout unchanged");
            return 0;
        };

        let moved = nodes
            .iter()
            .zip(graph.nodes())
            .filter(|(new, old)| new.position != old.position)
            .count();
        self.editor.graph_mut().replace_nodes(nodes);
        debug!(revision, moved, "layout applied");
        moved
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FlowEditor::default(), TreeLayout::default())
    }
}
