//! The graph construction state machine.
//!
//! [`FlowEditor`] is the only writer of a flow's nodes and edges. It never
//! runs the layout itself: hosts watch [`FlowEditor::revision`] and re-run
//! the layout when it changes (see [`crate::session::Session`]).

use crate::error::InvalidGraphError;
use crate::forms::ValidInitialNode;
use crate::graph::{FlowGraph, Node, NodeKind, Position, ROOT_NODE_ID, create_edge};
use tracing::debug;

mod builder;
pub mod ids;

pub use builder::{DEFAULT_CHILD_OFFSET, DEFAULT_ROOT_POSITION, EditorBuilder};
pub use ids::{IdGenerator, RandomIds, SequentialIds};

/// The node and handle the next created node will hang from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSource {
    pub node_id: String,
    pub handle_id: String,
}

/// Where the editor stands, derived from its graph and pending selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Empty,
    Rooted,
    AwaitingChild(PendingSource),
}

pub struct FlowEditor {
    graph: FlowGraph,
    pending: Option<PendingSource>,
    ids: Box<dyn IdGenerator>,
    child_offset: Position,
    root_position: Position,
    revision: u64,
}

impl Default for FlowEditor {
    fn default() -> Self {
        EditorBuilder::default().build()
    }
}

impl FlowEditor {
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut FlowGraph {
        &mut self.graph
    }

    pub fn pending(&self) -> Option<&PendingSource> {
        self.pending.as_ref()
    }

    /// Bumped on every structural change of the node or edge collections.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> EditorPhase {
        match &self.pending {
            Some(pending) => EditorPhase::AwaitingChild(pending.clone()),
            None if self.graph.is_empty() => EditorPhase::Empty,
            None => EditorPhase::Rooted,
        }
    }

    /// Starts a new flow from the initial node.
    ///
    /// Does nothing and returns `false` when the flow already has one.
    /// Otherwise whatever was in the flow is replaced by the single initial node.
    pub fn create_root(&mut self, values: &ValidInitialNode) -> bool {
        if self.graph.has_root() {
            debug!("initial node already present, ignoring create_root");
            return false;
        }

        let root = Node::new(ROOT_NODE_ID, NodeKind::Initial, self.root_position)
            .with_data(values.to_node_data());
        self.graph = FlowGraph::from((vec![root], Vec::new()));
        self.pending = None;
        self.bump();
        debug!(label = values.label(), "initial node created");
        true
    }

    /// Records which node and output handle the next created node attaches to.
    pub fn request_new_node(&mut self, source_node_id: impl Into<String>, source_handle_id: impl Into<String>) {
        let pending = PendingSource {
            node_id: source_node_id.into(),
            handle_id: source_handle_id.into(),
        };
        debug!(source = %pending.node_id, handle = %pending.handle_id, "new node requested");
        self.pending = Some(pending);
    }

    /// Creates a node of `kind` and attaches it to the pending source, if any.
    ///
    /// The new node is seeded next to its base node: the pending source, or
    /// the most recently added node when nothing is pending. Returns the new
    /// id, or `None` when there is no base node to seed from. The pending
    /// selection is cleared either way.
    pub fn create_child(&mut self, kind: NodeKind) -> Result<Option<String>, InvalidGraphError> {
        let pending = self.pending.take();

        let base = match &pending {
            Some(p) => self.graph.node(&p.node_id),
            None => self.graph.nodes().last(),
        };
        let Some(base) = base else {
            debug!("no base node for the new child, ignoring create_child");
            return Ok(None);
        };

        let id = self.ids.next_id();
        let position = Position::new(
            base.position.x + self.child_offset.x,
            base.position.y + self.child_offset.y,
        );
        let node = Node::new(id.clone(), kind, position);
        let edge = pending
            .as_ref()
            .map(|p| create_edge(&p.node_id, &p.handle_id, &id));

        self.graph.attach(node, edge)?;
        self.bump();
        debug!(node_id = %id, %kind, attached = pending.is_some(), "child node created");
        Ok(Some(id))
    }

    /// Drops the pending selection, as when the new-node dialog is dismissed.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Empties the flow.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.pending = None;
        self.bump();
        debug!("flow cleared");
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::InitialNodeForm;
    use crate::graph::EdgeCase;

    fn editor() -> FlowEditor {
        FlowEditor::builder()
            .with_id_generator(SequentialIds::default())
            .build()
    }

    fn root_values() -> ValidInitialNode {
        InitialNodeForm::new("Start", "Entry point").validate().unwrap()
    }

    #[test]
    fn starts_empty() {
        let editor = editor();
        assert_eq!(editor.phase(), EditorPhase::Empty);
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn second_root_is_a_no_op() {
        let mut editor = editor();
        assert!(editor.create_root(&root_values()));
        let revision = editor.revision();
        assert!(!editor.create_root(&root_values()));
        assert_eq!(editor.revision(), revision);
        assert_eq!(editor.graph().nodes().len(), 1);
        assert_eq!(editor.phase(), EditorPhase::Rooted);
    }

    #[test]
    fn root_carries_form_values() {
        let mut editor = editor();
        editor.create_root(&root_values());
        let root = editor.graph().root().unwrap();
        assert_eq!(root.id, ROOT_NODE_ID);
        assert_eq!(root.position, DEFAULT_ROOT_POSITION);
        assert_eq!(root.data.label.as_deref(), Some("Start"));
        assert_eq!(root.data.style_class.as_deref(), Some("bg-blue-200"));
    }

    #[test]
    fn child_attaches_to_requested_handle() {
        let mut editor = editor();
        editor.create_root(&root_values());
        editor.request_new_node(ROOT_NODE_ID, "start-node-out");
        assert!(matches!(editor.phase(), EditorPhase::AwaitingChild(_)));

        let id = editor.create_child(NodeKind::Decision).unwrap().unwrap();
        assert_eq!(id, "n1");
        assert_eq!(editor.phase(), EditorPhase::Rooted);

        let child = editor.graph().node("n1").unwrap();
        assert_eq!(child.position, Position::new(250.0, 50.0));
        let edge = &editor.graph().edges()[0];
        assert_eq!(edge.id, "start-node-out-n1");
        assert_eq!(edge.source, ROOT_NODE_ID);

        editor.request_new_node("n1", "n1-out-deny");
        editor.create_child(NodeKind::TerminalFailure).unwrap();
        assert_eq!(editor.graph().edges()[1].case, Some(EdgeCase::Deny));
    }

    #[test]
    fn child_without_request_is_disconnected() {
        let mut editor = editor();
        editor.create_root(&root_values());
        let id = editor.create_child(NodeKind::TerminalSuccess).unwrap();
        assert_eq!(id.as_deref(), Some("n1"));
        assert!(editor.graph().edges().is_empty());
        assert_eq!(editor.graph().nodes().len(), 2);
    }

    #[test]
    fn child_on_empty_flow_is_ignored() {
        let mut editor = editor();
        assert_eq!(editor.create_child(NodeKind::Decision), Ok(None));
        assert!(editor.graph().is_empty());
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn unknown_source_clears_selection() {
        let mut editor = editor();
        editor.create_root(&root_values());
        editor.request_new_node("ghost", "ghost-out-fail");
        assert_eq!(editor.create_child(NodeKind::Decision), Ok(None));
        assert!(editor.pending().is_none());
        assert_eq!(editor.graph().nodes().len(), 1);
    }

    #[test]
    fn reset_drops_selection_only() {
        let mut editor = editor();
        editor.create_root(&root_values());
        let revision = editor.revision();
        editor.request_new_node(ROOT_NODE_ID, "start-node-out");
        editor.reset();
        assert_eq!(editor.phase(), EditorPhase::Rooted);
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut editor = editor();
        editor.create_root(&root_values());
        editor.request_new_node(ROOT_NODE_ID, "start-node-out");
        editor.create_child(NodeKind::Decision).unwrap();
        editor.request_new_node("n1", "n1-out-success");
        editor.clear();
        assert_eq!(editor.phase(), EditorPhase::Empty);
        assert!(editor.graph().nodes().is_empty());
        assert!(editor.graph().edges().is_empty());
    }

    #[test]
    fn colliding_id_is_rejected_atomically() {
        struct Fixed;
        impl IdGenerator for Fixed {
            fn next_id(&mut self) -> String {
                "dup".to_string()
            }
        }

        let mut editor = FlowEditor::builder().with_id_generator(Fixed).build();
        editor.create_root(&root_values());
        editor.request_new_node(ROOT_NODE_ID, "start-node-out");
        editor.create_child(NodeKind::Decision).unwrap();
        let revision = editor.revision();

        editor.request_new_node("dup", "dup-out-success");
        let err = editor.create_child(NodeKind::Decision).unwrap_err();
        assert_eq!(err, InvalidGraphError::DuplicateNodeId("dup".to_string()));
        assert_eq!(editor.graph().edges().len(), 1);
        assert_eq!(editor.revision(), revision);
        assert!(editor.pending().is_none());
    }
}
