use super::FlowEditor;
use super::ids::{IdGenerator, RandomIds};
use crate::graph::{FlowGraph, Position};

/// Offset from the base node at which a new child is seeded before layout runs.
pub const DEFAULT_CHILD_OFFSET: Position = Position::new(200.0, 0.0);

/// Where the initial node is placed when it is created.
pub const DEFAULT_ROOT_POSITION: Position = Position::new(50.0, 50.0);

pub struct EditorBuilder {
    ids: Box<dyn IdGenerator>,
    child_offset: Position,
    root_position: Position,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self {
            ids: Box::new(RandomIds),
            child_offset: DEFAULT_CHILD_OFFSET,
            root_position: DEFAULT_ROOT_POSITION,
        }
    }
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_child_offset(mut self, offset: Position) -> Self {
        self.child_offset = offset;
        self
    }

    pub fn with_root_position(mut self, position: Position) -> Self {
        self.root_position = position;
        self
    }

    pub fn build(self) -> FlowEditor {
        FlowEditor {
            graph: FlowGraph::new(),
            pending: None,
            ids: self.ids,
            child_offset: self.child_offset,
            root_position: self.root_position,
            revision: 0,
        }
    }
}
