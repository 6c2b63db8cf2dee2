//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, edit and lay out a flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowtree::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = LayoutConfig::from_file("path/to/layout.json")?;
//! let mut session = Session::new(FlowEditor::default(), TreeLayout::new(config));
//!
//! session.create_root(&InitialNodeForm::new("Start", "Entry").validate()?);
//! session.request_new_node(ROOT_NODE_ID, ROOT_OUTPUT_HANDLE);
//! session.create_child(NodeKind::Decision)?;
//!
//! session.graph().validate()?;
//! # Ok(())
//! # }
//! ```

// Editing and layout
pub use crate::editor::{EditorPhase, FlowEditor, IdGenerator, RandomIds, SequentialIds};
pub use crate::layout::{HeightTable, LayoutConfig, TreeLayout, layout};
pub use crate::session::Session;

// Graph model
pub use crate::graph::{
    Edge, EdgeCase, FlowGraph, Node, NodeData, NodeKind, Position, ROOT_NODE_ID,
    ROOT_OUTPUT_HANDLE, create_edge, edge_color, output_handle, resolve_case,
};

// Forms
pub use crate::forms::{Background, InitialNodeForm, NewNodeForm, ValidInitialNode};

// Error types
pub use crate::error::{ConfigError, FormError, InvalidGraphError};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
