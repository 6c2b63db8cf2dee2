//! # Flowtree - Tree Layout for Decision Flow Editors
//!
//! **Flowtree** is the headless core of a node-and-edge flow editor. A flow
//! starts from a single initial node, branches through API decision nodes
//! whose output handles carry an outcome case (`success`, `deny`, `fail`),
//! and ends in terminal success or failure nodes. Every structural edit is
//! followed by a left-to-right tree layout that stacks sibling subtrees
//! without overlap.
//!
//! ## Core Workflow
//!
//! 1.  **Validate input**: the UI turns raw field values into validated values
//!     through the types in [`forms`].
//! 2.  **Edit**: a [`FlowEditor`] creates the root, records which handle the
//!     next node hangs from, and attaches children with styled edges.
//! 3.  **Lay out**: a [`TreeLayout`] recomputes positions from topology alone.
//!     [`Session`] wires the two together and re-runs the layout whenever the
//!     editor's revision changes.
//! 4.  **Render**: hand `graph().nodes()` and `graph().edges()` to a renderer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowtree::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = Session::default();
//!
//!     let root = InitialNodeForm::new("Checkout", "Start here").validate()?;
//!     session.create_root(&root);
//!
//!     session.request_new_node(ROOT_NODE_ID, ROOT_OUTPUT_HANDLE);
//!     let api = session.create_child(NewNodeForm::new("apiNode").validate()?)?;
//!
//!     if let Some(api) = api {
//!         session.request_new_node(&api, &output_handle(&api, EdgeCase::Fail));
//!         session.create_child(NodeKind::TerminalFailure)?;
//!     }
//!
//!     for node in session.graph().nodes() {
//!         println!("{} at ({}, {})", node.id, node.position.x, node.position.y);
//!     }
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod forms;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod session;

pub use editor::FlowEditor;
pub use layout::TreeLayout;
pub use session::Session;
