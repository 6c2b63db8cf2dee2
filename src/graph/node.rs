use super::handle::{EdgeCase, output_handle};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Fixed id of the flow's initial node.
pub const ROOT_NODE_ID: &str = "start-node";

/// The single output handle of the initial node.
pub const ROOT_OUTPUT_HANDLE: &str = "start-node-out";

/// The stage a node represents in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "initialNode")]
    Initial,
    #[serde(rename = "apiNode")]
    Decision,
    #[serde(rename = "finalSuccessNode")]
    TerminalSuccess,
    #[serde(rename = "finalFailedNode")]
    TerminalFailure,
}

impl NodeKind {
    /// Kinds a user may attach below an existing node.
    pub const ATTACHABLE: [NodeKind; 3] = [
        NodeKind::Decision,
        NodeKind::TerminalSuccess,
        NodeKind::TerminalFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Initial => "initialNode",
            NodeKind::Decision => "apiNode",
            NodeKind::TerminalSuccess => "finalSuccessNode",
            NodeKind::TerminalFailure => "finalFailedNode",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::TerminalSuccess | NodeKind::TerminalFailure)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initialNode" => Ok(NodeKind::Initial),
            "apiNode" => Ok(NodeKind::Decision),
            "finalSuccessNode" => Ok(NodeKind::TerminalSuccess),
            "finalFailedNode" => Ok(NodeKind::TerminalFailure),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Free-form display data attached to a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeData {
    pub label: Option<String>,
    pub description: Option<String>,
    pub style_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    /// Height measured by a renderer; overrides the per-kind nominal height.
    pub height: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            data: NodeData::default(),
            height: None,
        }
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Initial
    }

    /// Handles from which a new child may be requested.
    pub fn output_handles(&self) -> Vec<String> {
        match self.kind {
            NodeKind::Initial => vec![ROOT_OUTPUT_HANDLE.to_string()],
            NodeKind::Decision => EdgeCase::ALL
                .iter()
                .map(|case| output_handle(&self.id, *case))
                .collect(),
            NodeKind::TerminalSuccess | NodeKind::TerminalFailure => Vec::new(),
        }
    }
}
