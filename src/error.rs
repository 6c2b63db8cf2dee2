use thiserror::Error;

/// Errors raised when an edit would break the structure the layout relies on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidGraphError {
    #[error("Node id '{0}' is already present in the flow")]
    DuplicateNodeId(String),

    #[error("Edge id '{0}' is already present in the flow")]
    DuplicateEdgeId(String),

    #[error("Node '{missing_node_id}' not found, which is required by edge '{edge_id}'")]
    UnknownNode {
        missing_node_id: String,
        edge_id: String,
    },

    #[error(
        "Node '{node_id}' already has parent '{existing_parent}', refusing a second parent '{new_parent}'"
    )]
    MultipleParents {
        node_id: String,
        existing_parent: String,
        new_parent: String,
    },

    #[error("Flow has {0} initial nodes, at most one is allowed")]
    MultipleRoots(usize),
}

/// Errors reported by the form layer before anything reaches the editor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Field '{field}' must contain at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("Field '{field}' must contain at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("'{0}' is not a node type that can be attached to a flow")]
    InvalidNodeKind(String),

    #[error("'{0}' is not a known background")]
    InvalidBackground(String),
}

/// Errors that can occur while loading a layout configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read layout config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layout config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layout value '{name}' must be a finite, non-negative number, got {value}")]
    InvalidDimension { name: String, value: f64 },
}
