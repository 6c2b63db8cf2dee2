use super::handle::{EdgeCase, edge_color, resolve_case};

/// Stroke width shared by every edge drawn by the editor.
pub const EDGE_STROKE_WIDTH: u32 = 2;

/// Visual style derived from an edge's case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: u32,
}

/// A directed connection from a node's output handle to another node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub case: Option<EdgeCase>,
    pub style: EdgeStyle,
}

/// Builds the edge connecting `source_handle` on `source` to `target`.
///
/// The id is `"{source_handle}-{target}"`, so repeated calls with the same
/// arguments produce identical edges. Inserting duplicates is up to the caller.
pub fn create_edge(source: &str, source_handle: &str, target: &str) -> Edge {
    let case = resolve_case(Some(source_handle));
    Edge {
        id: format!("{}-{}", source_handle, target),
        source: source.to_string(),
        source_handle: source_handle.to_string(),
        target: target.to_string(),
        case,
        style: EdgeStyle {
            stroke: edge_color(case),
            stroke_width: EDGE_STROKE_WIDTH,
        },
    }
}
