//! Common test utilities for building flows.
use flowtree::prelude::*;

#[allow(dead_code)]
pub fn node(id: &str, kind: NodeKind) -> Node {
    Node::new(id, kind, Position::default())
}

/// The flow used by the branching scenario:
///
/// ```text
/// start-node ─success─> c1 ─deny─> g1
///            └─fail───> c2
/// ```
#[allow(dead_code)]
pub fn create_branching_flow() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::new(ROOT_NODE_ID, NodeKind::Initial, Position::new(50.0, 50.0)),
        node("c1", NodeKind::Decision),
        node("c2", NodeKind::TerminalFailure),
        node("g1", NodeKind::TerminalSuccess),
    ];
    let edges = vec![
        create_edge(ROOT_NODE_ID, "start-node-out-success", "c1"),
        create_edge(ROOT_NODE_ID, "start-node-out-fail", "c2"),
        create_edge("c1", "c1-out-deny", "g1"),
    ];
    (nodes, edges)
}

/// A deterministic tree of `count` nodes where node `i` hangs below node `(i - 1) / 3`.
///
/// Every third node is a decision node, the rest alternate between terminal kinds,
/// so the tree mixes tall leaves with short ones.
#[allow(dead_code)]
pub fn create_wide_tree(count: usize) -> (Vec<Node>, Vec<Edge>) {
    let id = |i: usize| {
        if i == 0 {
            ROOT_NODE_ID.to_string()
        } else {
            format!("n{}", i)
        }
    };

    let mut nodes = vec![node(ROOT_NODE_ID, NodeKind::Initial)];
    let mut edges = Vec::new();
    for i in 1..count {
        let kind = match i % 3 {
            0 => NodeKind::Decision,
            1 => NodeKind::TerminalSuccess,
            _ => NodeKind::TerminalFailure,
        };
        let parent = (i - 1) / 3;
        let case = EdgeCase::ALL[i % 3];
        nodes.push(node(&id(i), kind));
        edges.push(create_edge(&id(parent), &output_handle(&id(parent), case), &id(i)));
    }
    (nodes, edges)
}

/// A session with predictable node ids.
#[allow(dead_code)]
pub fn create_session() -> Session {
    let editor = FlowEditor::builder()
        .with_id_generator(SequentialIds::default())
        .build();
    Session::new(editor, TreeLayout::default())
}

#[allow(dead_code)]
pub fn root_values() -> ValidInitialNode {
    InitialNodeForm::new("Checkout", "Entry point")
        .with_background(Background::Green)
        .validate()
        .expect("fixture form values are valid")
}
