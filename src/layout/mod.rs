//! Left-to-right tree layout.
//!
//! Positions are a pure function of topology and the [`LayoutConfig`]: every
//! call recomputes them from scratch for the nodes reachable from the root.

use crate::graph::{Edge, Node, Position, ROOT_NODE_ID};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::borrow::Cow;
use tracing::debug;

mod config;
mod tree;

pub use config::{HeightTable, LayoutConfig};
use tree::LayoutTree;

#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    config: LayoutConfig,
}

impl TreeLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `nodes` as a tree and returns them with updated positions.
    ///
    /// Returns the input borrowed when no node moves, so callers can tell a
    /// no-op apart without comparing positions themselves. Nodes that are not
    /// reachable from the root keep their position.
    pub fn layout<'a>(&self, nodes: &'a [Node], edges: &[Edge]) -> Cow<'a, [Node]> {
        let Some(positions) = self.positions(nodes, edges) else {
            debug!(nodes = nodes.len(), "no root found, skipping layout");
            return Cow::Borrowed(nodes);
        };

        let moved = |node: &Node| {
            positions
                .get(node.id.as_str())
                .filter(|p| **p != node.position)
                .copied()
        };

        let moved_count = nodes.iter().filter(|n| moved(n).is_some()).count();
        debug!(
            nodes = nodes.len(),
            placed = positions.len(),
            moved = moved_count,
            "tree layout computed"
        );
        if moved_count == 0 {
            return Cow::Borrowed(nodes);
        }

        Cow::Owned(
            nodes
                .iter()
                .map(|node| match moved(node) {
                    Some(position) => Node {
                        position,
                        ..node.clone()
                    },
                    None => node.clone(),
                })
                .collect_vec(),
        )
    }

    /// Computes the position of every node reachable from the root.
    ///
    /// `None` when the flow has no root (empty, or every node is a target).
    pub fn positions(&self, nodes: &[Node], edges: &[Edge]) -> Option<AHashMap<String, Position>> {
        let root = find_root(nodes, edges)?;
        let tree = LayoutTree::build(nodes, edges, root, &self.config);

        let count = tree.slots.len();
        let mut tops = vec![0.0; count];
        let mut xs = vec![0.0; count];
        tops[0] = self.config.origin.y;
        xs[0] = self.config.origin.x;

        let mut positions = AHashMap::with_capacity(count);
        for (i, slot) in tree.slots.iter().enumerate() {
            let center = tops[i] + slot.subtree / 2.0;
            positions.insert(
                nodes[slot.node].id.clone(),
                Position::new(xs[i], center - slot.height / 2.0),
            );

            let mut cursor = center - tree.children_span(i) / 2.0;
            for &child in &slot.children {
                tops[child] = cursor;
                xs[child] = xs[i] + self.config.horizontal_gap;
                cursor += tree.slots[child].subtree + self.config.vertical_gap;
            }
        }
        Some(positions)
    }

    /// Band height reserved for each reachable node and its descendants.
    pub fn subtree_heights(&self, nodes: &[Node], edges: &[Edge]) -> Option<AHashMap<String, f64>> {
        let root = find_root(nodes, edges)?;
        let tree = LayoutTree::build(nodes, edges, root, &self.config);
        Some(
            tree.slots
                .iter()
                .map(|slot| (nodes[slot.node].id.clone(), slot.subtree))
                .collect(),
        )
    }
}

/// Lays out with the default configuration.
pub fn layout<'a>(nodes: &'a [Node], edges: &[Edge]) -> Cow<'a, [Node]> {
    TreeLayout::default().layout(nodes, edges)
}

/// The initial node if present, else the first node that no edge points at.
fn find_root(nodes: &[Node], edges: &[Edge]) -> Option<usize> {
    if let Some(idx) = nodes.iter().position(|n| n.id == ROOT_NODE_ID) {
        return Some(idx);
    }
    let targets: AHashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    nodes.iter().position(|n| !targets.contains(n.id.as_str()))
}
