use super::config::LayoutConfig;
use crate::graph::{Edge, Node};
use ahash::AHashMap;
use tracing::warn;

/// One reachable node in the layout arena.
#[derive(Debug, Clone)]
pub(super) struct Slot {
    /// Index into the node slice the arena was built from.
    pub node: usize,
    pub height: f64,
    pub subtree: f64,
    /// Slot indices, in sibling order. Always greater than this slot's index.
    pub children: Vec<usize>,
}

/// Pre-order arena of the nodes reachable from the root.
pub(super) struct LayoutTree {
    pub slots: Vec<Slot>,
    vertical_gap: f64,
}

impl LayoutTree {
    pub(super) fn build(nodes: &[Node], edges: &[Edge], root: usize, config: &LayoutConfig) -> Self {
        // Reverse so the first node carrying an id owns it.
        let index: AHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in edges {
            adjacency
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        let mut claimed = vec![false; nodes.len()];
        let mut slots: Vec<Slot> = Vec::new();
        let mut stack: Vec<(usize, Option<usize>)> = vec![(root, None)];

        while let Some((node_idx, parent)) = stack.pop() {
            let node = &nodes[node_idx];
            if claimed[node_idx] {
                warn!(
                    node_id = %node.id,
                    "node is reachable through more than one edge, keeping its first parent"
                );
                continue;
            }
            claimed[node_idx] = true;

            let slot = slots.len();
            slots.push(Slot {
                node: node_idx,
                height: config.heights.height_of(node),
                subtree: 0.0,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                slots[parent].children.push(slot);
            }

            if let Some(targets) = adjacency.get(node.id.as_str()) {
                // Pushed in reverse so siblings pop in edge order.
                for target in targets.iter().rev() {
                    match index.get(target) {
                        Some(&child_idx) => stack.push((child_idx, Some(slot))),
                        None => warn!(source_id = %node.id, target_id = %target, "edge target is not a node"),
                    }
                }
            }
        }

        let mut tree = Self {
            slots,
            vertical_gap: config.vertical_gap,
        };
        tree.measure();
        tree
    }

    /// Post-order subtree heights, as a reverse sweep over the pre-order slots.
    fn measure(&mut self) {
        for i in (0..self.slots.len()).rev() {
            let own = self.slots[i].height;
            self.slots[i].subtree = if self.slots[i].children.is_empty() {
                own
            } else {
                own.max(self.children_span(i))
            };
        }
    }

    /// Height of the children of `slot` stacked with the vertical gap between them.
    pub(super) fn children_span(&self, slot: usize) -> f64 {
        let children = &self.slots[slot].children;
        if children.is_empty() {
            return 0.0;
        }
        let sum: f64 = children.iter().map(|&c| self.slots[c].subtree).sum();
        sum + self.vertical_gap * (children.len() - 1) as f64
    }
}
