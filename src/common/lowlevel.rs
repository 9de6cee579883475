use super::{Path, State};

use std::cmp::Ordering;

pub(crate) type NodeId = usize;

#[derive(Clone, Debug)]
pub(crate) struct LowLevelNode {
    pub(crate) state: State,
    pub(crate) g_cost: usize,
    pub(crate) h_cost: usize,
    pub(crate) parent: Option<NodeId>,
}

impl LowLevelNode {
    pub(crate) fn f_cost(&self) -> usize {
        self.g_cost + self.h_cost
    }
}

// Open List Key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenOrderKey {
    pub(crate) f_cost: usize,
    pub(crate) sequence: usize,
    pub(crate) node: NodeId,
}

impl PartialOrd for OpenOrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenOrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            // Earlier insertion wins ties, so expansion order stays reproducible.
            .then_with(|| self.sequence.cmp(&other.sequence))
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Owns every node generated by one search. Parents are indices into the
/// arena, so dropping the arena releases the whole search tree at once.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<LowLevelNode>,
}

impl NodeArena {
    pub(crate) fn push(&mut self, node: LowLevelNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub(crate) fn get(&self, id: NodeId) -> &LowLevelNode {
        &self.nodes[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// States from the root down to `id`.
    pub(crate) fn trace(&self, id: NodeId) -> Path {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            path.push(node.state);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Tentative path through `parent` ending in `next`, without allocating a node for it.
    pub(crate) fn trace_through(&self, parent: NodeId, next: State) -> Path {
        let mut path = self.trace(parent);
        path.push(next);
        path
    }
}
