//! Stable indexing between node indices and subset positions.
//!
//! A series tied to a subset stores one row per subset position; solvers and
//! table assembly need O(1) lookup in both directions.

use crate::grid::{GridData, NodeSubset};

/// Bidirectional map for one subset of a grid.
///
/// Forward: position in the subset -> node index.
/// Reverse: node index -> position, `None` for nodes outside the subset.
#[derive(Debug, Clone)]
pub struct SubsetMap {
    subset: NodeSubset,
    nodes: Vec<usize>,
    node_to_pos: Vec<Option<usize>>,
}

impl SubsetMap {
    /// Build the map for `subset` of `grid`.
    pub fn from_grid(grid: &GridData, subset: NodeSubset) -> Self {
        let nodes = grid.subset(subset).to_vec();
        let mut node_to_pos = vec![None; grid.num_nodes()];
        for (pos, &node) in nodes.iter().enumerate() {
            node_to_pos[node] = Some(pos);
        }
        Self {
            subset,
            nodes,
            node_to_pos,
        }
    }

    pub fn subset(&self) -> NodeSubset {
        self.subset
    }

    /// Number of nodes in the subset.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node index at a subset position (panics if out of bounds).
    pub fn node_at(&self, pos: usize) -> usize {
        self.nodes[pos]
    }

    /// Subset position of a node index, `None` for nodes outside the subset.
    pub fn position(&self, node: usize) -> Option<usize> {
        self.node_to_pos.get(node).copied().flatten()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.position(node).is_some()
    }

    /// All node indices in subset order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }
}
