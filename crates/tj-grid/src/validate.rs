//! Grid validation logic.

use tj_core::TjResult;

use crate::error::GridError;
use crate::grid::{GridData, NodeSubset};

/// Validate a freshly built grid: node arrays consistent, every subset
/// sorted and in bounds, `all` complete, inputs contained in their
/// discretization subsets.
pub(crate) fn check_grid(grid: &GridData) -> TjResult<()> {
    check_node_arrays(grid)?;
    for subset in NodeSubset::ALL {
        check_subset_indices(grid, subset)?;
    }
    check_all_complete(grid)?;
    check_containment(grid, NodeSubset::StateInput, NodeSubset::StateDisc)?;
    check_containment(grid, NodeSubset::ControlInput, NodeSubset::ControlDisc)?;
    Ok(())
}

fn check_node_arrays(grid: &GridData) -> TjResult<()> {
    let n = grid.num_nodes();
    if grid.node_stau.len() != n || grid.node_segment.len() != n {
        return Err(GridError::AllSubsetIncomplete {
            expected: n,
            actual: grid.node_stau.len().min(grid.node_segment.len()),
        }
        .into());
    }

    // Phase tau must be monotone overall; equal values only at the shared
    // boundary between two adjacent segments.
    for i in 1..n {
        let (prev, cur) = (grid.node_ptau[i - 1], grid.node_ptau[i]);
        let same_segment = grid.node_segment[i - 1] == grid.node_segment[i];
        let ordered = if same_segment { prev < cur } else { prev <= cur };
        if !ordered {
            return Err(GridError::SubsetNotSorted {
                subset: NodeSubset::All,
            }
            .into());
        }
    }
    Ok(())
}

fn check_subset_indices(grid: &GridData, subset: NodeSubset) -> TjResult<()> {
    let idxs = grid.subset(subset);
    let len = grid.num_nodes();
    for (k, &node) in idxs.iter().enumerate() {
        if node >= len {
            return Err(GridError::SubsetIndexOob {
                subset,
                index: node,
                len,
            }
            .into());
        }
        if k > 0 && idxs[k - 1] >= node {
            return Err(GridError::SubsetNotSorted { subset }.into());
        }
    }
    Ok(())
}

fn check_all_complete(grid: &GridData) -> TjResult<()> {
    let all = grid.subset(NodeSubset::All);
    if all.len() != grid.num_nodes() {
        return Err(GridError::AllSubsetIncomplete {
            expected: grid.num_nodes(),
            actual: all.len(),
        }
        .into());
    }
    // Sorted + in bounds + full length means it is exactly 0..n.
    Ok(())
}

fn check_containment(grid: &GridData, subset: NodeSubset, within: NodeSubset) -> TjResult<()> {
    let outer = grid.subset(within);
    for &node in grid.subset(subset) {
        if outer.binary_search(&node).is_err() {
            return Err(GridError::SubsetNotContained {
                subset,
                within,
                node,
            }
            .into());
        }
    }
    Ok(())
}
