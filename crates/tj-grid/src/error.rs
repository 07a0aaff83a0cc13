//! Grid-specific error types.

use tj_core::TjError;

use crate::grid::NodeSubset;

/// Grid construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The transcription has no node table for this polynomial order.
    UnsupportedOrder {
        scheme: &'static str,
        order: usize,
    },

    /// A phase needs at least one segment.
    InvalidSegmentCount { count: usize },

    /// A subset index points past the end of the node sequence.
    SubsetIndexOob {
        subset: NodeSubset,
        index: usize,
        len: usize,
    },

    /// A subset's indices are not strictly increasing.
    SubsetNotSorted { subset: NodeSubset },

    /// The `all` subset does not cover every node exactly once.
    AllSubsetIncomplete { expected: usize, actual: usize },

    /// An input subset contains a node missing from its discretization subset.
    SubsetNotContained {
        subset: NodeSubset,
        within: NodeSubset,
        node: usize,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::UnsupportedOrder { scheme, order } => {
                write!(f, "No {} node table for order {}", scheme, order)
            }
            GridError::InvalidSegmentCount { count } => {
                write!(f, "Invalid segment count {} (need at least 1)", count)
            }
            GridError::SubsetIndexOob { subset, index, len } => {
                write!(
                    f,
                    "Subset {} index {} out of bounds for {} nodes",
                    subset, index, len
                )
            }
            GridError::SubsetNotSorted { subset } => {
                write!(f, "Subset {} indices are not strictly increasing", subset)
            }
            GridError::AllSubsetIncomplete { expected, actual } => {
                write!(
                    f,
                    "Subset all has {} indices but the grid has {} nodes",
                    actual, expected
                )
            }
            GridError::SubsetNotContained {
                subset,
                within,
                node,
            } => {
                write!(
                    f,
                    "Subset {} contains node {} missing from subset {}",
                    subset, node, within
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

impl From<GridError> for TjError {
    fn from(err: GridError) -> Self {
        TjError::Invariant(err.to_string())
    }
}
