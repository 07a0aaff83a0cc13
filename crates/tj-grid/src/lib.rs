//! tj-grid: collocation grid layer for traject.
//!
//! Provides:
//! - Transcription schemes and their per-segment node tables
//! - Validated, immutable per-phase grid data with role subsets
//! - Stable subset indexing for series and table assembly
//!
//! # Example
//!
//! ```
//! use tj_grid::{GridData, NodeSubset, Transcription};
//!
//! let grid = GridData::new(Transcription::GaussLobatto, 8, 3, true).unwrap();
//!
//! assert_eq!(grid.num_nodes(), 24);
//! assert_eq!(grid.subset_len(NodeSubset::StateInput), 9);
//! ```

pub mod error;
pub mod grid;
pub mod indexing;
pub mod transcription;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::GridError;
pub use grid::{GridData, NodeSubset};
pub use indexing::SubsetMap;
pub use transcription::{Transcription, segment_nodes};
