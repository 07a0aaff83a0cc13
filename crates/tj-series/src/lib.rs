//! tj-series: timeseries assembly, run cache and storage.

pub mod assemble;
pub mod hash;
pub mod store;
pub mod table;

pub use assemble::{ColumnSpec, ConfigurationError, SeriesSource, assemble};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use table::*;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
