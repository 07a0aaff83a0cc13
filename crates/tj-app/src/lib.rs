//! Shared application service layer for traject.
//!
//! This crate provides a unified interface for CLI and future frontends,
//! centralizing business logic for project management, phase compilation,
//! run execution, and result querying.

pub mod error;
pub mod phase_compile;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use phase_compile::compile_phase;
pub use project_service::{
    get_phase, list_phases, load_project, save_project, validate_project, PhaseSummary,
};
pub use query::{
    extract_series, first_value, get_run_summary, last_value, list_column_paths, RunSummary,
};
pub use run_service::{
    ensure_run, list_runs, load_run, solved_to_columns, RunOptions, RunRequest, RunResponse,
    RunTimingSummary,
};
