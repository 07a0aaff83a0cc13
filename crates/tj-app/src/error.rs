//! Error types for the tj-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI and future frontends.
///
/// `Configuration` and `Solver` are distinct variants: a table that failed
/// to assemble was mis-specified, while a solver error means the iteration
/// did not converge or the problem was ill-posed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Phase not found: {0}")]
    PhaseNotFound(String),

    #[error("Phase compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Timeseries configuration error: {0}")]
    Configuration(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tj-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<tj_project::ProjectError> for AppError {
    fn from(err: tj_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<tj_phase::PhaseError> for AppError {
    fn from(err: tj_phase::PhaseError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<tj_solve::SolveError> for AppError {
    fn from(err: tj_solve::SolveError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<tj_series::ConfigurationError> for AppError {
    fn from(err: tj_series::ConfigurationError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<tj_series::StoreError> for AppError {
    fn from(err: tj_series::StoreError) -> Self {
        match err {
            tj_series::StoreError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
