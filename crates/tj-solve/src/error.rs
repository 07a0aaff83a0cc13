//! Error types for phase solving.

use thiserror::Error;
use tj_phase::PhaseError;

/// Errors that can occur while solving a phase.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Phase error: {0}")]
    Phase(#[from] PhaseError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolveResult<T> = Result<T, SolveError>;
