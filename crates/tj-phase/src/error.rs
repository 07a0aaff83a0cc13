use thiserror::Error;

use tj_grid::NodeSubset;

pub type PhaseResult<T> = Result<T, PhaseError>;

#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("No {kind} with id {id} in this phase")]
    UnknownId { kind: &'static str, id: u32 },

    #[error("Invalid options: {what}")]
    InvalidOptions { what: String },

    #[error("Guess for '{variable}' has {actual} rows but subset {subset} has {expected} nodes")]
    GuessLength {
        variable: String,
        subset: NodeSubset,
        expected: usize,
        actual: usize,
    },

    #[error("Guess for '{variable}' must live on subset {expected}, got {actual}")]
    GuessSubset {
        variable: String,
        expected: NodeSubset,
        actual: NodeSubset,
    },

    #[error("Objective references a variable this phase does not have")]
    DanglingObjective,
}
