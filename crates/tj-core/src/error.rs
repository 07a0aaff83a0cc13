use thiserror::Error;

use crate::Real;

pub type TjResult<T> = Result<T, TjError>;

/// Failures in the shared numeric layer.
///
/// The trajectory crates each carry richer error enums of their own; these
/// are the low-level failures they wrap when a value or series cannot be
/// represented at all.
#[derive(Error, Debug)]
pub enum TjError {
    /// A quantity that must be finite came out NaN or infinite.
    #[error("Non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: Real },

    /// Input that cannot describe a valid quantity.
    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    /// A structural consistency check failed after construction.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}
