//! tj-core: stable foundation for traject.
//!
//! Contains:
//! - units (uom angle constructors + physical constants)
//! - numeric (Real + float validation helpers)
//! - ids (typed compact handles for phase variables)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TjError, TjResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
