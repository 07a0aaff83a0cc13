//! tj-phase: phase configuration layer for traject.
//!
//! Provides:
//! - Variable options and typed registration (states, controls, parameters)
//! - Per-variable value series tied to grid subsets
//! - Linear guess interpolation onto subset nodes
//!
//! # Example
//!
//! ```
//! use tj_grid::{GridData, Transcription};
//! use tj_phase::{Phase, StateOptions};
//!
//! let grid = GridData::new(Transcription::GaussLobatto, 8, 3, true).unwrap();
//! let mut phase = Phase::new("descent", grid);
//! let x = phase.add_state("x", StateOptions::default()).unwrap();
//!
//! assert_eq!(phase.state(x).unwrap().name, "x");
//! ```

pub mod error;
pub mod interpolate;
pub mod options;
pub mod phase;
pub mod series;

// Re-exports for ergonomics
pub use error::{PhaseError, PhaseResult};
pub use interpolate::interpolate;
pub use options::{
    ControlOptions, Objective, ObjectiveLoc, ObjectiveVar, ParamOptions, StateOptions, TimeOptions,
};
pub use phase::{ControlVar, ParamVar, Phase, StateVar};
pub use series::VariableSeries;
