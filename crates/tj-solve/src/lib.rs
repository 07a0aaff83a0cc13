//! Minimum-time descent phase solver.
//!
//! This crate turns a configured phase into solved variable histories.
//! The optimal descent curve from rest is a cycloid with a closed form;
//! fitting it to the phase's boundary conditions is a two-unknown
//! root-finding problem handled by a bisection-seeded Newton iteration.
//! Solved series are sampled at the phase grid's node subsets, ready for
//! timeseries assembly.

pub mod cycloid;
pub mod error;
pub mod newton;
pub mod problem;
pub mod solution;
pub mod solve;

pub use cycloid::CycloidPath;
pub use error::{SolveError, SolveResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use problem::MinTimeDescent;
pub use solution::{SolveStats, SolvedParameter, SolvedPhase, SolvedVariable};
pub use solve::{MinTimeDescentSolver, PhaseSolver, SOLVER_VERSION, SolveContext};
