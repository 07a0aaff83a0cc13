//! Per-variable configuration options.
//!
//! Plain data with `Default` impls; callers override the fields they care
//! about with struct-update syntax.

use tj_core::{ControlId, StateId};

/// Phase time configuration. The independent variable runs from
/// `initial_s` for a duration chosen by the solver within
/// `duration_bounds_s` (when set).
#[derive(Debug, Clone)]
pub struct TimeOptions {
    pub fix_initial: bool,
    pub initial_s: f64,
    pub duration_bounds_s: Option<(f64, f64)>,
    pub duration_guess_s: Option<f64>,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            fix_initial: false,
            initial_s: 0.0,
            duration_bounds_s: None,
            duration_guess_s: None,
        }
    }
}

/// State variable options. `rate_source` names the ODE output providing
/// the state's time derivative; the dynamics themselves live behind the
/// solver seam.
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    pub units: String,
    pub rate_source: Option<String>,
    pub fix_initial: bool,
    pub fix_final: bool,
}

/// Control variable options, including the optimizer-facing bounds and
/// reference scaling.
#[derive(Debug, Clone)]
pub struct ControlOptions {
    pub units: String,
    pub opt: bool,
    pub continuity: bool,
    pub rate_continuity: bool,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub scale_ref: Option<f64>,
    pub scale_ref0: Option<f64>,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            units: String::new(),
            opt: true,
            continuity: true,
            rate_continuity: true,
            lower: None,
            upper: None,
            scale_ref: None,
            scale_ref0: None,
        }
    }
}

/// Design parameter options: one scalar held constant across the phase.
#[derive(Debug, Clone, Default)]
pub struct ParamOptions {
    pub units: String,
    pub opt: bool,
    pub val: f64,
}

/// What the optimizer minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveVar {
    Time,
    TimePhase,
    State(StateId),
    Control(ControlId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveLoc {
    Initial,
    Final,
}

#[derive(Debug, Clone, Copy)]
pub struct Objective {
    pub var: ObjectiveVar,
    pub loc: ObjectiveLoc,
    pub scaler: f64,
}
