//! Minimum-time descent problem extracted from a configured phase.
//!
//! The solver supports one pattern: a phase with three states (horizontal
//! position, vertical position, speed, in declaration order), one steering
//! control and one gravity parameter, all boundary values pinned through
//! the variable guesses. Anything else is rejected at extraction time so
//! misconfiguration surfaces before any numerics run.

use tj_phase::{ObjectiveLoc, ObjectiveVar, Phase};
use uom::si::angle::radian;

use crate::error::{SolveError, SolveResult};

/// Boundary data and bounds for one minimum-time descent solve.
#[derive(Debug, Clone)]
pub struct MinTimeDescent {
    pub x0: f64,
    pub y0: f64,
    pub xf: f64,
    pub yf: f64,
    pub gravity: f64,
    /// Steering bounds in radians, converted from the control's units.
    pub theta_bounds_rad: (Option<f64>, Option<f64>),
    pub duration_bounds_s: Option<(f64, f64)>,
    pub t_initial_s: f64,
}

impl MinTimeDescent {
    /// Extract the problem from a phase, checking the supported pattern.
    pub fn from_phase(phase: &Phase) -> SolveResult<Self> {
        phase.validate()?;

        let states = phase.states();
        if states.len() != 3 {
            return Err(SolveError::ProblemSetup {
                what: format!(
                    "expected 3 states (horizontal, vertical, speed), found {}",
                    states.len()
                ),
            });
        }
        let controls = phase.controls();
        if controls.len() != 1 {
            return Err(SolveError::ProblemSetup {
                what: format!("expected 1 steering control, found {}", controls.len()),
            });
        }
        let params = phase.params();
        if params.len() != 1 {
            return Err(SolveError::ProblemSetup {
                what: format!("expected 1 gravity parameter, found {}", params.len()),
            });
        }

        // The arc geometry works in SI throughout; only angles convert.
        for (state, expected) in states.iter().zip(["m", "m", "m/s"]) {
            if state.options.units != expected {
                return Err(SolveError::ProblemSetup {
                    what: format!(
                        "state {} must use units '{}', got '{}'",
                        state.name, expected, state.options.units
                    ),
                });
            }
        }
        if params[0].options.units != "m/s^2" {
            return Err(SolveError::ProblemSetup {
                what: format!(
                    "gravity parameter must use units 'm/s^2', got '{}'",
                    params[0].options.units
                ),
            });
        }

        let (x0, xf) = state_endpoints(phase, 0, true)?;
        let (y0, yf) = state_endpoints(phase, 1, true)?;
        let (v0, _) = state_endpoints(phase, 2, false)?;

        if v0.abs() > 1e-9 {
            return Err(SolveError::ProblemSetup {
                what: format!("initial speed must be zero, got {}", v0),
            });
        }
        if xf <= x0 {
            return Err(SolveError::ProblemSetup {
                what: format!("final horizontal position {} must exceed initial {}", xf, x0),
            });
        }
        if yf >= y0 {
            return Err(SolveError::ProblemSetup {
                what: format!("final vertical position {} must lie below initial {}", yf, y0),
            });
        }

        let gravity = params[0].options.val;
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(SolveError::ProblemSetup {
                what: format!("gravity must be positive, got {}", gravity),
            });
        }

        let control = &controls[0];
        let lower = control
            .options
            .lower
            .map(|v| angle_to_rad(v, &control.options.units))
            .transpose()?;
        let upper = control
            .options
            .upper
            .map(|v| angle_to_rad(v, &control.options.units))
            .transpose()?;

        match phase.objective() {
            Some(objective) => {
                let time_like = matches!(
                    objective.var,
                    ObjectiveVar::Time | ObjectiveVar::TimePhase
                );
                if !time_like || objective.loc != ObjectiveLoc::Final {
                    return Err(SolveError::ProblemSetup {
                        what: "objective must minimize final time".to_string(),
                    });
                }
            }
            None => {
                return Err(SolveError::ProblemSetup {
                    what: "phase has no objective".to_string(),
                });
            }
        }

        Ok(Self {
            x0,
            y0,
            xf,
            yf,
            gravity,
            theta_bounds_rad: (lower, upper),
            duration_bounds_s: phase.time().duration_bounds_s,
            t_initial_s: phase.time().initial_s,
        })
    }
}

/// Pinned endpoint values for one state, read from its guess series.
fn state_endpoints(phase: &Phase, index: usize, need_final: bool) -> SolveResult<(f64, f64)> {
    let state = &phase.states()[index];
    if !state.options.fix_initial {
        return Err(SolveError::ProblemSetup {
            what: format!("state {} must fix its initial value", state.name),
        });
    }
    if need_final && !state.options.fix_final {
        return Err(SolveError::ProblemSetup {
            what: format!("state {} must fix its final value", state.name),
        });
    }
    let guess = state.guess.as_ref().ok_or_else(|| SolveError::ProblemSetup {
        what: format!("state {} has no guess to pin boundary values from", state.name),
    })?;
    Ok((guess.value(0), guess.value(guess.len() - 1)))
}

/// Converts a declared-units angle to radians.
pub fn angle_to_rad(value: f64, units: &str) -> SolveResult<f64> {
    match units {
        "rad" => Ok(value),
        "deg" => Ok(tj_core::units::deg(value).get::<radian>()),
        other => Err(SolveError::ProblemSetup {
            what: format!("unsupported angle units '{}'", other),
        }),
    }
}

/// Converts a radian angle into the declared units for publication.
pub fn rad_to_units(value: f64, units: &str) -> SolveResult<f64> {
    match units {
        "rad" => Ok(value),
        "deg" => {
            use uom::si::angle::degree;
            Ok(tj_core::units::rad(value).get::<degree>())
        }
        other => Err(SolveError::ProblemSetup {
            what: format!("unsupported angle units '{}'", other),
        }),
    }
}
