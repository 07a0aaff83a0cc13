//! Phase solving entry point.

use tj_core::Real;
use tj_grid::{GridData, NodeSubset, Transcription};
use tj_phase::{Phase, VariableSeries};

use crate::cycloid::CycloidPath;
use crate::error::{SolveError, SolveResult};
use crate::newton::{NewtonConfig, NewtonResult};
use crate::problem::{MinTimeDescent, rad_to_units};
use crate::solution::{SolveStats, SolvedParameter, SolvedPhase, SolvedVariable};

pub const SOLVER_VERSION: &str = "0.1.0";

/// Everything a solve needs beyond the phase itself. Passed explicitly;
/// there is no ambient solver state.
#[derive(Default)]
pub struct SolveContext {
    pub newton: NewtonConfig,
}

/// A strategy that solves one configured phase to completion.
pub trait PhaseSolver {
    fn version(&self) -> &'static str;
    fn solve(&self, context: &SolveContext, phase: &Phase) -> SolveResult<SolvedPhase>;
}

/// Closed-form minimum-time descent solver.
pub struct MinTimeDescentSolver;

impl PhaseSolver for MinTimeDescentSolver {
    fn version(&self) -> &'static str {
        SOLVER_VERSION
    }

    fn solve(&self, context: &SolveContext, phase: &Phase) -> SolveResult<SolvedPhase> {
        let problem = MinTimeDescent::from_phase(phase)?;
        let (path, newton) = CycloidPath::solve(&problem, &context.newton)?;
        let duration = path.duration();

        if let Some((lo, hi)) = problem.duration_bounds_s
            && !(lo..=hi).contains(&duration)
        {
            return Err(SolveError::InvalidState {
                what: format!(
                    "converged duration {} s outside bounds ({}, {}) s",
                    duration, lo, hi
                ),
            });
        }

        tracing::debug!(
            phase = phase.name(),
            duration,
            iterations = newton.iterations,
            residual = newton.residual_norm,
            "phase solved"
        );

        build_solution(phase, &problem, &path, &newton)
    }
}

fn build_solution(
    phase: &Phase,
    problem: &MinTimeDescent,
    path: &CycloidPath,
    newton: &NewtonResult,
) -> SolveResult<SolvedPhase> {
    let grid = phase.grid();
    let duration = path.duration();
    let phase_times = grid.node_times(0.0, duration);

    let time = scalar_series(
        NodeSubset::All,
        grid.node_times(problem.t_initial_s, duration),
    )?;
    let time_phase = scalar_series(NodeSubset::All, phase_times.clone())?;

    let mut states = Vec::with_capacity(phase.states().len());
    for (index, var) in phase.states().iter().enumerate() {
        let f = |t: Real| {
            let phi = path.phi_at(t);
            match index {
                0 => path.x_at(phi),
                1 => path.y_at(phi),
                _ => path.speed_at(phi),
            }
        };
        let input = scalar_series(
            NodeSubset::StateInput,
            sample_nodes(grid, &phase_times, NodeSubset::StateInput, f),
        )?;
        let col = match grid.transcription() {
            Transcription::GaussLobatto => Some(scalar_series(
                NodeSubset::Col,
                sample_nodes(grid, &phase_times, NodeSubset::Col, f),
            )?),
            Transcription::Radau => None,
        };
        states.push(SolvedVariable {
            name: var.name.clone(),
            units: var.options.units.clone(),
            input,
            col,
        });
    }

    let control = &phase.controls()[0];
    let theta_rad = sample_nodes(grid, &phase_times, NodeSubset::ControlInput, |t| {
        path.angle_at(path.phi_at(t))
    });
    check_control_bounds(&control.name, &theta_rad, problem.theta_bounds_rad)?;
    let mut published = Vec::with_capacity(theta_rad.len());
    for &v in &theta_rad {
        published.push(rad_to_units(v, &control.options.units)?);
    }
    let controls = vec![SolvedVariable {
        name: control.name.clone(),
        units: control.options.units.clone(),
        input: scalar_series(NodeSubset::ControlInput, published)?,
        col: None,
    }];

    let parameters = phase
        .params()
        .iter()
        .map(|p| SolvedParameter {
            name: p.name.clone(),
            units: p.options.units.clone(),
            value: p.options.val,
        })
        .collect();

    Ok(SolvedPhase {
        phase_name: phase.name().to_string(),
        t_initial_s: problem.t_initial_s,
        duration_s: duration,
        time,
        time_phase,
        states,
        controls,
        parameters,
        stats: SolveStats {
            iterations: newton.iterations,
            residual_norm: newton.residual_norm,
        },
    })
}

fn sample_nodes(
    grid: &GridData,
    phase_times: &[Real],
    subset: NodeSubset,
    f: impl Fn(Real) -> Real,
) -> Vec<Real> {
    grid.subset(subset)
        .iter()
        .map(|&node| f(phase_times[node]))
        .collect()
}

fn scalar_series(subset: NodeSubset, values: Vec<Real>) -> SolveResult<VariableSeries> {
    VariableSeries::scalar(subset, values).map_err(|e| SolveError::Numeric {
        what: e.to_string(),
    })
}

fn check_control_bounds(
    name: &str,
    values_rad: &[Real],
    bounds: (Option<f64>, Option<f64>),
) -> SolveResult<()> {
    let (lower, upper) = bounds;
    for &v in values_rad {
        if let Some(lo) = lower
            && v < lo
        {
            return Err(SolveError::InvalidState {
                what: format!("control {} value {} rad below lower bound {} rad", name, v, lo),
            });
        }
        if let Some(hi) = upper
            && v > hi
        {
            return Err(SolveError::InvalidState {
                what: format!("control {} value {} rad above upper bound {} rad", name, v, hi),
            });
        }
    }
    Ok(())
}
