//! Compilation of phase definitions into solver-ready phases.

use tj_grid::{GridData, NodeSubset, Transcription};
use tj_phase::{
    interpolate, ControlOptions, Objective, ObjectiveLoc, ObjectiveVar, ParamOptions, Phase,
    StateOptions, TimeOptions, VariableSeries,
};
use tj_project::schema::{GuessDef, PhaseDef};

use crate::error::{AppError, AppResult};

/// Compile a phase definition into a solver-ready [`Phase`].
///
/// Guess breakpoints are interpolated onto the grid's input subsets here,
/// so the solver sees fully configured variables.
pub fn compile_phase(def: &PhaseDef) -> AppResult<Phase> {
    let transcription = Transcription::parse(&def.transcription).ok_or_else(|| {
        AppError::Compile(format!("Unknown transcription: {}", def.transcription))
    })?;

    let grid = GridData::new(transcription, def.num_segments, def.order, def.compressed)
        .map_err(|e| AppError::Compile(e.to_string()))?;

    let mut phase = Phase::new(def.name.clone(), grid);

    phase.set_time_options(TimeOptions {
        fix_initial: def.time.fix_initial,
        initial_s: def.time.initial_s,
        duration_bounds_s: def.time.duration_bounds_s,
        duration_guess_s: def.time.duration_guess_s,
    })?;

    for state in &def.states {
        let id = phase.add_state(
            state.name.clone(),
            StateOptions {
                units: state.units.clone(),
                rate_source: state.rate_source.clone(),
                fix_initial: state.fix_initial,
                fix_final: state.fix_final,
            },
        )?;
        if let Some(guess) = &state.guess {
            let series = guess_series(&phase, NodeSubset::StateInput, guess)?;
            phase.set_state_guess(id, series)?;
        }
    }

    for control in &def.controls {
        let id = phase.add_control(
            control.name.clone(),
            ControlOptions {
                units: control.units.clone(),
                opt: control.opt,
                continuity: control.continuity,
                rate_continuity: control.rate_continuity,
                lower: control.lower,
                upper: control.upper,
                scale_ref: control.scale_ref,
                scale_ref0: control.scale_ref0,
            },
        )?;
        if let Some(guess) = &control.guess {
            let series = guess_series(&phase, NodeSubset::ControlInput, guess)?;
            phase.set_control_guess(id, series)?;
        }
    }

    for parameter in &def.parameters {
        phase.add_design_parameter(
            parameter.name.clone(),
            ParamOptions {
                units: parameter.units.clone(),
                opt: parameter.opt,
                val: parameter.val,
            },
        )?;
    }

    // Added last so the referenced variable already exists.
    if let Some(objective) = &def.objective {
        let var = parse_objective_var(&phase, &objective.var)?;
        let loc = parse_objective_loc(&objective.loc)?;
        phase.add_objective(Objective {
            var,
            loc,
            scaler: objective.scaler,
        })?;
    }

    Ok(phase)
}

fn guess_series(phase: &Phase, subset: NodeSubset, guess: &GuessDef) -> AppResult<VariableSeries> {
    let values = interpolate(phase.grid(), subset, guess.xs.as_deref(), &guess.ys)
        .map_err(|e| AppError::Compile(format!("Guess interpolation failed: {}", e)))?;
    VariableSeries::scalar(subset, values).map_err(|e| AppError::Compile(e.to_string()))
}

/// Parse objective variable references like `time` or `state:x`.
fn parse_objective_var(phase: &Phase, var: &str) -> AppResult<ObjectiveVar> {
    match var.split_once(':') {
        None if var == "time" => Ok(ObjectiveVar::Time),
        None if var == "time_phase" => Ok(ObjectiveVar::TimePhase),
        Some(("state", name)) => phase.find_state(name).map(ObjectiveVar::State).ok_or_else(
            || AppError::Compile(format!("Objective references unknown state: {}", name)),
        ),
        Some(("control", name)) => phase
            .find_control(name)
            .map(ObjectiveVar::Control)
            .ok_or_else(|| {
                AppError::Compile(format!("Objective references unknown control: {}", name))
            }),
        _ => Err(AppError::Compile(format!(
            "Unknown objective variable: {}",
            var
        ))),
    }
}

fn parse_objective_loc(loc: &str) -> AppResult<ObjectiveLoc> {
    match loc {
        "initial" => Ok(ObjectiveLoc::Initial),
        "final" => Ok(ObjectiveLoc::Final),
        _ => Err(AppError::Compile(format!(
            "Unknown objective location: {}",
            loc
        ))),
    }
}
