//! Phase configuration: grid plus typed variable registry.

use tj_core::{ControlId, ParamId, StateId};
use tj_grid::{GridData, NodeSubset};

use crate::error::{PhaseError, PhaseResult};
use crate::options::{
    ControlOptions, Objective, ObjectiveVar, ParamOptions, StateOptions, TimeOptions,
};
use crate::series::VariableSeries;

/// A registered state variable.
#[derive(Debug, Clone)]
pub struct StateVar {
    pub id: StateId,
    pub name: String,
    pub options: StateOptions,
    pub guess: Option<VariableSeries>,
}

/// A registered control variable.
#[derive(Debug, Clone)]
pub struct ControlVar {
    pub id: ControlId,
    pub name: String,
    pub options: ControlOptions,
    pub guess: Option<VariableSeries>,
}

/// A registered design parameter.
#[derive(Debug, Clone)]
pub struct ParamVar {
    pub id: ParamId,
    pub name: String,
    pub options: ParamOptions,
}

/// One continuous-time segment of a trajectory problem.
///
/// Owns its grid and variable registry. Adding a variable hands back a
/// typed id; every later access goes through that id, so there is no
/// string-path lookup to mistype after construction.
#[derive(Debug, Clone)]
pub struct Phase {
    name: String,
    grid: GridData,
    time: TimeOptions,
    states: Vec<StateVar>,
    controls: Vec<ControlVar>,
    params: Vec<ParamVar>,
    objective: Option<Objective>,
}

impl Phase {
    pub fn new(name: impl Into<String>, grid: GridData) -> Self {
        Self {
            name: name.into(),
            grid,
            time: TimeOptions::default(),
            states: Vec::new(),
            controls: Vec::new(),
            params: Vec::new(),
            objective: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &GridData {
        &self.grid
    }

    pub fn time(&self) -> &TimeOptions {
        &self.time
    }

    pub fn set_time_options(&mut self, time: TimeOptions) -> PhaseResult<()> {
        if !time.initial_s.is_finite() {
            return Err(PhaseError::InvalidOptions {
                what: format!("time.initial_s = {} must be finite", time.initial_s),
            });
        }
        if let Some((lo, hi)) = time.duration_bounds_s
            && (!(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || hi < lo)
        {
            return Err(PhaseError::InvalidOptions {
                what: format!("time.duration_bounds_s = ({lo}, {hi}) need 0 < lo <= hi"),
            });
        }
        self.time = time;
        Ok(())
    }

    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        options: StateOptions,
    ) -> PhaseResult<StateId> {
        let name = name.into();
        if self.states.iter().any(|s| s.name == name) {
            return Err(PhaseError::DuplicateName {
                kind: "state",
                name,
            });
        }
        let id = StateId::from_index(self.states.len() as u32);
        self.states.push(StateVar {
            id,
            name,
            options,
            guess: None,
        });
        Ok(id)
    }

    pub fn add_control(
        &mut self,
        name: impl Into<String>,
        options: ControlOptions,
    ) -> PhaseResult<ControlId> {
        let name = name.into();
        if self.controls.iter().any(|c| c.name == name) {
            return Err(PhaseError::DuplicateName {
                kind: "control",
                name,
            });
        }
        if let (Some(lo), Some(hi)) = (options.lower, options.upper)
            && lo > hi
        {
            return Err(PhaseError::InvalidOptions {
                what: format!("control '{name}' bounds ({lo}, {hi}) are inverted"),
            });
        }
        let id = ControlId::from_index(self.controls.len() as u32);
        self.controls.push(ControlVar {
            id,
            name,
            options,
            guess: None,
        });
        Ok(id)
    }

    pub fn add_design_parameter(
        &mut self,
        name: impl Into<String>,
        options: ParamOptions,
    ) -> PhaseResult<ParamId> {
        let name = name.into();
        if self.params.iter().any(|p| p.name == name) {
            return Err(PhaseError::DuplicateName {
                kind: "parameter",
                name,
            });
        }
        if !options.val.is_finite() {
            return Err(PhaseError::InvalidOptions {
                what: format!("parameter '{}' value {} must be finite", name, options.val),
            });
        }
        let id = ParamId::from_index(self.params.len() as u32);
        self.params.push(ParamVar { id, name, options });
        Ok(id)
    }

    /// Register the objective. The referenced variable must already exist.
    pub fn add_objective(&mut self, objective: Objective) -> PhaseResult<()> {
        let known = match objective.var {
            ObjectiveVar::Time | ObjectiveVar::TimePhase => true,
            ObjectiveVar::State(id) => (id.index() as usize) < self.states.len(),
            ObjectiveVar::Control(id) => (id.index() as usize) < self.controls.len(),
        };
        if !known {
            return Err(PhaseError::DanglingObjective);
        }
        if !objective.scaler.is_finite() || objective.scaler == 0.0 {
            return Err(PhaseError::InvalidOptions {
                what: format!("objective scaler {} must be finite and nonzero", objective.scaler),
            });
        }
        self.objective = Some(objective);
        Ok(())
    }

    /// Seed a state's solution guess. Guesses live on the state-input subset.
    pub fn set_state_guess(&mut self, id: StateId, series: VariableSeries) -> PhaseResult<()> {
        let idx = id.index() as usize;
        let state = self.states.get(idx).ok_or(PhaseError::UnknownId {
            kind: "state",
            id: id.index(),
        })?;
        if series.subset() != NodeSubset::StateInput {
            return Err(PhaseError::GuessSubset {
                variable: state.name.clone(),
                expected: NodeSubset::StateInput,
                actual: series.subset(),
            });
        }
        series.check_against(&self.grid, &state.name)?;
        self.states[idx].guess = Some(series);
        Ok(())
    }

    /// Seed a control's solution guess on the control-input subset.
    pub fn set_control_guess(&mut self, id: ControlId, series: VariableSeries) -> PhaseResult<()> {
        let idx = id.index() as usize;
        let control = self.controls.get(idx).ok_or(PhaseError::UnknownId {
            kind: "control",
            id: id.index(),
        })?;
        if series.subset() != NodeSubset::ControlInput {
            return Err(PhaseError::GuessSubset {
                variable: control.name.clone(),
                expected: NodeSubset::ControlInput,
                actual: series.subset(),
            });
        }
        series.check_against(&self.grid, &control.name)?;
        self.controls[idx].guess = Some(series);
        Ok(())
    }

    pub fn states(&self) -> &[StateVar] {
        &self.states
    }

    pub fn controls(&self) -> &[ControlVar] {
        &self.controls
    }

    pub fn params(&self) -> &[ParamVar] {
        &self.params
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn state(&self, id: StateId) -> Option<&StateVar> {
        self.states.get(id.index() as usize)
    }

    pub fn control(&self, id: ControlId) -> Option<&ControlVar> {
        self.controls.get(id.index() as usize)
    }

    pub fn param(&self, id: ParamId) -> Option<&ParamVar> {
        self.params.get(id.index() as usize)
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn find_control(&self, name: &str) -> Option<ControlId> {
        self.controls.iter().find(|c| c.name == name).map(|c| c.id)
    }

    pub fn find_param(&self, name: &str) -> Option<ParamId> {
        self.params.iter().find(|p| p.name == name).map(|p| p.id)
    }

    /// Whole-phase consistency check, run before handing the phase to a
    /// solver: every guess matches its subset length on this grid.
    pub fn validate(&self) -> PhaseResult<()> {
        for state in &self.states {
            if let Some(guess) = &state.guess {
                guess.check_against(&self.grid, &state.name)?;
            }
        }
        for control in &self.controls {
            if let Some(guess) = &control.guess {
                guess.check_against(&self.grid, &control.name)?;
            }
        }
        Ok(())
    }
}
