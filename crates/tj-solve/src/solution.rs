//! Solved-phase output series.

use tj_phase::VariableSeries;

/// Convergence summary from the solve.
#[derive(Debug, Clone, Copy)]
pub struct SolveStats {
    pub iterations: usize,
    pub residual_norm: f64,
}

/// One solved variable's histories. `input` lives on the variable's
/// input subset; `col` carries collocation-interior values when the
/// transcription defines them (Gauss-Lobatto states) and is `None`
/// otherwise.
#[derive(Debug, Clone)]
pub struct SolvedVariable {
    pub name: String,
    pub units: String,
    pub input: VariableSeries,
    pub col: Option<VariableSeries>,
}

#[derive(Debug, Clone)]
pub struct SolvedParameter {
    pub name: String,
    pub units: String,
    pub value: f64,
}

/// Everything a converged phase solve produces. Owns its series; the
/// timeseries assembly downstream only reads them.
#[derive(Debug, Clone)]
pub struct SolvedPhase {
    pub phase_name: String,
    pub t_initial_s: f64,
    pub duration_s: f64,
    /// Absolute time at every grid node.
    pub time: VariableSeries,
    /// Time since phase start at every grid node.
    pub time_phase: VariableSeries,
    pub states: Vec<SolvedVariable>,
    pub controls: Vec<SolvedVariable>,
    pub parameters: Vec<SolvedParameter>,
    pub stats: SolveStats,
}

impl SolvedPhase {
    pub fn state(&self, name: &str) -> Option<&SolvedVariable> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn control(&self, name: &str) -> Option<&SolvedVariable> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&SolvedParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
