//! Project schema definitions.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub phases: Vec<PhaseDef>,
}

/// One trajectory phase: grid shape, variables, objective, guesses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseDef {
    pub id: String,
    pub name: String,
    /// Scheme name: `gauss-lobatto` or `radau-ps`.
    pub transcription: String,
    pub num_segments: usize,
    pub order: usize,
    #[serde(default = "default_compressed")]
    pub compressed: bool,
    pub time: TimeDef,
    #[serde(default)]
    pub states: Vec<StateDef>,
    #[serde(default)]
    pub controls: Vec<ControlDef>,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<ObjectiveDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    #[serde(default)]
    pub fix_initial: bool,
    #[serde(default)]
    pub initial_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_bounds_s: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_guess_s: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateDef {
    pub name: String,
    pub units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_source: Option<String>,
    #[serde(default)]
    pub fix_initial: bool,
    #[serde(default)]
    pub fix_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<GuessDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlDef {
    pub name: String,
    pub units: String,
    #[serde(default = "default_true")]
    pub opt: bool,
    #[serde(default = "default_true")]
    pub continuity: bool,
    #[serde(default = "default_true")]
    pub rate_continuity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_ref: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_ref0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<GuessDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDef {
    pub name: String,
    pub units: String,
    #[serde(default)]
    pub opt: bool,
    pub val: f64,
}

/// Interpolation breakpoints for an initial guess. `ys` are interpolated
/// linearly onto the variable's input nodes; `xs`, when present, gives the
/// breakpoint positions in phase tau (otherwise evenly spaced).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuessDef {
    pub ys: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectiveDef {
    /// Variable path: `time`, `time_phase`, `state:<name>` or `control:<name>`.
    pub var: String,
    /// `initial` or `final`.
    pub loc: String,
    #[serde(default = "default_scaler")]
    pub scaler: f64,
}

fn default_compressed() -> bool {
    true
}

fn default_true() -> bool {
    true
}

fn default_scaler() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_phase() -> PhaseDef {
        PhaseDef {
            id: "phase0".to_string(),
            name: "descent".to_string(),
            transcription: "gauss-lobatto".to_string(),
            num_segments: 8,
            order: 3,
            compressed: true,
            time: TimeDef {
                fix_initial: true,
                initial_s: 0.0,
                duration_bounds_s: Some((0.5, 10.0)),
                duration_guess_s: Some(2.0),
            },
            states: vec![StateDef {
                name: "x".to_string(),
                units: "m".to_string(),
                rate_source: Some("xdot".to_string()),
                fix_initial: true,
                fix_final: true,
                guess: Some(GuessDef {
                    ys: vec![0.0, 10.0],
                    xs: None,
                }),
            }],
            controls: vec![],
            parameters: vec![],
            objective: None,
        }
    }

    #[test]
    fn yaml_round_trip() {
        let project = Project {
            version: LATEST_VERSION,
            name: "demo".to_string(),
            phases: vec![minimal_phase()],
        };
        let yaml = serde_yaml::to_string(&project).unwrap();
        let back: Project = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(project, back);
    }

    #[test]
    fn defaults_apply_on_sparse_input() {
        let yaml = r#"
version: 1
name: sparse
phases:
  - id: p
    name: p
    transcription: radau-ps
    num_segments: 4
    order: 3
    time: {}
    controls:
      - name: theta
        units: deg
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        let phase = &project.phases[0];
        assert!(phase.compressed);
        assert_eq!(phase.time.initial_s, 0.0);
        let control = &phase.controls[0];
        assert!(control.opt);
        assert!(control.continuity);
        assert!(control.lower.is_none());
    }
}
