//! Project validation logic.

use crate::schema::{ControlDef, GuessDef, ParameterDef, PhaseDef, Project, StateDef, TimeDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

const KNOWN_TRANSCRIPTIONS: [&str; 2] = ["gauss-lobatto", "radau-ps"];

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut phase_ids = HashSet::new();
    for phase in &project.phases {
        if !phase_ids.insert(&phase.id) {
            return Err(ValidationError::DuplicateId {
                id: phase.id.clone(),
                context: "phases".to_string(),
            });
        }
        validate_phase(phase)?;
    }

    Ok(())
}

fn validate_phase(phase: &PhaseDef) -> Result<(), ValidationError> {
    if !KNOWN_TRANSCRIPTIONS.contains(&phase.transcription.as_str()) {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' transcription", phase.id),
            value: phase.transcription.clone(),
            reason: "expected gauss-lobatto or radau-ps".to_string(),
        });
    }
    if phase.num_segments == 0 {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' num_segments", phase.id),
            value: "0".to_string(),
            reason: "need at least one segment".to_string(),
        });
    }
    if phase.order == 0 {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' order", phase.id),
            value: "0".to_string(),
            reason: "polynomial order must be positive".to_string(),
        });
    }

    validate_time(phase, &phase.time)?;

    let mut state_names = HashSet::new();
    for state in &phase.states {
        if !state_names.insert(&state.name) {
            return Err(ValidationError::DuplicateId {
                id: state.name.clone(),
                context: format!("phase '{}' states", phase.id),
            });
        }
        validate_state(phase, state)?;
    }

    let mut control_names = HashSet::new();
    for control in &phase.controls {
        if !control_names.insert(&control.name) {
            return Err(ValidationError::DuplicateId {
                id: control.name.clone(),
                context: format!("phase '{}' controls", phase.id),
            });
        }
        validate_control(phase, control)?;
    }

    let mut parameter_names = HashSet::new();
    for parameter in &phase.parameters {
        if !parameter_names.insert(&parameter.name) {
            return Err(ValidationError::DuplicateId {
                id: parameter.name.clone(),
                context: format!("phase '{}' parameters", phase.id),
            });
        }
        validate_parameter(phase, parameter)?;
    }

    if let Some(objective) = &phase.objective {
        validate_objective(phase, &state_names, &control_names, objective)?;
    }

    Ok(())
}

fn validate_time(phase: &PhaseDef, time: &TimeDef) -> Result<(), ValidationError> {
    if !time.initial_s.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' time.initial_s", phase.id),
            value: time.initial_s.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    if let Some((lo, hi)) = time.duration_bounds_s {
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || hi < lo {
            return Err(ValidationError::InvalidValue {
                field: format!("phase '{}' time.duration_bounds_s", phase.id),
                value: format!("({lo}, {hi})"),
                reason: "need finite bounds with 0 < lo <= hi".to_string(),
            });
        }
    }
    if let Some(guess) = time.duration_guess_s
        && (!guess.is_finite() || guess <= 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' time.duration_guess_s", phase.id),
            value: guess.to_string(),
            reason: "must be a positive duration".to_string(),
        });
    }
    Ok(())
}

fn validate_state(phase: &PhaseDef, state: &StateDef) -> Result<(), ValidationError> {
    if let Some(guess) = &state.guess {
        validate_guess(
            &format!("phase '{}' state '{}' guess", phase.id, state.name),
            guess,
        )?;
    }
    Ok(())
}

fn validate_control(phase: &PhaseDef, control: &ControlDef) -> Result<(), ValidationError> {
    if let (Some(lo), Some(hi)) = (control.lower, control.upper)
        && lo > hi
    {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' control '{}' bounds", phase.id, control.name),
            value: format!("({lo}, {hi})"),
            reason: "lower exceeds upper".to_string(),
        });
    }
    for (label, value) in [
        ("lower", control.lower),
        ("upper", control.upper),
        ("scale_ref", control.scale_ref),
        ("scale_ref0", control.scale_ref0),
    ] {
        if let Some(v) = value
            && !v.is_finite()
        {
            return Err(ValidationError::InvalidValue {
                field: format!(
                    "phase '{}' control '{}' {}",
                    phase.id, control.name, label
                ),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    if let Some(guess) = &control.guess {
        validate_guess(
            &format!("phase '{}' control '{}' guess", phase.id, control.name),
            guess,
        )?;
    }
    Ok(())
}

fn validate_parameter(phase: &PhaseDef, parameter: &ParameterDef) -> Result<(), ValidationError> {
    if !parameter.val.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' parameter '{}' val", phase.id, parameter.name),
            value: parameter.val.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_guess(field: &str, guess: &GuessDef) -> Result<(), ValidationError> {
    if guess.ys.len() < 2 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: format!("{} breakpoints", guess.ys.len()),
            reason: "need at least two breakpoints".to_string(),
        });
    }
    if guess.ys.iter().any(|y| !y.is_finite()) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: "ys".to_string(),
            reason: "breakpoints must be finite".to_string(),
        });
    }
    if let Some(xs) = &guess.xs {
        if xs.len() != guess.ys.len() {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: format!("{} xs vs {} ys", xs.len(), guess.ys.len()),
                reason: "xs and ys must have equal length".to_string(),
            });
        }
        if xs.iter().any(|x| !x.is_finite()) || xs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: "xs".to_string(),
                reason: "xs must be finite and strictly increasing".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_objective(
    phase: &PhaseDef,
    state_names: &HashSet<&String>,
    control_names: &HashSet<&String>,
    objective: &crate::schema::ObjectiveDef,
) -> Result<(), ValidationError> {
    if objective.loc != "initial" && objective.loc != "final" {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' objective.loc", phase.id),
            value: objective.loc.clone(),
            reason: "expected initial or final".to_string(),
        });
    }
    if !objective.scaler.is_finite() || objective.scaler == 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("phase '{}' objective.scaler", phase.id),
            value: objective.scaler.to_string(),
            reason: "must be finite and nonzero".to_string(),
        });
    }

    let var = objective.var.as_str();
    let known = match var.split_once(':') {
        None => var == "time" || var == "time_phase",
        Some(("state", name)) => state_names.contains(&name.to_string()),
        Some(("control", name)) => control_names.contains(&name.to_string()),
        Some(_) => false,
    };
    if !known {
        return Err(ValidationError::MissingReference {
            id: objective.var.clone(),
            context: format!("phase '{}' objective.var", phase.id),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn base_project() -> Project {
        Project {
            version: 1,
            name: "t".to_string(),
            phases: vec![PhaseDef {
                id: "p0".to_string(),
                name: "p0".to_string(),
                transcription: "radau-ps".to_string(),
                num_segments: 4,
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
                    rate_source: None,
                    fix_initial: true,
                    fix_final: true,
                    guess: Some(GuessDef {
                        ys: vec![0.0, 10.0],
                        xs: None,
                    }),
                }],
                controls: vec![ControlDef {
                    name: "theta".to_string(),
                    units: "deg".to_string(),
                    opt: true,
                    continuity: true,
                    rate_continuity: true,
                    lower: Some(0.01),
                    upper: Some(179.9),
                    scale_ref: Some(1.0),
                    scale_ref0: Some(0.0),
                    guess: None,
                }],
                parameters: vec![ParameterDef {
                    name: "g".to_string(),
                    units: "m/s**2".to_string(),
                    opt: false,
                    val: 9.80665,
                }],
                objective: Some(ObjectiveDef {
                    var: "time_phase".to_string(),
                    loc: "final".to_string(),
                    scaler: 10.0,
                }),
            }],
        }
    }

    #[test]
    fn valid_project_passes() {
        assert!(validate_project(&base_project()).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut project = base_project();
        project.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_state_names() {
        let mut project = base_project();
        let dup = project.phases[0].states[0].clone();
        project.phases[0].states.push(dup);
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_unknown_transcription() {
        let mut project = base_project();
        project.phases[0].transcription = "hermite-simpson".to_string();
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_inverted_control_bounds() {
        let mut project = base_project();
        project.phases[0].controls[0].lower = Some(2.0);
        project.phases[0].controls[0].upper = Some(1.0);
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_dangling_objective() {
        let mut project = base_project();
        project.phases[0].objective = Some(ObjectiveDef {
            var: "state:nope".to_string(),
            loc: "final".to_string(),
            scaler: 1.0,
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn rejects_short_guess() {
        let mut project = base_project();
        project.phases[0].states[0].guess = Some(GuessDef {
            ys: vec![1.0],
            xs: None,
        });
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_bad_duration_bounds() {
        let mut project = base_project();
        project.phases[0].time.duration_bounds_s = Some((0.0, 10.0));
        assert!(validate_project(&project).is_err());
    }
}
