//! Project loading, saving, validation, and introspection.

use std::path::Path;
use tj_project::schema::{PhaseDef, Project};

use crate::error::{AppError, AppResult};

/// Summary of a phase for listing.
#[derive(Debug, Clone)]
pub struct PhaseSummary {
    pub id: String,
    pub name: String,
    pub transcription: String,
    pub num_segments: usize,
    pub order: usize,
    pub num_states: usize,
    pub num_controls: usize,
}

/// Read and parse a project YAML file.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let project = serde_yaml::from_str(&content).map_err(tj_project::ProjectError::Yaml)?;
    Ok(project)
}

/// Serialize a project back to a YAML file.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let content = serde_yaml::to_string(project)
        .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?;
    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate project structure.
pub fn validate_project(project: &Project) -> AppResult<()> {
    tj_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;

    if project.phases.is_empty() {
        return Err(AppError::Validation(
            "Project must have at least one phase".to_string(),
        ));
    }

    Ok(())
}

/// List all phases in the project with summaries.
pub fn list_phases(project: &Project) -> Vec<PhaseSummary> {
    project
        .phases
        .iter()
        .map(|phase| PhaseSummary {
            id: phase.id.clone(),
            name: phase.name.clone(),
            transcription: phase.transcription.clone(),
            num_segments: phase.num_segments,
            order: phase.order,
            num_states: phase.states.len(),
            num_controls: phase.controls.len(),
        })
        .collect()
}

/// Get a specific phase by ID.
pub fn get_phase<'a>(project: &'a Project, phase_id: &str) -> AppResult<&'a PhaseDef> {
    project
        .phases
        .iter()
        .find(|p| p.id == phase_id)
        .ok_or_else(|| AppError::PhaseNotFound(phase_id.to_string()))
}
