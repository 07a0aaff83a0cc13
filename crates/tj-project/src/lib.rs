//! tj-project: canonical project file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read, parse and validate a project from a YAML file.
pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Project> {
    let project: Project = serde_yaml::from_str(&std::fs::read_to_string(path)?)?;
    validate_project(&project)?;
    Ok(project)
}

/// Validate a project and write it to a YAML file. Invalid projects are
/// rejected before anything touches the disk.
pub fn save_yaml(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    Ok(std::fs::write(path, serde_yaml::to_string(project)?)?)
}

/// Read, parse and validate a project from a JSON file.
pub fn load_json(path: &std::path::Path) -> ProjectResult<Project> {
    let project: Project = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    validate_project(&project)?;
    Ok(project)
}

/// Validate a project and write it to a pretty-printed JSON file.
pub fn save_json(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    Ok(std::fs::write(path, serde_json::to_string_pretty(project)?)?)
}
