//! Run storage API.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::table::{RunManifest, TimeseriesTable};
use crate::{StoreError, StoreResult};

/// Directory-per-run storage: each run holds `manifest.json` plus the
/// assembled table in `timeseries.json`.
#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> StoreResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store rooted next to the project file, under `.traject/runs`.
    pub fn for_project(project_path: &Path) -> StoreResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| StoreError::InvalidPath {
                message: "project path has no parent directory".to_string(),
            })?;
        Self::new(project_dir.join(".traject").join("runs"))
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, table: &TimeseriesTable) -> StoreResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;
        fs::write(
            run_dir.join("manifest.json"),
            serde_json::to_string_pretty(manifest)?,
        )?;
        fs::write(
            run_dir.join("timeseries.json"),
            serde_json::to_string(table)?,
        )?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> StoreResult<RunManifest> {
        self.read_json(run_id, "manifest.json")
    }

    pub fn load_table(&self, run_id: &str) -> StoreResult<TimeseriesTable> {
        self.read_json(run_id, "timeseries.json")
    }

    /// Missing files surface as `RunNotFound`, covering half-written run
    /// directories as well as absent ones.
    fn read_json<T: DeserializeOwned>(&self, run_id: &str, file: &str) -> StoreResult<T> {
        let path = self.run_dir(run_id).join(file);
        if !path.exists() {
            return Err(StoreError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// All stored runs for one phase, in directory order.
    pub fn list_runs(&self, phase_id: &str) -> StoreResult<Vec<RunManifest>> {
        if !self.root_dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().to_string();
            if let Ok(manifest) = self.load_manifest(&run_id)
                && manifest.phase_id == phase_id
            {
                runs.push(manifest);
            }
        }
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> StoreResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
