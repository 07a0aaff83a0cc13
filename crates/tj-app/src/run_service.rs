//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use tj_series::{
    assemble, compute_run_id, ColumnSpec, RunManifest, RunStore, SeriesSource, TimeseriesTable,
    VarCategory,
};
use tj_solve::{MinTimeDescentSolver, PhaseSolver, SolveContext, SolvedPhase, SOLVER_VERSION};

use crate::error::AppResult;
use crate::phase_compile;
use crate::project_service;

/// Options for executing runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: SOLVER_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub phase_id: &'a str,
    pub options: RunOptions,
}

/// Concise timing and execution summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    pub solve_iterations: usize,
    pub solve_residual_norm: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// Execute or load a run based on request.
///
/// The run ID hashes the phase definition and solver version, so a cache
/// hit means the stored table answers exactly this request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let project = project_service::load_project(request.project_path)?;
    let def = project_service::get_phase(&project, request.phase_id)?;

    let run_id = compute_run_id(def, &request.options.solver_version);
    let store = RunStore::for_project(request.project_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        tracing::info!(run_id = %run_id, "loaded run from cache");

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let compile_started = Instant::now();
    let phase = phase_compile::compile_phase(def)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let solve_started = Instant::now();
    let solver = MinTimeDescentSolver;
    let solved = solver.solve(&SolveContext::default(), &phase)?;
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();
    timing.solve_iterations = solved.stats.iterations;
    timing.solve_residual_norm = solved.stats.residual_norm;

    let save_started = Instant::now();
    let table = assemble(phase.grid(), &solved_to_columns(&solved))?;
    let manifest = RunManifest {
        run_id: run_id.clone(),
        phase_id: def.id.clone(),
        phase_name: def.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        transcription: def.transcription.clone(),
        num_segments: def.num_segments,
        order: def.order,
        compressed: def.compressed,
        duration_s: solved.duration_s,
        solver_version: request.options.solver_version.clone(),
    };
    store.save_run(&manifest, &table)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(
        run_id = %run_id,
        duration_s = solved.duration_s,
        iterations = solved.stats.iterations,
        "run solved and cached"
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// Lay a solved phase out as full-grid mirror columns.
///
/// Time covers every row. States scatter their input values, plus the
/// collocation interior values when the scheme produces them. Controls
/// cover their input nodes only, and design parameters broadcast one
/// value to all rows. Rows no source reaches stay unset.
pub fn solved_to_columns(solved: &SolvedPhase) -> Vec<ColumnSpec> {
    let mut specs = Vec::new();

    specs.push(ColumnSpec::scalar(
        VarCategory::Time,
        "time",
        "s",
        vec![SeriesSource::Subset(solved.time.clone())],
    ));
    specs.push(ColumnSpec::scalar(
        VarCategory::Time,
        "time_phase",
        "s",
        vec![SeriesSource::Subset(solved.time_phase.clone())],
    ));

    for state in &solved.states {
        let mut sources = vec![SeriesSource::Subset(state.input.clone())];
        if let Some(col) = &state.col {
            sources.push(SeriesSource::Subset(col.clone()));
        }
        specs.push(ColumnSpec::scalar(
            VarCategory::State,
            &state.name,
            &state.units,
            sources,
        ));
    }

    for control in &solved.controls {
        specs.push(ColumnSpec::scalar(
            VarCategory::Control,
            &control.name,
            &control.units,
            vec![SeriesSource::Subset(control.input.clone())],
        ));
    }

    for param in &solved.parameters {
        specs.push(ColumnSpec::broadcast(
            VarCategory::DesignParameter,
            &param.name,
            &param.units,
            param.value,
        ));
    }

    specs
}

/// List runs for a phase.
pub fn list_runs(project_path: &Path, phase_id: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;

    let mut runs = store.list_runs(phase_id)?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)); // Most recent first
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, TimeseriesTable)> {
    let store = RunStore::for_project(project_path)?;

    let manifest = store.load_manifest(run_id)?;
    let table = store.load_table(run_id)?;

    Ok((manifest, table))
}
