//! Integration tests for minimum-time descent runs end-to-end

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tj_app::{project_service, query, run_service, AppError, RunOptions, RunRequest};

/// Copy a demo project into a fresh temp directory so each test owns its
/// run cache outright; tests run in parallel and share the demo files.
fn copy_to_temp(source: &Path, prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let dest = dir.join("project.yaml");
    std::fs::copy(source, &dest).expect("Failed to copy project file");
    dest
}

#[test]
fn test_min_time_descent_gauss_lobatto() {
    let source = Path::new("../../demos/projects/min_time_descent_gl.yaml");
    let project_path = &copy_to_temp(source, "tj_app_gl");

    // Verify project loads and validates
    let project = project_service::load_project(project_path).expect("Failed to load project");
    project_service::validate_project(&project).expect("Project validation failed");

    let phases = project_service::list_phases(&project);
    assert_eq!(phases.len(), 1, "Expected 1 phase in descent demo");
    assert_eq!(phases[0].id, "phase0");
    assert_eq!(phases[0].transcription, "gauss-lobatto");
    assert_eq!(phases[0].num_states, 3);

    // Round-trip through the service save path
    let resaved = project_path.with_file_name("resaved.yaml");
    project_service::save_project(&resaved, &project).expect("Failed to save project");
    let reloaded = project_service::load_project(&resaved).expect("Failed to reload project");
    assert_eq!(project, reloaded);

    // Run the phase
    let request = RunRequest {
        project_path,
        phase_id: "phase0",
        options: RunOptions {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
        },
    };

    let response = run_service::ensure_run(&request).expect("Run failed");
    let run_id = response.run_id.clone();

    // Verify run was saved
    let (manifest, table) =
        run_service::load_run(project_path, &run_id).expect("Failed to load run");
    assert_eq!(manifest.phase_id, "phase0");
    assert_eq!(manifest.solver_version, "0.1.0");
    assert!(
        (manifest.duration_s - 1.801_603).abs() < 1.0e-4,
        "Descent time should match the known optimum, got {}",
        manifest.duration_s
    );

    // Verify results structure
    let summary = query::get_run_summary(&table).expect("Failed to get summary");
    assert_eq!(summary.time_range.0, 0.0);
    assert!((summary.time_range.1 - manifest.duration_s).abs() < 1.0e-12);
    assert_eq!(summary.row_count, table.num_rows());
    assert!(summary.column_count >= 6, "time, states, control, parameter");

    // Boundary values reach the configured targets
    let x0 = query::first_value(&table, "states:x").expect("Failed to read x0");
    let y0 = query::first_value(&table, "states:y").expect("Failed to read y0");
    let v0 = query::first_value(&table, "states:v").expect("Failed to read v0");
    assert!(x0.abs() < 1.0e-9);
    assert!((y0 - 10.0).abs() < 1.0e-9);
    assert!(v0.abs() < 1.0e-9);

    let xf = query::last_value(&table, "states:x").expect("Failed to read xf");
    let yf = query::last_value(&table, "states:y").expect("Failed to read yf");
    let vf = query::last_value(&table, "states:v").expect("Failed to read vf");
    assert!((xf - 10.0).abs() < 1.0e-6);
    assert!((yf - 5.0).abs() < 1.0e-6);
    assert!((vf - 9.902_853).abs() < 1.0e-3);

    // Extracted series pair each set row with its time, in time order
    let x_series = query::extract_series(&table, "states:x").expect("Failed to extract x");
    assert!(x_series.len() > 2);
    assert!(
        x_series.windows(2).all(|w| w[0].0 < w[1].0),
        "Times should be strictly increasing"
    );

    // Test caching - second run with same parameters should load from cache
    let response2 = run_service::ensure_run(&request).expect("Second run failed");
    assert!(
        response2.loaded_from_cache,
        "Second identical run should always be from cache"
    );
    assert_eq!(
        response2.run_id, run_id,
        "Run ID should match for cached run"
    );

    // Verify runs listing
    let runs = run_service::list_runs(project_path, "phase0").expect("Failed to list runs");
    assert!(!runs.is_empty(), "Should have at least one run");
    assert!(
        runs.iter().any(|r| r.run_id == run_id),
        "Run should be in list"
    );
}

#[test]
fn test_min_time_descent_radau() {
    let source = Path::new("../../demos/projects/min_time_descent_radau.yaml");
    let project_path = &copy_to_temp(source, "tj_app_radau");

    let request = RunRequest {
        project_path,
        phase_id: "phase0",
        options: RunOptions::default(),
    };

    let response = run_service::ensure_run(&request).expect("Run failed");
    let (manifest, table) =
        run_service::load_run(project_path, &response.run_id).expect("Failed to load run");

    assert_eq!(manifest.transcription, "radau-ps");
    assert!((manifest.duration_s - 1.801_603).abs() < 1.0e-4);

    let xf = query::last_value(&table, "states:x").expect("Failed to read xf");
    let yf = query::last_value(&table, "states:y").expect("Failed to read yf");
    assert!((xf - 10.0).abs() < 1.0e-6);
    assert!((yf - 5.0).abs() < 1.0e-6);

    // The control is published in the declared units (degrees)
    let theta0 = query::first_value(&table, "controls:theta").expect("Failed to read theta0");
    let theta_f = query::last_value(&table, "controls:theta").expect("Failed to read thetaf");
    assert!(theta0.abs() < 1.0e-9);
    assert!((theta_f - 100.507).abs() < 1.0e-2);

    // Design parameter broadcast to every row
    let g_series = query::extract_series(&table, "design_parameters:g").expect("Failed to read g");
    assert_eq!(g_series.len(), table.num_rows());
    assert!(g_series.iter().all(|(_, g)| (*g - 9.806_65).abs() < 1.0e-12));
}

#[test]
fn test_run_with_cache_disabled() {
    // Work on a private copy so the cache state is fully owned by this test
    let source = Path::new("../../demos/projects/min_time_descent_gl.yaml");
    let project_path = copy_to_temp(source, "tj_app_no_cache");

    let request = RunRequest {
        project_path: &project_path,
        phase_id: "phase0",
        options: RunOptions {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
        },
    };

    let response1 = run_service::ensure_run(&request).expect("First run failed");
    let run_id = response1.run_id.clone();
    assert!(
        !response1.loaded_from_cache,
        "Fresh cache cannot produce a hit"
    );

    // Second run with cache disabled should NOT load from cache
    // (but will produce the same run_id and overwrite)
    let request_no_cache = RunRequest {
        project_path: &project_path,
        phase_id: "phase0",
        options: RunOptions {
            use_cache: false,
            solver_version: "0.1.0".to_string(),
        },
    };

    let response2 = run_service::ensure_run(&request_no_cache).expect("Second run failed");
    assert!(
        !response2.loaded_from_cache,
        "use_cache=false should force re-run"
    );
    assert_eq!(
        response2.run_id, run_id,
        "Same parameters should produce same run_id"
    );
}

#[test]
fn test_malformed_project_yaml_is_a_project_error() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("tj_app_bad_{}.yaml", nanos));
    std::fs::write(&path, "phases: [").expect("Failed to write file");

    let err = project_service::load_project(&path).expect_err("Malformed YAML must be rejected");
    assert!(matches!(err, AppError::Project(_)));
}

#[test]
fn test_unknown_phase_is_reported() {
    let project_path = Path::new("../../demos/projects/min_time_descent_gl.yaml");

    let request = RunRequest {
        project_path,
        phase_id: "no_such_phase",
        options: RunOptions::default(),
    };

    let err = run_service::ensure_run(&request).expect_err("Unknown phase must be rejected");
    assert!(matches!(err, AppError::PhaseNotFound(_)));
}
