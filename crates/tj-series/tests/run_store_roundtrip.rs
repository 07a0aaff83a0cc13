use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tj_grid::{GridData, NodeSubset, Transcription};
use tj_phase::VariableSeries;
use tj_series::{ColumnSpec, RunManifest, RunStore, SeriesSource, VarCategory, assemble};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn save_list_load_roundtrip() {
    let project_dir = unique_temp_dir("tj_series_project");
    fs::create_dir_all(&project_dir).expect("failed to create temp project dir");
    let project_path = project_dir.join("project.yaml");
    fs::write(&project_path, "version: 1\nname: test\n").expect("failed to write project file");

    let store = RunStore::for_project(&project_path).expect("failed to create run store");

    let grid = GridData::new(Transcription::GaussLobatto, 2, 3, true).expect("grid");
    let input_len = grid.subset_len(NodeSubset::StateInput);
    let series = VariableSeries::scalar(
        NodeSubset::StateInput,
        (0..input_len).map(|i| i as f64).collect(),
    )
    .expect("series");
    let specs = [
        ColumnSpec::scalar(VarCategory::State, "x", "m", vec![SeriesSource::Subset(series)]),
        ColumnSpec::broadcast(VarCategory::DesignParameter, "g", "m/s^2", 9.806_65),
    ];
    let table = assemble(&grid, &specs).expect("failed to assemble table");

    let manifest = RunManifest {
        run_id: "run-123".to_string(),
        phase_id: "phase0".to_string(),
        phase_name: "descent".to_string(),
        timestamp: "2026-08-01T00:00:00Z".to_string(),
        transcription: "gauss-lobatto".to_string(),
        num_segments: 2,
        order: 3,
        compressed: true,
        duration_s: 1.8,
        solver_version: "0.1.0".to_string(),
    };

    store
        .save_run(&manifest, &table)
        .expect("failed to save run");
    assert!(store.has_run("run-123"));

    let runs = store.list_runs("phase0").expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, "run-123");
    assert!(store.list_runs("other").expect("list").is_empty());

    let loaded_manifest = store
        .load_manifest("run-123")
        .expect("failed to load manifest");
    assert_eq!(loaded_manifest.phase_id, "phase0");

    let loaded = store.load_table("run-123").expect("failed to load table");
    assert_eq!(loaded.num_rows(), table.num_rows());
    let column = loaded
        .column(VarCategory::State, "x")
        .expect("column missing after reload");
    let original = table.column(VarCategory::State, "x").expect("column");
    for row in 0..loaded.num_rows() {
        assert_eq!(column.row(row), original.row(row));
    }

    store.delete_run("run-123").expect("failed to delete run");
    assert!(!store.has_run("run-123"));
    assert!(store.load_manifest("run-123").is_err());
}
