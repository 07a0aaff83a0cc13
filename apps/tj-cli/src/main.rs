use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tj_app::{project_service, query, run_service, AppResult, RunOptions, RunRequest};
use tj_solve::SOLVER_VERSION;

#[derive(Parser)]
#[command(name = "tj-cli")]
#[command(about = "Traject CLI - Trajectory phase solving tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// List phases in a project
    Phases {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Solve a phase
    Run {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Phase ID to solve
        phase_id: String,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a phase
    Runs {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Phase ID to list runs for
        phase_id: String,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export time series data from a run
    ExportSeries {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Column path (e.g., time, states:x, controls:theta)
        column: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Phases { project_path } => cmd_phases(&project_path),
        Commands::Run {
            project_path,
            phase_id,
            no_cache,
        } => cmd_run(&project_path, &phase_id, !no_cache),
        Commands::Runs {
            project_path,
            phase_id,
        } => cmd_runs(&project_path, &phase_id),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(&project_path, &run_id),
        Commands::ExportSeries {
            project_path,
            run_id,
            column,
            output,
        } => cmd_export_series(&project_path, &run_id, &column, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_phases(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let phases = project_service::list_phases(&project);

    if phases.is_empty() {
        println!("No phases found in project");
    } else {
        println!("Phases in project:");
        for phase in phases {
            println!(
                "  {} - {} ({}, {} segments of order {}, {} states, {} controls)",
                phase.id,
                phase.name,
                phase.transcription,
                phase.num_segments,
                phase.order,
                phase.num_states,
                phase.num_controls
            );
        }
    }
    Ok(())
}

fn cmd_run(project_path: &Path, phase_id: &str, use_cache: bool) -> AppResult<()> {
    println!("Solving phase: {}", phase_id);

    let request = RunRequest {
        project_path,
        phase_id,
        options: RunOptions {
            use_cache,
            solver_version: SOLVER_VERSION.to_string(),
        },
    };

    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Solve completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    // Load results and show brief summary
    let (manifest, table) = run_service::load_run(project_path, &response.run_id)?;
    let summary = query::get_run_summary(&table)?;
    println!("  Phase duration: {:.6} s", manifest.duration_s);
    println!("  Rows: {}", summary.row_count);
    println!("  Columns: {}", summary.column_count);

    Ok(())
}

fn print_timing_summary(timing: &tj_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let compile_pct = 100.0 * timing.compile_time_s / total;
    let solve_pct = 100.0 * timing.solve_time_s / total;
    let save_pct = 100.0 * timing.save_time_s / total;

    println!("\nTiming summary:");
    println!(
        "  Compile: {:.3}s ({:.1}%)",
        timing.compile_time_s, compile_pct
    );
    println!("  Solve:   {:.3}s ({:.1}%)", timing.solve_time_s, solve_pct);
    println!("  Save:    {:.3}s ({:.1}%)", timing.save_time_s, save_pct);
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
    println!("  Newton iterations: {}", timing.solve_iterations);
    if timing.solve_residual_norm > 0.0 {
        println!("  Final residual: {:.3e}", timing.solve_residual_norm);
    }
}

fn cmd_runs(project_path: &Path, phase_id: &str) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, phase_id)?;

    if runs.is_empty() {
        println!("No cached runs found for phase: {}", phase_id);
    } else {
        println!("Cached runs for phase '{}':", phase_id);
        for manifest in runs {
            println!("  {} ({})", manifest.run_id, manifest.timestamp);
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, table) = run_service::load_run(project_path, run_id)?;
    let summary = query::get_run_summary(&table)?;

    println!("\nRun Summary:");
    println!("  Phase: {} ({})", manifest.phase_name, manifest.phase_id);
    println!(
        "  Grid: {}, {} segments of order {}",
        manifest.transcription, manifest.num_segments, manifest.order
    );
    println!("  Duration: {:.6} s", manifest.duration_s);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Rows: {}", summary.row_count);

    println!("\nColumns:");
    for path in query::list_column_paths(&table) {
        println!("  {}", path);
    }

    Ok(())
}

fn cmd_export_series(
    project_path: &Path,
    run_id: &str,
    column: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, table) = run_service::load_run(project_path, run_id)?;
    let series = query::extract_series(&table, column)?;

    // Build CSV
    let mut csv = String::from("time_s,value\n");
    for (t, val) in &series {
        csv.push_str(&format!("{},{}\n", t, val));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
