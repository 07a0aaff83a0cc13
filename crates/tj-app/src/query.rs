//! Query helpers for extracting data from loaded runs.

use tj_series::{TimeseriesTable, VarCategory};

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and shape.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub row_count: usize,
    pub column_count: usize,
}

/// Get run summary from an assembled table.
pub fn get_run_summary(table: &TimeseriesTable) -> AppResult<RunSummary> {
    let time = table
        .column(VarCategory::Time, "time")
        .ok_or_else(|| AppError::InvalidInput("Run has no time column".to_string()))?;

    let (t_min, t_max) = match (time.first_set(), time.last_set()) {
        (Some((_, first)), Some((_, last))) => (first[0], last[0]),
        _ => return Err(AppError::InvalidInput("Time column is empty".to_string())),
    };

    Ok(RunSummary {
        time_range: (t_min, t_max),
        row_count: table.num_rows(),
        column_count: table.columns().len(),
    })
}

/// List all column paths in a run.
pub fn list_column_paths(table: &TimeseriesTable) -> Vec<String> {
    table.columns().iter().map(|c| c.path()).collect()
}

/// Extract a `(time, value)` series for one column path.
///
/// Only rows where both the time column and the target column are set
/// appear in the output; on compressed grids some columns do not cover
/// every row.
pub fn extract_series(table: &TimeseriesTable, path: &str) -> AppResult<Vec<(f64, f64)>> {
    let time = table
        .column(VarCategory::Time, "time")
        .ok_or_else(|| AppError::InvalidInput("Run has no time column".to_string()))?;
    let target = table
        .column_at_path(path)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown column: {}", path)))?;
    if target.width != 1 {
        return Err(AppError::InvalidInput(format!(
            "Column is not scalar: {}",
            path
        )));
    }

    let mut series = Vec::new();
    for row in 0..table.num_rows() {
        if let (Some(t), Some(v)) = (time.value(row), target.value(row)) {
            series.push((t, v));
        }
    }
    Ok(series)
}

/// First set value of a scalar column.
pub fn first_value(table: &TimeseriesTable, path: &str) -> AppResult<f64> {
    let column = scalar_column(table, path)?;
    column
        .first_set()
        .map(|(_, values)| values[0])
        .ok_or_else(|| AppError::InvalidInput(format!("Column has no set rows: {}", path)))
}

/// Last set value of a scalar column.
pub fn last_value(table: &TimeseriesTable, path: &str) -> AppResult<f64> {
    let column = scalar_column(table, path)?;
    column
        .last_set()
        .map(|(_, values)| values[0])
        .ok_or_else(|| AppError::InvalidInput(format!("Column has no set rows: {}", path)))
}

fn scalar_column<'a>(
    table: &'a TimeseriesTable,
    path: &str,
) -> AppResult<&'a tj_series::TimeseriesColumn> {
    let column = table
        .column_at_path(path)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown column: {}", path)))?;
    if column.width != 1 {
        return Err(AppError::InvalidInput(format!(
            "Column is not scalar: {}",
            path
        )));
    }
    Ok(column)
}
