//! Timeseries assembly: scatter per-subset series onto the full grid.

use tj_core::Real;
use tj_grid::{GridData, NodeSubset, SubsetMap};
use tj_phase::VariableSeries;

use crate::table::{TimeseriesColumn, TimeseriesTable, VarCategory, column_path};

pub type AssembleResult<T> = Result<T, ConfigurationError>;

/// A wiring problem in the assembly request. Distinct from solver errors:
/// a table that fails to assemble was mis-specified, not unconverged.
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("timeseries column {column} declared twice")]
    DuplicateColumn { column: String },

    #[error(
        "timeseries column {column}: source width {actual} does not match column width {expected}"
    )]
    WidthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "timeseries column {column}: series on {subset} has {actual} rows but the subset has {expected} nodes"
    )]
    LengthMismatch {
        column: String,
        subset: NodeSubset,
        expected: usize,
        actual: usize,
    },

    #[error("timeseries column {column}: two sources write node {node}")]
    SourceOverlap { column: String, node: usize },
}

/// One contribution to a column.
#[derive(Debug, Clone)]
pub enum SeriesSource {
    /// Values on an enumerated subset, scattered to those nodes' rows.
    Subset(VariableSeries),
    /// A single row repeated at every node. Design parameters use this.
    Broadcast(Vec<Real>),
}

/// Declares one output column and the sources that fill it.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub category: VarCategory,
    pub name: String,
    pub units: String,
    pub width: usize,
    pub sources: Vec<SeriesSource>,
}

impl ColumnSpec {
    pub fn scalar(
        category: VarCategory,
        name: &str,
        units: &str,
        sources: Vec<SeriesSource>,
    ) -> Self {
        Self {
            category,
            name: name.to_string(),
            units: units.to_string(),
            width: 1,
            sources,
        }
    }

    pub fn broadcast(category: VarCategory, name: &str, units: &str, value: Real) -> Self {
        Self::scalar(category, name, units, vec![SeriesSource::Broadcast(vec![value])])
    }

    pub fn path(&self) -> String {
        column_path(self.category, &self.name)
    }
}

/// Builds the full-grid mirror table from per-subset series.
///
/// Row `k` of the table corresponds to grid node `k`. Every source must
/// match its column's width, and a subset source must carry exactly one
/// row per node of its subset. Rows no source covers stay unset; a node
/// covered by two sources of the same column is rejected.
pub fn assemble(grid: &GridData, specs: &[ColumnSpec]) -> AssembleResult<TimeseriesTable> {
    let num_rows = grid.num_nodes();
    let mut columns: Vec<TimeseriesColumn> = Vec::with_capacity(specs.len());

    for spec in specs {
        if columns
            .iter()
            .any(|c| c.category == spec.category && c.name == spec.name)
        {
            return Err(ConfigurationError::DuplicateColumn { column: spec.path() });
        }

        let mut column =
            TimeseriesColumn::unset(spec.category, &spec.name, &spec.units, spec.width, num_rows);

        for source in &spec.sources {
            match source {
                SeriesSource::Subset(series) => {
                    if series.width() != spec.width {
                        return Err(ConfigurationError::WidthMismatch {
                            column: spec.path(),
                            expected: spec.width,
                            actual: series.width(),
                        });
                    }
                    let map = SubsetMap::from_grid(grid, series.subset());
                    if series.len() != map.len() {
                        return Err(ConfigurationError::LengthMismatch {
                            column: spec.path(),
                            subset: series.subset(),
                            expected: map.len(),
                            actual: series.len(),
                        });
                    }
                    for (pos, &node) in map.nodes().iter().enumerate() {
                        if column.is_set(node) {
                            return Err(ConfigurationError::SourceOverlap {
                                column: spec.path(),
                                node,
                            });
                        }
                        column.write_row(node, series.row(pos));
                    }
                }
                SeriesSource::Broadcast(values) => {
                    if values.len() != spec.width {
                        return Err(ConfigurationError::WidthMismatch {
                            column: spec.path(),
                            expected: spec.width,
                            actual: values.len(),
                        });
                    }
                    for node in 0..num_rows {
                        if column.is_set(node) {
                            return Err(ConfigurationError::SourceOverlap {
                                column: spec.path(),
                                node,
                            });
                        }
                        column.write_row(node, values);
                    }
                }
            }
        }

        columns.push(column);
    }

    Ok(TimeseriesTable::new(num_rows, columns))
}
