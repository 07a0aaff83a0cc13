//! Timeseries data types.

use serde::{Deserialize, Serialize};
use tj_core::Real;

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub phase_id: String,
    pub phase_name: String,
    pub timestamp: String,
    pub transcription: String,
    pub num_segments: usize,
    pub order: usize,
    pub compressed: bool,
    pub duration_s: f64,
    pub solver_version: String,
}

/// Which kind of variable a timeseries column mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarCategory {
    Time,
    State,
    Control,
    DesignParameter,
}

impl VarCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarCategory::Time => "time",
            VarCategory::State => "states",
            VarCategory::Control => "controls",
            VarCategory::DesignParameter => "design_parameters",
        }
    }
}

impl std::fmt::Display for VarCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column path as users address it: `time`, `time_phase`, `states:x`,
/// `controls:theta`, `design_parameters:g`.
pub fn column_path(category: VarCategory, name: &str) -> String {
    match category {
        VarCategory::Time => name.to_string(),
        _ => format!("{}:{}", category.as_str(), name),
    }
}

/// Parses a column path back into category and variable name.
pub fn parse_path(path: &str) -> Option<(VarCategory, &str)> {
    match path.split_once(':') {
        None => Some((VarCategory::Time, path)),
        Some(("states", name)) => Some((VarCategory::State, name)),
        Some(("controls", name)) => Some((VarCategory::Control, name)),
        Some(("design_parameters", name)) => Some((VarCategory::DesignParameter, name)),
        Some(_) => None,
    }
}

/// One mirrored variable over every grid node. Rows that no source
/// covered stay unset and read back as `None`, never as zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesColumn {
    pub category: VarCategory,
    pub name: String,
    pub units: String,
    pub width: usize,
    values: Vec<Real>,
    set: Vec<bool>,
}

impl TimeseriesColumn {
    pub(crate) fn unset(
        category: VarCategory,
        name: &str,
        units: &str,
        width: usize,
        num_rows: usize,
    ) -> Self {
        Self {
            category,
            name: name.to_string(),
            units: units.to_string(),
            width,
            values: vec![0.0; num_rows * width],
            set: vec![false; num_rows],
        }
    }

    pub(crate) fn write_row(&mut self, row: usize, values: &[Real]) {
        let start = row * self.width;
        self.values[start..start + self.width].copy_from_slice(values);
        self.set[row] = true;
    }

    pub fn path(&self) -> String {
        column_path(self.category, &self.name)
    }

    pub fn num_rows(&self) -> usize {
        self.set.len()
    }

    pub fn is_set(&self, row: usize) -> bool {
        self.set.get(row).copied().unwrap_or(false)
    }

    pub fn num_set(&self) -> usize {
        self.set.iter().filter(|&&s| s).count()
    }

    /// Row values, or `None` when the row is out of range or was never
    /// written by any source.
    pub fn row(&self, row: usize) -> Option<&[Real]> {
        if !self.is_set(row) {
            return None;
        }
        let start = row * self.width;
        Some(&self.values[start..start + self.width])
    }

    /// Scalar convenience for width-1 columns.
    pub fn value(&self, row: usize) -> Option<Real> {
        if self.width != 1 {
            return None;
        }
        self.row(row).map(|r| r[0])
    }

    pub fn first_set(&self) -> Option<(usize, &[Real])> {
        let row = self.set.iter().position(|&s| s)?;
        self.row(row).map(|r| (row, r))
    }

    pub fn last_set(&self) -> Option<(usize, &[Real])> {
        let row = self.set.iter().rposition(|&s| s)?;
        self.row(row).map(|r| (row, r))
    }
}

/// Assembled timeseries: one row per grid node, one column per mirrored
/// variable. Built by [`crate::assemble::assemble`] and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesTable {
    num_rows: usize,
    columns: Vec<TimeseriesColumn>,
}

impl TimeseriesTable {
    pub(crate) fn new(num_rows: usize, columns: Vec<TimeseriesColumn>) -> Self {
        Self { num_rows, columns }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn columns(&self) -> &[TimeseriesColumn] {
        &self.columns
    }

    pub fn column(&self, category: VarCategory, name: &str) -> Option<&TimeseriesColumn> {
        self.columns
            .iter()
            .find(|c| c.category == category && c.name == name)
    }

    pub fn column_at_path(&self, path: &str) -> Option<&TimeseriesColumn> {
        let (category, name) = parse_path(path)?;
        self.column(category, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for (category, name) in [
            (VarCategory::Time, "time"),
            (VarCategory::Time, "time_phase"),
            (VarCategory::State, "x"),
            (VarCategory::Control, "theta"),
            (VarCategory::DesignParameter, "g"),
        ] {
            let path = column_path(category, name);
            assert_eq!(parse_path(&path), Some((category, name)));
        }
        assert_eq!(parse_path("bogus:x"), None);
    }

    #[test]
    fn unset_rows_read_as_none() {
        let mut col = TimeseriesColumn::unset(VarCategory::State, "x", "m", 1, 4);
        col.write_row(0, &[1.5]);
        col.write_row(3, &[2.5]);

        assert_eq!(col.row(0), Some([1.5].as_slice()));
        assert_eq!(col.row(1), None);
        assert_eq!(col.value(2), None);
        assert_eq!(col.value(3), Some(2.5));
        assert_eq!(col.num_set(), 2);
        assert!(!col.is_set(99));
    }

    #[test]
    fn first_and_last_set_skip_gaps() {
        let mut col = TimeseriesColumn::unset(VarCategory::Control, "theta", "rad", 1, 5);
        col.write_row(1, &[0.2]);
        col.write_row(3, &[0.8]);

        assert_eq!(col.first_set(), Some((1, [0.2].as_slice())));
        assert_eq!(col.last_set(), Some((3, [0.8].as_slice())));

        let empty = TimeseriesColumn::unset(VarCategory::Control, "u", "1", 1, 5);
        assert_eq!(empty.first_set(), None);
        assert_eq!(empty.last_set(), None);
    }

    #[test]
    fn table_lookup_by_category_and_path() {
        let columns = vec![
            TimeseriesColumn::unset(VarCategory::Time, "time", "s", 1, 3),
            TimeseriesColumn::unset(VarCategory::State, "x", "m", 1, 3),
        ];
        let table = TimeseriesTable::new(3, columns);

        assert!(table.column(VarCategory::State, "x").is_some());
        assert!(table.column(VarCategory::Control, "x").is_none());
        assert_eq!(table.column_at_path("time").map(|c| c.path()), Some("time".to_string()));
        assert!(table.column_at_path("states:y").is_none());
    }
}
