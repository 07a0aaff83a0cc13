//! Per-variable value series tied to a node subset.

use tj_core::{Real, TjError, TjResult, ensure_all_finite};
use tj_grid::{GridData, NodeSubset};

use crate::error::PhaseError;

/// Values for one variable, one row per node of its source subset.
///
/// Rows are stored flat in row-major order; `width` is the number of
/// values per node (1 for scalar variables). A series never knows which
/// grid it came from, so consumers re-check its length against the grid
/// they pair it with.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSeries {
    subset: NodeSubset,
    width: usize,
    values: Vec<Real>,
}

impl VariableSeries {
    pub fn new(subset: NodeSubset, width: usize, values: Vec<Real>) -> TjResult<Self> {
        if width == 0 {
            return Err(TjError::InvalidArg(
                "series width must be positive".to_string(),
            ));
        }
        if values.len() % width != 0 {
            return Err(TjError::InvalidArg(format!(
                "series length {} is not a multiple of width {}",
                values.len(),
                width
            )));
        }
        ensure_all_finite(&values, "series values")?;
        Ok(Self {
            subset,
            width,
            values,
        })
    }

    /// Scalar series: one value per node.
    pub fn scalar(subset: NodeSubset, values: Vec<Real>) -> TjResult<Self> {
        Self::new(subset, 1, values)
    }

    pub fn subset(&self) -> NodeSubset {
        self.subset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (nodes covered).
    pub fn len(&self) -> usize {
        self.values.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row for subset position `i` (panics if out of bounds).
    pub fn row(&self, i: usize) -> &[Real] {
        &self.values[i * self.width..(i + 1) * self.width]
    }

    /// Scalar value at subset position `i`. Panics for vector series.
    pub fn value(&self, i: usize) -> Real {
        assert_eq!(self.width, 1, "value() is for scalar series");
        self.values[i]
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Check the row count against the subset's size on a concrete grid.
    pub fn check_against(&self, grid: &GridData, variable: &str) -> Result<(), PhaseError> {
        let expected = grid.subset_len(self.subset);
        if self.len() != expected {
            return Err(PhaseError::GuessLength {
                variable: variable.to_string(),
                subset: self.subset,
                expected,
                actual: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tj_grid::Transcription;

    #[test]
    fn scalar_series_round_trip() {
        let series = VariableSeries::scalar(NodeSubset::StateInput, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.width(), 1);
        assert_eq!(series.value(1), 2.0);
        assert_eq!(series.row(2), &[3.0]);
    }

    #[test]
    fn vector_series_rows() {
        let series =
            VariableSeries::new(NodeSubset::All, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.row(1), &[2.0, 3.0]);
    }

    #[test]
    fn rejects_ragged_values() {
        assert!(VariableSeries::new(NodeSubset::All, 2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(VariableSeries::new(NodeSubset::All, 0, vec![]).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(VariableSeries::scalar(NodeSubset::All, vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn check_against_grid_lengths() {
        let grid = GridData::new(Transcription::GaussLobatto, 8, 3, true).unwrap();
        let good =
            VariableSeries::scalar(NodeSubset::StateInput, vec![0.0; 9]).unwrap();
        assert!(good.check_against(&grid, "x").is_ok());

        let bad = VariableSeries::scalar(NodeSubset::StateInput, vec![0.0; 8]).unwrap();
        let err = bad.check_against(&grid, "x").unwrap_err();
        assert!(matches!(err, PhaseError::GuessLength { expected: 9, actual: 8, .. }));
    }
}
