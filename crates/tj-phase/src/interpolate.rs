//! Linear interpolation of guess breakpoints onto grid subsets.

use tj_core::{Real, TjError, TjResult, ensure_all_finite, linspace};
use tj_grid::{GridData, NodeSubset};

/// Interpolate breakpoint values onto the nodes of `subset`.
///
/// `ys` are the breakpoint values. With `xs = None` the breakpoints are
/// evenly spaced across the phase; otherwise `xs` gives their relative
/// spacing and its span is mapped onto the whole phase. Returns one value
/// per subset node, in subset order, with the phase endpoints reproduced
/// exactly.
pub fn interpolate(
    grid: &GridData,
    subset: NodeSubset,
    xs: Option<&[Real]>,
    ys: &[Real],
) -> TjResult<Vec<Real>> {
    if ys.len() < 2 {
        return Err(TjError::InvalidArg(format!(
            "interpolation needs at least two breakpoints, got {}",
            ys.len()
        )));
    }
    ensure_all_finite(ys, "interpolation ys")?;

    let breakpoints = match xs {
        None => linspace(-1.0, 1.0, ys.len())?,
        Some(xs) => {
            if xs.len() != ys.len() {
                return Err(TjError::InvalidArg(format!(
                    "interpolation xs ({}) and ys ({}) must have equal length",
                    xs.len(),
                    ys.len()
                )));
            }
            ensure_all_finite(xs, "interpolation xs")?;
            if xs.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TjError::InvalidArg(
                    "interpolation xs must be strictly increasing".to_string(),
                ));
            }
            // Map the breakpoint span onto phase tau.
            let (lo, hi) = (xs[0], xs[xs.len() - 1]);
            let scale = 2.0 / (hi - lo);
            xs.iter().map(|&x| -1.0 + (x - lo) * scale).collect()
        }
    };

    let values = grid
        .subset(subset)
        .iter()
        .map(|&node| sample(&breakpoints, ys, grid.node_ptau()[node]))
        .collect();
    Ok(values)
}

fn sample(xs: &[Real], ys: &[Real], t: Real) -> Real {
    let n = xs.len();
    if t <= xs[0] {
        return ys[0];
    }
    if t >= xs[n - 1] {
        return ys[n - 1];
    }
    // First breakpoint strictly greater than t; t is interior so k in 1..n.
    let k = xs.partition_point(|&x| x <= t);
    let (x0, x1) = (xs[k - 1], xs[k]);
    let (y0, y1) = (ys[k - 1], ys[k]);
    y0 + (y1 - y0) * (t - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tj_grid::Transcription;

    #[test]
    fn two_point_guess_spans_the_phase() {
        let grid = GridData::new(Transcription::GaussLobatto, 8, 3, true).unwrap();
        let values = interpolate(&grid, NodeSubset::StateInput, None, &[0.0, 10.0]).unwrap();
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], 0.0);
        assert_eq!(*values.last().unwrap(), 10.0);
        // phase midpoint is a state-input node on an even grid
        assert!((values[4] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn explicit_xs_are_rescaled_onto_the_phase() {
        let grid = GridData::new(Transcription::Radau, 4, 3, true).unwrap();
        // same shape expressed on a different breakpoint span
        let even = interpolate(&grid, NodeSubset::ControlInput, None, &[1.0, 3.0, 2.0]).unwrap();
        let scaled = interpolate(
            &grid,
            NodeSubset::ControlInput,
            Some(&[0.0, 5.0, 10.0]),
            &[1.0, 3.0, 2.0],
        )
        .unwrap();
        for (a, b) in even.iter().zip(&scaled) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn piecewise_segments_interpolate_linearly() {
        let grid = GridData::new(Transcription::GaussLobatto, 2, 3, true).unwrap();
        let values = interpolate(&grid, NodeSubset::All, None, &[0.0, 1.0, 0.0]).unwrap();
        let ptau = grid.node_ptau();
        for (v, &t) in values.iter().zip(ptau) {
            let expected = 1.0 - t.abs();
            assert!((v - expected).abs() < 1e-12, "t={t}");
        }
    }

    #[test]
    fn rejects_bad_breakpoints() {
        let grid = GridData::new(Transcription::Radau, 2, 3, true).unwrap();
        assert!(interpolate(&grid, NodeSubset::All, None, &[1.0]).is_err());
        assert!(interpolate(&grid, NodeSubset::All, Some(&[0.0, 0.0]), &[1.0, 2.0]).is_err());
        assert!(interpolate(&grid, NodeSubset::All, Some(&[0.0]), &[1.0, 2.0]).is_err());
        assert!(interpolate(&grid, NodeSubset::All, None, &[1.0, f64::NAN]).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn values_stay_within_breakpoint_range(
                ys in proptest::collection::vec(-1e3_f64..1e3, 2..8),
                segs in 1_usize..6,
            ) {
                let grid = GridData::new(Transcription::GaussLobatto, segs, 3, true).unwrap();
                let values = interpolate(&grid, NodeSubset::All, None, &ys).unwrap();
                let lo = ys.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                for v in values {
                    prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
                }
            }
        }
    }
}
