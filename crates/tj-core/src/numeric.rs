use crate::{TjError, TjResult};

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Reject NaN and infinities, naming the offending quantity.
pub fn ensure_finite(v: Real, what: &'static str) -> TjResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(TjError::NonFinite { what, value: v })
    }
}

/// Check every element of a slice, reporting the first offender.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> TjResult<()> {
    for &v in values {
        ensure_finite(v, what)?;
    }
    Ok(())
}

/// `n` evenly spaced values from `a` to `b` inclusive. Needs `n >= 2`.
pub fn linspace(a: Real, b: Real, n: usize) -> TjResult<Vec<Real>> {
    if n < 2 {
        return Err(TjError::InvalidArg(format!(
            "linspace needs at least two points, got {n}"
        )));
    }
    let step = (b - a) / (n - 1) as Real;
    let mut out: Vec<Real> = (0..n).map(|i| a + step * i as Real).collect();
    // pin the endpoint so downstream equality checks see exactly `b`
    out[n - 1] = b;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(ensure_finite(0.0, "test").is_ok());
    }

    #[test]
    fn ensure_all_finite_reports_first() {
        assert!(ensure_all_finite(&[0.0, 1.5, -2.0], "vals").is_ok());
        assert!(ensure_all_finite(&[0.0, Real::INFINITY], "vals").is_err());
    }

    #[test]
    fn linspace_endpoints_exact() {
        let xs = linspace(-1.0, 1.0, 9).unwrap();
        assert_eq!(xs.len(), 9);
        assert_eq!(xs[0], -1.0);
        assert_eq!(xs[8], 1.0);
        assert!((xs[4] - 0.0).abs() < 1e-15);
    }

    #[test]
    fn linspace_rejects_degenerate() {
        assert!(linspace(0.0, 1.0, 1).is_err());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn linspace_is_sorted(a in -1e3_f64..1e3, span in 1e-6_f64..1e3, n in 2_usize..50) {
                let b = a + span;
                let xs = linspace(a, b, n).unwrap();
                prop_assert_eq!(xs.len(), n);
                for w in xs.windows(2) {
                    prop_assert!(w[0] < w[1]);
                }
                prop_assert_eq!(xs[0], a);
                prop_assert_eq!(xs[n - 1], b);
            }
        }
    }
}
