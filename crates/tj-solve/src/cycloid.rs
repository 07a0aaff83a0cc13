//! Closed-form cycloid arc for the minimum-time descent.
//!
//! The optimal curve from rest is a cycloid generated by a circle of
//! radius `a` rolled through angle `phi`:
//!
//! ```text
//! x(phi) = x0 + a (phi - sin phi)
//! y(phi) = y0 - a (1 - cos phi)
//! v(phi) = 2 sqrt(g a) sin(phi / 2)
//! theta(phi) = phi / 2            (steering angle from vertical)
//! t(phi) = phi sqrt(a / g)
//! ```
//!
//! Fitting the arc to the target endpoint reduces to two equations in
//! `(a, phi_final)`. The rollout-to-drop ratio is monotone in `phi` on
//! `(0, 2 pi)`, so a short bisection brackets `phi_final` and Newton
//! polishes both unknowns to full precision.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolveError, SolveResult};
use crate::newton::{NewtonConfig, NewtonResult, newton_solve};
use crate::problem::MinTimeDescent;

/// A solved cycloid arc, valid for phase time in `[0, duration()]`.
#[derive(Debug, Clone)]
pub struct CycloidPath {
    pub x0: f64,
    pub y0: f64,
    pub gravity: f64,
    /// Rolling-circle radius `a`.
    pub radius: f64,
    /// Rollout angle at the target endpoint.
    pub phi_final: f64,
}

/// Rollout-to-drop ratio `(phi - sin phi) / (1 - cos phi)`.
fn rollout_ratio(phi: f64) -> f64 {
    (phi - phi.sin()) / (1.0 - phi.cos())
}

/// Brackets the rollout angle for a target ratio. The ratio is strictly
/// increasing on `(0, 2 pi)`, rising from 0 without bound, so bisection
/// cannot miss. A coarse answer is enough; Newton finishes the job.
fn seed_rollout(ratio: f64) -> f64 {
    let mut lo = 1e-6;
    let mut hi = 2.0 * std::f64::consts::PI - 1e-6;
    for _ in 0..16 {
        let mid = 0.5 * (lo + hi);
        if rollout_ratio(mid) < ratio {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

impl CycloidPath {
    /// Fit the arc to the problem's endpoints.
    pub fn solve(
        problem: &MinTimeDescent,
        config: &NewtonConfig,
    ) -> SolveResult<(Self, NewtonResult)> {
        let dx = problem.xf - problem.x0;
        let dy = problem.y0 - problem.yf;

        let phi_seed = seed_rollout(dx / dy);
        let radius_seed = dy / (1.0 - phi_seed.cos());
        let q0 = DVector::from_vec(vec![radius_seed, phi_seed]);

        let residual = |q: &DVector<f64>| -> SolveResult<DVector<f64>> {
            let (a, phi) = (q[0], q[1]);
            Ok(DVector::from_vec(vec![
                a * (phi - phi.sin()) - dx,
                a * (1.0 - phi.cos()) - dy,
            ]))
        };
        let jacobian = |q: &DVector<f64>| -> SolveResult<DMatrix<f64>> {
            let (a, phi) = (q[0], q[1]);
            Ok(DMatrix::from_row_slice(
                2,
                2,
                &[
                    phi - phi.sin(),
                    a * (1.0 - phi.cos()),
                    1.0 - phi.cos(),
                    a * phi.sin(),
                ],
            ))
        };

        let result = newton_solve(q0, residual, jacobian, config)?;
        let path = Self {
            x0: problem.x0,
            y0: problem.y0,
            gravity: problem.gravity,
            radius: result.x[0],
            phi_final: result.x[1],
        };
        if !(path.radius > 0.0 && path.phi_final > 0.0) {
            return Err(SolveError::Numeric {
                what: format!(
                    "cycloid fit left the physical branch: a = {}, phi = {}",
                    path.radius, path.phi_final
                ),
            });
        }
        Ok((path, result))
    }

    /// Descent duration in seconds.
    pub fn duration(&self) -> f64 {
        self.phi_final * (self.radius / self.gravity).sqrt()
    }

    /// Rollout angle at a phase time. Pinned to the exact endpoint values
    /// at the boundaries so sampled series honor the fixed endpoints.
    pub fn phi_at(&self, t_phase: f64) -> f64 {
        if t_phase <= 0.0 {
            0.0
        } else if t_phase >= self.duration() {
            self.phi_final
        } else {
            t_phase * (self.gravity / self.radius).sqrt()
        }
    }

    pub fn x_at(&self, phi: f64) -> f64 {
        self.x0 + self.radius * (phi - phi.sin())
    }

    pub fn y_at(&self, phi: f64) -> f64 {
        self.y0 - self.radius * (1.0 - phi.cos())
    }

    pub fn speed_at(&self, phi: f64) -> f64 {
        2.0 * (self.gravity * self.radius).sqrt() * (0.5 * phi).sin()
    }

    /// Steering angle from vertical, in radians.
    pub fn angle_at(&self, phi: f64) -> f64 {
        0.5 * phi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tj_core::constants::G0_MPS2;

    fn problem(x0: f64, y0: f64, xf: f64, yf: f64) -> MinTimeDescent {
        MinTimeDescent {
            x0,
            y0,
            xf,
            yf,
            gravity: G0_MPS2,
            theta_bounds_rad: (None, None),
            duration_bounds_s: None,
            t_initial_s: 0.0,
        }
    }

    #[test]
    fn ten_by_five_descent_matches_known_arc() {
        let (path, result) =
            CycloidPath::solve(&problem(0.0, 10.0, 10.0, 5.0), &NewtonConfig::default()).unwrap();

        assert!(result.converged);
        assert!((path.radius - 2.585_999_608_432_747).abs() < 1e-9);
        assert!((path.phi_final - 3.508_368_768_524_475).abs() < 1e-9);
        assert!((path.duration() - 1.801_603_122_453_081).abs() < 1e-9);
        assert!((path.speed_at(path.phi_final) - 9.902_853_124_226_372).abs() < 1e-9);
        assert!((path.angle_at(path.phi_final).to_degrees() - 100.507_361_705_981).abs() < 1e-6);
    }

    #[test]
    fn endpoints_hit_targets() {
        let problem = problem(1.0, 12.0, 9.0, 4.0);
        let (path, _) = CycloidPath::solve(&problem, &NewtonConfig::default()).unwrap();

        assert!((path.x_at(path.phi_final) - problem.xf).abs() < 1e-8);
        assert!((path.y_at(path.phi_final) - problem.yf).abs() < 1e-8);
        assert_eq!(path.x_at(0.0), problem.x0);
        assert_eq!(path.y_at(0.0), problem.y0);
        assert_eq!(path.speed_at(0.0), 0.0);
    }

    #[test]
    fn path_satisfies_the_descent_dynamics() {
        // xdot = v sin(theta), ydot = -v cos(theta), vdot = g cos(theta),
        // checked against central differences at interior times.
        let (path, _) =
            CycloidPath::solve(&problem(0.0, 10.0, 10.0, 5.0), &NewtonConfig::default()).unwrap();
        let tf = path.duration();
        let h = 1e-6;

        for frac in [0.1, 0.3, 0.5, 0.7, 0.9] {
            let t = frac * tf;
            let phi = path.phi_at(t);
            let theta = path.angle_at(phi);
            let v = path.speed_at(phi);

            let xdot = (path.x_at(path.phi_at(t + h)) - path.x_at(path.phi_at(t - h))) / (2.0 * h);
            let ydot = (path.y_at(path.phi_at(t + h)) - path.y_at(path.phi_at(t - h))) / (2.0 * h);
            let vdot =
                (path.speed_at(path.phi_at(t + h)) - path.speed_at(path.phi_at(t - h))) / (2.0 * h);

            assert!((xdot - v * theta.sin()).abs() < 1e-5);
            assert!((ydot + v * theta.cos()).abs() < 1e-5);
            assert!((vdot - path.gravity * theta.cos()).abs() < 1e-5);
        }
    }

    #[test]
    fn phi_is_pinned_at_the_boundaries() {
        let (path, _) =
            CycloidPath::solve(&problem(0.0, 10.0, 10.0, 5.0), &NewtonConfig::default()).unwrap();
        assert_eq!(path.phi_at(-1.0), 0.0);
        assert_eq!(path.phi_at(0.0), 0.0);
        assert_eq!(path.phi_at(path.duration()), path.phi_final);
        assert_eq!(path.phi_at(path.duration() + 1.0), path.phi_final);
        assert!(path.phi_at(0.5 * path.duration()) < path.phi_final);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fit_converges_and_conserves_energy(
                dx in 0.2f64..40.0,
                dy in 0.2f64..25.0,
            ) {
                let problem = problem(0.0, dy, dx, 0.0);
                let (path, result) =
                    CycloidPath::solve(&problem, &NewtonConfig::default()).unwrap();

                prop_assert!(result.converged);
                prop_assert!(path.phi_final > 0.0);
                prop_assert!(path.phi_final < 2.0 * std::f64::consts::PI);
                prop_assert!(path.duration() > 0.0);
                prop_assert!((path.x_at(path.phi_final) - dx).abs() < 1e-8);
                prop_assert!((path.y_at(path.phi_final)).abs() < 1e-8);

                // Speed at the endpoint follows from energy conservation
                // regardless of the arc shape.
                let vf = path.speed_at(path.phi_final);
                let expected = (2.0 * path.gravity * dy).sqrt();
                prop_assert!((vf - expected).abs() < 1e-6);
            }
        }
    }
}
