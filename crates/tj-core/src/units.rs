// tj-core/src/units.rs

use uom::si::f64::Angle as UomAngle;

/// Canonical angle type (SI, f64). Solvers work in radians internally and
/// convert at the declared-units boundary.
pub type Angle = UomAngle;

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

pub mod constants {
    /// Standard gravity in m/s^2.
    pub const G0_MPS2: f64 = 9.806_65;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::angle::{degree, radian};

    #[test]
    fn angle_degree_radian_conversion() {
        let a = rad(core::f64::consts::PI);
        assert!((a.get::<degree>() - 180.0).abs() < 1e-12);
        let b = deg(90.0);
        assert!((b.get::<radian>() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
