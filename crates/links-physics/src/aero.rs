//! Dimpled-ball aerodynamics: drag and Magnus lift from the spin ratio.
//!
//! Coefficients follow the empirical Bearman & Harvey fit. Drag grows
//! linearly with spin ratio; lift rises then falls as a quadratic, capped.

use glam::Vec3;

/// Gravitational acceleration (m/s^2).
pub const GRAVITY: f32 = 9.81;
/// Sea-level air density (kg/m^3).
pub const AIR_DENSITY: f32 = 1.225;
/// Regulation ball radius (m), 1.68 in diameter.
pub const BALL_RADIUS: f32 = 0.02135;
/// Regulation ball mass (kg), 1.62 oz.
pub const BALL_MASS: f32 = 0.04593;
/// Cross-sectional area (m^2).
pub const BALL_AREA: f32 = std::f32::consts::PI * BALL_RADIUS * BALL_RADIUS;

/// Drag coefficient with no spin.
pub const DRAG_BASE: f32 = 0.171;
/// Drag coefficient increase per unit spin ratio.
pub const DRAG_SPIN_SLOPE: f32 = 0.62;
/// Quadratic term of the lift fit.
pub const LIFT_QUADRATIC: f32 = -3.25;
/// Linear term of the lift fit.
pub const LIFT_LINEAR: f32 = 1.99;
/// Upper bound on the lift coefficient.
pub const LIFT_MAX: f32 = 0.4;

/// Below this airspeed (m/s) the ball has no meaningful flight left.
pub const MIN_AIRSPEED: f32 = 0.001;
/// Spin (rad/s) below which Magnus lift is ignored.
const MIN_MAGNUS_SPIN: f32 = 0.1;
/// Cross-product magnitude below which Magnus lift is ignored.
const MIN_MAGNUS_CROSS: f32 = 0.001;

/// Dimensionless spin ratio `spin * r / v`.
pub fn spin_ratio(spin_rate: f32, airspeed: f32) -> f32 {
    spin_rate * BALL_RADIUS / airspeed
}

pub fn drag_coefficient(spin_ratio: f32) -> f32 {
    DRAG_BASE + DRAG_SPIN_SLOPE * spin_ratio
}

pub fn lift_coefficient(spin_ratio: f32) -> f32 {
    (LIFT_QUADRATIC * spin_ratio * spin_ratio + LIFT_LINEAR * spin_ratio).min(LIFT_MAX)
}

/// `0.5 * rho * C * A * v^2 / m`: acceleration magnitude for a force coefficient.
fn coefficient_accel(coefficient: f32, airspeed: f32) -> f32 {
    0.5 * AIR_DENSITY * coefficient * BALL_AREA * airspeed * airspeed / BALL_MASS
}

/// Aerodynamic accelerations for one instant of flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroAccel {
    pub drag: Vec3,
    pub magnus: Vec3,
}

/// Drag and Magnus acceleration for a ball moving at `relative_velocity`
/// through the air mass with angular velocity `spin`.
///
/// Returns `None` when the airspeed is too small to normalize.
pub fn aero_accel(relative_velocity: Vec3, spin: Vec3) -> Option<AeroAccel> {
    let airspeed = relative_velocity.length();
    if airspeed < MIN_AIRSPEED {
        return None;
    }

    let spin_rate = spin.length();
    let ratio = spin_ratio(spin_rate, airspeed);

    let drag =
        -relative_velocity / airspeed * coefficient_accel(drag_coefficient(ratio), airspeed);

    let mut magnus = Vec3::ZERO;
    if spin_rate > MIN_MAGNUS_SPIN {
        let cross = spin.cross(relative_velocity);
        let cross_len = cross.length();
        if cross_len > MIN_MAGNUS_CROSS {
            magnus = cross / cross_len * coefficient_accel(lift_coefficient(ratio), airspeed);
        }
    }

    Some(AeroAccel { drag, magnus })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_grows_with_spin() {
        assert_eq!(drag_coefficient(0.0), DRAG_BASE);
        assert!(drag_coefficient(0.2) > drag_coefficient(0.1));
    }

    #[test]
    fn lift_rises_then_falls() {
        assert_eq!(lift_coefficient(0.0), 0.0);
        let peak = LIFT_LINEAR / (-2.0 * LIFT_QUADRATIC);
        assert!(lift_coefficient(peak) > lift_coefficient(peak * 0.5));
        assert!(lift_coefficient(peak) > lift_coefficient(peak * 1.5));
        assert!(lift_coefficient(peak) <= LIFT_MAX);
        // Past the root of the quadratic lift turns negative
        assert!(lift_coefficient(0.8) < 0.0);
    }

    #[test]
    fn stalled_ball_has_no_aero() {
        assert!(aero_accel(Vec3::new(0.0, 0.0005, 0.0), Vec3::new(-300.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn drag_opposes_relative_velocity() {
        let v = Vec3::new(3.0, 4.0, 12.0);
        let a = aero_accel(v, Vec3::ZERO).unwrap();
        assert!(a.drag.dot(v) < 0.0);
        assert!(a.drag.normalize().dot(-v.normalize()) > 0.9999);
        assert_eq!(a.magnus, Vec3::ZERO);
    }

    #[test]
    fn drag_matches_closed_form() {
        let v = Vec3::new(0.0, 0.0, 40.0);
        let a = aero_accel(v, Vec3::ZERO).unwrap();
        let expected = 0.5 * AIR_DENSITY * DRAG_BASE * BALL_AREA * 1600.0 / BALL_MASS;
        assert!((a.drag.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn backspin_lifts_a_ball_moving_downrange() {
        // Backspin about -x with travel along +z gives upward lift
        let a = aero_accel(Vec3::new(0.0, 5.0, 50.0), Vec3::new(-300.0, 0.0, 0.0)).unwrap();
        assert!(a.magnus.y > 0.0, "magnus = {:?}", a.magnus);
    }

    #[test]
    fn magnus_is_perpendicular_to_velocity() {
        let v = Vec3::new(2.0, 10.0, 45.0);
        let spin = Vec3::new(-250.0, 40.0, 0.0);
        let a = aero_accel(v, spin).unwrap();
        assert!(a.magnus.length() > 0.0);
        assert!(a.magnus.normalize().dot(v.normalize()).abs() < 1e-4);
    }

    #[test]
    fn spin_parallel_to_velocity_gives_no_magnus() {
        let v = Vec3::new(0.0, 0.0, 30.0);
        let a = aero_accel(v, Vec3::new(0.0, 0.0, 200.0)).unwrap();
        assert_eq!(a.magnus, Vec3::ZERO);
    }

    #[test]
    fn negligible_spin_gives_no_magnus() {
        let a = aero_accel(Vec3::new(0.0, 1.0, 30.0), Vec3::new(-0.05, 0.0, 0.0)).unwrap();
        assert_eq!(a.magnus, Vec3::ZERO);
    }
}
