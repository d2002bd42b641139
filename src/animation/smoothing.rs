//! Frame-rate independent exponential smoothing

use crate::math::Vec3;

/// Fraction of the remaining distance covered in `dt` seconds at `rate`.
///
/// `1 - e^(-rate * dt)`, so two half steps cover exactly as much as one
/// full step. Invalid inputs give 0 (no movement).
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if !(rate > 0.0 && dt > 0.0) || !rate.is_finite() || !dt.is_finite() {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

pub fn exp_lerp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let next = current + (target - current) * smoothing_factor(rate, dt);
    if next.is_finite() { next } else { current }
}

pub fn exp_lerp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current
        .lerp(&target, smoothing_factor(rate, dt))
        .finite_or(current)
}

/// Clamp a host-supplied frame delta into `[0, max]`; garbage becomes 0
pub fn sanitize_delta(dt: f32, max: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_range() {
        assert_eq!(smoothing_factor(2.0, 0.0), 0.0);
        let f = smoothing_factor(2.0, 1.0 / 60.0);
        assert!(f > 0.0 && f < 1.0);
        assert_eq!(smoothing_factor(-1.0, 0.1), 0.0);
        assert_eq!(smoothing_factor(2.0, f32::NAN), 0.0);
    }

    #[test]
    fn test_frame_rate_independence() {
        let one = exp_lerp(0.0, 10.0, 2.0, 0.1);
        let two = exp_lerp(exp_lerp(0.0, 10.0, 2.0, 0.05), 10.0, 2.0, 0.05);
        assert!((one - two).abs() < 1e-4);
    }

    #[test]
    fn test_distance_strictly_decreases_until_converged() {
        let target = Vec3::new(3.0, -8.0, 12.0);
        let mut current = Vec3::new(-20.0, 15.0, 4.0);
        let epsilon = 1e-3;
        let mut prev = current.distance(&target);
        let mut steps = 0;
        while prev > epsilon {
            current = exp_lerp_vec3(current, target, 2.0, 1.0 / 60.0);
            let dist = current.distance(&target);
            assert!(dist < prev, "step {} did not get closer", steps);
            prev = dist;
            steps += 1;
            assert!(steps < 1000, "did not converge");
        }
    }

    #[test]
    fn test_nan_target_keeps_current() {
        let current = Vec3::ONE;
        let next = exp_lerp_vec3(current, Vec3::new(f32::NAN, 0.0, 0.0), 2.0, 0.1);
        assert_eq!(next, current);
        assert_eq!(exp_lerp(0.5, f32::INFINITY, 2.0, 0.1), 0.5);
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.016, 0.1), 0.016);
        assert_eq!(sanitize_delta(5.0, 0.1), 0.1);
        assert_eq!(sanitize_delta(-0.5, 0.1), 0.0);
        assert_eq!(sanitize_delta(f32::NAN, 0.1), 0.0);
    }
}
