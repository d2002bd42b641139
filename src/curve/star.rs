use std::f32::consts::{FRAC_PI_2, PI};

/// Points on the topper star
pub const STAR_POINTS: usize = 5;

/// Closed star polygon in the XY plane, alternating between `outer` and
/// `inner` radius, first vertex pointing straight up.
///
/// Returns `2 * points` vertices in counter-clockwise order, or nothing for
/// fewer than two points.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<[f32; 2]> {
    if points < 2 {
        return Vec::new();
    }
    let step = PI / points as f32;
    (0..points * 2)
        .map(|k| {
            let radius = if k % 2 == 0 { outer } else { inner };
            let angle = FRAC_PI_2 + k as f32 * step;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(p: [f32; 2]) -> f32 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    #[test]
    fn test_five_point_star_alternates_radii() {
        let outline = star_outline(STAR_POINTS, 1.0, 0.4);
        assert_eq!(outline.len(), 10);
        for (k, p) in outline.iter().enumerate() {
            let expected = if k % 2 == 0 { 1.0 } else { 0.4 };
            assert!((radius(*p) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_first_tip_points_up() {
        let outline = star_outline(STAR_POINTS, 2.0, 1.0);
        assert!(outline[0][0].abs() < 1e-5);
        assert!((outline[0][1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_point_count() {
        assert!(star_outline(1, 1.0, 0.5).is_empty());
        assert!(star_outline(0, 1.0, 0.5).is_empty());
    }
}
