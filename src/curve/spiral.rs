use std::f32::consts::TAU;
use crate::math::{CatmullRomSpline, Vec3};

/// Control points generated for every spiral
pub const SPIRAL_SAMPLES: usize = 200;

/// Downward-widening spiral wound around the vertical axis.
///
/// `t = 0` is the bottom (full base radius), `t = 1` the apex (radius 0).
/// Sampling is by arc length, so evenly spaced `t` values are evenly spaced
/// along the ribbon.
#[derive(Debug, Clone)]
pub struct SpiralCurve {
    spline: CatmullRomSpline,
    pub height: f32,
    pub base_radius: f32,
    pub turns: f32,
}

/// Build a spiral with [`SPIRAL_SAMPLES`] control points
pub fn build_spiral(height: f32, base_radius: f32, turns: f32) -> SpiralCurve {
    let height = finite_or_zero(height);
    let base_radius = finite_or_zero(base_radius).max(0.0);
    let turns = finite_or_zero(turns);

    let points = (0..SPIRAL_SAMPLES)
        .map(|i| {
            let t = i as f32 / (SPIRAL_SAMPLES - 1) as f32;
            let y = -height / 2.0 + t * height;
            let radius = base_radius * (1.0 - t);
            let angle = t * turns * TAU;
            Vec3::from_cylindrical(radius, angle, y)
        })
        .collect();

    SpiralCurve {
        spline: CatmullRomSpline::new(points),
        height,
        base_radius,
        turns,
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

impl SpiralCurve {
    /// Point at arc-length fraction `t` (clamped to [0, 1])
    pub fn sample(&self, t: f32) -> Vec3 {
        self.spline.evaluate_uniform(t)
    }

    /// Unit direction of travel at `t`
    pub fn tangent(&self, t: f32) -> Vec3 {
        let tangent = self.spline.tangent_uniform(t);
        if tangent.length_squared() > 0.5 {
            tangent
        } else {
            Vec3::UP
        }
    }

    /// Horizontal unit vector pointing away from the axis at `t`.
    ///
    /// At the apex the curve sits on the axis, so the direction it arrived
    /// from is used instead; a fully collapsed curve yields +X.
    pub fn outward_normal(&self, t: f32) -> Vec3 {
        let point = self.sample(t);
        if let Some(n) = point.outward() {
            return n;
        }
        let tangent = self.tangent(t);
        (-tangent).outward().unwrap_or(Vec3::RIGHT)
    }

    pub fn length(&self) -> f32 {
        self.spline.length()
    }
}
