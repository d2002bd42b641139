use super::Vec3;

/// Catmull-Rom spline through control points, with an arc-length table so
/// callers can sample at evenly spaced distances instead of raw parameters
#[derive(Debug, Clone)]
pub struct CatmullRomSpline {
    pub points: Vec<Vec3>,
    pub tension: f32, // 0.0 to 1.0, affects curvature
    /// Cumulative length at each table entry, evenly spaced in raw parameter
    arc_table: Vec<f32>,
}

/// Table entries per control-point segment
const ARC_SAMPLES_PER_SEGMENT: usize = 4;

impl CatmullRomSpline {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self::with_tension(points, 0.5)
    }

    pub fn with_tension(points: Vec<Vec3>, tension: f32) -> Self {
        let mut spline = Self {
            points,
            tension,
            arc_table: Vec::new(),
        };
        spline.rebuild_arc_table();
        spline
    }

    fn rebuild_arc_table(&mut self) {
        let segments = self.points.len().saturating_sub(1);
        let samples = (segments * ARC_SAMPLES_PER_SEGMENT).max(1);

        let mut table = Vec::with_capacity(samples + 1);
        let mut total = 0.0f32;
        let mut prev = self.evaluate(0.0);
        table.push(0.0);
        for i in 1..=samples {
            let p = self.evaluate(i as f32 / samples as f32);
            let step = p.distance(&prev);
            if step.is_finite() {
                total += step;
            }
            table.push(total);
            prev = p;
        }
        self.arc_table = table;
    }

    /// Evaluate spline at raw parameter t (0.0 to 1.0 across entire spline)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        if self.points.len() < 2 {
            return self.points.first().copied().unwrap_or(Vec3::ZERO);
        }

        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = self.points.len() - 1;
        let total_t = t * segments as f32;
        let segment = (total_t as usize).min(segments - 1);
        let local_t = total_t - segment as f32;

        self.evaluate_segment(segment, local_t)
    }

    fn evaluate_segment(&self, segment: usize, t: f32) -> Vec3 {
        let n = self.points.len();

        // Endpoints are duplicated so the curve passes through them
        let p0 = self.points[segment.saturating_sub(1)];
        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p3 = self.points[(segment + 2).min(n - 1)];

        evaluate_catmull_rom(p0, p1, p2, p3, t, self.tension)
    }

    /// Total arc length
    pub fn length(&self) -> f32 {
        self.arc_table.last().copied().unwrap_or(0.0)
    }

    /// Map a normalized arc-length fraction (0.0 to 1.0) to a raw parameter
    pub fn arc_to_param(&self, fraction: f32) -> f32 {
        let total = self.length();
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        if total <= f32::EPSILON || self.arc_table.len() < 2 {
            return fraction;
        }

        let target = fraction * total;
        let idx = self.arc_table.partition_point(|&len| len < target);
        if idx == 0 {
            return 0.0;
        }
        let last = self.arc_table.len() - 1;
        if idx > last {
            return 1.0;
        }

        let (lo, hi) = (self.arc_table[idx - 1], self.arc_table[idx]);
        let span = hi - lo;
        let local = if span > 0.0 { (target - lo) / span } else { 0.0 };
        ((idx - 1) as f32 + local) / last as f32
    }

    /// Evaluate at a normalized arc-length fraction
    pub fn evaluate_uniform(&self, fraction: f32) -> Vec3 {
        self.evaluate(self.arc_to_param(fraction))
    }

    /// Unit tangent at a normalized arc-length fraction
    pub fn tangent_uniform(&self, fraction: f32) -> Vec3 {
        let t = self.arc_to_param(fraction);
        let delta = 0.001;
        let a = self.evaluate((t - delta).max(0.0));
        let b = self.evaluate((t + delta).min(1.0));
        (b - a).normalize()
    }
}

/// Evaluate Catmull-Rom spline between p1 and p2
pub fn evaluate_catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, tension: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let s = (1.0 - tension) / 2.0;

    let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h2 = -2.0 * t3 + 3.0 * t2;
    let h3 = t3 - 2.0 * t2 + t;
    let h4 = t3 - t2;

    let m1 = (p2 - p0).scale(s);
    let m2 = (p3 - p1).scale(s);

    p1.scale(h1) + p2.scale(h2) + m1.scale(h3) + m2.scale(h4)
}
