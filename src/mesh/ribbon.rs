use crate::curve::SpiralCurve;
use super::geometry::{Mesh, create_ring, connect_rings};

/// Tessellation of the ribbon tube
#[derive(Debug, Clone, Copy)]
pub struct RibbonParams {
    /// Tube radius
    pub thickness: f32,
    /// Vertices around each ring
    pub radial_segments: usize,
    /// Rings along the spiral
    pub length_segments: usize,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            thickness: 0.06,
            radial_segments: 8,
            length_segments: 400, // several turns need many rings to look round
        }
    }
}

/// Sweep a thin tube along the spiral.
///
/// An invisible ribbon (zero thickness or zero-length curve) produces an
/// empty mesh.
pub fn ribbon_mesh(curve: &SpiralCurve, params: &RibbonParams) -> Mesh {
    let mut mesh = Mesh::new();
    if params.thickness <= 0.0
        || curve.length() <= f32::EPSILON
        || params.radial_segments < 3
        || params.length_segments < 2
    {
        return mesh;
    }

    let mut prev_ring = None;
    for i in 0..params.length_segments {
        let t = i as f32 / (params.length_segments - 1) as f32;
        let ring = create_ring(
            curve.sample(t),
            curve.tangent(t),
            curve.outward_normal(t),
            params.thickness,
            params.radial_segments,
            t,
        );
        let start = mesh.add_vertices(ring);
        if let Some(prev) = prev_ring {
            connect_rings(&mut mesh, prev, start, params.radial_segments);
        }
        prev_ring = Some(start);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::build_spiral;

    #[test]
    fn test_ribbon_topology() {
        let curve = build_spiral(10.0, 4.0, 3.0);
        let params = RibbonParams {
            thickness: 0.1,
            radial_segments: 6,
            length_segments: 50,
        };
        let mesh = ribbon_mesh(&curve, &params);
        assert_eq!(mesh.vertex_count(), 6 * 50);
        assert_eq!(mesh.triangle_count(), 6 * 49 * 2);
        assert!(mesh.vertices.iter().all(|v| v.position.is_finite() && v.normal.is_finite()));
    }

    #[test]
    fn test_ribbon_stays_near_curve() {
        let curve = build_spiral(10.0, 4.0, 3.0);
        let mesh = ribbon_mesh(&curve, &RibbonParams::default());
        let first_ring_center = curve.sample(0.0);
        for v in mesh.vertices.iter().take(8) {
            assert!((v.position.distance(&first_ring_center) - 0.06).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_thickness_is_empty() {
        let curve = build_spiral(10.0, 4.0, 3.0);
        let params = RibbonParams { thickness: 0.0, ..Default::default() };
        assert!(ribbon_mesh(&curve, &params).is_empty());
    }

    #[test]
    fn test_collapsed_curve_is_empty() {
        let curve = build_spiral(0.0, 0.0, 2.0);
        assert!(ribbon_mesh(&curve, &RibbonParams::default()).is_empty());
    }
}
