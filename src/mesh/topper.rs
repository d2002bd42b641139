use crate::math::Vec3;
use super::geometry::{Mesh, Vertex};

/// Extrude a closed XY outline into a solid centred on `center`, `depth`
/// thick along Z. Faces are flat shaded; side walls get their own vertices.
pub fn topper_mesh(outline: &[[f32; 2]], depth: f32, center: Vec3) -> Mesh {
    let mut mesh = Mesh::new();
    if outline.len() < 3 {
        return mesh;
    }
    let half = depth.max(0.0) / 2.0;
    let n = outline.len() as u32;

    for (z, normal) in [(half, Vec3::FORWARD), (-half, -Vec3::FORWARD)] {
        let hub = mesh.add_vertices(std::iter::once(
            Vertex::new(center + Vec3::new(0.0, 0.0, z), normal).with_uv(0.5, 0.5),
        ));
        let rim = mesh.add_vertices(outline.iter().map(|&[x, y]| {
            Vertex::new(center + Vec3::new(x, y, z), normal).with_uv(0.5 + x * 0.5, 0.5 + y * 0.5)
        }));
        for i in 0..n {
            let (a, b) = (rim + i, rim + (i + 1) % n);
            if z >= 0.0 {
                mesh.add_triangle(hub, a, b);
            } else {
                mesh.add_triangle(hub, b, a);
            }
        }
    }

    if half > 0.0 {
        for i in 0..outline.len() {
            let [x0, y0] = outline[i];
            let [x1, y1] = outline[(i + 1) % outline.len()];
            // Outward edge normal of a CCW polygon
            let normal = Vec3::new(y1 - y0, -(x1 - x0), 0.0).normalize();
            let u = i as f32 / outline.len() as f32;
            let start = mesh.add_vertices([
                Vertex::new(center + Vec3::new(x0, y0, half), normal).with_uv(u, 1.0),
                Vertex::new(center + Vec3::new(x0, y0, -half), normal).with_uv(u, 0.0),
                Vertex::new(center + Vec3::new(x1, y1, -half), normal).with_uv(u, 0.0),
                Vertex::new(center + Vec3::new(x1, y1, half), normal).with_uv(u, 1.0),
            ]);
            mesh.add_quad(start, start + 1, start + 2, start + 3);
        }
    }

    mesh
}
