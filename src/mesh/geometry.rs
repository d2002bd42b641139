use std::f32::consts::TAU;
use crate::math::Vec3;

/// Floats per vertex in [`Mesh::vertex_data`]: position(3) + normal(3) + uv(2)
pub const VERTEX_STRIDE: usize = 8;

/// A vertex with position, normal and UV
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
        ]
    }
}

/// Static decoration geometry (ribbon, topper) handed to the renderer once
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the index of the first one
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Quad as two CCW triangles
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Ring of vertices around `center`, perpendicular to `direction`.
///
/// `frame_hint` fixes the ring's starting angle so consecutive rings along a
/// path stay aligned instead of twisting.
pub fn create_ring(
    center: Vec3,
    direction: Vec3,
    frame_hint: Vec3,
    radius: f32,
    segments: usize,
    v_coord: f32,
) -> Vec<Vertex> {
    let direction = direction.normalize();
    let mut tangent = frame_hint - direction.scale(frame_hint.dot(&direction));
    if tangent.length_squared() < 1e-8 {
        tangent = direction.perpendicular();
    }
    let tangent = tangent.normalize();
    let bitangent = direction.cross(&tangent).normalize();

    (0..segments)
        .map(|i| {
            let u = i as f32 / segments as f32;
            let (sin_a, cos_a) = (u * TAU).sin_cos();
            let normal = tangent.scale(cos_a) + bitangent.scale(sin_a);
            Vertex::new(center + normal.scale(radius), normal).with_uv(u, v_coord)
        })
        .collect()
}

/// Stitch two equally sized rings together with quads
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}
