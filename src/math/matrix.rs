use super::Vec3;

/// 4x4 matrix for instance transforms (column-major, ready for GPU upload)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Build a matrix from three basis columns
    fn from_basis(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self {
            data: [
                x.x, x.y, x.z, 0.0,
                y.x, y.y, y.z, 0.0,
                z.x, z.y, z.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::RIGHT, Vec3::new(0.0, c, s), Vec3::new(0.0, -s, c))
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::new(c, 0.0, -s), Vec3::UP, Vec3::new(s, 0.0, c))
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::FORWARD)
    }

    /// Rotation from euler angles applied in XYZ order (`Rx * Ry * Rz`)
    pub fn from_euler(angles: Vec3) -> Self {
        Self::rotation_x(angles.x)
            .mul(&Self::rotation_y(angles.y))
            .mul(&Self::rotation_z(angles.z))
    }

    /// Orientation whose local +Z axis points along `forward`.
    ///
    /// Falls back to identity for a zero `forward` and picks another up
    /// vector when `forward` is parallel to `up`.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        if !forward.is_finite() || forward.length_squared() < 1e-12 {
            return Self::identity();
        }
        let f = forward.normalize();
        let up = if f.cross(&up).length_squared() < 1e-8 {
            f.perpendicular()
        } else {
            up
        };
        let r = up.cross(&f).normalize();
        let u = f.cross(&r);
        Self::from_basis(r, u, f)
    }

    /// Translation * rotation * uniform scale
    pub fn compose(translation: Vec3, rotation: &Mat4, scale: f32) -> Self {
        let mut m = *rotation;
        for value in m.data.iter_mut().take(12) {
            *value *= scale;
        }
        m.data[12] = translation.x;
        m.data[13] = translation.y;
        m.data[14] = translation.z;
        m.data[15] = 1.0;
        m
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[row + col * 4] = (0..4)
                    .map(|k| self.data[row + k * 4] * other.data[k + col * 4])
                    .sum();
            }
        }
        Self { data: result }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_direction(p) + Vec3::new(self.data[12], self.data[13], self.data[14])
    }

    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}
