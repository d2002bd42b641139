use crate::math::{Mat4, Vec3};
use crate::particles::InstanceTransform;

/// A ray hitting one of the photo frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHit {
    pub index: usize,
    pub distance: f32,
    pub hit_point: Vec3,
}

/// Ray-based picking of photo frames, so a click can toggle the selection
#[derive(Debug, Clone, Copy)]
pub struct FramePicker {
    /// Pick radius of an unscaled frame
    pub radius: f32,
}

impl Default for FramePicker {
    fn default() -> Self {
        Self { radius: 0.6 }
    }
}

impl FramePicker {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Cast a ray from screen coordinates and find the closest frame
    #[allow(clippy::too_many_arguments)]
    pub fn pick(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view: &Mat4,
        projection: &Mat4,
        camera_pos: Vec3,
        frames: &[InstanceTransform],
    ) -> Option<FrameHit> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        let ray_dir = screen_to_world_ray(ndc_x, ndc_y, view, projection);
        self.pick_ray(camera_pos, ray_dir, frames)
    }

    /// Closest frame hit by a world-space ray
    pub fn pick_ray(&self, origin: Vec3, direction: Vec3, frames: &[InstanceTransform]) -> Option<FrameHit> {
        if !origin.is_finite() || !direction.is_finite() || direction.length_squared() < 1e-12 {
            return None;
        }
        let direction = direction.normalize();

        frames
            .iter()
            .enumerate()
            .filter_map(|(index, frame)| {
                ray_sphere_intersect(origin, direction, frame.position, self.radius * frame.scale)
                    .map(|distance| FrameHit {
                        index,
                        distance,
                        hit_point: origin + direction.scale(distance),
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Convert normalised device coordinates to a world ray direction
fn screen_to_world_ray(ndc_x: f32, ndc_y: f32, view: &Mat4, projection: &Mat4) -> Vec3 {
    let inv_proj = invert_perspective(projection);
    let inv_view = invert_view(view);

    let ray_view = inv_proj.transform_point(Vec3::new(ndc_x, ndc_y, -1.0));
    let ray_view = Vec3::new(ray_view.x, ray_view.y, -1.0);

    inv_view.transform_direction(ray_view).normalize()
}

/// Nearest positive hit distance along a unit ray
fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 {
        return None;
    }
    let oc = origin - center;

    let a = dir.dot(&dir);
    let b = 2.0 * oc.dot(&dir);
    let c = oc.dot(&oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
        .into_iter()
        .find(|&t| t > 0.0)
}

/// Inverse of a standard perspective matrix
fn invert_perspective(m: &Mat4) -> Mat4 {
    let a = m.data[0];
    let b = m.data[5];
    let c = m.data[10];
    let d = m.data[14];
    let e = m.data[11];

    let mut inv = Mat4::identity();
    inv.data[0] = 1.0 / a;
    inv.data[5] = 1.0 / b;
    inv.data[10] = 0.0;
    inv.data[11] = 1.0 / d;
    inv.data[14] = 1.0 / e;
    inv.data[15] = -c / (d * e);

    inv
}

/// Inverse of an orthonormal view matrix: transposed rotation, negated translation
fn invert_view(m: &Mat4) -> Mat4 {
    let mut inv = Mat4::identity();
    for row in 0..3 {
        for col in 0..3 {
            inv.data[row + col * 4] = m.data[col + row * 4];
        }
    }

    let t = Vec3::new(m.data[12], m.data[13], m.data[14]);
    let moved = inv.transform_direction(t);
    inv.data[12] = -moved.x;
    inv.data[13] = -moved.y;
    inv.data[14] = -moved.z;

    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(position: Vec3, scale: f32) -> InstanceTransform {
        InstanceTransform {
            position,
            rotation: Mat4::identity(),
            scale,
        }
    }

    #[test]
    fn test_ray_sphere_hit() {
        let dist = ray_sphere_intersect(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            1.0,
        )
        .unwrap();
        assert!((dist - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let behind = ray_sphere_intersect(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::ZERO,
            1.0,
        );
        assert!(behind.is_none());

        let beside = ray_sphere_intersect(
            Vec3::new(5.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            1.0,
        );
        assert!(beside.is_none());
    }

    #[test]
    fn test_pick_ray_prefers_nearest() {
        let picker = FramePicker::default();
        let frames = [
            frame_at(Vec3::new(0.0, 0.0, -5.0), 1.0),
            frame_at(Vec3::new(0.0, 0.0, 2.0), 1.0),
            frame_at(Vec3::new(4.0, 0.0, 2.0), 1.0),
        ];
        let hit = picker
            .pick_ray(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), &frames)
            .unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 7.4).abs() < 1e-3);
    }

    #[test]
    fn test_magnified_frames_are_easier_to_hit() {
        let picker = FramePicker::new(0.5);
        let origin = Vec3::new(1.0, 0.0, 10.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert!(picker.pick_ray(origin, dir, &[frame_at(Vec3::ZERO, 1.0)]).is_none());
        assert!(picker.pick_ray(origin, dir, &[frame_at(Vec3::ZERO, 3.0)]).is_some());
    }

    #[test]
    fn test_pick_from_screen_centre() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let projection = Mat4::perspective(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let frames = [frame_at(Vec3::ZERO, 1.0)];

        let picker = FramePicker::default();
        let hit = picker.pick(400.0, 400.0, 800.0, 800.0, &view, &projection, eye, &frames);
        assert_eq!(hit.map(|h| h.index), Some(0));

        let miss = picker.pick(10.0, 10.0, 800.0, 800.0, &view, &projection, eye, &frames);
        assert!(miss.is_none());
    }

    #[test]
    fn test_invert_view_round_trip() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let p = Vec3::new(1.0, -2.0, 0.5);
        let back = invert_view(&view).transform_point(view.transform_point(p));
        assert!(back.distance(&p) < 1e-4);
    }
}
