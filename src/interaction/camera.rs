use crate::math::Vec3;

/// Camera position and view direction, supplied by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Unit view direction
    pub direction: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 28.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl CameraPose {
    /// Pose with a normalised direction; unusable input keeps the default
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        let fallback = Self::default();
        let position = position.finite_or(fallback.position);
        let direction = if direction.is_finite() && direction.length_squared() > 1e-12 {
            direction.normalize()
        } else {
            fallback.direction
        };
        Self { position, direction }
    }

    /// Pose looking from `position` toward `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Point `distance` units straight ahead of the camera
    pub fn point_ahead(&self, distance: f32) -> Vec3 {
        self.position + self.direction.scale(distance)
    }
}
