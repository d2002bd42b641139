use crate::math::Mat4;
use crate::particles::{InstanceTransform, Particle};

/// Floats per instance: column-major model matrix (16) + RGB color (3)
pub const INSTANCE_STRIDE: usize = 19;

/// Per-instance data for one category, ready for a single upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBatch {
    data: Vec<f32>,
}

impl InstanceBatch {
    /// Flatten display transforms with the matching particle colors.
    ///
    /// `particles[i]` pairs with `display[i]`; extra entries on either side
    /// are ignored.
    pub fn from_particles(particles: &[Particle], display: &[InstanceTransform]) -> Self {
        let mut data = Vec::with_capacity(particles.len().min(display.len()) * INSTANCE_STRIDE);

        for (particle, transform) in particles.iter().zip(display) {
            let mut model = transform.model_matrix();
            if !model.is_finite() {
                model = Mat4::compose(particle.current_position, &Mat4::identity(), particle.base_scale());
            }
            let color = particle.color();

            data.extend_from_slice(model.as_slice());
            data.extend_from_slice(&color.to_array());
        }

        Self { data }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Number of instances
    pub fn len(&self) -> usize {
        self.data.len() / INSTANCE_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The floats belonging to instance `index`
    pub fn instance(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(INSTANCE_STRIDE)?;
        let end = start.checked_add(INSTANCE_STRIDE)?;
        self.data.get(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::particles::{Attributes, Material, OrnamentAttributes};

    fn ornament(position: Vec3, material: Material) -> Particle {
        Particle::new(
            0,
            position,
            position,
            Attributes::Ornament(OrnamentAttributes {
                material,
                color: material.color(),
                scale: 0.5,
                bob_phase: 0.0,
            }),
        )
    }

    #[test]
    fn test_layout() {
        let particles = vec![
            ornament(Vec3::new(1.0, 2.0, 3.0), Material::Gold),
            ornament(Vec3::new(-1.0, 0.0, 4.0), Material::Silver),
        ];
        let display: Vec<InstanceTransform> = particles.iter().map(InstanceTransform::at_rest).collect();
        let batch = InstanceBatch::from_particles(&particles, &display);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.data().len(), 2 * INSTANCE_STRIDE);

        let second = batch.instance(1).unwrap();
        // uniform scale on the diagonal, translation in the last column
        assert_eq!(second[0], 0.5);
        assert_eq!(&second[12..15], &[-1.0, 0.0, 4.0]);
        assert_eq!(&second[16..19], &Material::Silver.color().to_array());
        assert!(batch.instance(2).is_none());
        // index near the top of usize overflows the end offset, not the start
        assert!(batch.instance(usize::MAX / INSTANCE_STRIDE).is_none());
        assert!(batch.instance(usize::MAX).is_none());
    }

    #[test]
    fn test_empty() {
        let batch = InstanceBatch::from_particles(&[], &[]);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_non_finite_transform_falls_back() {
        let particle = ornament(Vec3::new(1.0, 1.0, 1.0), Material::Gold);
        let broken = InstanceTransform {
            position: Vec3::new(f32::NAN, 0.0, 0.0),
            rotation: Mat4::identity(),
            scale: 1.0,
        };
        let batch = InstanceBatch::from_particles(&[particle], &[broken]);
        assert!(batch.data().iter().all(|v| v.is_finite()));
        assert_eq!(&batch.data()[12..15], &[1.0, 1.0, 1.0]);
    }
}
