use crate::particles::Particle;

/// Image references available to photo frames, assigned round-robin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramePool {
    images: Vec<String>,
}

impl FramePool {
    pub fn new(images: Vec<String>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Image for the frame with id `id`; `None` when the pool is empty
    pub fn image_for(&self, id: usize) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        self.images.get(id % self.images.len()).map(String::as_str)
    }

    /// Image assigned to a frame particle at generation
    pub fn resolve(&self, particle: &Particle) -> Option<&str> {
        let index = particle.as_frame()?.image?;
        self.image_for(index)
    }
}
