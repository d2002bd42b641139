use rand::Rng;
use crate::config::{particle_count, SceneConfig};
use crate::curve::{build_spiral, SpiralCurve};
use crate::math::Vec3;
use super::placement::generate;
use super::record::{Category, InstanceTransform, Particle};

/// Animated state of the ribbon and the star topper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decorations {
    pub ribbon_opacity: f32,
    pub ribbon_visible: bool,
    /// 1 while assembled, 0 otherwise
    pub topper_scale: f32,
    pub topper_position: Vec3,
}

impl Decorations {
    fn hidden(topper_position: Vec3) -> Self {
        Self {
            ribbon_opacity: 0.0,
            ribbon_visible: false,
            topper_scale: 0.0,
            topper_position,
        }
    }
}

/// Every particle of a scene, grouped by category, plus the per-frame
/// display transforms the renderer reads.
///
/// Particle vectors and display vectors always have the same length per
/// category; the display entry at index `i` belongs to particle `i`.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    curve: SpiralCurve,
    needles: Vec<Particle>,
    ornaments: Vec<Particle>,
    frames: Vec<Particle>,
    needle_display: Vec<InstanceTransform>,
    ornament_display: Vec<InstanceTransform>,
    frame_display: Vec<InstanceTransform>,
    pub decorations: Decorations,
}

impl ParticleStore {
    /// Generate a fresh, dispersed scene from `config`
    pub fn generate<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        let curve = build_spiral(
            config.tree.height,
            config.tree.radius * config.ribbon.radius_scale,
            config.ribbon.turns,
        );

        let needles = generate(Category::Needle, particle_count(config.needles.count), &curve, config, rng);
        let ornaments = generate(Category::Ornament, particle_count(config.ornaments.count), &curve, config, rng);
        let frames = generate(Category::Frame, particle_count(config.frames.count), &curve, config, rng);

        let topper_position = Vec3::new(
            0.0,
            config.tree.height / 2.0 + config.ribbon.star_outer_radius * 0.6,
            0.0,
        );

        log::info!(
            "generated scene: {} needles, {} ornaments, {} frames",
            needles.len(),
            ornaments.len(),
            frames.len()
        );

        Self {
            needle_display: needles.iter().map(InstanceTransform::at_rest).collect(),
            ornament_display: ornaments.iter().map(InstanceTransform::at_rest).collect(),
            frame_display: frames.iter().map(InstanceTransform::at_rest).collect(),
            curve,
            needles,
            ornaments,
            frames,
            decorations: Decorations::hidden(topper_position),
        }
    }

    pub fn curve(&self) -> &SpiralCurve {
        &self.curve
    }

    pub fn particles(&self, category: Category) -> &[Particle] {
        match category {
            Category::Needle => &self.needles,
            Category::Ornament => &self.ornaments,
            Category::Frame => &self.frames,
        }
    }

    pub fn display(&self, category: Category) -> &[InstanceTransform] {
        match category {
            Category::Needle => &self.needle_display,
            Category::Ornament => &self.ornament_display,
            Category::Frame => &self.frame_display,
        }
    }

    /// Particles and their display transforms, borrowed together for a step
    pub fn split_mut(&mut self, category: Category) -> (&mut [Particle], &mut [InstanceTransform]) {
        match category {
            Category::Needle => (&mut self.needles, &mut self.needle_display),
            Category::Ornament => (&mut self.ornaments, &mut self.ornament_display),
            Category::Frame => (&mut self.frames, &mut self.frame_display),
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.particles(category).len()
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|&c| self.count(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.needles.count = 200;
        config.ornaments.count = 30;
        config.frames.count = 5;
        config
    }

    #[test]
    fn test_counts_match_config() {
        let store = ParticleStore::generate(&small_config(), &mut StdRng::seed_from_u64(1));
        assert_eq!(store.count(Category::Needle), 200);
        assert_eq!(store.count(Category::Ornament), 30);
        assert_eq!(store.count(Category::Frame), 5);
        assert_eq!(store.len(), 235);
        for category in Category::ALL {
            assert_eq!(store.display(category).len(), store.count(category));
        }
    }

    #[test]
    fn test_negative_counts_give_empty_scene() {
        let mut config = small_config();
        config.needles.count = -5;
        config.ornaments.count = 0;
        config.frames.count = -1;
        let store = ParticleStore::generate(&config, &mut StdRng::seed_from_u64(1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_starts_dispersed_with_hidden_decorations() {
        let store = ParticleStore::generate(&small_config(), &mut StdRng::seed_from_u64(2));
        for category in Category::ALL {
            for (p, d) in store.particles(category).iter().zip(store.display(category)) {
                assert_eq!(p.current_position, p.scatter_position);
                assert_eq!(d.position, p.scatter_position);
            }
        }
        assert!(!store.decorations.ribbon_visible);
        assert_eq!(store.decorations.ribbon_opacity, 0.0);
        assert_eq!(store.decorations.topper_scale, 0.0);
        assert!(store.decorations.topper_position.y > 6.0);
    }

    #[test]
    fn test_split_mut_pairs_lengths() {
        let mut store = ParticleStore::generate(&small_config(), &mut StdRng::seed_from_u64(3));
        let (particles, display) = store.split_mut(Category::Ornament);
        assert_eq!(particles.len(), display.len());
        particles[0].current_position = Vec3::ZERO;
        assert_eq!(store.particles(Category::Ornament)[0].current_position, Vec3::ZERO);
    }
}
