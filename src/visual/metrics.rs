//! Distribution metrics for automated checks of a generated scene
//!
//! These numbers let tests and the host verify that needles fill their
//! whorl layers evenly, that darker needles sit deeper in the branches and
//! that scattered particles stay inside their spheres.

use serde::Serialize;
use crate::config::{SceneConfig, TreeConfig};
use crate::error::ConfigError;
use crate::particles::{lightness, Category, Material, Particle, ParticleStore};

const LAYER_EPSILON: f32 = 1e-4;

/// Summary statistics of one generated scene
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionMetrics {
    pub needle_count: usize,
    pub ornament_count: usize,
    pub frame_count: usize,
    /// Needles per whorl layer, base first
    pub layer_histogram: Vec<usize>,
    /// Pearson correlation of needle lightness with depth (frosted excluded)
    pub lightness_depth_correlation: f32,
    /// Pearson correlation of needle scale with depth
    pub scale_depth_correlation: f32,
    pub mean_depth: f32,
    pub frost_fraction: f32,
    pub gold_fraction: f32,
    /// Fraction of particles whose scatter position lies inside their sphere
    pub scatter_inside: f32,
    /// Largest scatter distance relative to the category radius
    pub max_scatter_ratio: f32,
    pub frames_with_images: usize,
}

impl DistributionMetrics {
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }
}

/// Compute metrics for everything in `store`
pub fn analyze_store(store: &ParticleStore, config: &SceneConfig) -> DistributionMetrics {
    let needles = store.particles(Category::Needle);
    let ornaments = store.particles(Category::Ornament);
    let frames = store.particles(Category::Frame);

    let mut depths = Vec::with_capacity(needles.len());
    let mut lights = Vec::with_capacity(needles.len());
    let mut scale_depths = Vec::with_capacity(needles.len());
    let mut scales = Vec::with_capacity(needles.len());
    let mut frosted = 0usize;

    for needle in needles.iter().filter_map(Particle::as_needle) {
        scale_depths.push(needle.depth);
        scales.push(needle.scale);
        if needle.frosted {
            frosted += 1;
        } else {
            depths.push(needle.depth);
            lights.push(lightness(needle.color));
        }
    }

    let gold = ornaments
        .iter()
        .filter_map(Particle::as_ornament)
        .filter(|o| o.material == Material::Gold)
        .count();

    let radii = [
        (Category::Needle, config.needles.scatter_radius),
        (Category::Ornament, config.ornaments.scatter_radius),
        (Category::Frame, config.frames.scatter_radius),
    ];
    let mut inside = 0usize;
    let mut max_scatter_ratio = 0.0f32;
    for (category, radius) in radii {
        for particle in store.particles(category) {
            let distance = particle.scatter_position.length();
            if distance <= radius * (1.0 + 1e-5) {
                inside += 1;
            }
            if radius > 0.0 {
                max_scatter_ratio = max_scatter_ratio.max(distance / radius);
            }
        }
    }

    DistributionMetrics {
        needle_count: needles.len(),
        ornament_count: ornaments.len(),
        frame_count: frames.len(),
        layer_histogram: layer_histogram(needles, &config.tree),
        lightness_depth_correlation: pearson(&depths, &lights),
        scale_depth_correlation: pearson(&scale_depths, &scales),
        mean_depth: mean(&scale_depths),
        frost_fraction: fraction(frosted, needles.len()),
        gold_fraction: fraction(gold, ornaments.len()),
        scatter_inside: if store.is_empty() { 1.0 } else { fraction(inside, store.len()) },
        max_scatter_ratio,
        frames_with_images: frames
            .iter()
            .filter_map(Particle::as_frame)
            .filter(|f| f.image.is_some())
            .count(),
    }
}

/// Count needles per whorl layer from their tree heights
pub fn layer_histogram(needles: &[Particle], tree: &TreeConfig) -> Vec<usize> {
    let layers = tree.layers.max(1) as usize;
    let mut histogram = vec![0usize; layers];
    let base = -tree.height / 2.0;
    for needle in needles {
        let band = if tree.height > 0.0 {
            // needles resting on a layer floor belong to that layer
            (needle.tree_position.y - base) / tree.height * layers as f32 + LAYER_EPSILON
        } else {
            0.0
        };
        let layer = (band.max(0.0) as usize).min(layers - 1);
        histogram[layer] += 1;
    }
    histogram
}

/// Pearson correlation coefficient; 0 when either side has no variance
pub fn pearson(xs: &[f32], ys: &[f32]) -> f32 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mx = mean(&xs[..n]) as f64;
    let my = mean(&ys[..n]) as f64;

    let mut cov = 0.0f64;
    let mut vx = 0.0f64;
    let mut vy = 0.0f64;
    for (&x, &y) in xs.iter().zip(ys).take(n) {
        let dx = x as f64 - mx;
        let dy = y as f64 - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx <= f64::EPSILON || vy <= f64::EPSILON {
        return 0.0;
    }
    (cov / (vx.sqrt() * vy.sqrt())) as f32
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64) as f32
}

fn fraction(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}
