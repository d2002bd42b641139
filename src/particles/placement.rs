//! Placement generator
//!
//! Produces the tree and scatter positions of every particle, plus the
//! attributes derived from where a particle ended up (depth, color, scale).
//! All randomness comes from the caller's `Rng`, so a seeded generator gives
//! the same scene every time.

use std::f32::consts::{PI, TAU};
use rand::Rng;
use crate::config::{FrameConfig, NeedleConfig, OrnamentConfig, SceneConfig, TreeConfig};
use crate::curve::SpiralCurve;
use crate::math::Vec3;
use super::color::{needle_color, FROST_COLOR, NEEDLE_LIGHTNESS_JITTER};
use super::record::{
    Attributes, Category, FrameAttributes, Material, NeedleAttributes, OrnamentAttributes, Particle,
};

/// Minimum number of branches in any whorl layer
pub const MIN_BRANCHES: usize = 3;
/// Relative scale noise applied to needles, +/-
pub const NEEDLE_SCALE_JITTER: f32 = 0.05;
/// Ornament radius relative to the layer's outer radius
const ORNAMENT_RADIUS_RANGE: (f32, f32) = (0.8, 1.1);

/// Uniform float in `[lo, hi)`; an empty range yields `lo`
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.random::<f32>()
}

/// Uniform point inside a sphere of `radius` around the origin.
///
/// Cube-root radius keeps density constant through the volume and the polar
/// angle comes from `acos`, so the poles are not oversampled.
pub fn random_in_sphere<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    if !(radius.is_finite() && radius > 0.0) {
        return Vec3::ZERO;
    }
    let r = radius * rng.random::<f32>().cbrt();
    let phi = uniform(rng, -1.0, 1.0).clamp(-1.0, 1.0).acos();
    let theta = uniform(rng, 0.0, TAU);

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
}

/// Outer radius of the tree at height ratio `h`, zero at the top
pub fn max_radius(h: f32, tree: &TreeConfig) -> f32 {
    let h = h.clamp(0.0, 1.0);
    (1.0 - h.powf(tree.profile_exponent)) * tree.radius
}

/// Branches in a whorl layer whose base sits at height ratio `h`
pub fn branches_at(h: f32, branch_factor: f32) -> usize {
    let count = (branch_factor * (1.0 - h.clamp(0.0, 1.0))).floor();
    (count.max(0.0) as usize).max(MIN_BRANCHES)
}

/// Nominal needle scale at `depth` before jitter
pub fn needle_nominal_scale(depth: f32, needles: &NeedleConfig) -> f32 {
    needles.scale_max - depth.clamp(0.0, 1.0) * (needles.scale_max - needles.scale_min)
}

/// Where a needle sits on the tree and how deep into its branch it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedlePlacement {
    pub position: Vec3,
    pub depth: f32,
    pub height_ratio: f32,
    pub layer: usize,
    pub branch: usize,
}

/// Place needle `index` of `total` on a virtual branch of its whorl layer
pub fn needle_tree_position<R: Rng>(index: usize, total: usize, tree: &TreeConfig, rng: &mut R) -> NeedlePlacement {
    let total = total.max(1);
    let h = index.min(total - 1) as f32 / total as f32;

    let layers = tree.layers.max(1) as usize;
    let layer_pos = h * layers as f32;
    let layer = (layer_pos as usize).min(layers - 1);
    let progress = (layer_pos - layer as f32).clamp(0.0, 1.0);

    let branches = branches_at(layer as f32 / layers as f32, tree.branch_factor);
    let branch = ((progress * branches as f32) as usize).min(branches - 1);

    let jitter = uniform(rng, -tree.angle_jitter, tree.angle_jitter);
    let angle = branch as f32 / branches as f32 * TAU + layer as f32 * tree.layer_twist + jitter;

    // sqrt pushes density toward the branch tips
    let ratio = rng.random::<f32>().sqrt();
    let radius = max_radius(h, tree) * ratio;
    let droop = tree.droop * radius * ratio;
    // sag never carries a needle below the base of its own layer
    let floor = -tree.height / 2.0 + layer as f32 / layers as f32 * tree.height;
    let y = (-tree.height / 2.0 + h * tree.height - droop).max(floor);

    NeedlePlacement {
        position: Vec3::from_cylindrical(radius, angle, y),
        depth: ratio,
        height_ratio: h,
        layer,
        branch,
    }
}

/// Ornaments hang on the outer shell at a random height within the band
pub fn ornament_tree_position<R: Rng>(tree: &TreeConfig, ornaments: &OrnamentConfig, rng: &mut R) -> Vec3 {
    let h = uniform(rng, ornaments.band_min, ornaments.band_max);
    let (lo, hi) = ORNAMENT_RADIUS_RANGE;
    let radius = max_radius(h, tree) * uniform(rng, lo, hi);
    let angle = uniform(rng, 0.0, TAU);
    Vec3::from_cylindrical(radius, angle, -tree.height / 2.0 + h * tree.height)
}

/// Frame `index` of `total`, evenly spread along the spiral and pushed off
/// it by `offset`. Returns the position and the point the frame faces.
pub fn frame_tree_position(index: usize, total: usize, curve: &SpiralCurve, frames: &FrameConfig) -> (Vec3, Vec3) {
    let total = total.max(1);
    let t = frames.t_start + (index as f32 + 0.5) / total as f32 * (frames.t_end - frames.t_start);

    let normal = curve.outward_normal(t);
    let position = curve.sample(t) + normal.scale(frames.offset);
    let look_at = position + normal.scale(position.horizontal_length().max(1.0));
    (position, look_at)
}

/// Generate `count` particles of one category.
///
/// Frames need the curve; the other categories ignore it. A zero count
/// gives an empty vector.
pub fn generate<R: Rng>(
    category: Category,
    count: usize,
    curve: &SpiralCurve,
    config: &SceneConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let particles: Vec<Particle> = match category {
        Category::Needle => (0..count).map(|i| needle(i, count, config, rng)).collect(),
        Category::Ornament => (0..count).map(|i| ornament(i, config, rng)).collect(),
        Category::Frame => (0..count).map(|i| frame(i, count, curve, config, rng)).collect(),
    };
    log::debug!("generated {} {:?} particles", particles.len(), category);
    particles
}

fn needle<R: Rng>(index: usize, total: usize, config: &SceneConfig, rng: &mut R) -> Particle {
    let cfg = &config.needles;
    let placement = needle_tree_position(index, total, &config.tree, rng);
    let scatter = random_in_sphere(rng, cfg.scatter_radius);

    let depth = placement.depth;
    let frosted = rng.random::<f32>() < cfg.frost_chance;
    let lightness_jitter = uniform(rng, -NEEDLE_LIGHTNESS_JITTER, NEEDLE_LIGHTNESS_JITTER);
    let color = if frosted {
        FROST_COLOR
    } else {
        needle_color(depth, lightness_jitter)
    };

    let scale_jitter = uniform(rng, -NEEDLE_SCALE_JITTER, NEEDLE_SCALE_JITTER);
    let scale = needle_nominal_scale(depth, cfg) * (1.0 + scale_jitter);

    let rotation = Vec3::new(uniform(rng, 0.0, PI), uniform(rng, 0.0, TAU), uniform(rng, 0.0, PI));

    Particle::new(
        index,
        placement.position,
        scatter,
        Attributes::Needle(NeedleAttributes {
            rotation,
            color,
            scale,
            sway_phase: uniform(rng, 0.0, TAU),
            depth,
            height_ratio: placement.height_ratio,
            frosted,
        }),
    )
}

fn ornament<R: Rng>(index: usize, config: &SceneConfig, rng: &mut R) -> Particle {
    let cfg = &config.ornaments;
    let tree_position = ornament_tree_position(&config.tree, cfg, rng);
    let scatter = random_in_sphere(rng, cfg.scatter_radius);

    let material = if rng.random::<f32>() < cfg.gold_chance {
        Material::Gold
    } else {
        Material::Silver
    };

    Particle::new(
        index,
        tree_position,
        scatter,
        Attributes::Ornament(OrnamentAttributes {
            material,
            color: material.color(),
            scale: uniform(rng, cfg.scale_min, cfg.scale_max),
            bob_phase: uniform(rng, 0.0, TAU),
        }),
    )
}

fn frame<R: Rng>(index: usize, total: usize, curve: &SpiralCurve, config: &SceneConfig, rng: &mut R) -> Particle {
    let cfg = &config.frames;
    let (tree_position, look_at) = frame_tree_position(index, total, curve, cfg);
    let scatter = random_in_sphere(rng, cfg.scatter_radius);
    let image = (!cfg.images.is_empty()).then(|| index % cfg.images.len());

    Particle::new(
        index,
        tree_position,
        scatter,
        Attributes::Frame(FrameAttributes {
            look_at,
            image,
            spin_phase: uniform(rng, 0.0, TAU),
            current_scale: 1.0,
        }),
    )
}
