//! Scene configuration
//!
//! Everything tunable lives here and is supplied once when a scene is built.
//! All sections are optional in YAML; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Top-level configuration for a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub needles: NeedleConfig,
    pub ornaments: OrnamentConfig,
    pub frames: FrameConfig,
    pub ribbon: RibbonConfig,
    pub animation: AnimationConfig,
    /// Edge length of the procedural surface-detail texture (0 disables it)
    pub detail_texture_size: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            needles: NeedleConfig::default(),
            ornaments: OrnamentConfig::default(),
            frames: FrameConfig::default(),
            ribbon: RibbonConfig::default(),
            animation: AnimationConfig::default(),
            detail_texture_size: 64,
        }
    }
}

/// Shape of the assembled tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub height: f32,
    /// Radius at the base of the tree
    pub radius: f32,
    /// Number of whorl layers along the height
    pub layers: u32,
    /// Branch count multiplier: branches = max(3, floor(k * (1 - h)))
    pub branch_factor: f32,
    /// Exponent of the radius profile (1 - h^p) * R
    pub profile_exponent: f32,
    /// Extra rotation added per whorl layer (radians)
    pub layer_twist: f32,
    /// Maximum random angular offset around a branch (radians)
    pub angle_jitter: f32,
    /// Downward sag per unit of radius at full depth
    pub droop: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: 12.0,
            radius: 5.0,
            layers: 9,
            branch_factor: 12.0,
            profile_exponent: 0.8,
            layer_twist: 2.4, // keeps branches from lining up between layers
            angle_jitter: 0.15,
            droop: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleConfig {
    pub count: i64,
    pub scatter_radius: f32,
    /// Chance of a needle being recolored with the frost accent
    pub frost_chance: f32,
    /// Scale at the core (depth 0)
    pub scale_max: f32,
    /// Scale at the tip (depth 1)
    pub scale_min: f32,
}

impl Default for NeedleConfig {
    fn default() -> Self {
        Self {
            count: 7000,
            scatter_radius: 25.0,
            frost_chance: 0.05,
            scale_max: 1.0,
            scale_min: 0.45,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrnamentConfig {
    pub count: i64,
    pub scatter_radius: f32,
    /// Chance of gold; the remainder is silver
    pub gold_chance: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Height band (as fraction of tree height) ornaments hang in
    pub band_min: f32,
    pub band_max: f32,
}

impl Default for OrnamentConfig {
    fn default() -> Self {
        Self {
            count: 300,
            scatter_radius: 22.0,
            gold_chance: 0.6,
            scale_min: 0.2,
            scale_max: 0.45,
            band_min: 0.04,
            band_max: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub count: i64,
    pub scatter_radius: f32,
    /// Distance frames sit off the ribbon
    pub offset: f32,
    /// Portion of the ribbon (by arc length) frames are spread across
    pub t_start: f32,
    pub t_end: f32,
    /// Image references, assigned round-robin by frame index
    pub images: Vec<String>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            count: 24,
            scatter_radius: 18.0,
            offset: 0.4,
            t_start: 0.05,
            t_end: 0.9,
            images: (1..=8).map(|i| format!("photos/{}.jpg", i)).collect(),
        }
    }
}

/// Decorative spiral ribbon and the star on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub turns: f32,
    /// Ribbon base radius relative to the tree radius
    pub radius_scale: f32,
    pub thickness: f32,
    /// Opacity while assembled
    pub opacity: f32,
    pub star_outer_radius: f32,
    pub star_inner_radius: f32,
    pub star_depth: f32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            turns: 5.0,
            radius_scale: 1.08,
            thickness: 0.06,
            opacity: 0.8,
            star_outer_radius: 0.9,
            star_inner_radius: 0.4,
            star_depth: 0.25,
        }
    }
}

/// Per-frame animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Exponential smoothing rate (1/s) for ambient motion
    pub rate: f32,
    /// Smoothing rate for the selected frame; faster than `rate`
    pub active_rate: f32,
    pub magnification: f32,
    /// Distance in front of the camera the selected frame moves to
    pub active_distance: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    /// Swing of hanging ornaments about Z (radians)
    pub pendulum_amplitude: f32,
    pub drift_amplitude: f32,
    /// Rotation speed while dispersed (rad/s)
    pub spin_speed: f32,
    /// Longest frame step honoured; longer gaps are clamped
    pub max_delta: f32,
    /// Ribbon is hidden once its opacity drops below this
    pub ribbon_epsilon: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rate: 2.0,
            active_rate: 6.0,
            magnification: 3.0,
            active_distance: 8.0,
            sway_amplitude: 0.12,
            sway_frequency: 1.5,
            bob_amplitude: 0.08,
            bob_frequency: 2.0,
            pendulum_amplitude: 0.15,
            drift_amplitude: 0.3,
            spin_speed: 0.4,
            max_delta: 0.1,
            ribbon_epsilon: 0.01,
        }
    }
}

impl SceneConfig {
    /// Parse from a YAML string and sanitise the result
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        Ok(config.sanitized())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Replace values that would break generation or animation with safe ones.
    ///
    /// Never fails; each replacement is logged at warn level.
    pub fn sanitized(mut self) -> Self {
        let tree = &mut self.tree;
        tree.height = non_negative("tree.height", tree.height);
        tree.radius = non_negative("tree.radius", tree.radius);
        if tree.layers == 0 {
            log::warn!("tree.layers is 0, using a single layer");
            tree.layers = 1;
        }
        tree.branch_factor = non_negative("tree.branch_factor", tree.branch_factor);
        tree.profile_exponent = positive_or("tree.profile_exponent", tree.profile_exponent, 0.8);
        tree.layer_twist = finite_or("tree.layer_twist", tree.layer_twist, 2.4);
        tree.angle_jitter = non_negative("tree.angle_jitter", tree.angle_jitter);
        tree.droop = non_negative("tree.droop", tree.droop);

        let needles = &mut self.needles;
        needles.scatter_radius = non_negative("needles.scatter_radius", needles.scatter_radius);
        needles.frost_chance = probability("needles.frost_chance", needles.frost_chance);
        needles.scale_max = non_negative("needles.scale_max", needles.scale_max);
        needles.scale_min = non_negative("needles.scale_min", needles.scale_min).min(needles.scale_max);

        let ornaments = &mut self.ornaments;
        ornaments.scatter_radius = non_negative("ornaments.scatter_radius", ornaments.scatter_radius);
        ornaments.gold_chance = probability("ornaments.gold_chance", ornaments.gold_chance);
        ornaments.scale_min = non_negative("ornaments.scale_min", ornaments.scale_min);
        ornaments.scale_max = non_negative("ornaments.scale_max", ornaments.scale_max).max(ornaments.scale_min);
        ornaments.band_min = probability("ornaments.band_min", ornaments.band_min);
        ornaments.band_max = probability("ornaments.band_max", ornaments.band_max).max(ornaments.band_min);

        let frames = &mut self.frames;
        frames.scatter_radius = non_negative("frames.scatter_radius", frames.scatter_radius);
        frames.offset = finite_or("frames.offset", frames.offset, 0.0);
        frames.t_start = probability("frames.t_start", frames.t_start);
        frames.t_end = probability("frames.t_end", frames.t_end).max(frames.t_start);

        let ribbon = &mut self.ribbon;
        ribbon.turns = finite_or("ribbon.turns", ribbon.turns, 0.0);
        ribbon.radius_scale = non_negative("ribbon.radius_scale", ribbon.radius_scale);
        ribbon.thickness = non_negative("ribbon.thickness", ribbon.thickness);
        ribbon.opacity = probability("ribbon.opacity", ribbon.opacity);
        ribbon.star_outer_radius = non_negative("ribbon.star_outer_radius", ribbon.star_outer_radius);
        ribbon.star_inner_radius = non_negative("ribbon.star_inner_radius", ribbon.star_inner_radius);
        ribbon.star_depth = non_negative("ribbon.star_depth", ribbon.star_depth);

        let anim = &mut self.animation;
        anim.rate = positive_or("animation.rate", anim.rate, 2.0);
        anim.active_rate = positive_or("animation.active_rate", anim.active_rate, 6.0);
        anim.magnification = positive_or("animation.magnification", anim.magnification, 1.0);
        anim.active_distance = finite_or("animation.active_distance", anim.active_distance, 8.0);
        anim.sway_amplitude = finite_or("animation.sway_amplitude", anim.sway_amplitude, 0.0);
        anim.sway_frequency = finite_or("animation.sway_frequency", anim.sway_frequency, 0.0);
        anim.bob_amplitude = finite_or("animation.bob_amplitude", anim.bob_amplitude, 0.0);
        anim.bob_frequency = finite_or("animation.bob_frequency", anim.bob_frequency, 0.0);
        anim.pendulum_amplitude = finite_or("animation.pendulum_amplitude", anim.pendulum_amplitude, 0.0);
        anim.drift_amplitude = finite_or("animation.drift_amplitude", anim.drift_amplitude, 0.0);
        anim.spin_speed = finite_or("animation.spin_speed", anim.spin_speed, 0.0);
        anim.max_delta = positive_or("animation.max_delta", anim.max_delta, 0.1);
        anim.ribbon_epsilon = non_negative("animation.ribbon_epsilon", anim.ribbon_epsilon);

        self
    }
}

/// Clamp a count from configuration; negative values mean "none"
pub fn particle_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn finite_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{} is not finite, using {}", name, fallback);
        fallback
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    let value = finite_or(name, value, 0.0);
    if value < 0.0 {
        log::warn!("{} is negative ({}), clamping to 0", name, value);
        0.0
    } else {
        value
    }
}

fn positive_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{} must be positive (got {}), using {}", name, value, fallback);
        fallback
    }
}

fn probability(name: &str, value: f32) -> f32 {
    non_negative(name, value).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
tree:
  height: 10.0
  layers: 6
needles:
  count: 500
frames:
  count: 4
  images:
    - "a.png"
    - "b.png"
animation:
  rate: 3.0
"#;

    #[test]
    fn test_parse_partial_yaml() {
        let config = SceneConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.tree.height, 10.0);
        assert_eq!(config.tree.layers, 6);
        // Unspecified fields keep their defaults
        assert_eq!(config.tree.radius, TreeConfig::default().radius);
        assert_eq!(config.needles.count, 500);
        assert_eq!(config.ornaments, OrnamentConfig::default());
        assert_eq!(config.frames.images.len(), 2);
        assert_eq!(config.animation.rate, 3.0);
        assert_eq!(config.animation.active_rate, 6.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SceneConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = SceneConfig::from_yaml("tree: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_sanitize_degenerate_values() {
        let yaml = r#"
tree:
  radius: -3.0
  layers: 0
needles:
  count: -20
  scatter_radius: -1.0
ornaments:
  gold_chance: 4.0
animation:
  rate: 0.0
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tree.radius, 0.0);
        assert_eq!(config.tree.layers, 1);
        assert_eq!(particle_count(config.needles.count), 0);
        assert_eq!(config.needles.scatter_radius, 0.0);
        assert_eq!(config.ornaments.gold_chance, 1.0);
        assert_eq!(config.animation.rate, 2.0);
    }

    #[test]
    fn test_active_rate_faster_by_default() {
        let anim = AnimationConfig::default();
        assert!(anim.active_rate > anim.rate);
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = SceneConfig::default().to_yaml().unwrap();
        assert_eq!(SceneConfig::from_yaml(&yaml).unwrap(), SceneConfig::default());
    }
}
