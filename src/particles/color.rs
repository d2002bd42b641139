//! Color derivation for needles and ornaments

use crate::math::Vec3;

/// Hue of healthy needles (0..1 turn)
pub const NEEDLE_HUE: f32 = 0.36;
pub const NEEDLE_SATURATION: f32 = 0.55;
/// Lightness at the core (depth 0)
pub const NEEDLE_LIGHTNESS_BASE: f32 = 0.1;
/// Lightness gained from core to tip
pub const NEEDLE_LIGHTNESS_RANGE: f32 = 0.3;
/// Random lightness offset, +/-
pub const NEEDLE_LIGHTNESS_JITTER: f32 = 0.03;

/// Icy accent used for frosted needles
pub const FROST_COLOR: Vec3 = Vec3::new(0.82, 0.92, 1.0);

pub const GOLD_COLOR: Vec3 = Vec3::new(1.0, 0.76, 0.27);
pub const SILVER_COLOR: Vec3 = Vec3::new(0.84, 0.86, 0.9);

/// Lightness for a needle at `depth`, before clamping
pub fn needle_lightness(depth: f32, jitter: f32) -> f32 {
    NEEDLE_LIGHTNESS_BASE + depth * NEEDLE_LIGHTNESS_RANGE + jitter
}

/// Needle color: darker at the core, lighter at the tip
pub fn needle_color(depth: f32, jitter: f32) -> Vec3 {
    let l = needle_lightness(depth, jitter).clamp(0.0, 1.0);
    hsl_to_rgb(NEEDLE_HUE, NEEDLE_SATURATION, l)
}

/// HSL to RGB, all channels in [0, 1]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::new(l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// HSL lightness of an RGB color
pub fn lightness(rgb: Vec3) -> f32 {
    let max = rgb.x.max(rgb.y).max(rgb.z);
    let min = rgb.x.min(rgb.y).min(rgb.z);
    (max + min) / 2.0
}
