//! Procedural surface-detail texture
//!
//! A small tileable value-noise image the host can use to break up flat
//! shading on needles and ornaments. Optional: a zero size disables it.

/// Largest edge length generated
pub const MAX_DETAIL_SIZE: u32 = 1024;
/// Noise cells across the texture at the coarsest octave
const BASE_CELLS: i32 = 4;
const OCTAVES: u32 = 4;

/// Square RGBA8 texture, row-major, 4 bytes per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDetail {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl SurfaceDetail {
    /// Generate a `size`×`size` texture. Returns `None` for size 0 or
    /// anything above [`MAX_DETAIL_SIZE`].
    pub fn generate(size: u32, seed: u64) -> Option<Self> {
        if size == 0 || size > MAX_DETAIL_SIZE {
            if size > MAX_DETAIL_SIZE {
                log::warn!("surface detail size {} exceeds {}, skipping", size, MAX_DETAIL_SIZE);
            }
            return None;
        }

        let seed = (seed ^ (seed >> 32)) as i32;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let u = x as f32 / size as f32;
                let v = y as f32 / size as f32;
                let value = (fbm(u, v, seed) * 255.0).round().clamp(0.0, 255.0) as u8;
                pixels.extend_from_slice(&[value, value, value, 255]);
            }
        }

        log::debug!("generated {}x{} surface detail", size, size);
        Some(Self { size, pixels })
    }

    /// Grey level of the pixel at (`x`, `y`), wrapping at the edges
    pub fn sample(&self, x: u32, y: u32) -> u8 {
        let x = x % self.size;
        let y = y % self.size;
        self.pixels[((y * self.size + x) * 4) as usize]
    }
}

/// Fractal value noise in [0, 1], tiling on the unit square
fn fbm(u: f32, v: f32, seed: i32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut total = 0.0;
    let mut cells = BASE_CELLS;

    for octave in 0..OCTAVES {
        value += amplitude * value_noise(u * cells as f32, v * cells as f32, cells, seed.wrapping_add(octave as i32));
        total += amplitude;
        amplitude *= 0.5;
        cells *= 2;
    }

    value / total
}

/// Smoothly interpolated lattice noise in [0, 1] with period `period`
fn value_noise(x: f32, y: f32, period: i32, seed: i32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x.floor();
    let fy = y - y.floor();

    let corner = |dx: i32, dy: i32| {
        hash2d((x0 + dx).rem_euclid(period), (y0 + dy).rem_euclid(period), seed)
    };

    let u = fx * fx * (3.0 - 2.0 * fx);
    let v = fy * fy * (3.0 - 2.0 * fy);

    let a = lerp(corner(0, 0), corner(1, 0), u);
    let b = lerp(corner(0, 1), corner(1, 1), u);
    lerp(a, b, v)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn hash2d(x: i32, y: i32, seed: i32) -> f32 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1442695041));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    (n as u32 as f32) / (u32::MAX as f32)
}
