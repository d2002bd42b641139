//! Curve model: the spiral the ribbon and photo frames follow, and the
//! star outline extruded for the topper.

mod spiral;
mod star;

pub use spiral::{SpiralCurve, build_spiral, SPIRAL_SAMPLES};
pub use star::{star_outline, STAR_POINTS};
