//! Particle records, their generation, and the store that owns them

pub mod color;
pub mod placement;
pub mod record;
pub mod store;

pub use color::{hsl_to_rgb, lightness};
pub use placement::{generate, random_in_sphere};
pub use record::{
    Attributes, Category, FrameAttributes, InstanceTransform, Material, NeedleAttributes,
    OrnamentAttributes, Particle,
};
pub use store::{Decorations, ParticleStore};
