//! Render projection: flat instance buffers, frame images and the optional
//! surface-detail texture handed to the host renderer.

pub mod instances;
pub mod pool;
pub mod texture;

pub use instances::{InstanceBatch, INSTANCE_STRIDE};
pub use pool::FramePool;
pub use texture::SurfaceDetail;
