pub mod geometry;
pub mod ribbon;
pub mod topper;

pub use geometry::{Mesh, Vertex, VERTEX_STRIDE};
pub use ribbon::{RibbonParams, ribbon_mesh};
pub use topper::topper_mesh;
