pub mod camera;
pub mod picking;
pub mod selection;

pub use camera::CameraPose;
pub use picking::{FrameHit, FramePicker};
pub use selection::ActiveSelection;
