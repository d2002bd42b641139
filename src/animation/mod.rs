//! Per-frame animation: layout mode, exponential smoothing and the stepper
//! that moves every particle toward its current target.

mod mode;
mod smoothing;
mod stepper;

pub use mode::LayoutMode;
pub use smoothing::{exp_lerp, exp_lerp_vec3, sanitize_delta, smoothing_factor};
pub use stepper::{AnimationStepper, FrameInput};
