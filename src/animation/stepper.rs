use crate::config::AnimationConfig;
use crate::interaction::CameraPose;
use crate::math::{Mat4, Vec3};
use crate::particles::{Attributes, Category, InstanceTransform, Particle, ParticleStore};
use super::mode::LayoutMode;
use super::smoothing::{exp_lerp, exp_lerp_vec3, sanitize_delta};

/// Vertical drift frequency of dispersed needles
const DRIFT_FREQUENCY: f32 = 0.5;
/// Sway around Z runs slightly slower than around X
const SWAY_Z_RATIO: f32 = 0.8;
/// Ornaments swing at half their bob frequency
const PENDULUM_RATIO: f32 = 0.5;

/// Everything the host supplies for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the scene started
    pub elapsed: f32,
    /// Seconds since the previous frame
    pub delta: f32,
    pub mode: LayoutMode,
    pub active: Option<usize>,
    pub camera: CameraPose,
}

/// Advances every particle one frame toward its target and writes the
/// display transforms the renderer reads.
///
/// Secondary motion (sway, bob, drift, spin) only ever lands in the display
/// transform, so `current_position` converges exactly on its target.
#[derive(Debug, Clone)]
pub struct AnimationStepper {
    config: AnimationConfig,
    /// Ribbon opacity while assembled
    ribbon_opacity: f32,
}

impl AnimationStepper {
    pub fn new(config: AnimationConfig, ribbon_opacity: f32) -> Self {
        Self { config, ribbon_opacity }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Advance one frame. Never fails; bad input produces no movement.
    pub fn step(&self, store: &mut ParticleStore, input: &FrameInput) {
        let dt = sanitize_delta(input.delta, self.config.max_delta);
        let t = if input.elapsed.is_finite() { input.elapsed } else { 0.0 };

        self.step_needles(store, input.mode, t, dt);
        self.step_ornaments(store, input.mode, t, dt);
        self.step_frames(store, input, t, dt);
        self.step_decorations(store, input.mode, dt);
    }

    fn step_needles(&self, store: &mut ParticleStore, mode: LayoutMode, t: f32, dt: f32) {
        let cfg = &self.config;
        let (particles, display) = store.split_mut(Category::Needle);

        for (particle, out) in particles.iter_mut().zip(display.iter_mut()) {
            let target = particle.target(mode);
            approach(particle, target, cfg.rate, dt);

            let Attributes::Needle(needle) = &particle.attributes else {
                continue;
            };
            let mut position = particle.current_position;
            let mut rotation = needle.rotation;
            let phase = needle.sway_phase;

            match mode {
                LayoutMode::Assembled => {
                    // tips higher up the tree sway further
                    let amplitude = cfg.sway_amplitude * needle.height_ratio;
                    rotation.x += (t * cfg.sway_frequency + phase).sin() * amplitude;
                    rotation.z += (t * cfg.sway_frequency * SWAY_Z_RATIO + phase).cos() * amplitude;
                }
                LayoutMode::Dispersed => {
                    position.y += (t * DRIFT_FREQUENCY + phase).sin() * cfg.drift_amplitude;
                    rotation.y += t * cfg.spin_speed;
                }
            }

            *out = InstanceTransform {
                position: position.finite_or(particle.current_position),
                rotation: euler_or(rotation, needle.rotation),
                scale: needle.scale,
            };
        }
    }

    fn step_ornaments(&self, store: &mut ParticleStore, mode: LayoutMode, t: f32, dt: f32) {
        let cfg = &self.config;
        let (particles, display) = store.split_mut(Category::Ornament);

        for (particle, out) in particles.iter_mut().zip(display.iter_mut()) {
            let target = particle.target(mode);
            approach(particle, target, cfg.rate, dt);

            let Attributes::Ornament(ornament) = &particle.attributes else {
                continue;
            };
            let mut position = particle.current_position;
            let mut rotation = Mat4::identity();
            if mode.is_assembled() {
                let phase = ornament.bob_phase;
                position.y += (t * cfg.bob_frequency + phase).sin() * cfg.bob_amplitude;
                let swing = (t * cfg.bob_frequency * PENDULUM_RATIO + phase).sin() * cfg.pendulum_amplitude;
                rotation = Mat4::rotation_z(swing);
            }

            *out = InstanceTransform {
                position: position.finite_or(particle.current_position),
                rotation: if rotation.is_finite() { rotation } else { Mat4::identity() },
                scale: ornament.scale,
            };
        }
    }

    fn step_frames(&self, store: &mut ParticleStore, input: &FrameInput, t: f32, dt: f32) {
        let cfg = &self.config;
        let camera = input.camera;
        let (particles, display) = store.split_mut(Category::Frame);

        let active = input.active.filter(|&i| i < particles.len());
        if active.is_none() && input.active.is_some() {
            log::debug!("ignoring active frame {:?}, only {} frames", input.active, particles.len());
        }

        for (index, (particle, out)) in particles.iter_mut().zip(display.iter_mut()).enumerate() {
            let is_active = active == Some(index);
            let (target, rate, target_scale) = if is_active {
                (camera.point_ahead(cfg.active_distance), cfg.active_rate, cfg.magnification)
            } else {
                (particle.target(input.mode), cfg.rate, 1.0)
            };
            approach(particle, target, rate, dt);
            let position = particle.current_position;

            let Attributes::Frame(frame) = &mut particle.attributes else {
                continue;
            };
            frame.current_scale = exp_lerp(frame.current_scale, target_scale, rate, dt);

            let rotation = if is_active {
                Mat4::look_rotation(camera.position - position, Vec3::UP)
            } else {
                match input.mode {
                    LayoutMode::Assembled => Mat4::look_rotation(frame.look_at - position, Vec3::UP),
                    LayoutMode::Dispersed => Mat4::rotation_y(t * cfg.spin_speed + frame.spin_phase),
                }
            };

            *out = InstanceTransform {
                position,
                rotation: if rotation.is_finite() { rotation } else { Mat4::identity() },
                scale: frame.current_scale,
            };
        }
    }

    fn step_decorations(&self, store: &mut ParticleStore, mode: LayoutMode, dt: f32) {
        let cfg = &self.config;
        let decorations = &mut store.decorations;

        let target = if mode.is_assembled() { self.ribbon_opacity } else { 0.0 };
        decorations.ribbon_opacity = exp_lerp(decorations.ribbon_opacity, target, cfg.rate, dt);
        decorations.ribbon_visible = decorations.ribbon_opacity >= cfg.ribbon_epsilon;
        decorations.topper_scale = if mode.is_assembled() { 1.0 } else { 0.0 };
    }
}

fn approach(particle: &mut Particle, target: Vec3, rate: f32, dt: f32) {
    particle.current_position = exp_lerp_vec3(particle.current_position, target, rate, dt);
}

fn euler_or(angles: Vec3, fallback: Vec3) -> Mat4 {
    Mat4::from_euler(angles.finite_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::config::SceneConfig;

    fn setup() -> (SceneConfig, ParticleStore, AnimationStepper) {
        let mut config = SceneConfig::default();
        config.needles.count = 120;
        config.ornaments.count = 20;
        config.frames.count = 6;
        let store = ParticleStore::generate(&config, &mut StdRng::seed_from_u64(11));
        let stepper = AnimationStepper::new(config.animation.clone(), config.ribbon.opacity);
        (config, store, stepper)
    }

    fn input(elapsed: f32, delta: f32, mode: LayoutMode, active: Option<usize>) -> FrameInput {
        FrameInput {
            elapsed,
            delta,
            mode,
            active,
            camera: CameraPose::default(),
        }
    }

    /// Step `seconds` of wall time in 0.05 s frames, starting at `start`
    fn run(
        stepper: &AnimationStepper,
        store: &mut ParticleStore,
        mode: LayoutMode,
        active: Option<usize>,
        start: f32,
        seconds: f32,
    ) -> f32 {
        let frames = (seconds / 0.05) as usize;
        let mut t = start;
        for _ in 0..frames {
            t += 0.05;
            stepper.step(store, &input(t, 0.05, mode, active));
        }
        t
    }

    fn max_error(store: &ParticleStore, mode: LayoutMode) -> f32 {
        Category::ALL
            .iter()
            .flat_map(|&c| store.particles(c))
            .map(|p| p.current_position.distance(&p.target(mode)))
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_assembles_disperses_and_returns_to_tree() {
        let (_, mut store, stepper) = setup();
        let t = run(&stepper, &mut store, LayoutMode::Assembled, None, 0.0, 20.0);
        assert!(max_error(&store, LayoutMode::Assembled) < 1e-3);

        let t = run(&stepper, &mut store, LayoutMode::Dispersed, None, t, 20.0);
        assert!(max_error(&store, LayoutMode::Dispersed) < 1e-3);

        run(&stepper, &mut store, LayoutMode::Assembled, None, t, 15.0);
        for category in Category::ALL {
            for p in store.particles(category) {
                let error = p.current_position.distance(&p.tree_position);
                assert!(error < 1e-3, "{:?} {} is {} from its tree position", category, p.id, error);
            }
        }
    }

    #[test]
    fn test_approach_is_monotonic() {
        let (_, mut store, stepper) = setup();
        let mut prev = max_error(&store, LayoutMode::Assembled);
        for i in 1..50 {
            stepper.step(&mut store, &input(i as f32 * 0.1, 0.1, LayoutMode::Assembled, None));
            let err = max_error(&store, LayoutMode::Assembled);
            assert!(err < prev);
            prev = err;
        }
    }

    #[test]
    fn test_ornament_bob_stays_in_display() {
        let (config, mut store, stepper) = setup();
        run(&stepper, &mut store, LayoutMode::Assembled, None, 0.0, 20.0);
        let ornaments = store.particles(Category::Ornament);
        let display = store.display(Category::Ornament);
        let mut moved = false;
        for (p, d) in ornaments.iter().zip(display) {
            assert!(p.current_position.distance(&p.tree_position) < 1e-3);
            let offset = d.position.y - p.current_position.y;
            assert!(offset.abs() <= config.animation.bob_amplitude + 1e-5);
            moved |= offset.abs() > 1e-4;
        }
        assert!(moved);
    }

    #[test]
    fn test_ornament_pendulum_only_when_assembled() {
        let (config, mut store, stepper) = setup();
        stepper.step(&mut store, &input(0.7, 0.05, LayoutMode::Dispersed, None));
        for d in store.display(Category::Ornament) {
            assert_eq!(d.rotation, Mat4::identity());
        }

        stepper.step(&mut store, &input(0.75, 0.05, LayoutMode::Assembled, None));
        for d in store.display(Category::Ornament) {
            // local X stays in the XY plane, tilted by at most the amplitude
            let x_axis = d.rotation.transform_direction(Vec3::RIGHT);
            assert!(x_axis.z.abs() < 1e-6);
            assert!(x_axis.y.abs() <= config.animation.pendulum_amplitude.sin() + 1e-5);
        }
    }

    #[test]
    fn test_dispersed_needle_drift_is_bounded() {
        let (config, mut store, stepper) = setup();
        run(&stepper, &mut store, LayoutMode::Dispersed, None, 0.0, 3.0);
        for (p, d) in store.particles(Category::Needle).iter().zip(store.display(Category::Needle)) {
            assert!((d.position.y - p.current_position.y).abs() <= config.animation.drift_amplitude + 1e-5);
            assert_eq!(d.position.x, p.current_position.x);
        }
    }

    #[test]
    fn test_sway_vanishes_at_base() {
        let (_, mut store, stepper) = setup();
        stepper.step(&mut store, &input(1.3, 0.05, LayoutMode::Assembled, None));
        let base = &store.particles(Category::Needle)[0];
        let needle = base.as_needle().unwrap();
        assert_eq!(needle.height_ratio, 0.0);
        assert_eq!(store.display(Category::Needle)[0].rotation, Mat4::from_euler(needle.rotation));
    }

    #[test]
    fn test_sway_grows_with_height() {
        let (_, mut store, stepper) = setup();
        let deviation = |store: &ParticleStore, index: usize| {
            let needle = store.particles(Category::Needle)[index].as_needle().unwrap();
            let rest = Mat4::from_euler(needle.rotation);
            let shown = store.display(Category::Needle)[index].rotation;
            rest.data
                .iter()
                .zip(shown.data.iter())
                .map(|(a, b)| (a - b).abs())
                .sum::<f32>()
        };

        let (low, high) = (12, 108);
        let mut low_peak = 0.0f32;
        let mut high_peak = 0.0f32;
        for i in 1..=200 {
            stepper.step(&mut store, &input(i as f32 * 0.05, 0.05, LayoutMode::Assembled, None));
            low_peak = low_peak.max(deviation(&store, low));
            high_peak = high_peak.max(deviation(&store, high));
        }

        let ratio = |i: usize| store.particles(Category::Needle)[i].as_needle().unwrap().height_ratio;
        assert!(ratio(high) > ratio(low));
        assert!(low_peak > 0.0);
        assert!(high_peak > 3.0 * low_peak, "low {} high {}", low_peak, high_peak);
    }

    #[test]
    fn test_active_frame_comes_to_camera() {
        let (config, mut store, stepper) = setup();
        run(&stepper, &mut store, LayoutMode::Assembled, Some(2), 0.0, 10.0);

        let camera = CameraPose::default();
        let anchor = camera.point_ahead(config.animation.active_distance);
        let frame = &store.particles(Category::Frame)[2];
        let shown = store.display(Category::Frame)[2];
        assert!(frame.current_position.distance(&anchor) < 1e-3);
        assert!((shown.scale - config.animation.magnification).abs() < 1e-3);

        let facing = shown.rotation.transform_direction(Vec3::FORWARD);
        let to_camera = (camera.position - shown.position).normalize();
        assert!(facing.dot(&to_camera) > 0.999);

        // the rest stay on the tree at normal size
        for (i, d) in store.display(Category::Frame).iter().enumerate() {
            if i != 2 {
                assert!((d.scale - 1.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_active_frame_moves_faster() {
        let (config, mut store, stepper) = setup();
        let before: Vec<Vec3> = store.particles(Category::Frame).iter().map(|p| p.current_position).collect();
        stepper.step(&mut store, &input(0.1, 0.1, LayoutMode::Assembled, Some(0)));

        let anchor = CameraPose::default().point_ahead(config.animation.active_distance);
        let frames = store.particles(Category::Frame);
        let remaining = |i: usize, target: Vec3| frames[i].current_position.distance(&target) / before[i].distance(&target);

        let active = remaining(0, anchor);
        let idle = remaining(1, frames[1].tree_position);
        assert!((active - (-0.6f32).exp()).abs() < 1e-3);
        assert!((idle - (-0.2f32).exp()).abs() < 1e-3);
        assert!(active < idle);
    }

    #[test]
    fn test_deselected_frame_returns() {
        let (_, mut store, stepper) = setup();
        let t = run(&stepper, &mut store, LayoutMode::Assembled, Some(1), 0.0, 5.0);
        run(&stepper, &mut store, LayoutMode::Assembled, None, t, 20.0);
        let frame = &store.particles(Category::Frame)[1];
        assert!(frame.current_position.distance(&frame.tree_position) < 1e-3);
        assert!((frame.as_frame().unwrap().current_scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_active_is_ignored() {
        let (_, mut store, stepper) = setup();
        run(&stepper, &mut store, LayoutMode::Assembled, Some(99), 0.0, 20.0);
        assert!(max_error(&store, LayoutMode::Assembled) < 1e-3);
        for d in store.display(Category::Frame) {
            assert!((d.scale - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bad_delta_does_not_move() {
        let (_, mut store, stepper) = setup();
        let before = store.clone();
        for delta in [f32::NAN, f32::NEG_INFINITY, -0.5, 0.0] {
            stepper.step(&mut store, &input(1.0, delta, LayoutMode::Assembled, None));
        }
        for category in Category::ALL {
            for (a, b) in before.particles(category).iter().zip(store.particles(category)) {
                assert_eq!(a.current_position, b.current_position);
            }
        }
    }

    #[test]
    fn test_long_delta_is_clamped() {
        let (_, mut clamped, stepper) = setup();
        let mut reference = clamped.clone();
        stepper.step(&mut clamped, &input(1.0, 5.0, LayoutMode::Assembled, None));
        stepper.step(&mut reference, &input(1.0, 0.1, LayoutMode::Assembled, None));
        for category in Category::ALL {
            for (a, b) in clamped.particles(category).iter().zip(reference.particles(category)) {
                assert_eq!(a.current_position, b.current_position);
            }
        }
    }

    #[test]
    fn test_nan_elapsed_keeps_display_finite() {
        let (_, mut store, stepper) = setup();
        stepper.step(&mut store, &input(f32::NAN, 0.05, LayoutMode::Assembled, Some(0)));
        for category in Category::ALL {
            for d in store.display(category) {
                assert!(d.position.is_finite());
                assert!(d.model_matrix().is_finite());
            }
        }
    }

    #[test]
    fn test_ribbon_fades_and_topper_snaps() {
        let (config, mut store, stepper) = setup();
        stepper.step(&mut store, &input(0.05, 0.05, LayoutMode::Assembled, None));
        assert_eq!(store.decorations.topper_scale, 1.0);

        let t = run(&stepper, &mut store, LayoutMode::Assembled, None, 0.05, 10.0);
        assert!((store.decorations.ribbon_opacity - config.ribbon.opacity).abs() < 1e-3);
        assert!(store.decorations.ribbon_visible);

        stepper.step(&mut store, &input(t + 0.05, 0.05, LayoutMode::Dispersed, None));
        assert_eq!(store.decorations.topper_scale, 0.0);
        assert!(store.decorations.ribbon_visible);

        run(&stepper, &mut store, LayoutMode::Dispersed, None, t, 10.0);
        assert!(store.decorations.ribbon_opacity < config.animation.ribbon_epsilon);
        assert!(!store.decorations.ribbon_visible);
    }
}
