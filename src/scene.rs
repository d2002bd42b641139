//! Scene: owns the configuration, the particle store and all interaction
//! state, and advances everything one frame per `step` call.

use std::f32::consts::FRAC_PI_4;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::animation::{AnimationStepper, FrameInput, LayoutMode};
use crate::config::SceneConfig;
use crate::curve::{star_outline, STAR_POINTS};
use crate::error::ConfigError;
use crate::interaction::{ActiveSelection, CameraPose, FramePicker};
use crate::math::{Mat4, Vec3};
use crate::mesh::{ribbon_mesh, topper_mesh, Mesh, RibbonParams};
use crate::particles::{Category, Decorations, ParticleStore};
use crate::render::{FramePool, InstanceBatch, SurfaceDetail};
use crate::visual::{
    analyze_store, check_distribution, generate_distribution_report, DistributionCriteria,
    DistributionMetrics,
};

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;

/// Everything generated from one configuration
struct Generated {
    store: ParticleStore,
    stepper: AnimationStepper,
    pool: FramePool,
    ribbon: Mesh,
    topper: Mesh,
    detail: Option<SurfaceDetail>,
}

impl Generated {
    fn build(config: &SceneConfig, seed: u64, rng: &mut StdRng) -> Self {
        let store = ParticleStore::generate(config, rng);

        let ribbon = ribbon_mesh(
            store.curve(),
            &RibbonParams {
                thickness: config.ribbon.thickness,
                ..RibbonParams::default()
            },
        );
        let outline = star_outline(
            STAR_POINTS,
            config.ribbon.star_outer_radius,
            config.ribbon.star_inner_radius,
        );
        let topper = topper_mesh(&outline, config.ribbon.star_depth, store.decorations.topper_position);

        Self {
            stepper: AnimationStepper::new(config.animation.clone(), config.ribbon.opacity),
            pool: FramePool::new(config.frames.images.clone()),
            detail: SurfaceDetail::generate(config.detail_texture_size, seed),
            store,
            ribbon,
            topper,
        }
    }
}

/// A complete, animated particle scene.
///
/// The host drives it with `step(dt)` once per frame and changes mode,
/// selection and camera between frames; each step reads the latest values.
pub struct Scene {
    config: SceneConfig,
    seed: u64,
    rng: StdRng,
    generated: Generated,
    mode: LayoutMode,
    selection: ActiveSelection,
    camera: CameraPose,
    picker: FramePicker,
    elapsed: f32,
    // Viewport, used for screen-space picking
    width: f32,
    height: f32,
    pub fov: f32,
}

impl Scene {
    /// Build a dispersed scene. The same config and seed give the same scene.
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut rng = StdRng::seed_from_u64(seed);
        let generated = Generated::build(&config, seed, &mut rng);

        Self {
            config,
            seed,
            rng,
            generated,
            mode: LayoutMode::default(),
            selection: ActiveSelection::new(),
            camera: CameraPose::default(),
            picker: FramePicker::default(),
            elapsed: 0.0,
            width: 800.0,
            height: 600.0,
            fov: FRAC_PI_4,
        }
    }

    pub fn from_yaml(yaml: &str, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::new(SceneConfig::from_yaml(yaml)?, seed))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Replace the scene with one generated from `config`.
    ///
    /// Does nothing and returns false when the sanitised config is unchanged.
    /// Mode and camera carry over; a selection beyond the new frame count is
    /// dropped.
    pub fn regenerate(&mut self, config: SceneConfig) -> bool {
        let config = config.sanitized();
        if config == self.config {
            return false;
        }

        self.generated = Generated::build(&config, self.seed, &mut self.rng);
        self.config = config;
        self.selection.retain_within(self.generated.store.count(Category::Frame));
        log::info!("scene regenerated with {} particles", self.generated.store.len());
        true
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        if mode != self.mode {
            log::debug!("layout mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> LayoutMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Toggle the selection of frame `index`; returns the new active frame.
    /// Indices past the last frame are ignored.
    pub fn select_frame(&mut self, index: usize) -> Option<usize> {
        if index >= self.generated.store.count(Category::Frame) {
            log::debug!("ignoring selection of missing frame {}", index);
            return self.selection.get();
        }
        self.selection.toggle(index)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn active_frame(&self) -> Option<usize> {
        self.selection.get()
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn set_camera(&mut self, position: Vec3, direction: Vec3) {
        self.camera = CameraPose::new(position, direction);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the animation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        let input = FrameInput {
            elapsed: self.elapsed,
            delta: dt,
            mode: self.mode,
            active: self.selection.get(),
            camera: self.camera,
        };
        self.generated.stepper.step(&mut self.generated.store, &input);
    }

    pub fn store(&self) -> &ParticleStore {
        &self.generated.store
    }

    pub fn instances(&self, category: Category) -> InstanceBatch {
        let store = &self.generated.store;
        InstanceBatch::from_particles(store.particles(category), store.display(category))
    }

    /// Image reference of each frame, in frame order
    pub fn frame_images(&self) -> Vec<Option<&str>> {
        self.generated
            .store
            .particles(Category::Frame)
            .iter()
            .map(|p| self.generated.pool.resolve(p))
            .collect()
    }

    pub fn decorations(&self) -> &Decorations {
        &self.generated.store.decorations
    }

    pub fn ribbon_mesh(&self) -> &Mesh {
        &self.generated.ribbon
    }

    pub fn topper_mesh(&self) -> &Mesh {
        &self.generated.topper
    }

    pub fn surface_detail(&self) -> Option<&SurfaceDetail> {
        self.generated.detail.as_ref()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(
            self.camera.position,
            self.camera.point_ahead(1.0),
            Vec3::UP,
        )
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.width / self.height, NEAR_PLANE, FAR_PLANE)
    }

    /// Frame under the screen point (`x`, `y`), nearest first
    pub fn pick_frame(&self, x: f32, y: f32) -> Option<usize> {
        self.picker
            .pick(
                x,
                y,
                self.width,
                self.height,
                &self.view_matrix(),
                &self.projection_matrix(),
                self.camera.position,
                self.generated.store.display(Category::Frame),
            )
            .map(|hit| hit.index)
    }

    pub fn metrics(&self) -> DistributionMetrics {
        analyze_store(&self.generated.store, &self.config)
    }

    /// Metrics as a YAML document
    pub fn diagnostics(&self) -> Result<String, ConfigError> {
        self.metrics().to_yaml()
    }

    /// Criteria the current layout misses; empty when it passes
    pub fn distribution_failures(&self, criteria: &DistributionCriteria) -> Vec<String> {
        let failures = check_distribution(&self.metrics(), criteria);
        for failure in &failures {
            log::warn!("distribution check failed: {}", failure);
        }
        failures
    }

    pub fn distribution_report(&self) -> String {
        generate_distribution_report(&self.metrics())
    }
}
