use wasm_bindgen::prelude::*;

pub mod animation;
pub mod config;
pub mod curve;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod particles;
pub mod render;
pub mod scene;
pub mod visual;

pub use animation::LayoutMode;
pub use config::SceneConfig;
pub use error::ConfigError;
pub use particles::Category;
pub use render::INSTANCE_STRIDE;
pub use scene::Scene;

use math::Vec3;

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(log::LevelFilter::Info);
}

/// Particle scene exposed to JavaScript.
///
/// The host owns the render loop: call `render(dt)` once per frame, then
/// upload the instance buffers it needs.
#[wasm_bindgen]
pub struct EvergreenScene {
    scene: Scene,
}

#[wasm_bindgen]
impl EvergreenScene {
    /// Create a scene from a YAML configuration
    #[wasm_bindgen(constructor)]
    pub fn new(yaml: &str, seed: u32) -> Result<EvergreenScene, JsValue> {
        let scene = Scene::from_yaml(yaml, seed as u64)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { scene })
    }

    /// Create a scene with the default configuration
    #[wasm_bindgen]
    pub fn with_defaults(seed: u32) -> EvergreenScene {
        Self {
            scene: Scene::new(SceneConfig::default(), seed as u64),
        }
    }

    /// Regenerate from new YAML; returns false if nothing changed
    #[wasm_bindgen]
    pub fn regenerate(&mut self, yaml: &str) -> Result<bool, JsValue> {
        let config = SceneConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.scene.regenerate(config))
    }

    /// Advance the animation by `dt` seconds
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.scene.step(dt);
    }

    // === Mode and selection ===

    #[wasm_bindgen]
    pub fn set_assembled(&mut self, assembled: bool) {
        self.scene.set_mode(LayoutMode::from_assembled(assembled));
    }

    /// Flip between tree and scattered layouts; returns true if now assembled
    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) -> bool {
        self.scene.toggle_mode().is_assembled()
    }

    #[wasm_bindgen]
    pub fn is_assembled(&self) -> bool {
        self.scene.mode().is_assembled()
    }

    /// Toggle the selection of a frame; returns the active frame afterwards
    #[wasm_bindgen]
    pub fn select_frame(&mut self, index: u32) -> Option<u32> {
        to_js_index(self.scene.select_frame(index as usize))
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    #[wasm_bindgen]
    pub fn active_frame(&self) -> Option<u32> {
        to_js_index(self.scene.active_frame())
    }

    // === Camera and picking ===

    #[wasm_bindgen]
    pub fn set_camera(&mut self, px: f32, py: f32, pz: f32, dx: f32, dy: f32, dz: f32) {
        self.scene.set_camera(Vec3::new(px, py, pz), Vec3::new(dx, dy, dz));
    }

    /// Viewport size and vertical field of view used for picking
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32, fov: f32) {
        self.scene.resize(width, height);
        if fov.is_finite() && fov > 0.0 {
            self.scene.fov = fov;
        }
    }

    /// Frame under a screen point, if any
    #[wasm_bindgen]
    pub fn pick_frame(&self, x: f32, y: f32) -> Option<u32> {
        to_js_index(self.scene.pick_frame(x, y))
    }

    // === Instance data ===

    /// Floats per instance in the instance buffers
    #[wasm_bindgen]
    pub fn instance_stride() -> u32 {
        INSTANCE_STRIDE as u32
    }

    #[wasm_bindgen]
    pub fn needle_instances(&self) -> Vec<f32> {
        self.scene.instances(Category::Needle).into_data()
    }

    #[wasm_bindgen]
    pub fn ornament_instances(&self) -> Vec<f32> {
        self.scene.instances(Category::Ornament).into_data()
    }

    #[wasm_bindgen]
    pub fn frame_instances(&self) -> Vec<f32> {
        self.scene.instances(Category::Frame).into_data()
    }

    /// Image reference per frame; `null` where no image is assigned
    #[wasm_bindgen]
    pub fn frame_images(&self) -> js_sys::Array {
        self.scene
            .frame_images()
            .into_iter()
            .map(|image| image.map_or(JsValue::NULL, JsValue::from_str))
            .collect()
    }

    // === Decorations ===

    #[wasm_bindgen]
    pub fn ribbon_opacity(&self) -> f32 {
        self.scene.decorations().ribbon_opacity
    }

    #[wasm_bindgen]
    pub fn ribbon_visible(&self) -> bool {
        self.scene.decorations().ribbon_visible
    }

    #[wasm_bindgen]
    pub fn topper_scale(&self) -> f32 {
        self.scene.decorations().topper_scale
    }

    #[wasm_bindgen]
    pub fn topper_position(&self) -> Vec<f32> {
        self.scene.decorations().topper_position.to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn ribbon_vertices(&self) -> Vec<f32> {
        self.scene.ribbon_mesh().vertex_data()
    }

    #[wasm_bindgen]
    pub fn ribbon_indices(&self) -> Vec<u32> {
        self.scene.ribbon_mesh().index_data().to_vec()
    }

    #[wasm_bindgen]
    pub fn topper_vertices(&self) -> Vec<f32> {
        self.scene.topper_mesh().vertex_data()
    }

    #[wasm_bindgen]
    pub fn topper_indices(&self) -> Vec<u32> {
        self.scene.topper_mesh().index_data().to_vec()
    }

    /// RGBA8 surface-detail texture, if enabled
    #[wasm_bindgen]
    pub fn detail_texture(&self) -> Option<Vec<u8>> {
        self.scene.surface_detail().map(|d| d.pixels.clone())
    }

    #[wasm_bindgen]
    pub fn detail_texture_size(&self) -> u32 {
        self.scene.surface_detail().map_or(0, |d| d.size)
    }

    /// Distribution metrics as YAML
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<String, JsValue> {
        self.scene
            .diagnostics()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Human-readable distribution summary
    #[wasm_bindgen]
    pub fn distribution_report(&self) -> String {
        self.scene.distribution_report()
    }

    /// Failed distribution checks under the default criteria; empty when all pass
    #[wasm_bindgen]
    pub fn distribution_failures(&self) -> js_sys::Array {
        self.scene
            .distribution_failures(&visual::DistributionCriteria::default())
            .iter()
            .map(|failure| JsValue::from_str(failure))
            .collect()
    }
}

/// Indices cross the boundary as u32; anything larger is dropped
fn to_js_index(index: Option<usize>) -> Option<u32> {
    index.and_then(|i| u32::try_from(i).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_js_index() {
        assert_eq!(to_js_index(None), None);
        assert_eq!(to_js_index(Some(7)), Some(7));
        assert_eq!(to_js_index(Some(u32::MAX as usize)), Some(u32::MAX));
    }
}
