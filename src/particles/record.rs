use serde::{Deserialize, Serialize};
use crate::animation::LayoutMode;
use crate::math::{Mat4, Vec3};
use super::color::{GOLD_COLOR, SILVER_COLOR};

/// The three kinds of particle the scene is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Needle,
    Ornament,
    Frame,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Needle, Category::Ornament, Category::Frame];
}

/// Ornament finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Gold,
    Silver,
}

impl Material {
    pub fn color(&self) -> Vec3 {
        match self {
            Material::Gold => GOLD_COLOR,
            Material::Silver => SILVER_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeedleAttributes {
    /// Resting orientation, euler XYZ in radians
    pub rotation: Vec3,
    pub color: Vec3,
    pub scale: f32,
    /// Per-needle offset so sway is not synchronised
    pub sway_phase: f32,
    /// 0 at the trunk core, 1 at the branch tip
    pub depth: f32,
    /// Position along the tree height, 0 at the base
    pub height_ratio: f32,
    pub frosted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrnamentAttributes {
    pub material: Material,
    pub color: Vec3,
    pub scale: f32,
    pub bob_phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameAttributes {
    /// Point the frame faces while assembled
    pub look_at: Vec3,
    /// Index into the frame image pool, if any images were supplied
    pub image: Option<usize>,
    pub spin_phase: f32,
    /// Animated scale; grows while the frame is magnified
    pub current_scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attributes {
    Needle(NeedleAttributes),
    Ornament(OrnamentAttributes),
    Frame(FrameAttributes),
}

/// One needle, ornament or frame.
///
/// The two target positions are fixed at generation; `current_position` is
/// the only part the animation moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Index within its category
    pub id: usize,
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    pub current_position: Vec3,
    pub attributes: Attributes,
}

impl Particle {
    /// New particle resting at its scatter position
    pub fn new(id: usize, tree_position: Vec3, scatter_position: Vec3, attributes: Attributes) -> Self {
        Self {
            id,
            tree_position,
            scatter_position,
            current_position: scatter_position,
            attributes,
        }
    }

    pub fn category(&self) -> Category {
        match self.attributes {
            Attributes::Needle(_) => Category::Needle,
            Attributes::Ornament(_) => Category::Ornament,
            Attributes::Frame(_) => Category::Frame,
        }
    }

    /// Position this particle is heading for in `mode`
    pub fn target(&self, mode: LayoutMode) -> Vec3 {
        match mode {
            LayoutMode::Assembled => self.tree_position,
            LayoutMode::Dispersed => self.scatter_position,
        }
    }

    /// Instance color; frames are untinted
    pub fn color(&self) -> Vec3 {
        match &self.attributes {
            Attributes::Needle(n) => n.color,
            Attributes::Ornament(o) => o.color,
            Attributes::Frame(_) => Vec3::ONE,
        }
    }

    /// Scale before any animation is applied
    pub fn base_scale(&self) -> f32 {
        match &self.attributes {
            Attributes::Needle(n) => n.scale,
            Attributes::Ornament(o) => o.scale,
            Attributes::Frame(f) => f.current_scale,
        }
    }

    /// Orientation before any animation is applied
    pub fn base_rotation(&self) -> Mat4 {
        match &self.attributes {
            Attributes::Needle(n) => Mat4::from_euler(n.rotation),
            _ => Mat4::identity(),
        }
    }

    pub fn as_needle(&self) -> Option<&NeedleAttributes> {
        match &self.attributes {
            Attributes::Needle(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_ornament(&self) -> Option<&OrnamentAttributes> {
        match &self.attributes {
            Attributes::Ornament(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameAttributes> {
        match &self.attributes {
            Attributes::Frame(f) => Some(f),
            _ => None,
        }
    }
}

/// What the renderer draws for one instance this frame.
///
/// Includes secondary motion (sway, bob, spin) that is never written back
/// into the particle's `current_position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Mat4,
    pub scale: f32,
}

impl InstanceTransform {
    pub fn at_rest(particle: &Particle) -> Self {
        Self {
            position: particle.current_position,
            rotation: particle.base_rotation(),
            scale: particle.base_scale(),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::compose(self.position, &self.rotation, self.scale)
    }
}
