//! Exportable scene and its assembly
//!
//! A [`Scene`] is what the serializer consumes: models in resolved order with
//! the root first, the materials they use, and an optional animation.

mod aabb;
mod assembler;

pub use aabb::{create_scene_aabb, SceneAabb};
pub use assembler::create_scene;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Vec3};
use crate::material::Material;
use crate::model::Model;

/// Frames per second used when a source does not say otherwise
pub const DEFAULT_FRAMERATE: f32 = 29.97;

/// Translation key of one bone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslationFrame {
    /// Frame index
    pub index: u32,
    /// Local translation at this frame
    pub translation: Vec3,
}

/// Rotation key of one bone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationFrame {
    /// Frame index
    pub index: u32,
    /// Local rotation at this frame
    pub rotation: Quat,
}

/// Keyframes of a single bone
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoneFrames {
    /// Bone (model) name
    pub bone: String,
    /// Translation keys, ascending by index
    pub translations: Vec<TranslationFrame>,
    /// Rotation keys, ascending by index
    pub rotations: Vec<RotationFrame>,
}

/// Skeletal animation tied to a root joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    /// Name of the joint the animation was extracted for
    pub root_joint: String,
    /// Playback rate
    pub framerate: f32,
    /// First frame
    pub start_index: u32,
    /// Last frame (inclusive)
    pub end_index: u32,
    /// Per-bone keys
    pub bone_frames: Vec<BoneFrames>,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            root_joint: String::new(),
            framerate: DEFAULT_FRAMERATE,
            start_index: 0,
            end_index: 0,
            bone_frames: Vec::new(),
        }
    }
}

impl Animation {
    /// Number of frames covered
    pub fn frame_count(&self) -> u32 {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    /// Whether the animation has any keys at all
    pub fn has_keys(&self) -> bool {
        self.bone_frames
            .iter()
            .any(|bone| !bone.translations.is_empty() || !bone.rotations.is_empty())
    }
}

/// Fully assembled export scene
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Scene name
    pub name: String,
    /// Materials used by the models
    pub materials: Vec<Material>,
    /// Models, parents before children, root at index 0
    pub models: Vec<Model>,
    /// Optional skeletal animation
    pub animation: Option<Animation>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The root model, if any models exist
    pub fn root(&self) -> Option<&Model> {
        self.models.first()
    }

    /// Position of the model called `name`
    pub fn model_index(&self, name: &str) -> Option<usize> {
        self.models.iter().position(|model| model.name == name)
    }

    /// Number of models
    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
