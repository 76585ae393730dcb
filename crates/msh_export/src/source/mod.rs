//! Host scene interfaces
//!
//! The exporter never reads ambient host state: everything it needs comes
//! through these traits, passed explicitly to [`crate::scene::create_scene`].

mod memory;

pub use memory::MemorySource;

use crate::config::ExportTarget;
use crate::error::ExportError;
use crate::material::Material;
use crate::model::Model;
use crate::scene::Animation;

/// Models gathered from the host plus the armature found among them
#[derive(Debug, Clone, PartialEq)]
pub struct GatheredModels<A> {
    /// Models in gather order; parent indices point into this list
    pub models: Vec<Model>,
    /// Root of the bone hierarchy, if the host has one
    pub armature: Option<A>,
}

/// Gather interface to the host scene
pub trait SceneSource {
    /// Host handle for a skeletal root
    type Armature;

    /// Name of the host scene
    fn scene_name(&self) -> String;

    /// All materials of the host scene
    fn gather_materials(&self) -> Result<Vec<Material>, ExportError>;

    /// Models to export, with modifiers already evaluated when requested
    fn gather_models(
        &self,
        apply_modifiers: bool,
        export_target: ExportTarget,
        skeleton_only: bool,
    ) -> Result<GatheredModels<Self::Armature>, ExportError>;
}

/// Animation curve extractor
pub trait AnimationSource<A> {
    /// Keyframes for the skeleton under `armature`, named after `root_model_name`
    ///
    /// Fails with [`ExportError::NoAnimationCurves`] when nothing is animated.
    fn extract_anim(&self, armature: &A, root_model_name: &str) -> Result<Animation, ExportError>;
}
