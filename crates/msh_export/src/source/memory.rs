//! In-memory scene source
//!
//! Holds data a host has already gathered (or a RON scene description) and
//! serves it through [`SceneSource`] and [`AnimationSource`].

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{AnimationSource, GatheredModels, SceneSource};
use crate::config::ExportTarget;
use crate::error::ExportError;
use crate::foundation::math::{Quat, Vec3};
use crate::material::Material;
use crate::model::{Model, ModelType};
use crate::scene::{Animation, BoneFrames, RotationFrame, TranslationFrame};

/// Pre-gathered scene data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySource {
    /// Scene name
    pub scene_name: String,
    /// All materials
    pub materials: Vec<Material>,
    /// All models in gather order
    pub models: Vec<Model>,
    /// Names of selected models, used by the selection export targets
    pub selected: Vec<String>,
    /// Name of the armature, if the scene has one
    pub armature: Option<String>,
    /// Animations keyed by `root_joint`
    pub animations: Vec<Animation>,
}

impl MemorySource {
    /// Create a source with the given scene name
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            ..Default::default()
        }
    }

    fn selection_mask(&self, export_target: ExportTarget) -> Vec<bool> {
        let is_selected = |model: &Model| self.selected.iter().any(|name| *name == model.name);

        match export_target {
            ExportTarget::Scene => vec![true; self.models.len()],
            ExportTarget::Selected => self.models.iter().map(is_selected).collect(),
            ExportTarget::SelectedWithChildren => self
                .models
                .iter()
                .map(|model| {
                    is_selected(model) || self.ancestors(model).any(|ancestor| is_selected(ancestor))
                })
                .collect(),
        }
    }

    fn ancestors<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a Model> + 'a {
        std::iter::successors(model.parent.and_then(|index| self.models.get(index)), move |model| {
            model.parent.and_then(|index| self.models.get(index))
        })
        .take(self.models.len())
    }
}

/// Keep the models flagged in `keep`, relinking each to its nearest kept ancestor
fn retain_models(models: &[Model], keep: &[bool]) -> Vec<Model> {
    let mut new_index = vec![None; models.len()];
    let mut next = 0;
    for (index, &kept) in keep.iter().enumerate() {
        if kept {
            new_index[index] = Some(next);
            next += 1;
        }
    }

    models
        .iter()
        .zip(keep)
        .filter(|(_, &kept)| kept)
        .map(|(model, _)| {
            let mut retained = model.clone();
            let mut parent = model.parent;
            // Bounded walk so malformed links can't spin forever
            for _ in 0..models.len() {
                match parent {
                    Some(index) if index < models.len() && new_index[index].is_none() => {
                        parent = models[index].parent;
                    }
                    _ => break,
                }
            }
            retained.parent = parent.and_then(|index| new_index.get(index).copied().flatten());
            retained
        })
        .collect()
}

impl SceneSource for MemorySource {
    type Armature = String;

    fn scene_name(&self) -> String {
        self.scene_name.clone()
    }

    fn gather_materials(&self) -> Result<Vec<Material>, ExportError> {
        Ok(self.materials.clone())
    }

    fn gather_models(
        &self,
        apply_modifiers: bool,
        export_target: ExportTarget,
        skeleton_only: bool,
    ) -> Result<GatheredModels<String>, ExportError> {
        trace!("Gathering from memory (apply_modifiers={apply_modifiers}, target={export_target:?})");

        let mut keep = self.selection_mask(export_target);
        if skeleton_only {
            for (kept, model) in keep.iter_mut().zip(&self.models) {
                *kept &= matches!(model.model_type, ModelType::Bone | ModelType::Null);
            }
        }

        let models = retain_models(&self.models, &keep);
        debug!("Gathered {} of {} models", models.len(), self.models.len());

        Ok(GatheredModels {
            models,
            armature: self.armature.clone(),
        })
    }
}

impl AnimationSource<String> for MemorySource {
    fn extract_anim(&self, armature: &String, root_model_name: &str) -> Result<Animation, ExportError> {
        let mut animation = self
            .animations
            .iter()
            .find(|animation| animation.root_joint == *armature && animation.has_keys())
            .cloned()
            .ok_or_else(|| ExportError::NoAnimationCurves(armature.clone()))?;

        // The exported root needs keys too; hold it at identity
        if !animation.bone_frames.iter().any(|bone| bone.bone == root_model_name) {
            let frames = animation.start_index..=animation.end_index;
            animation.bone_frames.insert(
                0,
                BoneFrames {
                    bone: root_model_name.to_string(),
                    translations: frames
                        .clone()
                        .map(|index| TranslationFrame { index, translation: Vec3::zeros() })
                        .collect(),
                    rotations: frames
                        .map(|index| RotationFrame { index, rotation: Quat::identity() })
                        .collect(),
                },
            );
        }

        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> MemorySource {
        let mut source = MemorySource::new("rig");
        source.models = vec![
            Model::new("armature", ModelType::Null),
            Model::new("hips", ModelType::Bone).with_parent(0),
            Model::new("body", ModelType::Skin).with_parent(1),
            Model::new("hand", ModelType::Bone).with_parent(2),
            Model::new("prop", ModelType::Static),
        ];
        source
    }

    fn names(models: &[Model]) -> Vec<&str> {
        models.iter().map(|model| model.name.as_str()).collect()
    }

    #[test]
    fn test_skeleton_only_relinks_to_kept_ancestor() {
        let gathered = rig().gather_models(true, ExportTarget::Scene, true).unwrap();

        assert_eq!(names(&gathered.models), ["armature", "hips", "hand"]);
        assert_eq!(gathered.models[2].parent, Some(1));
    }

    #[test]
    fn test_selected_with_children() {
        let mut source = rig();
        source.selected = vec!["hips".into()];

        let selected = source.gather_models(true, ExportTarget::Selected, false).unwrap();
        assert_eq!(names(&selected.models), ["hips"]);
        assert_eq!(selected.models[0].parent, None);

        let subtree = source.gather_models(true, ExportTarget::SelectedWithChildren, false).unwrap();
        assert_eq!(names(&subtree.models), ["hips", "body", "hand"]);
        assert_eq!(subtree.models[1].parent, Some(0));
    }

    #[test]
    fn test_extract_anim_adds_root_keys() {
        let mut source = rig();
        source.animations.push(Animation {
            root_joint: "armature".into(),
            start_index: 0,
            end_index: 2,
            bone_frames: vec![BoneFrames {
                bone: "hips".into(),
                translations: vec![TranslationFrame { index: 0, translation: Vec3::zeros() }],
                rotations: Vec::new(),
            }],
            ..Default::default()
        });

        let animation = source.extract_anim(&"armature".to_string(), "scene_root").unwrap();
        assert_eq!(animation.bone_frames[0].bone, "scene_root");
        assert_eq!(animation.bone_frames[0].rotations.len(), 3);
        assert_eq!(animation.bone_frames[1].bone, "hips");
    }

    #[test]
    fn test_extract_anim_without_curves() {
        let err = rig().extract_anim(&"armature".to_string(), "armature").unwrap_err();
        assert_eq!(err, ExportError::NoAnimationCurves("armature".into()));
    }
}
