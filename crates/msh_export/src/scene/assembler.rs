//! Scene assembly pipeline
//!
//! Stage order matters: strips are built on the sorted models, roots are
//! joined before pruning so pruning sees the final model set, and the
//! animation is named after the final root.

use log::{debug, info, warn};

use super::Scene;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::model::hierarchy::{
    has_multiple_root_models, inject_dummy_data, reparent_model_roots, sort_by_parent,
    SYNTHETIC_ROOT_NAME,
};
use crate::model::triangle_strips::{assign_independent_strips, create_models_triangle_strips};
use crate::model::{Model, ModelKind, ModelType};
use crate::material::remove_unused_materials;
use crate::source::{AnimationSource, GatheredModels, SceneSource};

/// Build an exportable scene from a host source
///
/// Either the whole scene is returned or nothing is: any error aborts
/// assembly before a `Scene` exists.
pub fn create_scene<S, A>(config: &ExportConfig, source: &S, animation_source: &A) -> Result<Scene, ExportError>
where
    S: SceneSource,
    A: AnimationSource<S::Armature>,
{
    let mut scene = Scene::new(source.scene_name());
    info!("Assembling scene '{}' ({:?})", scene.name, config);

    let materials = source.gather_materials()?;
    let GatheredModels { models, armature } =
        source.gather_models(config.apply_modifiers, config.export_target, config.skeleton_only)?;
    debug!("Gathered {} materials, {} models", materials.len(), models.len());

    let mut models = sort_by_parent(models)?;

    models = if config.generate_triangle_strips {
        create_models_triangle_strips(models)
    } else {
        assign_independent_strips(models)
    };

    if has_multiple_root_models(&models) {
        models = reparent_model_roots(models);
    } else if models.is_empty() {
        warn!("Scene '{}' has no models, exporting an empty root", scene.name);
        models.push(Model {
            name: SYNTHETIC_ROOT_NAME.to_string(),
            model_type: ModelType::Null,
            kind: ModelKind::SyntheticRoot,
            ..Default::default()
        });
    }

    scene.materials = remove_unused_materials(materials, &models);
    scene.models = models;

    let Some(root) = scene.models.first_mut() else {
        return Ok(scene);
    };

    if config.export_animation {
        let armature = armature.ok_or(ExportError::MissingArmature)?;
        let animation = animation_source.extract_anim(&armature, &root.name)?;
        debug!(
            "Extracted animation for '{}': {} bones, {} frames",
            root.name,
            animation.bone_frames.len(),
            animation.frame_count()
        );
        scene.animation = Some(animation);
    }

    if config.skeleton_only && root.model_type == ModelType::Null && root.geometry.is_none() {
        inject_dummy_data(root);
    }

    info!(
        "Assembled scene '{}': {} models, {} materials, animation: {}",
        scene.name,
        scene.models.len(),
        scene.materials.len(),
        scene.animation.is_some()
    );
    Ok(scene)
}
