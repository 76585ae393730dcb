//! Model hierarchy resolution
//!
//! Orders models so parents precede children, joins multiple roots under a
//! synthetic root, and composes world transforms through the parent chain.

use std::collections::HashSet;

use log::{debug, trace};

use super::{GeometrySegment, Model, ModelKind, ModelType};
use crate::error::ExportError;
use crate::foundation::math::{Mat4, ModelTransform, Vec2, Vec3};

/// Base name of the root created by [`reparent_model_roots`]
pub const SYNTHETIC_ROOT_NAME: &str = "scene_root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

/// Check parent links and names before any reordering
///
/// Rejects duplicate names, out-of-range parent indices and self-parenting.
/// Cycles longer than one link are caught by [`sort_by_parent`].
pub fn validate_parents(models: &[Model]) -> Result<(), ExportError> {
    let mut names = HashSet::with_capacity(models.len());

    for (index, model) in models.iter().enumerate() {
        if !names.insert(model.name.as_str()) {
            return Err(ExportError::DuplicateModelName(model.name.clone()));
        }

        match model.parent {
            Some(parent) if parent == index => {
                return Err(ExportError::SelfParent { model: model.name.clone() });
            }
            Some(parent) if parent >= models.len() => {
                return Err(ExportError::InvalidParent { model: model.name.clone(), parent });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Stable topological sort: every parent ends up before its children
///
/// Models keep their gather order except that a model's missing ancestors
/// are pulled in directly ahead of it. Parent indices are remapped to the
/// new positions.
pub fn sort_by_parent(models: Vec<Model>) -> Result<Vec<Model>, ExportError> {
    validate_parents(&models)?;

    let mut state = vec![VisitState::Unvisited; models.len()];
    let mut order = Vec::with_capacity(models.len());
    let mut chain = Vec::new();

    for start in 0..models.len() {
        let mut current = Some(start);

        while let Some(index) = current {
            match state[index] {
                VisitState::Done => break,
                VisitState::Visiting => {
                    return Err(ExportError::Cycle { model: models[index].name.clone() });
                }
                VisitState::Unvisited => {
                    state[index] = VisitState::Visiting;
                    chain.push(index);
                    current = models[index].parent;
                }
            }
        }

        // Chain runs child -> ancestor; emit ancestors first
        for index in chain.drain(..).rev() {
            state[index] = VisitState::Done;
            order.push(index);
        }
    }

    let mut remap = vec![0; models.len()];
    for (new_index, &old_index) in order.iter().enumerate() {
        remap[old_index] = new_index;
    }

    let mut sorted: Vec<(usize, Model)> = models
        .into_iter()
        .enumerate()
        .map(|(old_index, mut model)| {
            model.parent = model.parent.map(|parent| remap[parent]);
            (remap[old_index], model)
        })
        .collect();
    sorted.sort_by_key(|(position, _)| *position);

    trace!("Sorted {} models by parent", sorted.len());
    Ok(sorted.into_iter().map(|(_, model)| model).collect())
}

/// Whether more than one model has no parent
pub fn has_multiple_root_models(models: &[Model]) -> bool {
    models.iter().filter(|model| model.is_root()).count() > 1
}

/// Join all roots under one synthetic `Null` root placed first
///
/// Returns the list unchanged when it already has at most one root.
pub fn reparent_model_roots(models: Vec<Model>) -> Vec<Model> {
    if !has_multiple_root_models(&models) {
        return models;
    }

    let root = Model {
        name: unique_root_name(&models),
        model_type: ModelType::Null,
        kind: ModelKind::SyntheticRoot,
        transform: ModelTransform::identity(),
        ..Default::default()
    };

    debug!(
        "Reparenting {} root models under '{}'",
        models.iter().filter(|model| model.is_root()).count(),
        root.name
    );

    let mut reparented = Vec::with_capacity(models.len() + 1);
    reparented.push(root);
    reparented.extend(models.into_iter().map(|mut model| {
        model.parent = Some(model.parent.map_or(0, |parent| parent + 1));
        model
    }));
    reparented
}

fn unique_root_name(models: &[Model]) -> String {
    let taken: HashSet<&str> = models.iter().map(|model| model.name.as_str()).collect();

    if !taken.contains(SYNTHETIC_ROOT_NAME) {
        return SYNTHETIC_ROOT_NAME.to_string();
    }

    (1..)
        .map(|suffix| format!("{SYNTHETIC_ROOT_NAME}.{suffix:03}"))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| SYNTHETIC_ROOT_NAME.to_string())
}

/// World matrix of `model`: `parent_world * local`, up to the root
///
/// `models` is the list `model.parent` indexes into. A broken chain simply
/// stops at the last reachable ancestor.
pub fn get_model_world_matrix(model: &Model, models: &[Model]) -> Mat4 {
    let mut world = model.transform.to_matrix();
    let mut current = model.parent;

    // Chain length can't exceed the model count in a valid tree
    for _ in 0..models.len() {
        let Some(parent) = current.and_then(|index| models.get(index)) else {
            break;
        };
        world = parent.transform.to_matrix() * world;
        current = parent.parent;
    }

    world
}

/// Give a geometry-less root a hidden placeholder triangle
///
/// Some consumers of skeleton-only files require at least one segment on the
/// root. The placeholder is a single zero-area triangle at the origin.
pub fn inject_dummy_data(root: &mut Model) {
    let positions = vec![Vec3::zeros(); 3];

    let segment = GeometrySegment {
        material_name: String::new(),
        normals: Some(positions.clone()),
        texcoords: Some(vec![Vec2::zeros(); 3]),
        positions,
        triangles: vec![[0, 1, 2]],
        triangle_strips: vec![vec![0, 1, 2]],
        ..Default::default()
    };

    root.hidden = true;
    root.model_type = ModelType::Static;
    root.geometry = Some(vec![segment]);

    debug!("Injected placeholder geometry into root '{}'", root.name);
}
