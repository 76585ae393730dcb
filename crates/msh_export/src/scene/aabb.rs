//! Scene bounding volume

use serde::{Deserialize, Serialize};

use super::Scene;
use crate::foundation::math::{Point3, Vec3};
use crate::model::hierarchy::get_model_world_matrix;

/// Axis-Aligned Bounding Box in world space
///
/// The empty box has `min = +inf` and `max = -inf`, so the first integrated
/// point or box initializes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneAabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Default for SceneAabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl SceneAabb {
    /// The identity value for merging
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// True until something has been integrated
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to contain `position`
    pub fn integrate_position(&mut self, position: &Vec3) {
        self.min = self.min.inf(position);
        self.max = self.max.sup(position);
    }

    /// Grow to contain `other`
    pub fn integrate_aabb(&mut self, other: &Self) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Component-wise union of two boxes
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        self.integrate_aabb(other);
        self
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// World-space bounds of every visible model with geometry
///
/// Hidden and geometry-less models are skipped. A scene with nothing to
/// bound returns [`SceneAabb::empty`].
pub fn create_scene_aabb(scene: &Scene) -> SceneAabb {
    let mut global_aabb = SceneAabb::empty();

    for model in &scene.models {
        if model.geometry.is_none() || model.hidden {
            continue;
        }

        let model_world_matrix = get_model_world_matrix(model, &scene.models);
        let mut model_aabb = SceneAabb::empty();

        for segment in model.segments() {
            for position in &segment.positions {
                let world = model_world_matrix.transform_point(&Point3::from(*position));
                model_aabb.integrate_position(&world.coords);
            }
        }

        global_aabb.integrate_aabb(&model_aabb);
    }

    global_aabb
}
