//! # msh_export
//!
//! Scene-graph normalization and geometry optimization for the legacy `.msh`
//! mesh format.
//!
//! The host application gathers models, materials and skeleton data; this crate
//! turns them into a renderer-ready [`scene::Scene`]:
//!
//! - **Hierarchy resolution**: parents before children, a single root
//! - **Triangle strips**: greedy stripification of every geometry segment
//! - **Material pruning**: drop materials no segment references
//! - **Bounds**: world-space AABB over all visible geometry
//!
//! Writing the binary file is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msh_export::prelude::*;
//!
//! fn export(source: &MemorySource) -> Result<(), ExportError> {
//!     let config = ExportConfig::default();
//!     let scene = create_scene(&config, source, source)?;
//!     let aabb = create_scene_aabb(&scene);
//!     println!("{} models, bounds {:?}", scene.model_count(), aabb);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod model;
pub mod material;
pub mod scene;
pub mod source;

mod error;

pub use error::ExportError;

/// Common imports for exporter users
pub mod prelude {
    pub use crate::{
        ExportError,
        config::{Config, ConfigError, ExportConfig, ExportTarget},
        foundation::math::{Mat4, ModelTransform, Point3, Quat, Vec2, Vec3},
        material::{remove_unused_materials, Material},
        model::{
            GeometrySegment, Model, ModelKind, ModelType, Triangle, TriangleStrip,
            hierarchy::{
                get_model_world_matrix, has_multiple_root_models, inject_dummy_data,
                reparent_model_roots, sort_by_parent,
            },
            triangle_strips::{create_models_triangle_strips, expand_triangle_strip},
        },
        scene::{create_scene, create_scene_aabb, Animation, Scene, SceneAabb},
        source::{AnimationSource, GatheredModels, MemorySource, SceneSource},
    };
}
