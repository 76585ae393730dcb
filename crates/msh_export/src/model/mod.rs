//! Model and geometry data structures
//!
//! Models live in a flat, ordered `Vec<Model>`. Parent links are indices into
//! that vector; every stage that reorders the vector remaps them.

pub mod hierarchy;
pub mod triangle_strips;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{ModelTransform, Vec2, Vec3};

/// Three vertex indices describing one face
pub type Triangle = [u32; 3];

/// Vertex indices where every window of three forms a face, alternating winding
pub type TriangleStrip = Vec<u32>;

/// Model type as stored in the legacy format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelType {
    /// Transform-only node
    #[default]
    Null,
    /// Skinned mesh
    Skin,
    /// Cloth simulation mesh
    Cloth,
    /// Skeleton joint
    Bone,
    /// Rigid mesh
    Static,
}

impl ModelType {
    /// Numeric code written by the serializer
    pub const fn code(self) -> u32 {
        match self {
            Self::Null => 0,
            Self::Skin => 1,
            Self::Cloth => 2,
            Self::Bone => 3,
            Self::Static => 4,
        }
    }
}

/// Where a model came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// Gathered from the host scene
    #[default]
    Gathered,
    /// Placeholder root created to join several hierarchy roots
    SyntheticRoot,
}

/// Collision shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPrimitiveShape {
    /// Sphere of `radius`
    Sphere,
    /// Cylinder of `radius` and `height`
    Cylinder,
    /// Box of `radius` x `height` x `length` half-extents
    Box,
}

/// Collision primitive attached to a model, passed through untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPrimitive {
    /// Shape kind
    pub shape: CollisionPrimitiveShape,
    /// Radius or X half-extent
    pub radius: f32,
    /// Height or Y half-extent
    pub height: f32,
    /// Z half-extent (boxes only)
    pub length: f32,
}

/// Bone influence on a skinned vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeight {
    /// Index into the model's bone map
    pub bone: u32,
    /// Influence in `[0, 1]`
    pub weight: f32,
}

/// Per-material block of geometry owned by one model
///
/// Vertex and triangle data are fixed once gathered; only
/// `triangle_strips` is filled in during assembly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySegment {
    /// Name of the material used by this segment
    pub material_name: String,
    /// Vertex positions in model space
    pub positions: Vec<Vec3>,
    /// Optional per-vertex normals
    pub normals: Option<Vec<Vec3>>,
    /// Optional per-vertex texture coordinates
    pub texcoords: Option<Vec<Vec2>>,
    /// Optional per-vertex RGBA colors
    pub colors: Option<Vec<[f32; 4]>>,
    /// Optional per-vertex bone weights (skins only)
    pub weights: Option<Vec<Vec<VertexWeight>>>,
    /// Independent triangles
    pub triangles: Vec<Triangle>,
    /// Strips covering exactly the faces in `triangles`
    pub triangle_strips: Vec<TriangleStrip>,
}

impl GeometrySegment {
    /// Create a segment from positions and triangles
    pub fn new(material_name: impl Into<String>, positions: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        Self {
            material_name: material_name.into(),
            positions,
            triangles,
            ..Default::default()
        }
    }
}

/// Node of the exported hierarchy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Unique name
    pub name: String,
    /// Index of the parent in the owning model list
    pub parent: Option<usize>,
    /// Legacy model type
    pub model_type: ModelType,
    /// Gathered or synthetic
    pub kind: ModelKind,
    /// Hidden models are exported but ignored for bounds
    pub hidden: bool,
    /// Transform relative to the parent
    pub transform: ModelTransform,
    /// Geometry segments, `None` for transform-only nodes
    pub geometry: Option<Vec<GeometrySegment>>,
    /// Optional collision shape
    pub collision_primitive: Option<CollisionPrimitive>,
}

impl Model {
    /// Create a parentless model with an identity transform
    pub fn new(name: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            model_type,
            ..Default::default()
        }
    }

    /// Set the parent index
    #[must_use]
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: ModelTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Attach geometry segments
    #[must_use]
    pub fn with_geometry(mut self, geometry: Vec<GeometrySegment>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Whether this model has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this model was synthesized during assembly
    pub fn is_synthetic(&self) -> bool {
        self.kind == ModelKind::SyntheticRoot
    }

    /// Iterate over this model's segments (empty when it has no geometry)
    pub fn segments(&self) -> impl Iterator<Item = &GeometrySegment> {
        self.geometry.iter().flatten()
    }
}
