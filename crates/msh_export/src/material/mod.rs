//! Materials and unused-material pruning

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::Model;

/// Material as referenced by geometry segments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Name segments refer to
    pub name: String,
    /// Legacy material flag bits
    pub flags: u32,
    /// Legacy render type code
    pub rendertype: u32,
    /// Render type parameters
    pub data: [u8; 2],
    /// Diffuse texture
    pub texture0: Option<String>,
    /// Normal, detail or bump texture depending on render type
    pub texture1: Option<String>,
    /// Secondary texture
    pub texture2: Option<String>,
    /// Environment or tertiary texture
    pub texture3: Option<String>,
}

impl Material {
    /// Create a material with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Keep only materials referenced by some geometry segment
///
/// Hidden models still count as references. Retained materials keep their
/// input order.
pub fn remove_unused_materials(materials: Vec<Material>, models: &[Model]) -> Vec<Material> {
    let referenced: HashSet<&str> = models
        .iter()
        .flat_map(Model::segments)
        .map(|segment| segment.material_name.as_str())
        .collect();

    let before = materials.len();
    let retained: Vec<Material> = materials
        .into_iter()
        .filter(|material| referenced.contains(material.name.as_str()))
        .collect();

    if retained.len() != before {
        debug!("Pruned {} unused materials, {} remain", before - retained.len(), retained.len());
    }
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeometrySegment, ModelType};

    fn mesh(name: &str, materials: &[&str]) -> Model {
        Model::new(name, ModelType::Static).with_geometry(
            materials
                .iter()
                .map(|material| GeometrySegment::new(*material, Vec::new(), Vec::new()))
                .collect(),
        )
    }

    fn names(materials: &[Material]) -> Vec<&str> {
        materials.iter().map(|material| material.name.as_str()).collect()
    }

    #[test]
    fn test_prune_preserves_input_order() {
        let materials = ["wood", "unused", "metal", "glass"].map(Material::new).to_vec();
        let models = vec![
            mesh("a", &["glass"]),
            Model::new("null", ModelType::Null),
            mesh("b", &["wood", "glass"]),
        ];

        let retained = remove_unused_materials(materials, &models);
        assert_eq!(names(&retained), ["wood", "glass"]);
    }

    #[test]
    fn test_hidden_models_keep_materials() {
        let mut hidden = mesh("h", &["metal"]);
        hidden.hidden = true;

        let retained = remove_unused_materials(vec![Material::new("metal")], &[hidden]);
        assert_eq!(names(&retained), ["metal"]);
    }

    #[test]
    fn test_no_geometry_prunes_everything() {
        let retained = remove_unused_materials(
            vec![Material::new("a"), Material::new("b")],
            &[Model::new("bone", ModelType::Bone)],
        );
        assert!(retained.is_empty());
    }
}
