//! End-to-end scene assembly scenarios

use msh_export::model::hierarchy::SYNTHETIC_ROOT_NAME;
use msh_export::prelude::*;
use msh_export::scene::{BoneFrames, RotationFrame};

fn quad(material: &str) -> GeometrySegment {
    GeometrySegment::new(
        material,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [1, 2, 3]],
    )
}

fn translated(x: f32, y: f32, z: f32) -> ModelTransform {
    ModelTransform::from_translation_rotation(Vec3::new(x, y, z), Quat::identity())
}

/// Two independent roots, one child gathered before its parent, one unused material
fn two_root_source() -> MemorySource {
    let mut source = MemorySource::new("two_roots");
    source.materials = vec![Material::new("bark"), Material::new("unused"), Material::new("leaf")];
    source.models = vec![
        Model::new("leaves", ModelType::Static)
            .with_parent(1)
            .with_transform(translated(0.0, 2.0, 0.0))
            .with_geometry(vec![quad("leaf")]),
        Model::new("A", ModelType::Static).with_geometry(vec![quad("bark")]),
        Model::new("B", ModelType::Static)
            .with_transform(translated(10.0, 0.0, 0.0))
            .with_geometry(vec![quad("bark")]),
    ];
    source
}

fn names(scene: &Scene) -> Vec<&str> {
    scene.models.iter().map(|model| model.name.as_str()).collect()
}

#[test]
fn test_two_roots_are_joined_under_synthetic_root() {
    let source = two_root_source();
    let scene = create_scene(&ExportConfig::default(), &source, &source).unwrap();

    assert_eq!(scene.name, "two_roots");
    assert_eq!(names(&scene), [SYNTHETIC_ROOT_NAME, "A", "leaves", "B"]);

    let root = scene.root().unwrap();
    assert!(root.is_synthetic());
    assert_eq!(root.model_type, ModelType::Null);
    assert!(root.geometry.is_none());

    assert_eq!(scene.models[1].parent, Some(0));
    assert_eq!(scene.models[2].parent, Some(1));
    assert_eq!(scene.models[3].parent, Some(0));
    assert!(scene.animation.is_none());
}

#[test]
fn test_unused_materials_are_pruned_in_order() {
    let source = two_root_source();
    let scene = create_scene(&ExportConfig::default(), &source, &source).unwrap();

    let materials: Vec<&str> = scene.materials.iter().map(|material| material.name.as_str()).collect();
    assert_eq!(materials, ["bark", "leaf"]);
}

#[test]
fn test_strip_generation_toggle() {
    let source = two_root_source();

    let stripped = create_scene(&ExportConfig::default(), &source, &source).unwrap();
    let segment = stripped.models[1].segments().next().unwrap();
    assert_eq!(segment.triangle_strips, vec![vec![0, 1, 2, 3]]);

    let config = ExportConfig {
        generate_triangle_strips: false,
        ..ExportConfig::default()
    };
    let independent = create_scene(&config, &source, &source).unwrap();
    let segment = independent.models[1].segments().next().unwrap();
    assert_eq!(segment.triangle_strips, vec![vec![0, 1, 2], vec![1, 2, 3]]);
}

#[test]
fn test_scene_aabb_spans_hierarchy() {
    let source = two_root_source();
    let scene = create_scene(&ExportConfig::default(), &source, &source).unwrap();
    let aabb = create_scene_aabb(&scene);

    assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(11.0, 3.0, 0.0));
}

#[test]
fn test_animation_requires_armature() {
    let source = two_root_source();
    let config = ExportConfig {
        export_animation: true,
        ..ExportConfig::default()
    };

    let result = create_scene(&config, &source, &source);
    assert_eq!(result, Err(ExportError::MissingArmature));
}

#[test]
fn test_skeleton_only_animation_export() {
    let mut source = MemorySource::new("rig");
    source.materials = vec![Material::new("skin")];
    source.models = vec![
        Model::new("armature", ModelType::Null),
        Model::new("hips", ModelType::Bone).with_parent(0),
        Model::new("body", ModelType::Skin).with_parent(1).with_geometry(vec![quad("skin")]),
    ];
    source.armature = Some("armature".into());
    source.animations.push(Animation {
        root_joint: "armature".into(),
        end_index: 1,
        bone_frames: vec![BoneFrames {
            bone: "hips".into(),
            rotations: vec![
                RotationFrame { index: 0, rotation: Quat::identity() },
                RotationFrame { index: 1, rotation: Quat::identity() },
            ],
            ..Default::default()
        }],
        ..Default::default()
    });

    let scene = create_scene(&ExportConfig::animation_only(), &source, &source).unwrap();

    assert_eq!(names(&scene), ["armature", "hips"]);
    assert!(scene.materials.is_empty());

    // Null root received the hidden placeholder
    let root = scene.root().unwrap();
    assert!(root.hidden);
    assert_eq!(root.model_type, ModelType::Static);
    assert_eq!(root.segments().count(), 1);
    assert!(create_scene_aabb(&scene).is_empty());

    let animation = scene.animation.as_ref().unwrap();
    assert_eq!(animation.bone_frames[0].bone, "armature");
    assert_eq!(animation.frame_count(), 2);
}

#[test]
fn test_missing_curves_propagate() {
    let mut source = MemorySource::new("static_rig");
    source.models = vec![Model::new("armature", ModelType::Null)];
    source.armature = Some("armature".into());

    let config = ExportConfig {
        export_animation: true,
        ..ExportConfig::default()
    };
    let result = create_scene(&config, &source, &source);
    assert_eq!(result, Err(ExportError::NoAnimationCurves("armature".into())));
}

#[test]
fn test_cycle_aborts_assembly() {
    let mut source = MemorySource::new("broken");
    source.models = vec![
        Model::new("a", ModelType::Null).with_parent(2),
        Model::new("b", ModelType::Null).with_parent(0),
        Model::new("c", ModelType::Null).with_parent(1),
    ];

    let result = create_scene(&ExportConfig::default(), &source, &source);
    assert!(matches!(result, Err(ExportError::Cycle { .. })));
}

#[test]
fn test_empty_source_gets_single_root() {
    let source = MemorySource::new("empty");
    let scene = create_scene(&ExportConfig::default(), &source, &source).unwrap();

    assert_eq!(scene.model_count(), 1);
    assert!(scene.root().unwrap().is_synthetic());
    assert!(create_scene_aabb(&scene).is_empty());
}
