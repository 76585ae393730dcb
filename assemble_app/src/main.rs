//! Scene assembly driver
//!
//! Loads a pre-gathered scene description (RON) and export options (TOML or
//! RON), runs the export pipeline and reports what a serializer would write.
//!
//! Usage: msh_assemble <scene.ron> [export.toml]

use std::env;
use std::path::Path;

use log::{error, info};
use msh_export::foundation::logging;
use msh_export::prelude::*;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Usage: msh_assemble <scene.ron> [export.toml]")]
    Usage,

    #[error("Failed to read scene file '{0}': {1}")]
    SceneFile(String, String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn load_source(path: &str) -> Result<MemorySource, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|e| AppError::SceneFile(path.to_string(), e.to_string()))?;
    ron::from_str(&contents).map_err(|e| AppError::SceneFile(path.to_string(), e.to_string()))
}

fn run(args: &[String]) -> Result<(), AppError> {
    let scene_path = args.get(1).ok_or(AppError::Usage)?;
    let config = match args.get(2) {
        Some(path) => ExportConfig::load_from_file(Path::new(path))?,
        None => ExportConfig::default(),
    };

    let source = load_source(scene_path)?;
    let scene = create_scene(&config, &source, &source)?;
    let aabb = create_scene_aabb(&scene);

    for (index, model) in scene.models.iter().enumerate() {
        let strips: usize = model.segments().map(|segment| segment.triangle_strips.len()).sum();
        let triangles: usize = model.segments().map(|segment| segment.triangles.len()).sum();
        info!(
            "[{index}] {} ({:?}, parent {:?}) {} triangles in {} strips{}",
            model.name,
            model.model_type,
            model.parent,
            triangles,
            strips,
            if model.hidden { " [hidden]" } else { "" }
        );
    }

    if aabb.is_empty() {
        info!("Scene bounds: empty");
    } else {
        info!("Scene bounds: min {:?} max {:?}", aabb.min, aabb.max);
    }

    Ok(())
}

fn main() {
    logging::init_with_default("info");

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
