use std::path::PathBuf;

use anyhow::{bail, Context};
use contourview::{init_logging, inspect_scene, Config, SceneDocument, BUILD_DATE, VERSION};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let mut args = std::env::args_os().skip(1);
    let Some(scene_path) = args.next().map(PathBuf::from) else {
        bail!("usage: contourview <scene.json> [config.(json|toml)]");
    };

    info!("ContourView {} (built {})", VERSION, BUILD_DATE);

    let config = match args.next().map(PathBuf::from) {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)?,
            None => Config::default(),
        },
    };

    let doc = SceneDocument::load(&scene_path)?;
    let summary = inspect_scene(&doc, &config);

    info!(
        "{} meshes, {} quads, bounds {:?}, fitted: {}, scale {}",
        summary.meshes, summary.quads, summary.bounds, summary.fitted, summary.camera_scale
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
