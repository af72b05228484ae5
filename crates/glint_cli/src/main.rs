//! glint - render a scene to a PNG.
//!
//! Renders the built-in demo box, or a JSON scene file, with one of the four
//! shading models.
//!
//! ```text
//! glint --model lambert-shadow --width 512 --height 512 -o out.png
//! glint --scene box.json --dump-scene resolved.json
//! ```

mod export;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_core::{load_scene, save_scene, Scene, ShadingModel};
use glint_renderer::{RenderConfig, Renderer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    Lambert,
    LambertShadow,
    GiNormal,
    GiReflect,
}

impl From<Model> for ShadingModel {
    fn from(model: Model) -> Self {
        match model {
            Model::Lambert => ShadingModel::Lambert,
            Model::LambertShadow => ShadingModel::LambertShadow,
            Model::GiNormal => ShadingModel::GiNormal,
            Model::GiReflect => ShadingModel::GiReflect,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a sphere-and-plane scene to a PNG")]
struct Cli {
    /// JSON scene file (defaults to the built-in demo box)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// Override the scene's shading model
    #[arg(short, long, value_enum)]
    model: Option<Model>,

    /// Override the scene's bounce distance for the GI models
    #[arg(long)]
    gi_max_distance: Option<f32>,

    /// Render on a single thread
    #[arg(long)]
    serial: bool,

    /// Also write the resolved scene as JSON
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

fn build_scene(cli: &Cli) -> Result<Scene> {
    let mut scene = match &cli.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene from {}", path.display()))?,
        None => Scene::default_scene(),
    };

    if let Some(model) = cli.model {
        scene.shading_model = model.into();
    }
    if let Some(distance) = cli.gi_max_distance {
        scene.gi_max_distance = distance;
    }

    scene.validate().context("Scene overrides are invalid")?;
    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let scene = build_scene(&cli)?;

    if let Some(path) = &cli.dump_scene {
        save_scene(path, &scene)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        log::info!("Wrote scene to {}", path.display());
    }

    let config = RenderConfig {
        parallel: !cli.serial,
        ..RenderConfig::with_resolution(cli.width, cli.height)
    };
    let mut renderer = Renderer::new(config)?;

    log::info!(
        "Rendering {}x{} with {} ({} primitives)",
        cli.width,
        cli.height,
        scene.shading_model.label(),
        scene.primitive_count()
    );
    let start = std::time::Instant::now();
    let frame = renderer.render(&scene);
    log::info!("Rendered in {:?}", start.elapsed());

    export::save_png(frame, &cli.output)?;
    log::info!("Saved to {}", cli.output.display());

    Ok(())
}
