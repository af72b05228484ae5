//! Render the demo box once per shading model.
//!
//! Writes `shading_<model>.ppm` files to the working directory.
//! Run with: cargo run --example shading_models

use std::fs::File;
use std::io::{BufWriter, Write};

use glint_renderer::{render, FrameBuffer, RenderConfig, Scene, ShadingModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut scene = Scene::default_scene();
    let config = RenderConfig::with_resolution(256, 256);

    for model in ShadingModel::ALL {
        scene.shading_model = model;

        let start = std::time::Instant::now();
        let frame = render(&scene, &config)?;
        println!("{:<20} rendered in {:?}", model.label(), start.elapsed());

        let filename = format!("shading_{model}.ppm");
        save_ppm(&frame, &filename)?;
        println!("Saved to {}", filename);
    }

    Ok(())
}

fn save_ppm(frame: &FrameBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;

    for y in 0..frame.height() {
        for pixel in frame.row(y) {
            writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }
    }

    Ok(())
}
