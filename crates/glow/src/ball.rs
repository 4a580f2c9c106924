use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use glow::{save_path, should_save};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use point_cloud_projector::{
    Point3,
    camera::CameraConfig,
    sampler::SphereConfig,
    scene::{Scene, SceneConfig},
};

/// Renders a rotating sphere of points with a glowing trail.
#[derive(Parser)]
#[command(name = "ball", about = "Render a rotating point cloud sphere to PNG frames")]
struct Args {
    /// Number of frames to render.
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Number of points on the sphere.
    #[arg(short, long, default_value_t = 2000)]
    points: usize,

    /// Radius of the sphere.
    #[arg(long, default_value_t = 300.0)]
    radius: f64,

    /// Distance from the camera to the center of the sphere.
    #[arg(long, default_value_t = 500.0)]
    distance: f64,

    /// Perspective constant of the camera.
    #[arg(long, default_value_t = 400.0)]
    perspective: f64,

    /// Image width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Rotation added after each frame, in radians.
    #[arg(long, default_value_t = 0.01)]
    rotation_step: f64,

    /// Save every n-th frame. With 0 only the last frame is saved.
    #[arg(long, default_value_t = 0)]
    save_every: u64,

    /// Directory the frames are written to.
    #[arg(short, long, default_value = "frames")]
    output: PathBuf,

    /// File name prefix of the frames.
    #[arg(long, default_value = "ball")]
    prefix: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = SceneConfig::default()
        .with_camera(
            CameraConfig::default()
                .with_perspective(args.perspective)
                .with_resolution(args.width, args.height),
        )
        .with_sphere(SphereConfig::new(
            Point3::new(0.0, args.distance, 0.0),
            args.radius,
            args.points,
        ))
        .with_rotation_step(args.rotation_step);
    let mut scene = Scene::new(&config).context("Failed to set up the camera")?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    info!(
        "Rendering {} frames of {} points at {}x{}",
        args.frames, args.points, args.width, args.height
    );

    let progress = ProgressBar::new(args.frames).with_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} frames ({eta})")
            .context("Invalid progress bar template")?,
    );

    for frame in 1..=args.frames {
        let raster = scene.step();

        if should_save(frame, args.frames, args.save_every) {
            let path = save_path(&args.output, &args.prefix, frame);
            raster
                .to_image()
                .save(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            progress.println(format!("Saved frame {frame} to {}", path.display()));
        }

        progress.inc(1);
    }
    progress.finish();

    info!("Done after {} frames", scene.frame_count());
    Ok(())
}
