//! Balloon Modeling
//!
//! Loads a balloon scene, squashes the primary balloon against its neighbours
//! and reports or exports the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use balloon_modeling::config::{
    DEFAULT_ICOSPHERE_SUBDIVISIONS, ModelConfig, detail_resolution,
};
use balloon_modeling::export::export_obj;
use balloon_modeling::scene::SceneDescription;

/// Balloon squash modeling
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scene description file; the configured default balloon is used if omitted
    scene: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override ring count (latitude subdivisions)
    #[arg(long)]
    rings: Option<u32>,

    /// Override segment count (longitude subdivisions)
    #[arg(long)]
    segments: Option<u32>,

    /// Tessellate the primary balloon as an icosphere
    #[arg(long)]
    icosphere: bool,

    /// Detail level: icosphere subdivisions, or (level + 1) * 8 rings and segments
    #[arg(short, long)]
    detail: Option<u32>,

    /// Write the deformed primary balloon as Wavefront OBJ
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config {
        match ModelConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                ModelConfig::default()
            }
        }
    } else {
        ModelConfig::default()
    };

    if let Some(export) = args.export {
        config.export_path = Some(export);
    }

    let mut description = match args.scene {
        Some(ref path) => match SceneDescription::from_file(path) {
            Ok(description) => {
                log::info!("Loaded scene from {}", path.display());
                description
            }
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No scene given, using the default balloon");
            config.default_scene()
        }
    };

    if args.icosphere {
        description.icosphere = Some(
            args.detail
                .or(config.mesh.icosphere)
                .unwrap_or(DEFAULT_ICOSPHERE_SUBDIVISIONS),
        );
    } else if let Some(level) = args.detail {
        description.rings = detail_resolution(level);
        description.segments = detail_resolution(level);
    }
    if let Some(rings) = args.rings {
        description.rings = rings;
    }
    if let Some(segments) = args.segments {
        description.segments = segments;
    }

    let scene = match description.build() {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match (scene.draw_streams(), scene.primary_bounds()) {
        (Ok(streams), Ok(bounds)) => {
            let vertices: usize = streams.iter().map(|s| s.len()).sum();
            log::info!(
                "{} draw streams, {} vertices; primary bounds center {} radius {:.4}, camera distance {:.4}",
                streams.len(),
                vertices,
                bounds.center,
                bounds.radius,
                bounds.framing_distance(config.fov_radians())
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Some(ref path) = config.export_path
        && let Err(e) = export_obj(scene.primary(), path)
    {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
