//! Headless demo: builds the showcase structure, orbits a camera around it
//! for a few frames, picks the block under the crosshair, and edits the
//! structure mid-run to show chunk re-meshing.

mod scene;

use std::path::PathBuf;

use bauwerk_blocks::BlockRegistry;
use bauwerk_geom::Vec3;
use bauwerk_render::{
    HeadlessBackend, PowerPreference, RenderState, Renderer, RendererOptions, SurfaceDescriptor,
};
use bauwerk_structure::Position;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bauwerk",
    about = "Voxel structure renderer demo (headless backend)"
)]
struct Args {
    /// Directory holding atlas.toml and blocks.toml
    #[arg(long, default_value = "assets/voxels")]
    assets: PathBuf,

    /// Chunk meshes kept in the render cache
    #[arg(long, default_value_t = 64)]
    cache_capacity: usize,

    /// Frames to simulate
    #[arg(long, default_value_t = 8)]
    frames: u32,

    /// Voxels the mesher may visit per frame (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    mesh_budget: usize,

    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let registry = BlockRegistry::load_from_paths(
        args.assets.join("atlas.toml"),
        args.assets.join("blocks.toml"),
    )?;
    let mut structure = scene::build_showcase(&registry);
    log::info!(
        "showcase structure: {}x{}x{}, {} palette entries",
        structure.dims.sx,
        structure.dims.sy,
        structure.dims.sz,
        structure.palette().len()
    );

    let mut renderer = Renderer::new(HeadlessBackend::new(), args.cache_capacity)?;
    if args.mesh_budget > 0 {
        renderer.set_mesh_budget(args.mesh_budget);
    }
    renderer.initialize(
        SurfaceDescriptor::new(args.width, args.height),
        &RendererOptions {
            antialias: true,
            power_preference: PowerPreference::HighPerformance,
            ..RendererOptions::default()
        },
    )?;

    let center = Vec3::new(
        structure.dims.sx as f32 * 0.5,
        2.0,
        structure.dims.sz as f32 * 0.5,
    );
    let mut selected: Option<Position> = None;
    for frame in 0..args.frames {
        let angle = (frame as f32 / args.frames.max(1) as f32) * std::f32::consts::TAU;
        let eye = center + Vec3::new(angle.cos() * 28.0, 14.0, angle.sin() * 28.0);
        let (yaw, pitch) = look_at(eye, center);
        let state = RenderState::new()
            .with_camera(eye, yaw, pitch)
            .with_selected(selected);
        renderer.render(&structure, &registry, &state);

        let chunks = renderer.backend().submitted().len();
        match renderer.raycast(args.width as f32 * 0.5, args.height as f32 * 0.5) {
            Some(hit) => {
                selected = Some(hit.position);
                log::info!(
                    "frame {frame}: {chunks} chunks, crosshair on {:?} face {:?} at {:.2}",
                    hit.position,
                    hit.face,
                    hit.distance
                );
            }
            None => {
                selected = None;
                log::info!("frame {frame}: {chunks} chunks, crosshair in the open");
            }
        }

        if frame == args.frames / 2 {
            // Knock a hole in the hut's east wall. The voxel sits on a chunk
            // border, so the neighbor chunk re-meshes as well.
            structure.remove_block(Position::new(31, 2, 6));
            log::info!("frame {frame}: removed a wall block at (31, 2, 6)");
        }
    }

    let stats = renderer.cache_stats();
    log::info!(
        "cache: {} entries, {} hits, {} misses, {} evictions",
        stats.entries,
        stats.hits,
        stats.misses,
        stats.evictions
    );
    renderer.dispose();
    Ok(())
}

/// Yaw/pitch pair (degrees) pointing a camera at `target`.
fn look_at(eye: Vec3, target: Vec3) -> (f32, f32) {
    let dir = (target - eye).normalized();
    let yaw = dir.z.atan2(dir.x).to_degrees();
    let pitch = dir.y.asin().to_degrees();
    (yaw, pitch)
}
