//! Particle field CLI: native preview window or a headless bounded run
//!
//! Run with: cargo run --features cli --bin particle-cli -- --headless --frames 600

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use particle_field::config::{FieldConfig, CONFIG_ENV};
use particle_field::core::{CountingSurface, FrameLoop, LoopControl, ParticleField, Viewport};
use particle_field::time::FpsCounter;

#[derive(Parser, Debug)]
#[command(name = "particle-cli", about = "Preview or benchmark the particle background")]
struct Args {
    /// JSON config file (falls back to $PARTICLE_FIELD_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Step the field without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// RNG seed for a reproducible cloud
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width for headless runs (CSS px)
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// Viewport height for headless runs (CSS px)
    #[arg(long, default_value_t = 1080.0)]
    height: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,particle_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));
    let config = match &config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            FieldConfig::from_file(path)?
        }
        None => FieldConfig::default(),
    };

    if !args.headless {
        particle_field::preview::run(config, args.seed)?;
        return Ok(());
    }

    run_headless(config, &args);
    Ok(())
}

fn run_headless(config: FieldConfig, args: &Args) {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let viewport = Viewport::new(args.width, args.height, 1.0);
    if viewport.is_degenerate() {
        warn!(width = args.width, height = args.height, "Degenerate viewport, nothing to run");
        return;
    }

    let max_ratio = config.style.max_pixel_ratio;
    let field = ParticleField::new(config, viewport, &mut rng);
    let mut frame_loop = FrameLoop::new(field, CountingSurface::new(max_ratio));
    frame_loop.on_resize(viewport);

    // Sweep the pointer across the viewport to exercise the parallax path
    let mut fps = FpsCounter::new(120);
    let mut done = 0;
    while done < args.frames {
        let t = done as f32 / args.frames.max(1) as f32;
        frame_loop.on_pointer_move(t * args.width, (1.0 - t) * args.height);
        if frame_loop.tick() == LoopControl::Stop {
            warn!(frame = done, "Frame loop stopped early");
            break;
        }
        fps.tick();
        done += 1;

        if done % 120 == 0 {
            let field = frame_loop.field();
            info!(
                frame = done,
                visible = frame_loop.surface().last_visible,
                rotation = ?field.transform().rotation,
                translation = ?field.transform().translation,
                "progress"
            );
        }
    }

    let field = frame_loop.field();
    info!(
        frames = done,
        points = field.cloud().len(),
        visible = frame_loop.surface().last_visible,
        steps_per_sec = %format!("{:.0}", fps.fps()),
        "Headless run finished"
    );
}
