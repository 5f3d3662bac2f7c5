//! Atomgas entry point
//!
//! Headless host loop: builds a world from config, drives it at a fixed
//! frame delta, and emits render buffers each frame the way a windowed
//! frontend would consume them.

use atomgas::SimConfig;
use atomgas::sim::{TickInput, World, atom_attributes, render_frame, tick};

struct Args {
    config_path: Option<String>,
    frames: u64,
    dt: f32,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        frames: 600,
        dt: 1.0 / 60.0,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                args.frames = iter
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(args.frames);
            }
            "--dt" => {
                args.dt = iter.next().and_then(|v| v.parse().ok()).unwrap_or(args.dt);
            }
            "--seed" => {
                args.seed = iter.next().and_then(|v| v.parse().ok());
            }
            path => args.config_path = Some(path.to_string()),
        }
    }
    args
}

fn main() {
    env_logger::init();

    let args = parse_args();
    let mut config = match &args.config_path {
        Some(path) => SimConfig::load(path),
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut world = World::new(&config);
    let attributes = atom_attributes(&world);
    log::info!(
        "running {} frames at dt = {:.4}s ({} constant atom attributes)",
        args.frames,
        args.dt,
        attributes.len()
    );

    let input = TickInput::default();
    for frame in 0..args.frames {
        tick(&mut world, &input, args.dt);
        let buffers = render_frame(&world);

        if frame % 60 == 0 {
            log::debug!(
                "frame {frame}: {} bonds, {} molecules, {} bond vertices, heat total {:.1}",
                world.bonds.len(),
                world.live_molecules(),
                buffers.bonds.len(),
                world.heat.total()
            );
        }
    }

    log::info!(
        "done after {} ticks: {} bonds, {} live molecules, heat total {:.1}",
        world.time_ticks,
        world.bonds.len(),
        world.live_molecules(),
        world.heat.total()
    );
}
