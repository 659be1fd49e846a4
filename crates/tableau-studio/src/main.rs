use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use log::{info, warn};

use tableau_engine::logging::{init_logging, LoggingConfig};
use tableau_engine::time::FrameClock;
use tableau_graph::draw::{self, GridOptions};
use tableau_graph::object::DisplayNode;
use tableau_graph::Engine;

const DEMO_SCENE: &str = include_str!("../scenes/demo.json");
const OVERLAY: &str = "overlay";

/// Headless scene driver: loads a scene, runs frames, reports hits.
#[derive(Parser, Debug)]
#[command(name = "tableau-studio", version)]
struct Args {
    /// Scene document (JSON). Defaults to the bundled demo scene.
    scene: Option<PathBuf>,

    /// Number of frames to drive.
    #[arg(long, default_value_t = 90)]
    frames: u32,

    /// Target frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    interval_ms: u64,

    /// Screen coordinate to hit-test after the run. Repeatable.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], action = clap::ArgAction::Append, allow_negative_numbers = true)]
    hit: Vec<f32>,

    /// Screen offset of the drawing surface's top-left corner.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    offset: Vec<f32>,

    /// Render every layer with the isometric projection.
    #[arg(long, default_value_t = false)]
    iso: bool,

    /// Draw a reference grid and axis on an overlay layer.
    #[arg(long, default_value_t = false)]
    grid: bool,

    /// Log filter (env_logger syntax). Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    });

    let mut engine = Engine::new();
    load_scene(&mut engine, args.scene.as_ref())?;

    if let [x, y] = args.offset[..] {
        engine.set_surface_offset((x, y));
    }
    if args.iso {
        engine.layers_mut().for_each(|layer| layer.set_isometric(true));
    }
    if args.grid {
        engine.add_layer(OVERLAY).context("add overlay layer")?.set_isometric(args.iso);
    }

    let world = engine.world_size();
    println!();
    println!("  tableau studio");
    println!("  world   {} x {}", world.width, world.height);
    println!("  layers  {}", engine.layers().map(|l| l.name()).collect::<Vec<_>>().join(", "));
    println!();

    run(&mut engine, &args);

    for layer in engine.layers() {
        info!("{}: {} draw items", layer.name(), layer.draw_list().len());
    }

    report_hits(&engine, &args.hit);
    Ok(())
}

fn load_scene(engine: &mut Engine, path: Option<&PathBuf>) -> anyhow::Result<()> {
    let (json, source) = match path {
        Some(path) => (
            std::fs::read_to_string(path).with_context(|| format!("read scene '{}'", path.display()))?,
            path.display().to_string(),
        ),
        None => (DEMO_SCENE.to_owned(), "bundled demo".to_owned()),
    };

    let layers = engine
        .load_json(&json)
        .with_context(|| format!("load scene from {source}"))?;
    info!("loaded {layers} layers from {source}");
    Ok(())
}

fn run(engine: &mut Engine, args: &Args) {
    engine.show_fps(|fps| println!("  fps     {fps:.1}"));

    let mut clock = FrameClock::new();
    let interval = Duration::from_millis(args.interval_ms);

    for _ in 0..args.frames {
        let time = clock.tick();
        engine.frame(&time);

        if args.grid {
            if let Some(overlay) = engine.layer_mut(OVERLAY) {
                draw::grid(&mut overlay.draw(), &GridOptions::default());
                draw::axis(&mut overlay.draw(), 0.0);
            }
        }

        std::thread::sleep(interval);
    }

    engine.hide_fps();
}

fn report_hits(engine: &Engine, coords: &[f32]) {
    if coords.len() % 2 != 0 {
        warn!("ignoring trailing --hit coordinate");
    }

    for pair in coords.chunks_exact(2) {
        let (x, y) = (pair[0], pair[1]);
        let world = engine.screen_to_world((x, y));
        let hits = engine.hit_test((x, y));

        println!("  hit ({x}, {y}) -> world ({}, {})", world.x, world.y);
        if hits.is_empty() {
            println!("      nothing");
        }
        for node in hits {
            println!("      {:<12} z={}", node.name(), node.z_index().get());
        }
    }
}
