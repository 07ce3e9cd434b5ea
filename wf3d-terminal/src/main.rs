/// wf3d Terminal Demo - Spinning Wireframes
///
/// Scatters cubes (and optionally pyramids) in front of the camera and spins
/// them about the Y axis.
/// Controls (AZERTY defaults):
///   - Z/S, Q/D, Arrow Keys: Move forward/backward, left/right
///   - A/E: Move up/down
///   - ESC: Quit
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::io;
use std::time::Duration;
use wf3d_core::{Engine, EngineConfig};
use wf3d_terminal::{init_logging, scene, KeyBindings, LoggingConfig, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "wf3d-terminal", version, about = "Spinning wireframe shapes in the terminal")]
struct Args {
    /// Number of unit cubes to scatter
    #[arg(long, default_value_t = 50)]
    cubes: usize,

    /// Number of triangular pyramids to scatter
    #[arg(long, default_value_t = 0)]
    pyramids: usize,

    /// Shapes are offset by up to this much along each axis
    #[arg(long, default_value_t = 10.0)]
    spread: f64,

    /// Seed for the scatter; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 16)]
    interval_ms: u64,

    /// Degrees each shape turns per frame
    #[arg(long, default_value_t = 1.0)]
    spin: f64,

    /// Side of the square engine viewport
    #[arg(long, default_value_t = 640)]
    viewport: u32,

    /// Use W/A/S/D + R/F instead of the AZERTY layout
    #[arg(long)]
    qwerty: bool,

    /// Log filter, e.g. "debug" (logs go to stderr)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let config = EngineConfig {
        viewport_width: args.viewport,
        viewport_height: args.viewport,
        tick_interval: Duration::from_millis(args.interval_ms),
        spin_degrees: args.spin,
        ..EngineConfig::default()
    };
    let mut engine =
        Engine::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for shape in scene::scattered(&mut rng, args.cubes, args.pyramids, args.spread) {
        engine
            .add_shape(shape)
            .map_err(io::Error::other)?;
    }

    println!(
        "wf3d Terminal Renderer - {} shapes loaded",
        engine.shapes().len()
    );
    println!("Starting terminal renderer (press Esc to quit)...");
    std::thread::sleep(Duration::from_secs(1));

    let bindings = if args.qwerty {
        KeyBindings::qwerty()
    } else {
        KeyBindings::default()
    };
    let mut app = TerminalApp::new(engine).with_bindings(bindings);
    app.run()?;

    println!(
        "Rendered {} frames. Thank you for using wf3d!",
        app.engine().frame_index()
    );
    Ok(())
}
