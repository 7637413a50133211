use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use painter3d::driver::HeadlessDriver;
use painter3d::logging::{init_logging, LoggingConfig};
use painter3d::render::Canvas;
use painter3d::{load_mesh_file, Engine, Mesh, RenderConfig};

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "painter3d")]
#[command(about = "A software 3D renderer using the painter's algorithm")]
struct Args {
    /// Mesh file to render (v/f text format). Renders a cube when omitted.
    mesh: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "90")]
    fov: f32,

    /// Near plane distance
    #[arg(long, default_value = "0.1")]
    near: f32,

    /// Far plane distance
    #[arg(long, default_value = "1000")]
    far: f32,

    /// Number of frames to render headlessly
    #[arg(long, short = 'n', default_value = "60")]
    frames: u32,

    /// Seconds advanced per headless frame
    #[arg(long, default_value = "0.016")]
    timestep: f32,

    /// Where the last headless frame is written
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Open an interactive window instead of rendering to a file
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,

    /// Set the logging level (RUST_LOG is used when omitted)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match args.log_level {
        Some(level) => LoggingConfig::with_level(level.into()),
        None => LoggingConfig::default(),
    });

    let mesh = match &args.mesh {
        Some(path) => load_mesh_file(path)
            .with_context(|| format!("failed to load mesh {}", path.display()))?,
        None => Mesh::unit_cube(),
    };

    let config = RenderConfig::default()
        .with_fov(args.fov)
        .with_planes(args.near, args.far);
    let mut engine = Engine::new(mesh, config);

    #[cfg(feature = "window")]
    {
        if args.window {
            let mut window = painter3d::window::Window::new("painter3d", args.width, args.height)
                .map_err(anyhow::Error::msg)
                .context("failed to open window")?;
            window.run(&mut engine).map_err(anyhow::Error::msg)?;
            return Ok(());
        }
    }

    let mut canvas = Canvas::new(args.width, args.height);
    HeadlessDriver::new(args.frames, args.timestep)
        .run(&mut engine, &mut canvas)
        .context("rendering failed")?;

    canvas
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
