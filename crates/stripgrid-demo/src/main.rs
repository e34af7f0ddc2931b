//! stripgrid: a grid drawn as column triangle strips, switchable between five
//! ways of handing the geometry to the GPU.

mod app;
mod dry_run;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use stripgrid_engine::device::GpuInit;
use stripgrid_engine::logging::{init_logging, LoggingConfig};
use stripgrid_engine::render::axes::AxesConfig;
use stripgrid_engine::render::grid::{ModeMachine, RenderMode};
use stripgrid_engine::window::{Runtime, RuntimeConfig};
use stripgrid_mesh::{GridDimensions, GridMeshBuilder, LogObserver};

use app::GridApp;

#[derive(Parser, Debug)]
#[command(name = "stripgrid")]
#[command(version, about = "Grid tessellation rendered with switchable draw strategies")]
struct Cli {
    /// Grid rows.
    #[arg(short, long, default_value_t = 4)]
    rows: u32,

    /// Grid columns.
    #[arg(short, long, default_value_t = 4)]
    cols: u32,

    /// Initial render mode (immediate, cached-vertices, cached-vertex-indices,
    /// vertex-array, vbo).
    #[arg(short, long, default_value = "immediate")]
    mode: RenderMode,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 500.0)]
    width: f64,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Axis length; 0 hides the axes.
    #[arg(long, default_value_t = 5.0)]
    axes: f32,

    /// Log filter (env_logger syntax). Falls back to RUST_LOG, then `info`.
    #[arg(long)]
    log: Option<String>,

    /// Run every mode against a recording backend and exit, without a window.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    if let Err(e) = run(cli) {
        eprintln!("stripgrid: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let dims = GridDimensions::new(cli.rows, cli.cols).context("invalid --rows/--cols")?;
    let mesh = GridMeshBuilder::new(dims)
        .observer(&mut LogObserver::default())
        .build()
        .context("failed to build grid mesh")?;

    if cli.dry_run {
        return dry_run::run(mesh);
    }

    println!();
    println!("  stripgrid {}x{}  ·  mode {}", dims.rows(), dims.cols(), cli.mode);
    println!("  m: next mode   1-5: pick mode   arrows: rows/cols   esc: quit");
    println!();

    let machine = ModeMachine::new(mesh, cli.mode);
    let axes = AxesConfig {
        length: cli.axes,
        enabled: cli.axes > 0.0,
    };

    let config = RuntimeConfig {
        title: app::window_title(cli.mode),
        initial_size: LogicalSize::new(cli.width, cli.height),
    };
    let gpu_init = GpuInit {
        optional_features: wgpu::Features::POLYGON_MODE_LINE,
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, GridApp::new(machine, axes))
}
