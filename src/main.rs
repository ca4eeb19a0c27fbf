use std::path::PathBuf;

use bitwidgets::{io::Config, ui, Circuit, GateKind};
use clap::Parser;
use eyre::WrapErr;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A simple logic gate simulator using images as circuit blueprints.
#[derive(Parser, Debug)]
#[command(name = "bitwidgets", version, about)]
struct Args {
    /// Circuit image to load
    image: PathBuf,

    /// Render scale, in screen pixels per image pixel
    #[arg(short, long)]
    scale: Option<u32>,

    /// Simulation steps per second
    #[arg(short, long)]
    rate: Option<u32>,

    /// RON config file; flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run this many steps without opening a window, then print a summary
    #[arg(long)]
    steps: Option<usize>,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path).wrap_err("loading config")?,
        None => Config::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(rate) = args.rate {
        config.rate = rate;
    }

    let mut circuit = Circuit::open(&args.image)
        .wrap_err_with(|| format!("building circuit from {}", args.image.display()))?;

    match args.steps {
        Some(steps) => {
            circuit.step(steps);
            info!(steps, "headless run finished");
            println!(
                "gates: {} | wires: {} | crossings: {} | high wires: {}",
                circuit.gates().len(),
                circuit.wires().len(),
                circuit.crossings().len(),
                circuit.high_wires()
            );
            for kind in GateKind::ALL {
                let count = circuit.gates().iter().filter(|g| g.kind == kind).count();
                println!("  {}: {count}", kind.display_name());
            }
            Ok(())
        }
        None => ui::run(circuit, &config),
    }
}
