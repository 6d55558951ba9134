use anyhow::Context;
use clap::Parser;
use gravsim::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STEPS_PER_DAY: u32 = 24;
const DT: f64 = 3600.0;

#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Runs a gravsim simulation without rendering and logs daily statistics")]
#[command(version)]
struct Args {
    /// Number of simulated days
    #[arg(short, long, default_value = "365")]
    days: u32,

    /// Seed of the random generator, overrides the configuration file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of generated particles, overrides the configuration file
    #[arg(short, long)]
    particles: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compute accelerations on every CPU thread
    #[arg(long)]
    parallel: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(particles) = args.particles {
        config = config.with_particle_count(particles);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&args)?;
    let mut simulation = Simulation::new(&config).context("generating the simulation")?;
    let dt = Quantity::new(DT);

    for day in 1..=args.days {
        for _ in 0..STEPS_PER_DAY {
            if args.parallel {
                simulation.par_step(dt);
            } else {
                simulation.step(dt);
            }
        }

        let summary = simulation.summary()?;
        info!("Day {}: {}", day, summary);
        info!("Day {}: potential energy {:.3e}", day, simulation.potential_energy());
    }

    Ok(())
}
