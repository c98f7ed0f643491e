use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use toll_plaza_sim::simulation::{
    LogObserver, PlazaConfig, TollPlaza, TransactionLog, DEFAULT_BOOTH_COUNT,
    DEFAULT_SECONDS_PER_AXLE, DEFAULT_VEHICLES_PER_HOUR,
};

#[derive(Parser)]
#[command(name = "toll_plaza_sim")]
#[command(about = "Discrete-event simulation of a multi-booth toll plaza")]
struct Cli {
    /// Number of toll booths
    #[arg(long, default_value_t = DEFAULT_BOOTH_COUNT)]
    booths: usize,

    /// Mean number of vehicles arriving per hour
    #[arg(long, default_value_t = DEFAULT_VEHICLES_PER_HOUR)]
    vehicles_per_hour: f64,

    /// Simulated time to run for, in seconds
    #[arg(long, default_value_t = 3600.0)]
    duration: f64,

    /// Service time per axle, in seconds
    #[arg(long, default_value_t = DEFAULT_SECONDS_PER_AXLE)]
    seconds_per_axle: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write one JSON transaction record per served vehicle to this file
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = PlazaConfig {
        booth_count: cli.booths,
        vehicles_per_hour: cli.vehicles_per_hour,
        seconds_per_axle: cli.seconds_per_axle,
        ..PlazaConfig::default()
    };

    let mut plaza = match cli.seed {
        Some(seed) => TollPlaza::new_with_seed(config.clone(), seed),
        None => TollPlaza::new(config.clone()),
    }
    .context("Failed to set up toll plaza")?;

    let summary = match &cli.event_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create event log {}", path.display()))?;
            let mut log = TransactionLog::new(BufWriter::new(file), &config);
            let summary = plaza
                .run_observed(cli.duration, &mut (LogObserver, &mut log))
                .context("Simulation failed")?;
            let written = log.written();
            log.finish()?;
            info!("Wrote {} transaction records to {}", written, path.display());
            summary
        }
        None => plaza.run(cli.duration).context("Simulation failed")?,
    };

    println!();
    summary.print_summary();
    Ok(())
}
