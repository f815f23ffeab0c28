use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use three_body::Simulation;
use three_body::catalog::builtin;
use three_body::export::trajectory::{Sample, write_header, writer_for_path};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Integrate a catalog orbit and write its trajectory as CSV"
)]
struct Cli {
    /// Orbit key (defaults to a random catalog entry)
    #[arg(long)]
    orbit: Option<String>,

    /// Seed for the random orbit choice
    #[arg(long)]
    seed: Option<u64>,

    /// Total simulated time
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Simulated time between samples; each sample is one `advance` call
    #[arg(long, default_value_t = 0.01)]
    frame: f64,

    /// Default integration step
    #[arg(long, default_value_t = three_body::constants::DEFAULT_STEP)]
    step: f64,

    /// Output CSV path, `-` for stdout
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if !(cli.duration.is_finite() && cli.duration >= 0.0) {
        anyhow::bail!("--duration must be a non-negative number");
    }
    if !(cli.frame.is_finite() && cli.frame > 0.0) {
        anyhow::bail!("--frame must be positive");
    }
    if !(cli.step.is_finite() && cli.step > 0.0) {
        anyhow::bail!("--step must be positive");
    }

    let catalog = builtin();
    let sim = match &cli.orbit {
        Some(key) => Simulation::new(key)?,
        None => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Simulation::random(catalog, &mut rng)?
        }
    };
    let mut sim = sim.with_default_step(cli.step);
    log::info!("tracing '{}' for {} time units", sim.key(), cli.duration);

    let mut writer = writer_for_path(&cli.output)?;
    write_header(&mut *writer)?;
    sample(&sim).write_to(&mut *writer)?;

    let mut remaining = cli.duration;
    while remaining > 1e-12 {
        let slice = cli.frame.min(remaining);
        sim.advance(slice);
        remaining -= slice;
        sample(&sim).write_to(&mut *writer)?;
        if !sim.is_finite() {
            log::warn!(
                "orbit '{}' went non-finite at t = {:.6}; stopping",
                sim.key(),
                sim.time()
            );
            break;
        }
    }
    writer.flush()?;

    Ok(())
}

fn sample(sim: &Simulation<'_>) -> Sample {
    Sample {
        time: sim.time(),
        state: *sim.state(),
        energy: sim.total_energy(),
    }
}
