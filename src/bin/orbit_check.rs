use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use three_body::analysis::{self, OrbitReport};
use three_body::config::{AnalysisSettings, load_catalog, load_settings};
use three_body::export::{report, trajectory};
use three_body::catalog::{builtin, experimental};
use three_body::{Catalog, OrbitConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Test three-body orbits for periodicity, energy conservation, and stability"
)]
struct Cli {
    /// Orbit key to test (e.g. 'moth'); omit to test every entry
    orbit: Option<String>,

    /// Test a custom equal-mass choreography with the given initial velocity
    #[arg(long, num_args = 2, value_names = ["VX", "VY"], allow_negative_numbers = true)]
    add: Option<Vec<f64>>,

    /// Emit the results as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// List the available orbit configurations and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Use the experimental (unstable at the default step) catalog
    #[arg(long, default_value_t = false)]
    experimental: bool,

    /// Load orbits from a YAML file, TOML file, or directory of TOML files
    #[arg(long, conflicts_with = "experimental")]
    orbits: Option<PathBuf>,

    /// Analysis settings file (YAML or TOML)
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let loaded: Catalog;
    let (catalog, source): (&Catalog, String) = if let Some(path) = &cli.orbits {
        loaded = load_catalog(path)?;
        (&loaded, path.display().to_string())
    } else if cli.experimental {
        (experimental(), "experimental catalog".to_string())
    } else {
        (builtin(), "built-in catalog".to_string())
    };

    if cli.list {
        println!("Available orbit configurations ({source}):");
        for (key, config) in catalog.iter() {
            println!("  {:15} - {}", key, config.name);
        }
        println!("\nTotal: {} orbits", catalog.len());
        return Ok(());
    }

    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => AnalysisSettings::default(),
    };
    let verbose = !cli.json;

    let mut reports = Vec::new();
    if let Some(add) = &cli.add {
        let (vx, vy) = (add[0], add[1]);
        let config = OrbitConfig::choreography(format!("Custom (vx={vx}, vy={vy})"), vx, vy);
        config
            .validate()
            .map_err(|reason| anyhow::anyhow!("invalid custom orbit: {reason}"))?;
        reports.push(run_orbit("custom", &config, &settings, verbose));
    } else if let Some(key) = &cli.orbit {
        let config = catalog.get(key).map_err(|err| {
            anyhow::anyhow!("{err}; use --list to see available configurations")
        })?;
        reports.push(run_orbit(key, config, &settings, verbose));
    } else {
        for (key, config) in catalog.iter() {
            reports.push(run_orbit(key, config, &settings, verbose));
        }
    }

    if cli.json {
        let summaries: Vec<_> = reports.iter().map(OrbitReport::to_summary).collect();
        let generated = chrono::Utc::now().to_rfc3339();
        let mut writer = trajectory::writer_for_path(Path::new("-"))?;
        report::write_json(&mut *writer, &generated, &summaries)?;
        writer.flush()?;
    } else {
        print_summary(&reports);
    }

    Ok(())
}

fn run_orbit(
    key: &str,
    config: &OrbitConfig,
    settings: &AnalysisSettings,
    verbose: bool,
) -> OrbitReport {
    if verbose {
        println!("\n{}", "=".repeat(60));
        println!("Testing: {} ({})", config.name, key);
        println!("{}", "=".repeat(60));
        println!(
            "Initial velocities: v1=({:.6}, {:.6})",
            config.velocities[0][0], config.velocities[0][1]
        );
        println!("\n[1] Periodicity Test...");
    }

    let report = analysis::analyze(key, config, settings);

    if verbose {
        match report.period.period {
            Some(period) => {
                println!("    Period found: T = {period:.4}");
                println!("    Return distance: {:.6}", report.period.min_return_distance);
            }
            None => {
                println!("    Period NOT found within search time");
                println!("    Closest approach: {:.6}", report.period.min_return_distance);
            }
        }

        println!("\n[2] Energy Conservation Test...");
        println!("    Initial energy: {:.6}", report.energy.initial_energy);
        println!("    Max drift: {:.6}%", report.energy.max_drift_percent);
        println!("    Final drift: {:.6}%", report.energy.final_drift_percent);
        println!("    Status: {}", report.energy_rating());

        println!("\n[3] Stability Estimation...");
        println!("    Lyapunov exponent estimate: {:.6}", report.lyapunov);
        println!("    Status: {}", report.stability_rating());
    }

    report
}

fn print_summary(reports: &[OrbitReport]) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "{:<20} {:<10} {:<12} {:<15} Stability",
        "Orbit", "Periodic", "Period", "Energy Drift"
    );
    println!("{}", "-".repeat(70));
    for r in reports {
        let periodic = if r.is_periodic() { "Yes" } else { "No" };
        let period = r
            .period
            .period
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        let drift = format!("{:.4}%", r.energy.max_drift_percent);
        println!(
            "{:<20} {:<10} {:<12} {:<15} {}",
            r.name,
            periodic,
            period,
            drift,
            r.stability_rating()
        );
    }
}
