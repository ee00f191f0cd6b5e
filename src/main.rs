use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ideal_bosons::error::{BosonError, Result};
use ideal_bosons::io::{
    read_initial_path, BoxBosonParams, BoxSweepParams, DoubleWellParams, FreePathParams,
    HarmonicPathParams, HarmonicPointParams, HarmonicSweepParams, ParameterFile, RunConfig,
};
use ideal_bosons::runs;
use ideal_bosons::BosonConfiguration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML run configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the configuration file
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output file, overrides the per-command default
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Energy and condensate fraction of bosons in a periodic box over a range of beta
    BoxSweep { params: PathBuf },
    /// Energy and condensate fraction of bosons in a 3-D harmonic trap over a range of beta
    HarmonicSweep { params: PathBuf },
    /// Partition function, energy and condensate fraction of trapped bosons at one beta
    HarmonicPoint { params: PathBuf },
    /// Directly sampled configuration of trapped bosons
    HarmonicBosons { params: PathBuf },
    /// Directly sampled configuration of bosons in a periodic box
    BoxBosons { params: PathBuf },
    /// Independent free-particle paths, one per line
    FreePath { params: PathBuf },
    /// Position histogram of a harmonic oscillator path
    HarmonicPath { params: PathBuf },
    /// Position histogram of a particle in the double well, single-bead Metropolis
    DoubleWell { init_config: PathBuf, params: PathBuf },
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| BosonError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn print_configuration(conf: &BosonConfiguration) {
    println!("Cycle decomposition (length x multiplicity):");
    for (length, multiplicity) in conf.cycles.iter() {
        println!("  {:4} x {}", length, multiplicity);
    }
    println!(
        "Sum of squared radii: {:.6}",
        conf.sum_square_radius()
    );
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let mut rng = config.rng();
    let output = |default: &str| args.output.clone().unwrap_or_else(|| PathBuf::from(default));

    match &args.command {
        Command::BoxSweep { params } => {
            let params = BoxSweepParams::from_file(params)?;
            let path = output("observables.dat");
            let mut out = create_output(&path)?;
            let rows = runs::run_box_sweep(&params, &config, &mut out)?;
            out.flush()?;
            println!("Wrote {} temperatures to {}", rows.len(), path.display());
        }
        Command::HarmonicSweep { params } => {
            let params = HarmonicSweepParams::from_file(params)?;
            let path = output("observables.dat");
            let mut out = create_output(&path)?;
            let rows = runs::run_harmonic_sweep(&params, &config, &mut out)?;
            out.flush()?;
            println!("Wrote {} temperatures to {}", rows.len(), path.display());
        }
        Command::HarmonicPoint { params } => {
            let params = HarmonicPointParams::from_file(params)?;
            let summary = runs::run_harmonic_point(&params, &config)?;
            println!("=== Ideal bosons in a 3-D harmonic trap ===");
            println!("Number of particles: {}", summary.n_particles);
            println!("Inverse temperature β: {:.4}", summary.beta);
            println!("Partition function Z: {:.6e}", summary.partition_function);
            println!("Energy: {:.6}", summary.energy);
            println!("Condensate fraction: {:.6}", summary.condensate_fraction);
        }
        Command::HarmonicBosons { params } => {
            let params = HarmonicPointParams::from_file(params)?;
            let path = output("configuration.dat");
            let mut out = create_output(&path)?;
            let conf = runs::run_harmonic_bosons(&params, &mut rng, &mut out)?;
            out.flush()?;
            print_configuration(&conf);
            println!("Configuration written to {}", path.display());
        }
        Command::BoxBosons { params } => {
            let params = BoxBosonParams::from_file(params)?;
            let path = output("configuration.dat");
            let mut out = create_output(&path)?;
            let conf = runs::run_box_bosons(&params, &config, &mut rng, &mut out)?;
            out.flush()?;
            print_configuration(&conf);
            println!("Configuration written to {}", path.display());
        }
        Command::FreePath { params } => {
            let params = FreePathParams::from_file(params)?;
            let path = output("free_paths.dat");
            let mut out = create_output(&path)?;
            let lines = runs::run_free_paths(&params, &mut rng, &mut out)?;
            out.flush()?;
            println!("Wrote {} paths to {}", lines, path.display());
        }
        Command::HarmonicPath { params } => {
            let params = HarmonicPathParams::from_file(params)?;
            let path = output("histogram.dat");
            let mut out = create_output(&path)?;
            let histogram = runs::run_harmonic_path(&params, &config, &mut rng, &mut out)?;
            out.flush()?;
            println!(
                "Histogram of {} samples written to {}",
                histogram.total(),
                path.display()
            );
        }
        Command::DoubleWell { init_config, params } => {
            let initial = read_initial_path(init_config)?;
            let params = DoubleWellParams::from_file(params)?;
            let path = output("histogram.dat");
            let mut out = create_output(&path)?;
            let summary = runs::run_double_well(&params, initial, &config, &mut rng, &mut out)?;
            out.flush()?;
            println!("Acceptance rate: {:.2}%", 100.0 * summary.acceptance_rate);
            println!(
                "Histogram of {} samples written to {}",
                summary.histogram.total(),
                path.display()
            );
        }
    }
    info!("done");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(-1);
            }
        },
    };

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
