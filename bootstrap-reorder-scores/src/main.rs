use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::exit;

use bootstrap_significance::config::DEFAULT_TRIALS;
use bootstrap_significance::report::write_comparison;
use bootstrap_significance::{
    BootstrapConfig, BootstrapEngine, Reordering, ReorderingMeasure, ReorderingSet,
};
use clap::error::ErrorKind;
use clap::Parser;
use log::{info, warn};

/// Paired bootstrap resampling over Fuzzy Reordering Score, Kendall's tau
/// and Complete Matching Score.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Reference alignments, `src-trg ||| i-j ...` per line
    reference: PathBuf,
    /// Source orders of system 1
    hypothesis1: PathBuf,
    /// Source orders of system 2
    hypothesis2: PathBuf,
    /// Number of resampling trials
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,
    /// Lines drawn per trial, 0 for the corpus size
    #[arg(long, default_value_t = 0)]
    sample_size: usize,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            exit(1);
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut engine = BootstrapEngine::new(BootstrapConfig {
        trials: args.trials,
        sample_size: args.sample_size,
        seed: args.seed,
    })?;

    info!("reading data");
    let set = ReorderingSet::load(args.reference, args.hypothesis1, args.hypothesis2)?;
    let unusable = set.unusable();
    if unusable == set.len() {
        warn!("no usable reference alignment, every score will be 0");
    } else if unusable > 0 {
        info!("skipping {} of {} lines with unusable alignments", unusable, set.len());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    info!("comparing hypotheses -- this may take some time");
    for measure in ReorderingMeasure::ALL {
        let system1 = Reordering::new(&set.alignments, &set.orders1, measure);
        let system2 = Reordering::new(&set.alignments, &set.orders2, measure);
        let comparison = engine.compare(measure.title(), &system1, &system2)?;
        write_comparison(&mut out, &comparison)?;
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        exit(1);
    }
}
