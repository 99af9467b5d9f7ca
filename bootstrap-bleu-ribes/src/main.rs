use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

use bootstrap_significance::config::DEFAULT_TRIALS;
use bootstrap_significance::report::write_comparison;
use bootstrap_significance::{
    Bleu, BleuConfig, BootstrapConfig, BootstrapEngine, EmptyOrderPolicy, MultiRefPolicy,
    PairedStats, Ribes, RibesConfig, TranslationSet,
};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MultiRef {
    Independent,
    BestReference,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmptyOrder {
    Skip,
    Zero,
}

/// Paired bootstrap resampling over BLEU and RIBES (Koehn 2004).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    hypothesis1: PathBuf,
    hypothesis2: PathBuf,
    #[arg(required = true)]
    references: Vec<PathBuf>,
    /// Number of resampling trials
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,
    /// Lines drawn per trial, 0 for the corpus size
    #[arg(long, default_value_t = 0)]
    sample_size: usize,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// RIBES precision exponent
    #[arg(long, default_value_t = 0.25)]
    alpha: f64,
    /// RIBES brevity exponent
    #[arg(long, default_value_t = 0.10)]
    beta: f64,
    /// How RIBES combines several references
    #[arg(long, value_enum, default_value_t = MultiRef::Independent)]
    multi_ref: MultiRef,
    /// What BLEU does with n-gram orders longer than every hypothesis
    #[arg(long, value_enum, default_value_t = EmptyOrder::Skip)]
    empty_order: EmptyOrder,
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
    let bootstrap_config = BootstrapConfig {
        trials: args.trials,
        sample_size: args.sample_size,
        seed: args.seed,
    };
    let bleu_config = BleuConfig {
        empty_order: match args.empty_order {
            EmptyOrder::Skip => EmptyOrderPolicy::Skip,
            EmptyOrder::Zero => EmptyOrderPolicy::Zero,
        },
    };
    let ribes_config = RibesConfig {
        alpha: args.alpha,
        beta: args.beta,
        multi_ref: match args.multi_ref {
            MultiRef::Independent => MultiRefPolicy::Independent,
            MultiRef::BestReference => MultiRefPolicy::BestReference,
        },
    };
    ribes_config.validate()?;
    let mut engine = BootstrapEngine::new(bootstrap_config)?;

    info!("reading data");
    let set = TranslationSet::load(
        args.hypothesis1,
        args.hypothesis2,
        args.references.as_slice(),
    )?;
    let stats = PairedStats::compute(&set, &ribes_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let bleu1 = Bleu::new(&stats.hyp1, &bleu_config);
    let bleu2 = Bleu::new(&stats.hyp2, &bleu_config);
    let all: Vec<usize> = (0..set.len()).collect();
    writeln!(out, "hypothesis 1: {}", bleu1.breakdown(&all))?;
    writeln!(out, "hypothesis 2: {}", bleu2.breakdown(&all))?;
    writeln!(out)?;

    info!("comparing hypotheses -- this may take some time");
    let bleu = engine.compare("BLEU", &bleu1, &bleu2)?;
    write_comparison(&mut out, &bleu)?;

    let ribes1 = Ribes::new(&stats.hyp1, &ribes_config);
    let ribes2 = Ribes::new(&stats.hyp2, &ribes_config);
    let ribes = engine.compare("RIBES", &ribes1, &ribes2)?;
    write_comparison(&mut out, &ribes)?;

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
