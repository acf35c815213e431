use anyhow::{bail, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use order_finding::arith::{is_order_candidate, lcm};
use order_finding::{
    ClassicalOrderFinder, OrderFinder, OrderFindingConfig, OrderFindingError, QuantumOrderFinder,
};

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Quantum order finding on a simulated backend", long_about = None)]
struct Args {
    /// Modulus N (at least 2)
    modulus: u64,

    /// Base a, coprime to N
    base: u64,

    /// Control register size; defaults to ceil(2 log2 N) + 1
    #[arg(short = 'm', long)]
    m: Option<usize>,

    /// Circuit executions per trial
    #[arg(short = 's', long, default_value = "1")]
    shots: usize,

    /// Number of order-finding trials
    #[arg(short = 't', long, default_value = "10")]
    trials: usize,

    /// Seed for the simulator
    #[arg(long)]
    seed: Option<u64>,

    /// Compare the result with the exact order found classically
    #[arg(long)]
    verify: bool,
}

/// What a series of trials produced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    /// Smallest candidate with a^r ≡ 1 (mod N).
    Verified(u64),
    /// No single candidate verified; lcm of all candidates and whether it does.
    Combined { order: u64, verified: bool },
    /// Every trial measured phase 0.
    Nothing,
}

fn run_trials<F: OrderFinder>(
    finder: &mut F,
    modulus: u64,
    base: u64,
    trials: usize,
) -> order_finding::Result<Outcome> {
    let mut candidates = Vec::new();
    for trial in 1..=trials {
        match finder.find_order(modulus, base) {
            Ok(r) => {
                let ok = is_order_candidate(base, r, modulus);
                info!("Trial {}: r = {} ({})", trial, r, if ok { "verified" } else { "unverified" });
                candidates.push((r, ok));
            }
            Err(OrderFindingError::DegenerateMeasurement { .. }) => {
                warn!("Trial {}: phase 0, skipped", trial);
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(r) = candidates.iter().filter(|(_, ok)| *ok).map(|(r, _)| *r).min() {
        return Ok(Outcome::Verified(r));
    }
    if candidates.is_empty() {
        return Ok(Outcome::Nothing);
    }
    let order = candidates.iter().fold(1, |acc, (r, _)| lcm(acc, *r));
    Ok(Outcome::Combined {
        order,
        verified: is_order_candidate(base, order, modulus),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.trials == 0 {
        bail!("--trials must be at least 1");
    }
    let mut config = OrderFindingConfig::default()
        .with_shots(args.shots)
        .with_n_times_shor(args.trials);
    if let Some(m) = args.m {
        config = config.with_m(m);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut finder = QuantumOrderFinder::new(config);
    let outcome = run_trials(&mut finder, args.modulus, args.base, args.trials)?;
    match outcome {
        Outcome::Verified(r) => {
            println!("order of {} mod {}: {}", args.base, args.modulus, r);
        }
        Outcome::Combined { order, verified: true } => {
            println!(
                "order of {} mod {}: {} (lcm of candidates)",
                args.base, args.modulus, order
            );
        }
        Outcome::Combined { order, verified: false } => {
            println!(
                "no verified order of {} mod {}; lcm of candidates {} does not satisfy a^r = 1",
                args.base, args.modulus, order
            );
        }
        Outcome::Nothing => {
            println!(
                "all {} trials measured phase 0; rerun with more trials",
                args.trials
            );
        }
    }

    if args.verify {
        let exact = ClassicalOrderFinder.find_order(args.modulus, args.base)?;
        let found = match outcome {
            Outcome::Verified(r) | Outcome::Combined { order: r, .. } => Some(r),
            Outcome::Nothing => None,
        };
        match found {
            Some(r) if r == exact => println!("verify: exact order {} matches", exact),
            Some(r) => println!("verify: exact order {}, quantum estimate {}", exact, r),
            None => println!("verify: exact order {}, no quantum estimate", exact),
        }
    }
    Ok(())
}
