//! Sort Shootout
//!
//! Verifies and times every sorting kernel in the library against the
//! standard library sorts and rayon's parallel sort.
//!
//! Usage:
//!   sort-shootout [array_size] [--benchmark] [--lino <path>]
//!
//! The testing phase sorts one shuffled input per algorithm and checks it
//! against the ascending reference. The timing phase reports the average
//! milliseconds per pass and ranks the algorithms. `--benchmark` repeats the
//! timing over a ladder of sizes; `--lino` saves the results as a Links
//! Notation report.

use std::path::PathBuf;
use std::process::ExitCode;

use sort_shootout::harness::{self, Algorithm, HarnessConfig, Timing, DEFAULT_ARRAY_SIZE};
use sort_shootout::HarnessResult;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Command line options; anything unparsable falls back to the defaults.
struct Options {
    array_size: usize,
    benchmark: bool,
    lino_path: Option<PathBuf>,
}

fn parse_args() -> Options {
    let mut options = Options {
        array_size: DEFAULT_ARRAY_SIZE,
        benchmark: false,
        lino_path: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--benchmark" => options.benchmark = true,
            "--lino" => options.lino_path = args.next().map(PathBuf::from),
            other => options.array_size = other.parse().unwrap_or(DEFAULT_ARRAY_SIZE),
        }
    }
    options
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> HarnessResult<()> {
    println!("Sort Shootout");
    println!("=============\n");

    let config = HarnessConfig::with_size(options.array_size);
    println!(
        "Array size: {} elements, {} passes per algorithm",
        config.array_size, config.repeats
    );

    println!("\nTesting");
    println!("-----------------------------------------------------------");
    for algorithm in Algorithm::ALL {
        println!("{}", algorithm.label());
    }
    harness::run_testing(&config)?;
    println!("All algorithms verified: OK");
    println!("-----------------------------------------------------------");

    println!("\nTiming");
    println!("-----------------------------------------------------------");
    let mut timings = harness::run_timing(&config, |timing| {
        println!("{}", timing.algorithm.label());
        println!("{:.2} mseconds/pass", timing.mean_ms);
    })?;
    println!("-----------------------------------------------------------");

    print_ranking(&timings);

    if options.benchmark {
        timings.extend(run_benchmark(config.array_size)?);
    }

    if let Some(path) = options.lino_path {
        let report = harness::build_report("Sorting kernels vs library sorts", &timings);
        report.save_lino(&path)?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

fn print_ranking(timings: &[Timing]) {
    println!("\nRanking");
    println!("-----------------------------------------------------------");
    for (rank, timing) in harness::ranking(timings).into_iter().enumerate() {
        println!(
            "{:>2}) {:<40} {:>10.2} ms",
            rank + 1,
            timing.algorithm.label(),
            timing.mean_ms
        );
    }
}

/// Time every algorithm across the benchmark size ladder, skipping the size
/// the timing phase already measured.
fn run_benchmark(array_size: usize) -> HarnessResult<Vec<Timing>> {
    println!("\n\n====================================");
    println!("Running size benchmark...");
    println!("====================================\n");

    print!("{:>10}", "Size");
    for algorithm in Algorithm::ALL {
        print!(" | {:>15}", algorithm.name());
    }
    println!();

    let mut all = Vec::new();
    for size in harness::ladder_sizes(array_size) {
        print!("{:>10}", size);
        let timings = harness::run_timing(&HarnessConfig::with_size(size), |timing| {
            print!(" | {:>15.3}", timing.mean_ms);
        })?;
        all.extend(timings);
        println!();
    }

    println!("\nTimes are mean milliseconds per pass");
    Ok(all)
}
