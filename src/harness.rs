//! Verification and Timing Harness
//!
//! Generates a shuffled permutation of `0..n`, hands it to one algorithm,
//! checks the output against the ascending reference and measures the average
//! wall-clock time per pass.
//!
//! Every pass gets its own freshly shuffled buffer; nothing is shared between
//! calls, so each algorithm can be verified and timed on its own.

use std::fmt;
use std::hint::black_box;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::baseline_sort;
use crate::error::{HarnessError, HarnessResult, SortError};
use crate::lino_report::{BenchmarkReport, BenchmarkResult};
use crate::mergesort::{mergesort, mergesort2, mergesort3};
use crate::quicksort::{quicksort_lc, quicksort_val, sort_in_place};
use crate::quicksort_stack::{pending_capacity, quicksort_pb_bounded};

/// Default array size for the testing and timing phases
pub const DEFAULT_ARRAY_SIZE: usize = 50_000;

/// Default number of timed passes per algorithm
pub const DEFAULT_REPEATS: u32 = 10;

/// Array sizes used by the multi-size benchmark
pub const BENCHMARK_SIZES: [usize; 5] = [
    1 << 10, // 1K
    1 << 12, // 4K
    1 << 14, // 16K
    1 << 16, // 64K
    1 << 18, // 256K
];

/// Every sorter the harness knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    QuicksortVal,
    QuicksortIp,
    QuicksortPb,
    QuicksortLc,
    Mergesort,
    Mergesort2,
    Mergesort3,
    Native,
    NativeUnstable,
    Parallel,
}

/// Broad grouping used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Quicksort,
    Mergesort,
    Baseline,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Quicksort => "quicksort",
            Family::Mergesort => "mergesort",
            Family::Baseline => "baseline",
        }
    }
}

impl Algorithm {
    /// All algorithms in the order they are tested and timed.
    pub const ALL: [Algorithm; 10] = [
        Algorithm::QuicksortVal,
        Algorithm::QuicksortIp,
        Algorithm::QuicksortPb,
        Algorithm::QuicksortLc,
        Algorithm::Mergesort,
        Algorithm::Mergesort2,
        Algorithm::Mergesort3,
        Algorithm::Native,
        Algorithm::NativeUnstable,
        Algorithm::Parallel,
    ];

    /// Identifier used in reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::QuicksortVal => "quicksort_val",
            Algorithm::QuicksortIp => "quicksort_ip",
            Algorithm::QuicksortPb => "quicksort_pb",
            Algorithm::QuicksortLc => "quicksort_lc",
            Algorithm::Mergesort => "mergesort",
            Algorithm::Mergesort2 => "mergesort2",
            Algorithm::Mergesort3 => "mergesort3",
            Algorithm::Native => "native",
            Algorithm::NativeUnstable => "native_unstable",
            Algorithm::Parallel => "parallel",
        }
    }

    /// Human-readable heading for console output.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::QuicksortVal => "Quicksort (three buckets)",
            Algorithm::QuicksortIp => "Quicksort in-place",
            Algorithm::QuicksortPb => "Quicksort in-place, explicit stack",
            Algorithm::QuicksortLc => "Quicksort list comprehension",
            Algorithm::Mergesort => "Mergesort (front-popping)",
            Algorithm::Mergesort2 => "Mergesort2 (back-popping)",
            Algorithm::Mergesort3 => "Mergesort3 (index-walking)",
            Algorithm::Native => "Native (slice::sort)",
            Algorithm::NativeUnstable => "Native unstable (slice::sort_unstable)",
            Algorithm::Parallel => "Parallel (rayon par_sort_unstable)",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Algorithm::QuicksortVal
            | Algorithm::QuicksortIp
            | Algorithm::QuicksortPb
            | Algorithm::QuicksortLc => Family::Quicksort,
            Algorithm::Mergesort | Algorithm::Mergesort2 | Algorithm::Mergesort3 => {
                Family::Mergesort
            }
            Algorithm::Native | Algorithm::NativeUnstable | Algorithm::Parallel => {
                Family::Baseline
            }
        }
    }

    /// Whether equal elements keep their input order.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            Algorithm::QuicksortVal
                | Algorithm::Mergesort
                | Algorithm::Mergesort2
                | Algorithm::Mergesort3
                | Algorithm::Native
        )
    }

    /// Sort `input` and return the sorted elements.
    ///
    /// In-place sorters work on `input` directly; copying sorters borrow it and
    /// return a new vector. The list-comprehension sorter receives ownership.
    pub fn run<T, R>(self, mut input: Vec<T>, rng: &mut R) -> Result<Vec<T>, SortError>
    where
        T: Ord + Clone + Send,
        R: Rng + ?Sized,
    {
        let sorted = match self {
            Algorithm::QuicksortVal => quicksort_val(&input, rng),
            Algorithm::QuicksortIp => {
                sort_in_place(&mut input, rng);
                input
            }
            Algorithm::QuicksortPb => {
                let capacity = pending_capacity(input.len());
                quicksort_pb_bounded(&mut input, capacity, rng)?;
                input
            }
            Algorithm::QuicksortLc => quicksort_lc(input, rng),
            Algorithm::Mergesort => mergesort(&input),
            Algorithm::Mergesort2 => mergesort2(&input),
            Algorithm::Mergesort3 => mergesort3(&input),
            Algorithm::Native => {
                baseline_sort::sort_stable(&mut input);
                input
            }
            Algorithm::NativeUnstable => {
                baseline_sort::sort_unstable(&mut input);
                input
            }
            Algorithm::Parallel => {
                baseline_sort::parallel_sort(&mut input);
                input
            }
        };
        Ok(sorted)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for one testing-and-timing run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of elements in every generated input
    pub array_size: usize,
    /// Timed passes per algorithm
    pub repeats: u32,
    /// Fixed seed for reproducible runs; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            array_size: DEFAULT_ARRAY_SIZE,
            repeats: DEFAULT_REPEATS,
            seed: None,
        }
    }
}

impl HarnessConfig {
    pub fn with_size(array_size: usize) -> Self {
        HarnessConfig {
            array_size,
            ..HarnessConfig::default()
        }
    }

    /// Random source for input shuffles and pivot choices.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Average time per pass for one algorithm at one size.
#[derive(Debug, Clone)]
pub struct Timing {
    pub algorithm: Algorithm,
    pub array_size: usize,
    pub repeats: u32,
    /// Mean milliseconds per pass
    pub mean_ms: f64,
    /// Fastest single pass in milliseconds
    pub min_ms: f64,
}

/// The integers `0..size` in random order.
pub fn shuffled_input<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<u32> {
    let mut data: Vec<u32> = (0..size as u32).collect();
    data.shuffle(rng);
    data
}

/// Compare `output` with `expected`, reporting the first differing index.
pub fn check_output<T: PartialEq>(
    algorithm: Algorithm,
    output: &[T],
    expected: &[T],
) -> HarnessResult<()> {
    if output.len() != expected.len() {
        return Err(HarnessError::LengthMismatch {
            algorithm,
            expected: expected.len(),
            got: output.len(),
        });
    }
    match output.iter().zip(expected).position(|(a, b)| a != b) {
        Some(index) => Err(HarnessError::Mismatch { algorithm, index }),
        None => Ok(()),
    }
}

/// Sort one shuffled input of `size` elements and check the result.
pub fn verify<R: Rng + ?Sized>(algorithm: Algorithm, size: usize, rng: &mut R) -> HarnessResult<()> {
    let input = shuffled_input(size, rng);
    let expected: Vec<u32> = (0..size as u32).collect();
    let output = algorithm.run(input, rng)?;
    check_output(algorithm, &output, &expected)
}

/// Verify every algorithm once at the configured size.
pub fn run_testing(config: &HarnessConfig) -> HarnessResult<()> {
    let mut rng = config.rng();
    info!(array_size = config.array_size, "testing phase");
    for algorithm in Algorithm::ALL {
        if let Err(err) = verify(algorithm, config.array_size, &mut rng) {
            warn!(%algorithm, error = %err, "verification failed");
            return Err(err);
        }
        debug!(%algorithm, "verified");
    }
    Ok(())
}

/// Time `algorithm` over `config.repeats` passes, reshuffling before each.
///
/// Shuffling is excluded from the measurement. The first pass is also
/// checked against the reference so a broken kernel cannot post a time.
pub fn time_algorithm<R: Rng + ?Sized>(
    algorithm: Algorithm,
    config: &HarnessConfig,
    rng: &mut R,
) -> HarnessResult<Timing> {
    let repeats = config.repeats.max(1);
    let mut base: Vec<u32> = (0..config.array_size as u32).collect();
    let mut total_ms = 0.0;
    let mut min_ms = f64::INFINITY;

    for pass in 0..repeats {
        base.shuffle(rng);
        let data = base.clone();

        let start = Instant::now();
        let sorted = algorithm.run(black_box(data), rng)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if pass == 0 {
            base.sort_unstable();
            check_output(algorithm, &sorted, &base)?;
        }
        drop(black_box(sorted));

        debug!(%algorithm, pass, elapsed_ms, "timed pass");
        total_ms += elapsed_ms;
        min_ms = min_ms.min(elapsed_ms);
    }

    let timing = Timing {
        algorithm,
        array_size: config.array_size,
        repeats,
        mean_ms: total_ms / f64::from(repeats),
        min_ms,
    };
    info!(
        %algorithm,
        array_size = timing.array_size,
        mean_ms = timing.mean_ms,
        "timing complete"
    );
    Ok(timing)
}

/// Time every algorithm at the configured size.
///
/// `on_timing` sees each result as soon as it is measured, before the next
/// algorithm starts.
pub fn run_timing<F>(config: &HarnessConfig, mut on_timing: F) -> HarnessResult<Vec<Timing>>
where
    F: FnMut(&Timing),
{
    let mut rng = config.rng();
    info!(array_size = config.array_size, repeats = config.repeats, "timing phase");
    let mut timings = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let timing = time_algorithm(algorithm, config, &mut rng)?;
        on_timing(&timing);
        timings.push(timing);
    }
    Ok(timings)
}

/// The benchmark ladder without `array_size`, which the main timing phase
/// already covers.
pub fn ladder_sizes(array_size: usize) -> Vec<usize> {
    BENCHMARK_SIZES
        .into_iter()
        .filter(|&size| size != array_size)
        .collect()
}

/// Timings ordered fastest first.
pub fn ranking(timings: &[Timing]) -> Vec<&Timing> {
    let mut ranked: Vec<&Timing> = timings.iter().collect();
    ranked.sort_by(|a, b| a.mean_ms.total_cmp(&b.mean_ms));
    ranked
}

/// Collect timings into a report.
pub fn build_report(description: &str, timings: &[Timing]) -> BenchmarkReport {
    let mut report = BenchmarkReport::new(description);
    for timing in timings {
        report.add_result(BenchmarkResult {
            algorithm: timing.algorithm.name().to_string(),
            family: timing.algorithm.family().as_str().to_string(),
            array_size: timing.array_size,
            repeats: timing.repeats,
            time_ms: timing.mean_ms,
            verified: true,
        });
    }
    report
}
