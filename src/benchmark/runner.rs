use super::types::{summarize, BenchmarkConfig, BenchmarkResult, SortKind};
use crate::config::{Config, INSTRUMENT, INSTRUMENTING};
use crate::error::Result;
use crate::helper::Helper;
use crate::sort::{
    BinaryInsertionSort, BubbleSort, BucketSort, HeapSort, InsertionSort, LsdStringSort, MergeSort,
    MsdStringSort, ShellSort, TimSort,
};
use crate::Sort;
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Every configured sort at every configured size. A configuration that
    /// fails is logged and left out of the results.
    pub fn run_benchmarks(
        &self,
    ) -> std::result::Result<Vec<BenchmarkResult>, Box<dyn std::error::Error>> {
        let mut all_results = Vec::new();

        self.print_benchmark_header();

        for &n in &self.config.sizes {
            for &kind in &self.config.sorts {
                if let Some(limit) = kind.size_limit() {
                    if n > limit {
                        warn!("{}: skipping {} elements, limit is {}", kind, n, limit);
                        continue;
                    }
                }
                println!("Running benchmark for sort: {}", kind);
                println!("Elements: {}", n);
                println!("{}", "=".repeat(80));

                match self.run_one(kind, n) {
                    Ok(result) => {
                        println!(
                            "  {}: {:.3} ms mean over {} run(s)\n",
                            result.description, result.mean_time_ms, result.runs
                        );
                        all_results.push(result);
                    }
                    Err(e) => error!("{} with {} elements failed: {}", kind, n, e),
                }
            }
        }

        Ok(all_results)
    }

    fn print_benchmark_header(&self) {
        println!("\n=== BENCHMARK MODE ===");
        let sorts: Vec<String> = self.config.sorts.iter().map(|k| k.to_string()).collect();
        println!("Sorts: {}", sorts.join(", "));
        println!("Sizes: {:?}", self.config.sizes);
        println!("Warmup runs: {}", self.config.warmup_runs);
        println!("Runs per configuration: {}", self.config.runs);
        println!("Configuration: {}", self.config.config);
        println!();
    }

    /// Warm up without instrumentation, then measure `config.runs` runs.
    pub fn run_one(&self, kind: SortKind, n: usize) -> Result<BenchmarkResult> {
        if self.config.warmup_runs > 0 {
            println!("  Performing {} warmup run(s)...", self.config.warmup_runs);
            let plain = self.config.config.with(INSTRUMENTING, INSTRUMENT, false);
            self.measure_kind(kind, n, self.config.warmup_runs, &plain)?;
            println!("  Warmup complete.");
        }
        let result = self.measure_kind(kind, n, self.config.runs, &self.config.config)?;
        info!(
            sort = %result.description,
            n,
            mean_time_ms = result.mean_time_ms,
            "benchmark complete"
        );
        Ok(result)
    }

    fn measure_kind(
        &self,
        kind: SortKind,
        n: usize,
        runs: usize,
        config: &Config,
    ) -> Result<BenchmarkResult> {
        match kind {
            SortKind::Insertion => measure(
                kind,
                InsertionSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::BinaryInsertion => measure(
                kind,
                BinaryInsertionSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Bubble => measure(
                kind,
                BubbleSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Shell(mode) => measure(
                kind,
                ShellSort::from_config(mode, n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Heap => measure(
                kind,
                HeapSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Merge => measure(
                kind,
                MergeSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Tim => measure(
                kind,
                TimSort::from_config(n, runs, config)?,
                n,
                runs,
                random_int,
            ),
            SortKind::Bucket => {
                let n_buckets = (n / self.config.bucket_size.max(1)).max(1);
                measure(
                    kind,
                    BucketSort::numeric_from_config(n_buckets, n, runs, config)?,
                    n,
                    runs,
                    random_int,
                )
            }
            SortKind::LsdString => {
                let max_length = self.config.max_string_length.max(1);
                measure(
                    kind,
                    LsdStringSort::from_config(n, runs, config)?,
                    n,
                    runs,
                    |rng: &mut StdRng| random_string(rng, max_length),
                )
            }
            SortKind::MsdString => {
                let max_length = self.config.max_string_length.max(1);
                measure(
                    kind,
                    MsdStringSort::from_config(n, runs, config)?,
                    n,
                    runs,
                    |rng: &mut StdRng| random_string(rng, max_length),
                )
            }
        }
    }
}

fn random_int(rng: &mut StdRng) -> i32 {
    rng.random()
}

fn random_string(rng: &mut StdRng, max_length: usize) -> String {
    let length = rng.random_range(1..=max_length);
    (0..length).map(|_| rng.random_range(b'a'..=b'z') as char).collect()
}

/// `runs` timed runs of `sorter` over fresh random input from its own helper.
fn measure<X, S, F>(
    kind: SortKind,
    mut sorter: S,
    n: usize,
    runs: usize,
    mut generate: F,
) -> Result<BenchmarkResult>
where
    X: Clone + Debug,
    S: Sort<X>,
    F: FnMut(&mut StdRng) -> X,
{
    let mut elapsed = Duration::ZERO;
    for run in 1..=runs {
        let mut xs = sorter.helper_mut().random(n, &mut generate);
        sorter.init(n);
        sorter.pre_process(&xs)?;
        let start = Instant::now();
        sorter.sort_range(&mut xs, 0, n)?;
        let run_time = start.elapsed();
        elapsed += run_time;
        sorter.post_process(&xs)?;
        debug!(run, elapsed_us = run_time.as_micros() as u64, "run finished");
    }

    let result = BenchmarkResult {
        kind,
        description: sorter.description(),
        n,
        runs,
        mean_time_ms: elapsed.as_secs_f64() * 1000.0 / runs.max(1) as f64,
        metrics: sorter.helper().stat_pack().map(summarize).unwrap_or_default(),
    };
    sorter.close();
    Ok(result)
}
