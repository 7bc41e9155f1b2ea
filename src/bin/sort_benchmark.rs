use clap::Parser;
use sortlab::benchmark::{
    BenchmarkConfig, BenchmarkRunner, SortKind, print_benchmark_summary, print_compact_summary,
};
use sortlab::config::{Config, INSTRUMENTING, NORMALIZER};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sort_benchmark", version, about = "Run instrumented sorts over random input")]
struct SortArgs {
    /// Array sizes to sort, comma separated
    #[arg(short = 'n', long, value_delimiter = ',', default_value = "1000,2000,4000")]
    sizes: Vec<usize>,

    /// Sorts to run, comma separated (insertion, binary-insertion, bubble, shellN, heap, merge, timsort, bucket, lsd, msd)
    #[arg(short, long, value_delimiter = ',')]
    sorts: Vec<SortKind>,

    /// Number of benchmark runs per configuration
    #[arg(short, long, default_value = "10")]
    runs: usize,

    /// Number of warmup runs before benchmarking (not included in results)
    #[arg(long, default_value = "1")]
    warmup_runs: usize,

    /// Count compares, swaps, hits, copies and lookups
    #[arg(short, long)]
    instrument: bool,

    /// Also count inversions fixed by each swap
    #[arg(long)]
    fixes: bool,

    /// Number of runs whose input inversions are counted
    #[arg(long, default_value = "0")]
    inversions: usize,

    /// Seed for the random input; 0 seeds from the OS
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Insertion-sort cutoff for mergesort
    #[arg(long)]
    cutoff: Option<usize>,

    /// Normalizer for the statistics (linear, nlogn, nlnn, n2, n4/3)
    #[arg(long)]
    normalizer: Option<String>,

    /// Mean bucket size for bucket sort
    #[arg(long, default_value = "4")]
    bucket_size: usize,

    /// Extra configuration, as section.key=value (repeatable)
    #[arg(long = "set")]
    overrides: Vec<String>,

    /// Print one line per result instead of the full tables
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = SortArgs::parse();

    // Library configuration from flags, then overrides
    let mut config = Config::setup(
        args.instrument,
        args.fixes,
        args.seed,
        args.inversions,
        args.cutoff,
    );
    if let Some(normalizer) = &args.normalizer {
        config = config.with(INSTRUMENTING, NORMALIZER, normalizer);
    }
    for assignment in &args.overrides {
        config = config.with_override(assignment)?;
    }
    tracing::debug!("configuration: {}", config);

    let config = BenchmarkConfig {
        sizes: args.sizes,
        runs: args.runs,
        warmup_runs: args.warmup_runs,
        sorts: if args.sorts.is_empty() {
            SortKind::all()
        } else {
            args.sorts
        },
        config,
        bucket_size: args.bucket_size,
        ..BenchmarkConfig::default()
    };

    let runner = BenchmarkRunner::new(config);

    // Run all benchmarks
    let results = runner.run_benchmarks()?;

    if args.compact {
        print_compact_summary(&results);
    } else {
        print_benchmark_summary(&results);
    }

    Ok(())
}
