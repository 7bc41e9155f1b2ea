pub mod reporting;
pub mod runner;
pub mod types;

pub use reporting::{
    find_fewest_compares, print_benchmark_summary, print_compact_summary, print_statistics_table,
};
pub use runner::BenchmarkRunner;
pub use types::{summarize, BenchmarkConfig, BenchmarkResult, MetricSummary, SortKind};
