use super::types::BenchmarkResult;
use crate::instrument::{COMPARES, COPIES, FIXES, HITS, INVERSIONS, SWAPS};

/// Print the timing table followed by per-metric statistics.
pub fn print_benchmark_summary(results: &[BenchmarkResult]) {
    println!("\n{}", "=".repeat(140));
    println!("Benchmark Results Summary");
    println!("{}", "=".repeat(140));
    println!(
        "{:<50} {:<10} {:<6} {:<12} {:<12} {:<12} {:<12} {:<12} {:<12}",
        "Sort", "Elements", "Runs", "Time (ms)", "Compares", "Swaps", "Hits", "Copies", "Fixes"
    );
    println!("{}", "-".repeat(140));

    for result in results {
        println!(
            "{:<50} {:<10} {:<6} {:<12.3} {:<12} {:<12} {:<12} {:<12} {:<12}",
            result.description,
            result.n,
            result.runs,
            result.mean_time_ms,
            mean_or_dash(result, COMPARES),
            mean_or_dash(result, SWAPS),
            mean_or_dash(result, HITS),
            mean_or_dash(result, COPIES),
            mean_or_dash(result, FIXES),
        );
    }
    println!("{}", "=".repeat(140));

    print_statistics_table(results);
}

/// Every metric with samples: mean, standard deviation, normalized mean.
pub fn print_statistics_table(results: &[BenchmarkResult]) {
    if results.iter().all(|r| r.metrics.is_empty()) {
        return;
    }
    println!("\nDetailed Statistics:");
    println!("{}", "-".repeat(110));
    println!(
        "{:<50} {:<10} {:<12} {:<14} {:<12} {:<12}",
        "Sort", "Elements", "Metric", "Mean", "Std Dev", "Normalized"
    );
    println!("{}", "-".repeat(110));
    for result in results {
        for metric in &result.metrics {
            println!(
                "{:<50} {:<10} {:<12} {:<14.1} {:<12.1} {:<12.3}",
                result.description, result.n, metric.key, metric.mean, metric.std_dev, metric.normalized
            );
        }
    }
    println!("{}", "-".repeat(110));
}

fn mean_or_dash(result: &BenchmarkResult, key: &str) -> String {
    match result.metric(key) {
        Some(metric) => format!("{:.0}", metric.mean),
        None => "-".to_string(),
    }
}

/// The result with the fewest compares per element, normalized.
pub fn find_fewest_compares(results: &[BenchmarkResult]) -> Option<&BenchmarkResult> {
    results
        .iter()
        .filter_map(|r| r.metric(COMPARES).map(|m| (r, m.normalized)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(r, _)| r)
}

/// Print a compact one-line summary for each result
pub fn print_compact_summary(results: &[BenchmarkResult]) {
    println!("\n=== COMPACT SUMMARY ===");
    for result in results {
        let inversions = match result.metric(INVERSIONS) {
            Some(metric) => format!(", {:.0} inversions", metric.mean),
            None => String::new(),
        };
        println!(
            "{}: {:.3} ms ({} elements, {} runs{})",
            result.description, result.mean_time_ms, result.n, result.runs, inversions
        );
    }
    if let Some(best) = find_fewest_compares(results) {
        println!("Fewest normalized compares: {} at {} elements", best.description, best.n);
    }
}
