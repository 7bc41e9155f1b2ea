use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{Result, SortError};
use crate::instrument::METRIC_KEYS;
use crate::stats::StatPack;

/// The sorts the benchmark driver knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKind {
    Insertion,
    BinaryInsertion,
    Bubble,
    Shell(u8),
    Heap,
    Merge,
    Tim,
    Bucket,
    LsdString,
    MsdString,
}

impl SortKind {
    pub fn all() -> Vec<SortKind> {
        vec![
            SortKind::Insertion,
            SortKind::BinaryInsertion,
            SortKind::Bubble,
            SortKind::Shell(3),
            SortKind::Heap,
            SortKind::Merge,
            SortKind::Tim,
            SortKind::Bucket,
            SortKind::LsdString,
            SortKind::MsdString,
        ]
    }

    /// Quadratic sorts are skipped above this many elements.
    pub fn size_limit(&self) -> Option<usize> {
        match self {
            SortKind::Insertion | SortKind::BinaryInsertion | SortKind::Bubble => Some(20_000),
            _ => None,
        }
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortKind::Insertion => write!(f, "insertion"),
            SortKind::BinaryInsertion => write!(f, "binary-insertion"),
            SortKind::Bubble => write!(f, "bubble"),
            SortKind::Shell(mode) => write!(f, "shell{}", mode),
            SortKind::Heap => write!(f, "heap"),
            SortKind::Merge => write!(f, "merge"),
            SortKind::Tim => write!(f, "timsort"),
            SortKind::Bucket => write!(f, "bucket"),
            SortKind::LsdString => write!(f, "lsd"),
            SortKind::MsdString => write!(f, "msd"),
        }
    }
}

impl FromStr for SortKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "insertion" => Ok(SortKind::Insertion),
            "binary-insertion" | "binaryinsertion" => Ok(SortKind::BinaryInsertion),
            "bubble" => Ok(SortKind::Bubble),
            "shell" => Ok(SortKind::Shell(3)),
            "heap" => Ok(SortKind::Heap),
            "merge" => Ok(SortKind::Merge),
            "timsort" | "tim" => Ok(SortKind::Tim),
            "bucket" => Ok(SortKind::Bucket),
            "lsd" | "lsd-string" => Ok(SortKind::LsdString),
            "msd" | "msd-string" => Ok(SortKind::MsdString),
            other => match other.strip_prefix("shell").map(str::parse::<u8>) {
                Some(Ok(mode)) => Ok(SortKind::Shell(mode)),
                _ => Err(SortError::InvalidConfig {
                    key: "sort".to_string(),
                    value: s.to_string(),
                }),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub sizes: Vec<usize>,
    pub runs: usize,
    /// Uninstrumented runs before the measured ones, per configuration.
    pub warmup_runs: usize,
    pub sorts: Vec<SortKind>,
    /// Library configuration handed to every helper.
    pub config: Config,
    /// Mean number of elements per bucket for bucket sort.
    pub bucket_size: usize,
    /// Longest random string generated for string sorts.
    pub max_string_length: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1000, 2000, 4000],
            runs: 10,
            warmup_runs: 1,
            sorts: SortKind::all(),
            config: Config::new(),
            bucket_size: 4,
            max_string_length: 8,
        }
    }
}

/// Mean, standard deviation and normalized mean of one metric.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSummary {
    pub key: String,
    pub mean: f64,
    pub std_dev: f64,
    pub normalized: f64,
}

#[derive(Clone, Debug)]
pub struct BenchmarkResult {
    pub kind: SortKind,
    pub description: String,
    pub n: usize,
    pub runs: usize,
    pub mean_time_ms: f64,
    /// Empty for non-instrumented runs.
    pub metrics: Vec<MetricSummary>,
}

impl BenchmarkResult {
    pub fn metric(&self, key: &str) -> Option<&MetricSummary> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

/// Summaries of every metric in `pack` that has samples, in the usual key order.
pub fn summarize(pack: &StatPack) -> Vec<MetricSummary> {
    METRIC_KEYS
        .iter()
        .filter_map(|key| {
            let mean = pack.mean(key).ok()?;
            Some(MetricSummary {
                key: key.to_string(),
                mean,
                std_dev: pack.std_dev(key).ok()?,
                normalized: pack.normalized_mean(key).ok()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::{COMPARES, SWAPS};
    use crate::stats::Normalizer;

    #[test]
    fn test_sort_kind_parsing() {
        assert_eq!("merge".parse::<SortKind>().unwrap(), SortKind::Merge);
        assert_eq!("Shell5".parse::<SortKind>().unwrap(), SortKind::Shell(5));
        assert_eq!("shell".parse::<SortKind>().unwrap(), SortKind::Shell(3));
        assert!("quick".parse::<SortKind>().is_err());
        for kind in SortKind::all() {
            assert_eq!(kind.to_string().parse::<SortKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_summarize_skips_empty_metrics() {
        let mut pack = StatPack::new(Normalizer::Linear, 2, 10, &METRIC_KEYS);
        pack.add(COMPARES, 10.0).unwrap();
        pack.add(COMPARES, 30.0).unwrap();
        let summary = summarize(&pack);
        assert_eq!(summary.len(), 1);
        assert_eq!(
            summary[0],
            MetricSummary {
                key: COMPARES.to_string(),
                mean: 20.0,
                std_dev: 10.0,
                normalized: 2.0,
            }
        );
        let result = BenchmarkResult {
            kind: SortKind::Heap,
            description: "HeapSort".to_string(),
            n: 10,
            runs: 2,
            mean_time_ms: 0.0,
            metrics: summary,
        };
        assert!(result.metric(COMPARES).is_some());
        assert!(result.metric(SWAPS).is_none());
    }
}
