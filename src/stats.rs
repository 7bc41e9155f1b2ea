//! Per-metric sample series and the packs that group them.
//!
//! A [`Statistics`] holds the samples of one metric across the runs of a single
//! benchmark configuration. A [`StatPack`] owns one `Statistics` per metric key;
//! its key set is fixed when it is built.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SortError};

/// Theoretical cost of a problem of size `n`, used to normalize measured means.
#[derive(Clone, Copy, Debug)]
pub enum Normalizer {
    /// n
    Linear,
    /// n log2 n
    Linearithmic,
    /// n ln n
    LinearithmicNatural,
    /// n^2
    Quadratic,
    /// n^(4/3), the usual estimate for shellsort.
    ShellSort,
    Custom {
        name: &'static str,
        f: fn(f64) -> f64,
    },
}

impl Normalizer {
    pub fn apply(&self, n: f64) -> f64 {
        match self {
            Normalizer::Linear => n,
            Normalizer::Linearithmic => n * n.log2(),
            Normalizer::LinearithmicNatural => n * n.ln(),
            Normalizer::Quadratic => n * n,
            Normalizer::ShellSort => n.powf(4.0 / 3.0),
            Normalizer::Custom { f, .. } => f(n),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Normalizer::Linear => "linear",
            Normalizer::Linearithmic => "linearithmic",
            Normalizer::LinearithmicNatural => "linearithmic-natural",
            Normalizer::Quadratic => "quadratic",
            Normalizer::ShellSort => "shellsort",
            Normalizer::Custom { name, .. } => name,
        }
    }
}

impl PartialEq for Normalizer {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl FromStr for Normalizer {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "n" => Ok(Normalizer::Linear),
            "linearithmic" | "nlogn" => Ok(Normalizer::Linearithmic),
            "linearithmic-natural" | "nlnn" => Ok(Normalizer::LinearithmicNatural),
            "quadratic" | "n2" => Ok(Normalizer::Quadratic),
            "shellsort" | "n4/3" => Ok(Normalizer::ShellSort),
            other => Err(SortError::InvalidConfig {
                key: "instrumenting.normalizer".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// The sample series of one metric.
pub struct Statistics {
    property: String,
    normalizer: Normalizer,
    size: usize,
    samples: Vec<f64>,
    total: OnceCell<f64>,
    std_dev: OnceCell<f64>,
}

impl Statistics {
    /// `capacity` is a hint for the expected number of runs. A hint of zero
    /// still allocates room for one sample so that `add` cannot fail.
    pub fn new(property: &str, normalizer: Normalizer, capacity: usize, size: usize) -> Self {
        Self {
            property: property.to_string(),
            normalizer,
            size,
            samples: Vec::with_capacity(capacity.max(1)),
            total: OnceCell::new(),
            std_dev: OnceCell::new(),
        }
    }

    pub fn add(&mut self, x: f64) {
        if self.samples.len() == self.samples.capacity() {
            // Double the backing storage.
            let additional = self.samples.capacity().max(1);
            self.samples.reserve_exact(additional);
        }
        self.samples.push(x);
        self.total = OnceCell::new();
        self.std_dev = OnceCell::new();
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Left-to-right sum of the samples (0 when empty).
    pub fn total(&self) -> f64 {
        *self.total.get_or_init(|| {
            let mut sum = 0.0;
            for x in &self.samples {
                sum += x;
            }
            sum
        })
    }

    pub fn mean(&self) -> Result<f64> {
        if self.samples.is_empty() {
            return Err(self.no_samples());
        }
        Ok(self.total() / self.samples.len() as f64)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        Ok(*self.std_dev.get_or_init(|| {
            let variance: f64 = self
                .samples
                .iter()
                .map(|x| (x - mean) * (x - mean))
                .sum::<f64>()
                / self.samples.len() as f64;
            variance.sqrt()
        }))
    }

    pub fn normalized_mean(&self) -> Result<f64> {
        Ok(self.mean()? / self.normalizer.apply(self.size as f64))
    }

    fn no_samples(&self) -> SortError {
        SortError::NoSamples {
            property: self.property.clone(),
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: ", self.property)?;
        match (self.mean(), self.std_dev(), self.normalized_mean()) {
            (Ok(mean), Ok(std_dev), Ok(normalized)) => {
                write!(f, "mean={}", mean.round() as i64)?;
                if std_dev > 0.0 {
                    write!(f, "; stdDev={}", std_dev.round() as i64)?;
                }
                write!(f, "; normalized={:.3}", normalized)
            }
            _ => write!(f, "<unset>"),
        }
    }
}

impl fmt::Debug for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Statistics")
            .field("property", &self.property)
            .field("normalizer", &self.normalizer.name())
            .field("size", &self.size)
            .field("samples", &self.samples)
            .finish()
    }
}

/// One `Statistics` per registered metric, all sharing run count and size.
#[derive(Debug)]
pub struct StatPack {
    runs: usize,
    size: usize,
    map: BTreeMap<String, Statistics>,
}

impl StatPack {
    pub fn new(normalizer: Normalizer, runs: usize, size: usize, keys: &[&str]) -> Self {
        let map = keys
            .iter()
            .map(|key| (key.to_string(), Statistics::new(key, normalizer, runs, size)))
            .collect();
        Self { runs, size, map }
    }

    pub fn add(&mut self, key: &str, x: f64) -> Result<()> {
        self.statistics_mut(key)?.add(x);
        Ok(())
    }

    pub fn statistics(&self, key: &str) -> Result<&Statistics> {
        self.map.get(key).ok_or_else(|| SortError::InvalidKey {
            key: key.to_string(),
        })
    }

    fn statistics_mut(&mut self, key: &str) -> Result<&mut Statistics> {
        self.map.get_mut(key).ok_or_else(|| SortError::InvalidKey {
            key: key.to_string(),
        })
    }

    pub fn count(&self, key: &str) -> Result<usize> {
        Ok(self.statistics(key)?.count())
    }

    pub fn total(&self, key: &str) -> Result<f64> {
        Ok(self.statistics(key)?.total())
    }

    pub fn mean(&self, key: &str) -> Result<f64> {
        self.statistics(key)?.mean()
    }

    pub fn std_dev(&self, key: &str) -> Result<f64> {
        self.statistics(key)?.std_dev()
    }

    pub fn normalized_mean(&self, key: &str) -> Result<f64> {
        self.statistics(key)?.normalized_mean()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// A pack configured for zero runs cannot describe a benchmark.
    pub fn is_invalid(&self) -> bool {
        self.runs == 0
    }
}

impl fmt::Display for StatPack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StatPack {{runs: {} ", self.runs)?;
        if self.map.is_empty() {
            return write!(f, "<empty>}}");
        }
        let parts: Vec<String> = self.map.values().map(|s| s.to_string()).collect();
        write!(f, "{}}}", parts.join("; "))
    }
}
