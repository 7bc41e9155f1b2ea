use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SortError};
use crate::stats::Normalizer;

pub const HELPER: &str = "helper";
pub const INSTRUMENTING: &str = "instrumenting";
pub const MERGESORT: &str = "mergesort";

pub const SEED: &str = "seed";
pub const CUTOFF: &str = "cutoff";
pub const MSD_CUTOFF: &str = "msdcutoff";
pub const RUNS: &str = "runs";
pub const INSTRUMENT: &str = "instrument";
pub const FIXES: &str = "fixes";
pub const INVERSIONS: &str = "inversions";
pub const NORMALIZER: &str = "normalizer";
pub const INSURANCE: &str = "insurance";

pub const CUTOFF_DEFAULT: usize = 7;
pub const MSD_CUTOFF_DEFAULT: usize = 256;
pub const RUNS_DEFAULT: usize = 1;

/// Immutable key-value configuration, addressed by `section.key`.
///
/// Values are stored as strings and parsed by the typed getters. Missing keys
/// yield the caller's default; present but unparsable values are an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used throughout the tests.
    ///
    /// `cutoff` of `None` leaves the default insertion-sort crossover in place.
    pub fn setup(
        instrument: bool,
        fixes: bool,
        seed: u64,
        inversions: usize,
        cutoff: Option<usize>,
    ) -> Self {
        let config = Self::new()
            .with(INSTRUMENTING, INSTRUMENT, instrument)
            .with(INSTRUMENTING, FIXES, fixes)
            .with(INSTRUMENTING, INVERSIONS, inversions)
            .with(HELPER, SEED, seed);
        match cutoff {
            Some(cutoff) => config.with(HELPER, CUTOFF, cutoff),
            None => config,
        }
    }

    /// Copy of this configuration with one value replaced (or added).
    pub fn with(&self, section: &str, key: &str, value: impl ToString) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(Self::full_key(section, key), value.to_string());
        Self { entries }
    }

    /// Apply an override of the form `section.key=value`.
    pub fn with_override(&self, assignment: &str) -> Result<Self> {
        let (path, value) = parse_override(assignment)?;
        let mut entries = self.entries.clone();
        entries.insert(path, value);
        Ok(Self { entries })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&Self::full_key(section, key))
            .map(String::as_str)
    }

    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key).unwrap_or(default).to_string()
    }

    pub fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64> {
        self.parse_or(section, key, default)
    }

    pub fn get_usize(&self, section: &str, key: &str, default: usize) -> Result<usize> {
        self.parse_or(section, key, default)
    }

    /// Booleans accept `true`/`false`; an empty value counts as `false`.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        match self.get(section, key).map(str::trim) {
            None | Some("") => Ok(false),
            Some(value) => value
                .parse()
                .map_err(|_| Self::invalid(section, key, value)),
        }
    }

    pub fn is_instrumented(&self) -> Result<bool> {
        self.get_bool(INSTRUMENTING, INSTRUMENT)
    }

    pub fn seed(&self) -> Result<u64> {
        self.parse_or(HELPER, SEED, 0)
    }

    fn parse_or<T: FromStr>(&self, section: &str, key: &str, default: T) -> Result<T> {
        match self.get(section, key).map(str::trim) {
            None | Some("") => Ok(default),
            Some(value) => value
                .parse()
                .map_err(|_| Self::invalid(section, key, value)),
        }
    }

    fn invalid(section: &str, key: &str, value: &str) -> SortError {
        SortError::InvalidConfig {
            key: Self::full_key(section, key),
            value: value.to_string(),
        }
    }

    fn full_key(section: &str, key: &str) -> String {
        format!("{}.{}", section, key)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "Config {{{}}}", pairs.join(", "))
    }
}

/// Split `section.key=value` into its key path and value.
pub fn parse_override(assignment: &str) -> Result<(String, String)> {
    let invalid = || SortError::InvalidConfig {
        key: assignment.to_string(),
        value: String::new(),
    };
    let (path, value) = assignment.split_once('=').ok_or_else(invalid)?;
    let path = path.trim();
    match path.split_once('.') {
        Some((section, key)) if !section.is_empty() && !key.is_empty() => {
            Ok((path.to_string(), value.trim().to_string()))
        }
        _ => Err(invalid()),
    }
}

/// The settings a helper reads once, at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct HelperConfig {
    pub instrument: bool,
    pub count_fixes: bool,
    /// 0 means "seed from the operating system".
    pub seed: u64,
    pub cutoff: usize,
    pub msd_cutoff: usize,
    pub runs: usize,
    /// How many `pre_process` calls may still sample the inversion count.
    pub inversions: usize,
    pub normalizer: Normalizer,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            instrument: false,
            count_fixes: false,
            seed: 0,
            cutoff: CUTOFF_DEFAULT,
            msd_cutoff: MSD_CUTOFF_DEFAULT,
            runs: RUNS_DEFAULT,
            inversions: 0,
            normalizer: Normalizer::Linearithmic,
        }
    }
}

impl HelperConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let normalizer = match config.get(INSTRUMENTING, NORMALIZER) {
            Some(name) => name.parse()?,
            None => Normalizer::Linearithmic,
        };
        // A zero cutoff would leave recursive sorts without a base case.
        let cutoff = config.get_usize(HELPER, CUTOFF, CUTOFF_DEFAULT)?;
        if cutoff == 0 {
            return Err(Config::invalid(HELPER, CUTOFF, "0"));
        }
        Ok(Self {
            instrument: config.is_instrumented()?,
            count_fixes: config.get_bool(INSTRUMENTING, FIXES)?,
            seed: config.seed()?,
            cutoff,
            msd_cutoff: config.get_usize(HELPER, MSD_CUTOFF, MSD_CUTOFF_DEFAULT)?,
            runs: config.get_usize(HELPER, RUNS, RUNS_DEFAULT)?,
            inversions: config.get_usize(INSTRUMENTING, INVERSIONS, 0)?,
            normalizer,
        })
    }
}
