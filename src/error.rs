use thiserror::Error;

/// Errors raised by helpers, statistics and the sorts built on them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SortError {
    /// A StatPack was asked for a metric it was not constructed with.
    #[error("StatPack: key not valid: {key}")]
    InvalidKey { key: String },

    /// Mean/std-dev requested before any sample was added.
    #[error("Statistics {property}: no samples")]
    NoSamples { property: String },

    /// Post-condition failure: the array is out of order at `index`.
    #[error("{description}: array is not sorted at index {index}: {previous}, {current}")]
    NotSorted {
        description: String,
        index: usize,
        previous: String,
        current: String,
    },

    /// A computed target index fell outside its destination.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A configuration value was present but could not be parsed.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    /// An instrumented helper was used before `init`.
    #[error("{0}: helper has not been initialized (no StatPack)")]
    Uninitialized(String),

    #[error("invalid shell sort mode: {0}")]
    InvalidShellMode(u8),
}

pub type Result<T> = std::result::Result<T, SortError>;
