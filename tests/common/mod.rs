#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use sortlab::{Config, HelperConfig};

pub mod sorter_behavior;

pub const SEED: u64 = 0x5eed;

pub fn random_ints(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1000..1000)).collect()
}

pub fn sorted_copy<X: Ord + Clone>(xs: &[X]) -> Vec<X> {
    let mut ys = xs.to_vec();
    ys.sort();
    ys
}

/// Counting everything, fixes included, and sampling inversions on every run.
pub fn counting_config() -> Config {
    Config::setup(true, true, SEED, usize::MAX, None)
}

pub fn plain_config() -> Config {
    Config::setup(false, false, SEED, 0, None)
}

pub fn counting_helper_config() -> HelperConfig {
    HelperConfig {
        instrument: true,
        count_fixes: true,
        seed: SEED,
        inversions: usize::MAX,
        ..HelperConfig::default()
    }
}
