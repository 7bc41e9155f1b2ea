use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SortError};
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "Shell sort in mode ";

/// Shellsort with a choice of gap sequence:
///
/// * 1: plain insertion sort (gap 1 only)
/// * 2: 2^k - 1
/// * 3: Knuth's 3h + 1
/// * 4: Sedgewick's 1, 5, 19, 41, 109, ...
/// * 5: Pratt's 2^i 3^j
pub struct ShellSort<X, H> {
    mode: u8,
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> ShellSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    pub fn new(mode: u8, helper: H) -> Result<Self> {
        check_mode(mode)?;
        Ok(Self {
            mode,
            helper,
            close_helper: false,
            _marker: PhantomData,
        })
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    fn h_sort(&mut self, h: usize, xs: &mut [X], from: usize, to: usize) {
        for i in from + h..to {
            let mut j = i;
            while j >= from + h && self.helper.swap_conditional(xs, j - h, j) {
                j -= h;
            }
        }
    }
}

impl<X> ShellSort<X, AnyHelper<X>>
where
    X: Ord + Clone + Debug + 'static,
{
    pub fn from_config(mode: u8, n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        check_mode(mode)?;
        let description = format!("{}{}", DESCRIPTION, mode);
        Ok(Self {
            mode,
            helper: factory::create(&description, n, n_runs, config)?,
            close_helper: true,
            _marker: PhantomData,
        })
    }
}

impl<X, H> Sort<X> for ShellSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    type Helper = H;

    fn helper(&self) -> &H {
        &self.helper
    }

    fn helper_mut(&mut self) -> &mut H {
        &mut self.helper
    }

    fn sort_range(&mut self, xs: &mut [X], from: usize, to: usize) -> Result<()> {
        if to <= from {
            return Ok(());
        }
        for h in gaps(self.mode, to - from)? {
            self.h_sort(h, xs, from, to);
            debug!(h, swaps = self.helper.counts().swaps, "h-sort pass");
        }
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}

fn check_mode(mode: u8) -> Result<()> {
    if (1..=5).contains(&mode) {
        Ok(())
    } else {
        Err(SortError::InvalidShellMode(mode))
    }
}

fn sedgewick(k: u32) -> usize {
    if k % 2 == 0 {
        9 * ((1usize << k) - (1usize << (k / 2))) + 1
    } else {
        8 * (1usize << k) - 6 * (1usize << k.div_ceil(2)) + 1
    }
}

/// Gap sequence for `mode` over `n` elements, largest first, ending in 1
/// (empty when there is nothing to sort).
pub fn gaps(mode: u8, n: usize) -> Result<Vec<usize>> {
    check_mode(mode)?;
    let mut result = Vec::new();
    match mode {
        1 => result.push(1),
        2 => {
            let mut h = 1;
            while h <= n {
                result.push(h);
                h = 2 * h + 1;
            }
        }
        3 => {
            let mut h = 1;
            loop {
                result.push(h);
                if h > n / 3 {
                    break;
                }
                h = 3 * h + 1;
            }
        }
        4 => {
            let mut k = 0;
            while sedgewick(k) < n {
                result.push(sedgewick(k));
                k += 1;
            }
        }
        _ => {
            let mut j = 1;
            while j <= n {
                let mut i = j;
                while i <= n {
                    result.push(i);
                    i *= 2;
                }
                j *= 3;
            }
            result.sort_unstable();
        }
    }
    result.reverse();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_gap_sequences() {
        assert_eq!(gaps(1, 100).unwrap(), vec![1]);
        assert_eq!(gaps(2, 20).unwrap(), vec![15, 7, 3, 1]);
        assert_eq!(gaps(3, 100).unwrap(), vec![40, 13, 4, 1]);
        assert_eq!(gaps(4, 200).unwrap(), vec![109, 41, 19, 5, 1]);
        assert_eq!(gaps(5, 10).unwrap(), vec![9, 8, 6, 4, 3, 2, 1]);
        assert_eq!(gaps(6, 10), Err(SortError::InvalidShellMode(6)));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(ShellSort::<i32, _>::from_config(0, 10, 1, &Config::new()).is_err());
    }

    #[test]
    fn test_every_mode_sorts() {
        let mut rng = StdRng::seed_from_u64(42);
        let xs: Vec<i32> = (0..500).map(|_| rng.random_range(0..1000)).collect();
        let mut expected = xs.clone();
        expected.sort();
        for mode in 1..=5 {
            let config = Config::setup(true, true, 42, 0, None);
            let mut sorter = ShellSort::from_config(mode, xs.len(), 1, &config).unwrap();
            assert_eq!(sorter.sort(&xs).unwrap(), expected, "mode {}", mode);
            let helper = sorter.helper();
            assert_eq!(helper.counts().fixes, helper.inversions(&xs) as i64);
        }
    }

    #[test]
    fn test_mode_one_matches_insertion_swaps() {
        let config = Config::setup(true, false, 7, 0, None);
        let xs = vec![7, 0, 8, 2, 4, 5, 6, 9, 3, 1];
        let mut sorter = ShellSort::from_config(1, xs.len(), 1, &config).unwrap();
        sorter.sort(&xs).unwrap();
        assert_eq!(sorter.helper().counts().swaps, 23);
        assert_eq!(sorter.helper().counts().compares, 31);
    }
}
