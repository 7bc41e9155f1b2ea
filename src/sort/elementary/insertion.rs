use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "Insertion sort";

/// Straight insertion sort with adjacent conditional swaps.
pub struct InsertionSort<X, H> {
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> InsertionSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    /// Sort over a helper owned elsewhere; `close` leaves it open.
    pub fn new(helper: H) -> Self {
        Self {
            helper,
            close_helper: false,
            _marker: PhantomData,
        }
    }

    pub fn into_helper(self) -> H {
        self.helper
    }
}

impl<X> InsertionSort<X, AnyHelper<X>>
where
    X: Ord + Clone + Debug + 'static,
{
    pub fn from_config(n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        let helper = factory::create(DESCRIPTION, n, n_runs, config)?;
        Ok(Self {
            helper,
            close_helper: true,
            _marker: PhantomData,
        })
    }
}

impl<X, H> Sort<X> for InsertionSort<X, H>
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
        insertion_sort(&mut self.helper, xs, from, to);
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}

/// Insertion sort of `xs[from..to]` through `helper`.
///
/// Each element is read once on its way in, and the element it is compared
/// against is only re-read after a swap, so hits track real array reads.
/// Other sorts use this directly for their small sub-ranges.
pub fn insertion_sort<X, H>(helper: &mut H, xs: &mut [X], from: usize, to: usize)
where
    X: Clone + Debug,
    H: Helper<X>,
{
    if to <= from {
        return;
    }
    let mut a = helper.get(xs, from);
    for i in from + 1..to {
        let b = helper.get(xs, i);
        // The value that ends up at xs[i].
        let mut a_next = None;
        let mut j = i;
        while helper.swap_conditional_with(xs, &a, j - 1, j, &b) {
            if a_next.is_none() {
                a_next = Some(a.clone());
            }
            j -= 1;
            if j == from {
                break;
            }
            a = helper.get(xs, j - 1);
        }
        a = a_next.unwrap_or(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::InstrumentedHelper;
    use crate::instrument::{COMPARES, FIXES, HITS, LOOKUPS, SWAPS};

    fn instrumented_config() -> Config {
        Config::setup(true, true, 0, 0, None)
    }

    #[test]
    fn test_sorted_input() {
        let xs: Vec<i32> = (0..10).collect();
        let mut sorter = InsertionSort::from_config(10, 1, &instrumented_config()).unwrap();
        let ys = sorter.sort(&xs).unwrap();
        assert_eq!(ys, xs);
        let pack = sorter.helper().stat_pack().unwrap();
        assert_eq!(pack.mean(COMPARES).unwrap(), 9.0);
        assert_eq!(pack.mean(SWAPS).unwrap(), 0.0);
        assert_eq!(pack.mean(FIXES).unwrap(), 0.0);
        assert_eq!(pack.mean(HITS).unwrap(), 10.0);
        assert_eq!(pack.mean(LOOKUPS).unwrap(), 18.0);
        sorter.close();
    }

    #[test]
    fn test_partially_sorted_counts() {
        let xs = vec![7, 0, 8, 2, 4, 5, 6, 9, 3, 1];
        let mut sorter = InsertionSort::from_config(10, 1, &instrumented_config()).unwrap();
        let ys = sorter.sort(&xs).unwrap();
        assert_eq!(ys, (0..10).collect::<Vec<_>>());
        let helper = sorter.helper();
        assert_eq!(helper.inversions(&xs), 23);
        let counts = helper.counts();
        assert_eq!(counts.compares, 31);
        assert_eq!(counts.swaps, 23);
        assert_eq!(counts.fixes, 23);
        assert_eq!(counts.hits, 32);
        assert_eq!(counts.lookups, 62);
    }

    #[test]
    fn test_reverse_sorted_is_quadratic() {
        let n = 20;
        let xs: Vec<i32> = (0..n).rev().collect();
        let mut sorter = InsertionSort::from_config(n as usize, 1, &instrumented_config()).unwrap();
        sorter.sort(&xs).unwrap();
        let counts = sorter.helper().counts();
        let expected = (n * (n - 1) / 2) as u64;
        assert_eq!(counts.swaps, expected);
        assert_eq!(counts.fixes, expected as i64);
        assert_eq!(counts.compares, expected);
    }

    #[test]
    fn test_four_elements_without_fixes() {
        let config = Config::setup(true, false, 0, 0, None);
        let mut sorter = InsertionSort::from_config(4, 1, &config).unwrap();
        assert_eq!(sorter.sort(&[3, 4, 2, 1]).unwrap(), vec![1, 2, 3, 4]);
        let counts = sorter.helper().counts();
        assert_eq!(counts.compares, 6);
        assert_eq!(counts.swaps, 5);
        assert_eq!(counts.fixes, 0);
    }

    #[test]
    fn test_sub_range_only() {
        let config = Config::setup(true, false, 1, 0, None);
        let helper: InstrumentedHelper<i32> =
            InstrumentedHelper::new("range", 6, crate::config::HelperConfig::from_config(&config).unwrap());
        let mut sorter = InsertionSort::new(helper);
        let mut xs = vec![9, 5, 3, 4, 1, 0];
        sorter.sort_range(&mut xs, 1, 5).unwrap();
        assert_eq!(xs, vec![9, 1, 3, 4, 5, 0]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut sorter = InsertionSort::from_config(0, 1, &Config::new()).unwrap();
        assert!(sorter.sort(&Vec::<i32>::new()).unwrap().is_empty());
        assert_eq!(sorter.sort(&[42]).unwrap(), vec![42]);
    }
}
