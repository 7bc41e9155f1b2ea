use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "Binary insertion sort";

/// Insertion sort that finds each insertion point by binary search and then
/// shifts the block in one rotation.
pub struct BinaryInsertionSort<X, H> {
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> BinaryInsertionSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    pub fn new(helper: H) -> Self {
        Self {
            helper,
            close_helper: false,
            _marker: PhantomData,
        }
    }
}

impl<X> BinaryInsertionSort<X, AnyHelper<X>>
where
    X: Ord + Clone + Debug + 'static,
{
    pub fn from_config(n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        Ok(Self {
            helper: factory::create(DESCRIPTION, n, n_runs, config)?,
            close_helper: true,
            _marker: PhantomData,
        })
    }
}

impl<X, H> Sort<X> for BinaryInsertionSort<X, H>
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
        let range = &mut xs[from..to];
        for i in 1..range.len() {
            self.helper.swap_into_sorted(range, i);
        }
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_with_duplicates() {
        let config = Config::setup(true, true, 5, 0, None);
        let xs = vec![5, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let mut sorter = BinaryInsertionSort::from_config(xs.len(), 1, &config).unwrap();
        let ys = sorter.sort(&xs).unwrap();
        let mut expected = xs.clone();
        expected.sort();
        assert_eq!(ys, expected);

        // Each element moves past exactly the elements it is inverted with.
        let counts = sorter.helper().counts();
        assert_eq!(counts.swaps, sorter.helper().inversions(&xs));
        assert_eq!(counts.fixes, counts.swaps as i64);
    }

    #[test]
    fn test_sorted_input_needs_no_moves() {
        let config = Config::setup(true, false, 5, 0, None);
        let xs: Vec<i32> = (0..16).collect();
        let mut sorter = BinaryInsertionSort::from_config(xs.len(), 1, &config).unwrap();
        sorter.sort(&xs).unwrap();
        assert_eq!(sorter.helper().counts().swaps, 0);
    }

    #[test]
    fn test_range_is_respected() {
        let mut sorter = BinaryInsertionSort::from_config(6, 1, &Config::new()).unwrap();
        let mut xs = vec![6, 5, 4, 3, 2, 1];
        sorter.sort_range(&mut xs, 2, 6).unwrap();
        assert_eq!(xs, vec![6, 5, 1, 2, 3, 4]);
    }
}
