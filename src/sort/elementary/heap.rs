use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "HeapSort";

/// In-place heapsort of a sub-range, using a max-heap rooted at `from`.
pub struct HeapSort<X, H> {
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> HeapSort<X, H>
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

    /// Sift `xs[from + root]` down a heap of `size` elements based at `from`.
    fn sift_down(&mut self, xs: &mut [X], from: usize, mut root: usize, size: usize) {
        loop {
            let left = 2 * root + 1;
            let right = left + 1;
            let mut largest = root;
            if left < size && self.helper.compare_at(xs, from + largest, from + left) == Ordering::Less {
                largest = left;
            }
            if right < size && self.helper.compare_at(xs, from + largest, from + right) == Ordering::Less
            {
                largest = right;
            }
            if largest == root {
                return;
            }
            self.helper.swap(xs, from + root, from + largest);
            root = largest;
        }
    }
}

impl<X> HeapSort<X, AnyHelper<X>>
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

impl<X, H> Sort<X> for HeapSort<X, H>
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
        if to <= from + 1 {
            return Ok(());
        }
        let n = to - from;
        for root in (0..n / 2).rev() {
            self.sift_down(xs, from, root, n);
        }
        for end in (1..n).rev() {
            self.helper.swap(xs, from, from + end);
            self.sift_down(xs, from, 0, end);
        }
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
