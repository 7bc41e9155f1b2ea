use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "Bubble sort";

/// Bubble sort that stops after the first pass with no swaps.
pub struct BubbleSort<X, H> {
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> BubbleSort<X, H>
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

    /// One pass over `xs[from..to]`. Returns true if nothing moved.
    fn pass(&mut self, xs: &mut [X], from: usize, to: usize) -> bool {
        if from + 1 >= to {
            return false;
        }
        let helper = &mut self.helper;
        let mut swapped = false;
        let mut i = from;
        let mut v = helper.get(xs, i);
        let mut w = helper.get(xs, i + 1);
        loop {
            let moved = helper.swap_conditional_with(xs, &v, i, i + 1, &w);
            swapped |= moved;
            i += 1;
            if i == to - 1 {
                break;
            }
            // After a swap the larger value v travels on to position i.
            if !moved {
                v = w;
            }
            w = helper.get(xs, i + 1);
        }
        !swapped
    }
}

impl<X> BubbleSort<X, AnyHelper<X>>
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

impl<X, H> Sort<X> for BubbleSort<X, H>
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
        for end in (from + 1..=to).rev() {
            if self.pass(xs, from, end) {
                break;
            }
        }
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
