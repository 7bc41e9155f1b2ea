use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::{self, Config, CUTOFF_DEFAULT, HELPER, INSURANCE, MERGESORT};
use crate::error::{Result, SortError};
use crate::helper::{AnyHelper, Helper, factory};
use crate::sort::elementary::insertion::insertion_sort;
use crate::Sort;

pub const DESCRIPTION: &str = "MergeSort";

/// Top-down mergesort over an auxiliary array.
///
/// Ranges no longer than the helper's cutoff are handed to insertion sort,
/// which runs on a sub-helper; its counts are folded into this helper once
/// the whole range is sorted.
pub struct MergeSort<X, H> {
    helper: H,
    close_helper: bool,
    insurance: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> MergeSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    pub fn new(helper: H) -> Self {
        Self {
            helper,
            close_helper: false,
            insurance: false,
            _marker: PhantomData,
        }
    }

    /// Re-check every merged range and fail on the first disorder.
    pub fn with_insurance(mut self, insurance: bool) -> Self {
        self.insurance = insurance;
        self
    }

    fn sort_recursive(
        &mut self,
        a: &mut [X],
        aux: &mut [X],
        sub: &mut H::Sub,
        from: usize,
        to: usize,
        depth: usize,
    ) -> Result<()> {
        self.helper.register_depth(depth);
        if to <= from + self.helper.cutoff().max(1) {
            insertion_sort(sub, a, from, to);
            return Ok(());
        }
        let mid = from + (to - from) / 2;
        self.sort_recursive(a, aux, sub, from, mid, depth + 1)?;
        self.sort_recursive(a, aux, sub, mid, to, depth + 1)?;
        self.merge(a, aux, from, mid, to);

        if self.insurance {
            if let Some(i) = self.helper.find_inversion(&a[from..to]) {
                return Err(SortError::NotSorted {
                    description: self.helper.description().to_string(),
                    index: from + i,
                    previous: format!("{:?}", a[from + i - 1]),
                    current: format!("{:?}", a[from + i]),
                });
            }
        }
        Ok(())
    }

    /// Merge the sorted halves `a[from..mid]` and `a[mid..to]`, both non-empty.
    fn merge(&mut self, a: &mut [X], aux: &mut [X], from: usize, mid: usize, to: usize) {
        let helper = &mut self.helper;
        helper.copy_block(a, from, aux, from, to - from);
        let (mut i, mut j) = (from, mid);
        let mut v = helper.get(aux, i);
        let mut w = helper.get(aux, j);
        for k in from..to {
            let take_right = if i >= mid {
                true
            } else if j >= to {
                false
            } else if helper.less(&w, &v) {
                // w overtakes every element still waiting on the left.
                helper.increment_fixes((mid - i) as i64);
                true
            } else {
                false
            };
            if take_right {
                helper.copy_value(w.clone(), a, k);
                j += 1;
                if j < to {
                    w = helper.get(aux, j);
                }
            } else {
                helper.copy_value(v.clone(), a, k);
                i += 1;
                if i < mid {
                    v = helper.get(aux, i);
                }
            }
        }
    }
}

impl<X> MergeSort<X, AnyHelper<X>>
where
    X: Ord + Clone + Debug + 'static,
{
    pub fn from_config(n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        let insurance = config.get_bool(MERGESORT, INSURANCE)?;
        let description = format!("{}{}", DESCRIPTION, config_suffix(config)?);
        Ok(Self {
            helper: factory::create(&description, n, n_runs, config)?,
            close_helper: true,
            insurance,
            _marker: PhantomData,
        })
    }
}

fn config_suffix(config: &Config) -> Result<String> {
    let mut suffix = String::new();
    if config.get_bool(MERGESORT, INSURANCE)? {
        suffix.push_str(" with insurance comparison");
    }
    let cutoff = config.get_usize(HELPER, config::CUTOFF, CUTOFF_DEFAULT)?;
    if cutoff == 1 {
        suffix.push_str(" with no cutoff");
    } else if cutoff != CUTOFF_DEFAULT {
        suffix.push_str(&format!(" with cutoff {}", cutoff));
    }
    Ok(suffix)
}

impl<X, H> Sort<X> for MergeSort<X, H>
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
        // Only aux[from..to] is ever read, so only the range is counted.
        let mut aux = xs.to_vec();
        self.helper.increment_copies((to - from) as u64);
        let n = self.helper.size();
        let mut sub = self.helper.clone_helper("MergeSort: insertion sort", n);
        let result = self.sort_recursive(xs, &mut aux, &mut sub, from, to, 0);
        let counts = sub.take_counts();
        self.helper.absorb(counts);
        result
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
