use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

pub const DESCRIPTION: &str = "Timsort";

/// The standard library's stable sort, driven by the helper's comparator.
///
/// Only compares are visible to the helper; element moves happen inside
/// `sort_by` and are not counted. Useful as a timing baseline.
pub struct TimSort<X, H> {
    helper: H,
    close_helper: bool,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> TimSort<X, H>
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

impl<X> TimSort<X, AnyHelper<X>>
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

impl<X, H> Sort<X> for TimSort<X, H>
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
        let helper = &mut self.helper;
        xs[from..to].sort_by(|v, w| helper.compare(v, w));
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
