use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

use rand::rngs::StdRng;

use super::{Comparator, ComparatorHelper, Helper, InstrumentedHelper, PlainHelper};
use crate::config::{Config, HelperConfig};
use crate::error::Result;
use crate::instrument::Counts;
use crate::stats::StatPack;

/// A helper whose instrumentation was chosen from configuration.
pub enum AnyHelper<X> {
    Instrumented(InstrumentedHelper<X>),
    Plain(PlainHelper<X>),
}

/// Helper in natural order for `n` elements and `n_runs` runs, instrumented
/// when `instrumenting.instrument` is set.
pub fn create<X>(description: &str, n: usize, n_runs: usize, config: &Config) -> Result<AnyHelper<X>>
where
    X: Ord + 'static,
{
    create_with_comparator(description, n, n_runs, Arc::new(|v: &X, w: &X| v.cmp(w)), config)
}

pub fn create_with_comparator<X>(
    description: &str,
    n: usize,
    n_runs: usize,
    comparator: Comparator<X>,
    config: &Config,
) -> Result<AnyHelper<X>> {
    let helper_config = HelperConfig {
        runs: n_runs,
        ..HelperConfig::from_config(config)?
    };
    Ok(if helper_config.instrument {
        AnyHelper::Instrumented(ComparatorHelper::with_comparator(
            description,
            n,
            comparator,
            helper_config,
        ))
    } else {
        AnyHelper::Plain(ComparatorHelper::with_comparator(
            description,
            n,
            comparator,
            helper_config,
        ))
    })
}

macro_rules! dispatch {
    ($self:expr, $helper:ident => $body:expr) => {
        match $self {
            AnyHelper::Instrumented($helper) => $body,
            AnyHelper::Plain($helper) => $body,
        }
    };
}

impl<X> Helper<X> for AnyHelper<X>
where
    X: Clone + Debug,
{
    type Sub = AnyHelper<X>;

    fn description(&self) -> &str {
        dispatch!(self, h => h.description())
    }

    fn size(&self) -> usize {
        dispatch!(self, h => h.size())
    }

    fn config(&self) -> &HelperConfig {
        dispatch!(self, h => h.config())
    }

    fn instrumented(&self) -> bool {
        dispatch!(self, h => h.instrumented())
    }

    fn init(&mut self, n: usize) {
        dispatch!(self, h => h.init(n))
    }

    fn get(&mut self, xs: &[X], i: usize) -> X {
        dispatch!(self, h => h.get(xs, i))
    }

    fn compare(&mut self, v: &X, w: &X) -> Ordering {
        dispatch!(self, h => h.compare(v, w))
    }

    fn compare_at(&mut self, xs: &[X], i: usize, j: usize) -> Ordering {
        dispatch!(self, h => h.compare_at(xs, i, j))
    }

    fn swap(&mut self, xs: &mut [X], i: usize, j: usize) {
        dispatch!(self, h => h.swap(xs, i, j))
    }

    fn swap_conditional(&mut self, xs: &mut [X], i: usize, j: usize) -> bool {
        dispatch!(self, h => h.swap_conditional(xs, i, j))
    }

    fn swap_conditional_with(&mut self, xs: &mut [X], v: &X, i: usize, j: usize, w: &X) -> bool {
        dispatch!(self, h => h.swap_conditional_with(xs, v, i, j, w))
    }

    fn swap_into(&mut self, xs: &mut [X], i: usize, j: usize) {
        dispatch!(self, h => h.swap_into(xs, i, j))
    }

    fn swap_into_sorted(&mut self, xs: &mut [X], i: usize) {
        dispatch!(self, h => h.swap_into_sorted(xs, i))
    }

    fn copy(&mut self, source: &[X], i: usize, target: &mut [X], j: usize) {
        dispatch!(self, h => h.copy(source, i, target, j))
    }

    fn copy_value(&mut self, x: X, target: &mut [X], j: usize) {
        dispatch!(self, h => h.copy_value(x, target, j))
    }

    fn copy_block(&mut self, source: &[X], i: usize, target: &mut [X], j: usize, n: usize) {
        dispatch!(self, h => h.copy_block(source, i, target, j, n))
    }

    fn distribute_block<F>(
        &mut self,
        source: &[X],
        from: usize,
        to: usize,
        target: &mut [X],
        f: F,
    ) -> Result<()>
    where
        F: FnMut(&X) -> usize,
    {
        dispatch!(self, h => h.distribute_block(source, from, to, target, f))
    }

    fn copy_array(&mut self, xs: &[X]) -> Vec<X> {
        dispatch!(self, h => h.copy_array(xs))
    }

    fn inversions(&self, xs: &[X]) -> u64 {
        dispatch!(self, h => h.inversions(xs))
    }

    fn is_sorted(&self, xs: &[X]) -> bool {
        dispatch!(self, h => h.is_sorted(xs))
    }

    fn find_inversion(&self, xs: &[X]) -> Option<usize> {
        dispatch!(self, h => h.find_inversion(xs))
    }

    fn pre_process(&mut self, xs: &[X]) -> Result<()> {
        dispatch!(self, h => h.pre_process(xs))
    }

    fn post_process(&mut self, xs: &[X]) -> Result<()> {
        dispatch!(self, h => h.post_process(xs))
    }

    fn rng(&mut self) -> &mut StdRng {
        dispatch!(self, h => h.rng())
    }

    fn clone_helper(&mut self, description: &str, n: usize) -> Self::Sub {
        match self {
            AnyHelper::Instrumented(h) => AnyHelper::Instrumented(h.clone_helper(description, n)),
            AnyHelper::Plain(h) => AnyHelper::Plain(h.clone_helper(description, n)),
        }
    }

    fn counts(&self) -> Counts {
        dispatch!(self, h => h.counts())
    }

    fn take_counts(&mut self) -> Counts {
        dispatch!(self, h => h.take_counts())
    }

    fn absorb(&mut self, counts: Counts) {
        dispatch!(self, h => h.absorb(counts))
    }

    fn increment_hits(&mut self, n: u64) {
        dispatch!(self, h => h.increment_hits(n))
    }

    fn increment_copies(&mut self, n: u64) {
        dispatch!(self, h => h.increment_copies(n))
    }

    fn increment_lookups(&mut self, n: u64) {
        dispatch!(self, h => h.increment_lookups(n))
    }

    fn increment_fixes(&mut self, delta: i64) {
        dispatch!(self, h => h.increment_fixes(delta))
    }

    fn register_depth(&mut self, depth: usize) {
        dispatch!(self, h => h.register_depth(depth))
    }

    fn max_depth(&self) -> usize {
        dispatch!(self, h => h.max_depth())
    }

    fn stat_pack(&self) -> Option<&StatPack> {
        dispatch!(self, h => h.stat_pack())
    }

    fn close(&mut self) {
        dispatch!(self, h => h.close())
    }
}

impl<X> fmt::Display for AnyHelper<X> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        dispatch!(self, h => fmt::Display::fmt(h, f))
    }
}

impl<X> Debug for AnyHelper<X> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnyHelper::Instrumented(h) => f.debug_tuple("Instrumented").field(h).finish(),
            AnyHelper::Plain(h) => f.debug_tuple("Plain").field(h).finish(),
        }
    }
}
