//! The access facade every sort goes through.
//!
//! Sorts never touch their array directly: each read, comparison, swap and
//! copy is a [`Helper`] call, so that an instrumented helper can count it. The
//! counting backend is the `I` parameter of [`ComparatorHelper`], which makes
//! [`PlainHelper`] exactly as fast as bare slice code.

pub mod factory;

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use crate::config::HelperConfig;
use crate::error::{Result, SortError};
use crate::instrument::{Counts, Instrument, Instrumenter, NoInstrument};
use crate::stats::StatPack;
use crate::verification::{self, OutputVerifier, SortednessVerifier};

pub use factory::AnyHelper;

/// Total order over `X`.
pub type Comparator<X> = Arc<dyn Fn(&X, &X) -> Ordering + Send + Sync>;

pub trait Helper<X: Clone + Debug> {
    /// Helper for the sub-sorts a sort delegates to (see [`Helper::clone_helper`]).
    type Sub: Helper<X>;

    fn description(&self) -> &str;

    /// Number of elements the helper is currently configured for.
    fn size(&self) -> usize;

    fn config(&self) -> &HelperConfig;

    fn instrumented(&self) -> bool;

    /// Prepare for a run over `n` elements. Resets the counters.
    fn init(&mut self, n: usize);

    fn get(&mut self, xs: &[X], i: usize) -> X;

    fn compare(&mut self, v: &X, w: &X) -> Ordering;

    /// Compare `xs[i]` with `xs[j]`. Comparing an element with itself is free.
    fn compare_at(&mut self, xs: &[X], i: usize, j: usize) -> Ordering;

    fn less(&mut self, v: &X, w: &X) -> bool {
        self.compare(v, w) == Ordering::Less
    }

    fn less_at(&mut self, xs: &[X], i: usize, j: usize) -> bool {
        self.compare_at(xs, i, j) == Ordering::Less
    }

    fn swap(&mut self, xs: &mut [X], i: usize, j: usize);

    /// Swap `xs[i]` and `xs[j]` only if they are out of order.
    ///
    /// The pair is normalized so that `(j, i)` behaves like `(i, j)`; equal
    /// elements are never moved. Returns whether a swap happened.
    fn swap_conditional(&mut self, xs: &mut [X], i: usize, j: usize) -> bool;

    /// As [`Helper::swap_conditional`], with `v == xs[i]` and `w == xs[j]`
    /// already read by the caller.
    fn swap_conditional_with(&mut self, xs: &mut [X], v: &X, i: usize, j: usize, w: &X) -> bool;

    fn swap_stable_conditional(&mut self, xs: &mut [X], i: usize) -> bool {
        self.swap_conditional(xs, i - 1, i)
    }

    /// Move `xs[j]` into position `i`, shifting `xs[i..j]` up by one.
    fn swap_into(&mut self, xs: &mut [X], i: usize, j: usize);

    /// Insert `xs[i]` into the sorted prefix `xs[..i]` after any equal elements.
    fn swap_into_sorted(&mut self, xs: &mut [X], i: usize);

    fn copy(&mut self, source: &[X], i: usize, target: &mut [X], j: usize);

    fn copy_value(&mut self, x: X, target: &mut [X], j: usize);

    fn copy_block(&mut self, source: &[X], i: usize, target: &mut [X], j: usize, n: usize);

    /// Copy each of `source[from..to]`, in order, to `target[f(x)]`.
    fn distribute_block<F>(
        &mut self,
        source: &[X],
        from: usize,
        to: usize,
        target: &mut [X],
        f: F,
    ) -> Result<()>
    where
        F: FnMut(&X) -> usize;

    fn copy_array(&mut self, xs: &[X]) -> Vec<X>;

    /// Inversion count of `xs`. Never counted.
    fn inversions(&self, xs: &[X]) -> u64;

    fn is_sorted(&self, xs: &[X]) -> bool;

    fn find_inversion(&self, xs: &[X]) -> Option<usize>;

    fn pre_process(&mut self, xs: &[X]) -> Result<()>;

    /// Verify that `xs` is sorted, then record this run's counters.
    fn post_process(&mut self, xs: &[X]) -> Result<()>;

    fn rng(&mut self) -> &mut StdRng;

    fn random<F>(&mut self, n: usize, mut f: F) -> Vec<X>
    where
        F: FnMut(&mut StdRng) -> X,
    {
        let rng = self.rng();
        (0..n).map(|_| f(&mut *rng)).collect()
    }

    /// A helper with the same comparator and configuration, a fresh counter
    /// set and a random source seeded from this one.
    ///
    /// The sub-helper's counts are not shared: fold them back in with
    /// `absorb(sub.take_counts())`.
    fn clone_helper(&mut self, description: &str, n: usize) -> Self::Sub;

    fn counts(&self) -> Counts;

    fn take_counts(&mut self) -> Counts;

    fn absorb(&mut self, counts: Counts);

    fn increment_hits(&mut self, n: u64);

    fn increment_copies(&mut self, n: u64);

    fn increment_lookups(&mut self, n: u64);

    fn increment_fixes(&mut self, delta: i64);

    fn register_depth(&mut self, depth: usize);

    fn max_depth(&self) -> usize;

    fn cutoff(&self) -> usize {
        self.config().cutoff
    }

    fn msd_cutoff(&self) -> usize {
        self.config().msd_cutoff
    }

    fn stat_pack(&self) -> Option<&StatPack>;

    fn show_stats(&self) -> String {
        match self.stat_pack() {
            Some(pack) => pack.to_string(),
            None => format!("{}: no statistics", self.description()),
        }
    }

    /// Log the statistics, once.
    fn close(&mut self);
}

/// Helper over an arbitrary comparator, generic in its counting backend.
pub struct ComparatorHelper<X, I = Instrumenter> {
    description: String,
    n: usize,
    config: HelperConfig,
    comparator: Comparator<X>,
    rng: StdRng,
    instrument: I,
    max_depth: usize,
    open: bool,
}

pub type InstrumentedHelper<X> = ComparatorHelper<X, Instrumenter>;
pub type PlainHelper<X> = ComparatorHelper<X, NoInstrument>;

fn seeded_rng(seed: u64) -> StdRng {
    if seed == 0 {
        StdRng::from_os_rng()
    } else {
        StdRng::seed_from_u64(seed)
    }
}

fn ceil_log2(n: usize) -> u64 {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as u64
    }
}

impl<X: Ord + 'static, I: Instrument> ComparatorHelper<X, I> {
    /// Helper ordering elements by their natural order.
    pub fn new(description: &str, n: usize, config: HelperConfig) -> Self {
        Self::with_comparator(description, n, Arc::new(|v: &X, w: &X| v.cmp(w)), config)
    }
}

impl<X, I: Instrument> ComparatorHelper<X, I> {
    pub fn with_comparator(
        description: &str,
        n: usize,
        comparator: Comparator<X>,
        config: HelperConfig,
    ) -> Self {
        let rng = seeded_rng(config.seed);
        Self::with_rng(description, n, comparator, config, rng)
    }

    fn with_rng(
        description: &str,
        n: usize,
        comparator: Comparator<X>,
        config: HelperConfig,
        rng: StdRng,
    ) -> Self {
        let instrument = I::new(&config);
        Self {
            description: description.to_string(),
            n,
            config,
            comparator,
            rng,
            instrument,
            max_depth: 0,
            open: true,
        }
    }

    pub fn comparator(&self) -> Comparator<X> {
        Arc::clone(&self.comparator)
    }

    fn pure_compare(&self, v: &X, w: &X) -> Ordering {
        (self.comparator)(v, w)
    }

    /// Change in inversion count caused by swapping `xs[i]` and `xs[j]`, `i < j`.
    fn swap_fixes(&self, xs: &[X], i: usize, j: usize) -> i64 {
        let (v, w) = (&xs[i], &xs[j]);
        let sense = match self.pure_compare(v, w) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => return 0,
        };
        let (high, low) = if sense > 0 { (v, w) } else { (w, v) };
        let mut fixes = 1;
        for x in &xs[i + 1..j] {
            let above_low = self.pure_compare(x, low);
            let below_high = self.pure_compare(x, high);
            if above_low == Ordering::Greater && below_high == Ordering::Less {
                fixes += 2;
            } else if above_low == Ordering::Equal || below_high == Ordering::Equal {
                fixes += 1;
            }
        }
        sense * fixes
    }

    fn count_swap(&mut self, xs: &[X], i: usize, j: usize) {
        self.instrument.increment_swaps(1);
        if self.instrument.count_fixes() {
            let fixes = self.swap_fixes(xs, i.min(j), i.max(j));
            self.instrument.increment_fixes(fixes);
        }
    }

    fn require_stat_pack(&self) -> Result<()> {
        if I::ENABLED && self.instrument.stat_pack().is_none() {
            return Err(SortError::Uninitialized(self.description.clone()));
        }
        Ok(())
    }
}

impl<X, I> Helper<X> for ComparatorHelper<X, I>
where
    X: Clone + Debug,
    I: Instrument,
{
    type Sub = ComparatorHelper<X, I>;

    fn description(&self) -> &str {
        &self.description
    }

    fn size(&self) -> usize {
        self.n
    }

    fn config(&self) -> &HelperConfig {
        &self.config
    }

    fn instrumented(&self) -> bool {
        I::ENABLED
    }

    fn init(&mut self, n: usize) {
        self.n = n;
        self.instrument.init(n, self.config.runs);
    }

    #[inline]
    fn get(&mut self, xs: &[X], i: usize) -> X {
        self.instrument.increment_hits(1);
        xs[i].clone()
    }

    #[inline]
    fn compare(&mut self, v: &X, w: &X) -> Ordering {
        self.instrument.increment_compares();
        self.instrument.increment_lookups(2);
        self.pure_compare(v, w)
    }

    fn compare_at(&mut self, xs: &[X], i: usize, j: usize) -> Ordering {
        if i == j {
            return Ordering::Equal;
        }
        self.instrument.increment_hits(2);
        self.compare(&xs[i], &xs[j])
    }

    fn swap(&mut self, xs: &mut [X], i: usize, j: usize) {
        self.instrument.increment_hits(2);
        if i != j {
            self.count_swap(xs, i, j);
            xs.swap(i, j);
        }
    }

    fn swap_conditional(&mut self, xs: &mut [X], i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        self.instrument.increment_hits(2);
        if self.compare(&xs[lo], &xs[hi]) == Ordering::Greater {
            self.count_swap(xs, lo, hi);
            xs.swap(lo, hi);
            true
        } else {
            false
        }
    }

    fn swap_conditional_with(&mut self, xs: &mut [X], v: &X, i: usize, j: usize, w: &X) -> bool {
        if i == j {
            return false;
        }
        if i > j {
            return self.swap_conditional_with(xs, w, j, i, v);
        }
        if self.compare(v, w) == Ordering::Greater {
            self.count_swap(xs, i, j);
            xs.swap(i, j);
            true
        } else {
            false
        }
    }

    fn swap_into(&mut self, xs: &mut [X], i: usize, j: usize) {
        debug_assert!(i <= j, "swap_into({}, {})", i, j);
        if i >= j {
            return;
        }
        let moved = (j - i) as u64;
        self.instrument.increment_swaps(moved);
        self.instrument.increment_fixes(moved as i64);
        self.instrument.increment_hits(moved + 1);
        xs[i..=j].rotate_right(1);
    }

    fn swap_into_sorted(&mut self, xs: &mut [X], i: usize) {
        debug_assert!(
            verification::is_sorted(&xs[..i], |v, w| self.pure_compare(v, w)),
            "swap_into_sorted: prefix of {} is not sorted",
            i
        );
        if i == 0 {
            return;
        }
        let (mut low, mut high) = (0, i);
        while low < high {
            let mid = low + (high - low) / 2;
            if self.compare(&xs[i], &xs[mid]) == Ordering::Less {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        // The search is charged against the whole array, not just the prefix.
        self.instrument.increment_hits(1 + ceil_log2(xs.len()));
        if low < i {
            self.swap_into(xs, low, i);
        }
    }

    fn copy(&mut self, source: &[X], i: usize, target: &mut [X], j: usize) {
        self.instrument.increment_hits(2);
        self.instrument.increment_copies(1);
        target[j] = source[i].clone();
    }

    fn copy_value(&mut self, x: X, target: &mut [X], j: usize) {
        self.instrument.increment_hits(1);
        self.instrument.increment_copies(1);
        target[j] = x;
    }

    fn copy_block(&mut self, source: &[X], i: usize, target: &mut [X], j: usize, n: usize) {
        self.instrument.increment_hits(2 * n as u64);
        self.instrument.increment_copies(n as u64);
        target[j..j + n].clone_from_slice(&source[i..i + n]);
    }

    fn distribute_block<F>(
        &mut self,
        source: &[X],
        from: usize,
        to: usize,
        target: &mut [X],
        mut f: F,
    ) -> Result<()>
    where
        F: FnMut(&X) -> usize,
    {
        for x in &source[from..to] {
            let index = f(x);
            if index >= target.len() {
                return Err(SortError::IndexOutOfBounds {
                    index,
                    len: target.len(),
                });
            }
            self.instrument.increment_hits(2);
            self.instrument.increment_copies(1);
            target[index] = x.clone();
        }
        Ok(())
    }

    fn copy_array(&mut self, xs: &[X]) -> Vec<X> {
        self.instrument.increment_copies(xs.len() as u64);
        xs.to_vec()
    }

    fn inversions(&self, xs: &[X]) -> u64 {
        verification::count_inversions(xs, |v, w| self.pure_compare(v, w))
    }

    fn is_sorted(&self, xs: &[X]) -> bool {
        verification::is_sorted(xs, |v, w| self.pure_compare(v, w))
    }

    fn find_inversion(&self, xs: &[X]) -> Option<usize> {
        verification::find_inversion(xs, |v, w| self.pure_compare(v, w))
    }

    fn pre_process(&mut self, xs: &[X]) -> Result<()> {
        if self.instrument.wants_inversions() {
            self.require_stat_pack()?;
            let inversions = self.inversions(xs);
            self.instrument.record_inversions(inversions)?;
        }
        Ok(())
    }

    fn post_process(&mut self, xs: &[X]) -> Result<()> {
        let pure = |v: &X, w: &X| self.pure_compare(v, w);
        SortednessVerifier::new(&self.to_string(), pure).verify(xs)?;
        self.require_stat_pack()?;
        self.instrument.gather_statistic()
    }

    fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn clone_helper(&mut self, description: &str, n: usize) -> Self::Sub {
        let rng = StdRng::seed_from_u64(self.rng.random());
        Self::with_rng(
            description,
            n,
            Arc::clone(&self.comparator),
            self.config.clone(),
            rng,
        )
    }

    fn counts(&self) -> Counts {
        self.instrument.counts()
    }

    fn take_counts(&mut self) -> Counts {
        self.instrument.take_counts()
    }

    fn absorb(&mut self, counts: Counts) {
        self.instrument.absorb(counts);
    }

    fn increment_hits(&mut self, n: u64) {
        self.instrument.increment_hits(n);
    }

    fn increment_copies(&mut self, n: u64) {
        self.instrument.increment_copies(n);
    }

    fn increment_lookups(&mut self, n: u64) {
        self.instrument.increment_lookups(n);
    }

    fn increment_fixes(&mut self, delta: i64) {
        self.instrument.increment_fixes(delta);
    }

    fn register_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn stat_pack(&self) -> Option<&StatPack> {
        self.instrument.stat_pack()
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Some(pack) = self.instrument.stat_pack() {
            info!("{}@{}: {}", self.n, self.description, pack);
        }
    }
}

impl<X, I> fmt::Display for ComparatorHelper<X, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Helper for {} with {} elements", self.description, self.n)
    }
}

impl<X, I: Debug> Debug for ComparatorHelper<X, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ComparatorHelper")
            .field("description", &self.description)
            .field("n", &self.n)
            .field("config", &self.config)
            .field("instrument", &self.instrument)
            .field("open", &self.open)
            .finish()
    }
}

/// Lets a caller keep ownership of a helper while a sort uses it.
impl<X, H> Helper<X> for &mut H
where
    X: Clone + Debug,
    H: Helper<X>,
{
    type Sub = H::Sub;

    fn description(&self) -> &str {
        (**self).description()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn config(&self) -> &HelperConfig {
        (**self).config()
    }

    fn instrumented(&self) -> bool {
        (**self).instrumented()
    }

    fn init(&mut self, n: usize) {
        (**self).init(n)
    }

    fn get(&mut self, xs: &[X], i: usize) -> X {
        (**self).get(xs, i)
    }

    fn compare(&mut self, v: &X, w: &X) -> Ordering {
        (**self).compare(v, w)
    }

    fn compare_at(&mut self, xs: &[X], i: usize, j: usize) -> Ordering {
        (**self).compare_at(xs, i, j)
    }

    fn less(&mut self, v: &X, w: &X) -> bool {
        (**self).less(v, w)
    }

    fn less_at(&mut self, xs: &[X], i: usize, j: usize) -> bool {
        (**self).less_at(xs, i, j)
    }

    fn swap(&mut self, xs: &mut [X], i: usize, j: usize) {
        (**self).swap(xs, i, j)
    }

    fn swap_conditional(&mut self, xs: &mut [X], i: usize, j: usize) -> bool {
        (**self).swap_conditional(xs, i, j)
    }

    fn swap_conditional_with(&mut self, xs: &mut [X], v: &X, i: usize, j: usize, w: &X) -> bool {
        (**self).swap_conditional_with(xs, v, i, j, w)
    }

    fn swap_stable_conditional(&mut self, xs: &mut [X], i: usize) -> bool {
        (**self).swap_stable_conditional(xs, i)
    }

    fn swap_into(&mut self, xs: &mut [X], i: usize, j: usize) {
        (**self).swap_into(xs, i, j)
    }

    fn swap_into_sorted(&mut self, xs: &mut [X], i: usize) {
        (**self).swap_into_sorted(xs, i)
    }

    fn copy(&mut self, source: &[X], i: usize, target: &mut [X], j: usize) {
        (**self).copy(source, i, target, j)
    }

    fn copy_value(&mut self, x: X, target: &mut [X], j: usize) {
        (**self).copy_value(x, target, j)
    }

    fn copy_block(&mut self, source: &[X], i: usize, target: &mut [X], j: usize, n: usize) {
        (**self).copy_block(source, i, target, j, n)
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
        (**self).distribute_block(source, from, to, target, f)
    }

    fn copy_array(&mut self, xs: &[X]) -> Vec<X> {
        (**self).copy_array(xs)
    }

    fn inversions(&self, xs: &[X]) -> u64 {
        (**self).inversions(xs)
    }

    fn is_sorted(&self, xs: &[X]) -> bool {
        (**self).is_sorted(xs)
    }

    fn find_inversion(&self, xs: &[X]) -> Option<usize> {
        (**self).find_inversion(xs)
    }

    fn pre_process(&mut self, xs: &[X]) -> Result<()> {
        (**self).pre_process(xs)
    }

    fn post_process(&mut self, xs: &[X]) -> Result<()> {
        (**self).post_process(xs)
    }

    fn rng(&mut self) -> &mut StdRng {
        (**self).rng()
    }

    fn clone_helper(&mut self, description: &str, n: usize) -> Self::Sub {
        (**self).clone_helper(description, n)
    }

    fn counts(&self) -> Counts {
        (**self).counts()
    }

    fn take_counts(&mut self) -> Counts {
        (**self).take_counts()
    }

    fn absorb(&mut self, counts: Counts) {
        (**self).absorb(counts)
    }

    fn increment_hits(&mut self, n: u64) {
        (**self).increment_hits(n)
    }

    fn increment_copies(&mut self, n: u64) {
        (**self).increment_copies(n)
    }

    fn increment_lookups(&mut self, n: u64) {
        (**self).increment_lookups(n)
    }

    fn increment_fixes(&mut self, delta: i64) {
        (**self).increment_fixes(delta)
    }

    fn register_depth(&mut self, depth: usize) {
        (**self).register_depth(depth)
    }

    fn max_depth(&self) -> usize {
        (**self).max_depth()
    }

    fn cutoff(&self) -> usize {
        (**self).cutoff()
    }

    fn msd_cutoff(&self) -> usize {
        (**self).msd_cutoff()
    }

    fn stat_pack(&self) -> Option<&StatPack> {
        (**self).stat_pack()
    }

    fn show_stats(&self) -> String {
        (**self).show_stats()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
