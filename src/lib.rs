// Instrumented Sorting Library

#![allow(clippy::needless_range_loop)]

use std::fmt::Debug;

// Core trait implemented by every sort in `sort`
pub trait Sort<X: Clone + Debug> {
    type Helper: Helper<X>;

    fn helper(&self) -> &Self::Helper;

    fn helper_mut(&mut self) -> &mut Self::Helper;

    /// Sort `xs[from..to]` in place. Elements outside the range are untouched.
    fn sort_range(&mut self, xs: &mut [X], from: usize, to: usize) -> Result<()>;

    /// Whether `close` should also close the helper, i.e. the sort built it.
    fn owns_helper(&self) -> bool;

    fn description(&self) -> String {
        self.helper().description().to_string()
    }

    fn init(&mut self, n: usize) {
        self.helper_mut().init(n);
    }

    fn pre_process(&mut self, xs: &[X]) -> Result<()> {
        self.helper_mut().pre_process(xs)
    }

    fn post_process(&mut self, xs: &[X]) -> Result<()> {
        self.helper_mut().post_process(xs)
    }

    /// One full run over `xs`: init, pre-process, sort, post-process.
    fn mutating_sort(&mut self, xs: &mut [X]) -> Result<()> {
        let n = xs.len();
        self.init(n);
        self.pre_process(xs)?;
        self.sort_range(xs, 0, n)?;
        self.post_process(xs)
    }

    /// Sorted copy of `xs`; the input is left as it was.
    fn sort(&mut self, xs: &[X]) -> Result<Vec<X>> {
        let mut ys = xs.to_vec();
        self.mutating_sort(&mut ys)?;
        Ok(ys)
    }

    fn close(&mut self) {
        if self.owns_helper() {
            self.helper_mut().close();
        }
    }
}

// Module declarations
pub mod benchmark;
pub mod config;
pub mod error;
pub mod helper;
pub mod instrument;
pub mod sort;
pub mod stats;
pub mod verification;

// Re-exports
pub use benchmark::{BenchmarkConfig, BenchmarkResult, BenchmarkRunner, SortKind};
pub use config::{Config, HelperConfig};
pub use error::{Result, SortError};
pub use helper::factory;
pub use helper::{AnyHelper, Comparator, ComparatorHelper, Helper, InstrumentedHelper, PlainHelper};
pub use instrument::{Counts, Instrument, Instrumenter, NoInstrument};
pub use sort::{
    BinaryInsertionSort, BubbleSort, BucketSort, HeapSort, InsertionSort, LsdStringSort, MergeSort,
    MsdStringSort, ShellSort, TimSort,
};
pub use stats::{Normalizer, StatPack, Statistics};
pub use verification::{OutputVerifier, SortednessVerifier};
