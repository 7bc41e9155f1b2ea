use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, SortError};
use crate::helper::{AnyHelper, Helper, factory};
use crate::sort::elementary::insertion::insertion_sort;
use crate::Sort;

pub const DESCRIPTION: &str = "Bucket sort";
pub const ALPHABET: &str = " abcdefghijklmnopqrstuvwxyz";
pub const ALPHABET_SIZE: usize = 27;
pub const DIGRAPHS_SIZE: usize = ALPHABET_SIZE * ALPHABET_SIZE;

/// Bucket of a string by its first character, case-insensitively.
/// Characters outside [`ALPHABET`] (and the empty string) map to bucket 0.
pub fn classify_string_initial(s: &str) -> usize {
    s.chars().next().map_or(0, alphabet_index)
}

/// Bucket of a string by its first two characters, a missing second
/// character counting as a space. Range: `0..DIGRAPHS_SIZE`.
pub fn classify_string_digraph(s: &str) -> usize {
    let mut chars = s.chars().chain(std::iter::repeat(' '));
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => alphabet_index(first) * ALPHABET_SIZE + alphabet_index(second),
        _ => 0,
    }
}

fn alphabet_index(c: char) -> usize {
    let c = c.to_ascii_lowercase();
    ALPHABET.find(c).unwrap_or(0)
}

enum Classifier<X> {
    Custom(Box<dyn Fn(&X) -> usize>),
    /// Buckets of equal width between the range's minimum and maximum.
    Numeric(fn(&X) -> f64),
}

/// Destination slots `from..to`, handed out in order.
struct Index {
    next: usize,
    to: usize,
}

impl Index {
    fn next_slot(&mut self) -> Result<usize> {
        if self.next >= self.to {
            return Err(SortError::IndexOutOfBounds {
                index: self.next,
                len: self.to,
            });
        }
        self.next += 1;
        Ok(self.next - 1)
    }
}

/// Distributes elements over buckets with a classifier, unloads the buckets
/// in order and finishes with an insertion pass.
pub struct BucketSort<X, H> {
    helper: H,
    close_helper: bool,
    classifier: Classifier<X>,
    buckets: Vec<Vec<X>>,
    _marker: PhantomData<fn(X)>,
}

impl<X, H> BucketSort<X, H>
where
    X: Clone + Debug,
    H: Helper<X>,
{
    /// `classifier` results beyond the last bucket are clamped to it.
    pub fn new<F>(helper: H, n_buckets: usize, classifier: F) -> Self
    where
        F: Fn(&X) -> usize + 'static,
    {
        Self::with_classifier(helper, n_buckets, Classifier::Custom(Box::new(classifier)))
    }

    fn with_classifier(helper: H, n_buckets: usize, classifier: Classifier<X>) -> Self {
        let n_buckets = n_buckets.max(1);
        info!(
            "{}: {} buckets of mean size: {}",
            DESCRIPTION,
            n_buckets,
            helper.size() as f64 / n_buckets as f64
        );
        Self {
            helper,
            close_helper: false,
            classifier,
            buckets: (0..n_buckets).map(|_| Vec::new()).collect(),
            _marker: PhantomData,
        }
    }

    pub fn n_buckets(&self) -> usize {
        self.buckets.len()
    }

    fn assign_to_buckets(&mut self, xs: &[X], from: usize, to: usize) {
        let n_buckets = self.buckets.len();
        let classify: Box<dyn Fn(&X) -> usize + '_> = match &self.classifier {
            Classifier::Custom(f) => Box::new(move |x: &X| f(x)),
            Classifier::Numeric(value) => {
                let value = *value;
                let (min, max) = xs[from..to]
                    .iter()
                    .map(value)
                    .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
                let gap = (max - min) / n_buckets as f64;
                debug!(gap, "creating numeric classifier");
                Box::new(move |x: &X| {
                    if gap > 0.0 {
                        let index = ((value(x) - min) / gap).floor();
                        if index > 0.0 { index as usize } else { 0 }
                    } else {
                        0
                    }
                })
            }
        };
        // Copying each element into its bucket.
        self.helper.increment_copies((to - from) as u64);
        self.helper.increment_hits((to - from) as u64);
        for i in from..to {
            let x = self.helper.get(xs, i);
            self.helper.increment_lookups(1);
            let index = classify(&x).min(n_buckets - 1);
            self.buckets[index].push(x);
        }
    }

    fn unload_buckets(&mut self, xs: &mut [X], from: usize, to: usize) -> Result<()> {
        let mut index = Index { next: from, to };
        for bucket in self.buckets.iter_mut() {
            let size = bucket.len() as u64;
            self.helper.increment_copies(size);
            self.helper.increment_hits(2 * size);
            for x in bucket.drain(..) {
                xs[index.next_slot()?] = x;
            }
        }
        Ok(())
    }
}

impl<X, H> BucketSort<X, H>
where
    X: Copy + Into<f64> + Debug,
    H: Helper<X>,
{
    /// Bucket sort for numbers, with buckets spanning the input's range.
    pub fn numeric(helper: H, n_buckets: usize) -> Self {
        Self::with_classifier(helper, n_buckets, Classifier::Numeric(|x: &X| (*x).into()))
    }
}

impl<X> BucketSort<X, AnyHelper<X>>
where
    X: Ord + Clone + Debug + 'static,
{
    pub fn from_config<F>(
        classifier: F,
        n_buckets: usize,
        n: usize,
        n_runs: usize,
        config: &Config,
    ) -> Result<Self>
    where
        F: Fn(&X) -> usize + 'static,
    {
        let helper = factory::create(DESCRIPTION, n, n_runs, config)?;
        let mut sort = Self::new(helper, n_buckets, classifier);
        sort.close_helper = true;
        Ok(sort)
    }
}

impl<X> BucketSort<X, AnyHelper<X>>
where
    X: Ord + Copy + Into<f64> + Debug + 'static,
{
    pub fn numeric_from_config(
        n_buckets: usize,
        n: usize,
        n_runs: usize,
        config: &Config,
    ) -> Result<Self> {
        let helper = factory::create(DESCRIPTION, n, n_runs, config)?;
        let mut sort = Self::numeric(helper, n_buckets);
        sort.close_helper = true;
        Ok(sort)
    }
}

impl<X, H> Sort<X> for BucketSort<X, H>
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
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.assign_to_buckets(xs, from, to);
        self.unload_buckets(xs, from, to)?;

        let n = self.helper.size();
        let mut sub = self.helper.clone_helper("Bucket sort: insertion sort", n);
        insertion_sort(&mut sub, xs, from, to);
        let counts = sub.take_counts();
        self.helper.absorb(counts);
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
