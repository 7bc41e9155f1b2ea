use tracing::debug;

use crate::config::{self, Config, HELPER, MSD_CUTOFF_DEFAULT};
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::sort::elementary::insertion::insertion_sort;
use crate::Sort;

use super::{char_at, RADIX};

pub const DESCRIPTION: &str = "MSD string sort";

/// Most-significant-digit radix sort of strings.
///
/// Each pass distributes a range by the byte at depth `d` and recurses into
/// every byte class. Below depth 0, ranges no longer than the helper's MSD
/// cutoff go to insertion sort on a sub-helper instead; the elements of such
/// a range share their first `d` bytes, so the full comparator orders them.
pub struct MsdStringSort<H> {
    helper: H,
    close_helper: bool,
}

impl<H: Helper<String>> MsdStringSort<H> {
    pub fn new(helper: H) -> Self {
        Self {
            helper,
            close_helper: false,
        }
    }

    fn sort_from(
        &mut self,
        xs: &mut [String],
        sub: &mut H::Sub,
        from: usize,
        to: usize,
        d: usize,
    ) -> Result<()> {
        let n = to - from;
        if n <= 1 {
            return Ok(());
        }
        self.helper.register_depth(d);
        // Never cut over at the top level.
        if d > 0 && n <= self.helper.msd_cutoff() {
            insertion_sort(sub, xs, from, to);
            return Ok(());
        }

        let mut count = vec![0usize; RADIX + 1];
        self.helper.increment_hits(n as u64);
        for x in &xs[from..to] {
            count[char_at(x, d) + 1] += 1;
        }
        for r in 1..=RADIX {
            self.helper.increment_hits(1);
            count[r] += count[r - 1];
        }
        // Class c occupies starts[c]..starts[c + 1] once distributed.
        let starts = count.clone();

        let mut aux = vec![String::new(); n];
        self.helper.distribute_block(xs, from, to, &mut aux, |x| {
            let c = char_at(x, d);
            count[c] += 1;
            count[c] - 1
        })?;
        self.helper.copy_block(&aux, 0, xs, from, n);

        // Class 0 holds the strings that end here; they are all equal.
        for c in 1..RADIX {
            let (lo, hi) = (from + starts[c], from + starts[c + 1]);
            if hi > lo + 1 {
                self.sort_from(xs, sub, lo, hi, d + 1)?;
            }
        }
        Ok(())
    }
}

impl MsdStringSort<AnyHelper<String>> {
    pub fn from_config(n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        let cutoff = config.get_usize(HELPER, config::MSD_CUTOFF, MSD_CUTOFF_DEFAULT)?;
        let description = format!("{} with cutoff {}", DESCRIPTION, cutoff);
        Ok(Self {
            helper: factory::create(&description, n, n_runs, config)?,
            close_helper: true,
        })
    }
}

impl<H: Helper<String>> Sort<String> for MsdStringSort<H> {
    type Helper = H;

    fn helper(&self) -> &H {
        &self.helper
    }

    fn helper_mut(&mut self) -> &mut H {
        &mut self.helper
    }

    fn sort_range(&mut self, xs: &mut [String], from: usize, to: usize) -> Result<()> {
        if to <= from {
            return Ok(());
        }
        let n = self.helper.size();
        let mut sub = self.helper.clone_helper("MSD string sort: insertion sort", n);
        let result = self.sort_from(xs, &mut sub, from, to, 0);
        let counts = sub.take_counts();
        debug!(compares = counts.compares, "insertion sort cutoffs");
        self.helper.absorb(counts);
        result
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MSD_CUTOFF;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn strings(text: &str) -> Vec<String> {
        text.split(' ').map(str::to_string).collect()
    }

    fn shells() -> (Vec<String>, Vec<String>) {
        (
            strings(
                "she sells seashells by the seashore the shells she sells are surely seashells",
            ),
            strings(
                "are by seashells seashells seashore sells sells she she shells surely the the",
            ),
        )
    }

    #[test]
    fn test_sort_with_cutoff() {
        let (input, expected) = shells();
        let config = Config::setup(true, false, 0, 1, None).with(HELPER, MSD_CUTOFF, 10);
        let mut sorter = MsdStringSort::from_config(input.len(), 1, &config).unwrap();
        assert_eq!(sorter.sort(&input).unwrap(), expected);
        assert_eq!(sorter.description(), "MSD string sort with cutoff 10");
        assert!(sorter.helper().counts().compares > 0);
    }

    #[test]
    fn test_pure_radix_sort_counts() {
        let (input, expected) = shells();
        let config = Config::setup(true, false, 0, 1, None).with(HELPER, MSD_CUTOFF, 1);
        let mut sorter = MsdStringSort::from_config(input.len(), 1, &config).unwrap();
        assert_eq!(sorter.sort(&input).unwrap(), expected);
        let counts = sorter.helper().counts();
        assert_eq!(counts.swaps, 0);
        assert_eq!(counts.compares, 0);
        assert_eq!(counts.copies, 124);
        // The two copies of "seashells" are split down to their end.
        assert_eq!(sorter.helper().max_depth(), 9);
    }

    #[test]
    fn test_prefixes_and_empty_strings() {
        let input = strings("abc ab  a abc b ab");
        let config = Config::setup(false, false, 1, 0, None).with(HELPER, MSD_CUTOFF, 1);
        let mut sorter = MsdStringSort::from_config(input.len(), 1, &config).unwrap();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(sorter.sort(&input).unwrap(), expected);
    }

    #[test]
    fn test_random_words() {
        let mut rng = StdRng::seed_from_u64(948);
        let words: Vec<String> = (0..1000)
            .map(|_| {
                let len = rng.random_range(0..8);
                (0..len).map(|_| rng.random_range(b'a'..=b'e') as char).collect()
            })
            .collect();
        for cutoff in [1, 16, 256] {
            let config = Config::setup(true, true, 948, 0, None).with(HELPER, MSD_CUTOFF, cutoff);
            let mut sorter = MsdStringSort::from_config(words.len(), 1, &config).unwrap();
            let mut expected = words.clone();
            expected.sort();
            assert_eq!(sorter.sort(&words).unwrap(), expected, "cutoff {}", cutoff);
        }
    }
}
