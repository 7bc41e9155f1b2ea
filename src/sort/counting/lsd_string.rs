use crate::config::Config;
use crate::error::Result;
use crate::helper::{AnyHelper, Helper, factory};
use crate::Sort;

use super::{char_at, RADIX};

pub const DESCRIPTION: &str = "LSD String Sort";

/// Least-significant-digit radix sort of strings, one byte position per pass.
///
/// Strings are ordered bytewise, which for UTF-8 agrees with `String`'s `Ord`.
/// With a fixed width only the first `width` bytes take part in the sort.
pub struct LsdStringSort<H> {
    helper: H,
    close_helper: bool,
    width: Option<usize>,
}

impl<H: Helper<String>> LsdStringSort<H> {
    pub fn new(helper: H) -> Self {
        Self {
            helper,
            close_helper: false,
            width: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn max_length(&mut self, xs: &[String]) -> usize {
        self.helper.increment_hits(xs.len() as u64);
        xs.iter().map(String::len).max().unwrap_or(0)
    }

    /// Stable counting sort of `xs[from..to]` on the byte at position `d`.
    fn char_sort(&mut self, xs: &mut [String], d: usize, from: usize, to: usize) -> Result<()> {
        let n = to - from;
        let mut count = vec![0usize; RADIX + 1];
        for x in &xs[from..to] {
            // One read of the element, one of its count.
            self.helper.increment_hits(2);
            self.helper.increment_lookups(1);
            count[char_at(x, d) + 1] += 1;
        }
        for r in 1..=RADIX {
            self.helper.increment_hits(1);
            count[r] += count[r - 1];
        }
        let mut aux = vec![String::new(); n];
        self.helper.increment_lookups(n as u64);
        self.helper.distribute_block(xs, from, to, &mut aux, |x| {
            let c = char_at(x, d);
            count[c] += 1;
            count[c] - 1
        })?;
        self.helper.copy_block(&aux, 0, xs, from, n);
        Ok(())
    }
}

impl LsdStringSort<AnyHelper<String>> {
    pub fn from_config(n: usize, n_runs: usize, config: &Config) -> Result<Self> {
        Ok(Self {
            helper: factory::create(DESCRIPTION, n, n_runs, config)?,
            close_helper: true,
            width: None,
        })
    }
}

impl<H: Helper<String>> Sort<String> for LsdStringSort<H> {
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
        let width = match self.width {
            Some(width) => width,
            None => self.max_length(&xs[from..to]),
        };
        for d in (0..width).rev() {
            self.char_sort(xs, d, from, to)?;
        }
        Ok(())
    }

    fn owns_helper(&self) -> bool {
        self.close_helper
    }
}
