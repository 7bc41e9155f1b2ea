//! Operation counters for one sorting run.
//!
//! The counting backend is chosen at compile time: [`Instrumenter`] keeps real
//! counters and a [`StatPack`], [`NoInstrument`] is a zero-sized type whose
//! operations all compile away.

use tracing::debug;

use crate::config::HelperConfig;
use crate::error::{Result, SortError};
use crate::stats::{Normalizer, StatPack};

pub const COMPARES: &str = "compares";
pub const SWAPS: &str = "swaps";
pub const HITS: &str = "hits";
pub const COPIES: &str = "copies";
pub const LOOKUPS: &str = "lookups";
pub const FIXES: &str = "fixes";
pub const INVERSIONS: &str = "inversions";

/// Every key an instrumented helper's StatPack is built with.
pub const METRIC_KEYS: [&str; 7] = [COMPARES, SWAPS, HITS, COPIES, LOOKUPS, FIXES, INVERSIONS];

/// Raw counter values. `fixes` is signed: a swap that creates inversions
/// contributes a negative delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub compares: u64,
    pub swaps: u64,
    pub hits: u64,
    pub copies: u64,
    pub lookups: u64,
    pub fixes: i64,
}

impl Counts {
    pub fn merge(&mut self, other: Counts) {
        self.compares += other.compares;
        self.swaps += other.swaps;
        self.hits += other.hits;
        self.copies += other.copies;
        self.lookups += other.lookups;
        self.fixes += other.fixes;
    }

    fn samples(&self) -> [(&'static str, f64); 6] {
        [
            (COMPARES, self.compares as f64),
            (SWAPS, self.swaps as f64),
            (HITS, self.hits as f64),
            (COPIES, self.copies as f64),
            (LOOKUPS, self.lookups as f64),
            (FIXES, self.fixes as f64),
        ]
    }
}

/// Counting backend of a helper.
pub trait Instrument: Sized {
    /// `false` only for backends whose every operation is a no-op.
    const ENABLED: bool;

    fn new(config: &HelperConfig) -> Self;

    /// Whether fix deltas are worth computing at all.
    fn count_fixes(&self) -> bool;

    fn increment_compares(&mut self);
    fn increment_swaps(&mut self, n: u64);
    fn increment_hits(&mut self, n: u64);
    fn increment_copies(&mut self, n: u64);
    fn increment_lookups(&mut self, n: u64);
    fn increment_fixes(&mut self, delta: i64);

    /// Reset the counters for a new run of `size` elements, creating a
    /// StatPack for `runs` runs when there is none or the size changed.
    fn init(&mut self, size: usize, runs: usize);

    /// Push the current counters into the StatPack, one sample per metric.
    fn gather_statistic(&mut self) -> Result<()>;

    /// True while the inversion-sampling budget lasts.
    fn wants_inversions(&self) -> bool;

    /// Record one inversion-count sample and consume one unit of budget.
    fn record_inversions(&mut self, inversions: u64) -> Result<()>;

    fn counts(&self) -> Counts;

    /// Return the counters and zero them.
    fn take_counts(&mut self) -> Counts;

    /// Add counts gathered elsewhere (typically by a sub-helper).
    fn absorb(&mut self, counts: Counts);

    fn stat_pack(&self) -> Option<&StatPack>;
}

#[derive(Debug)]
pub struct Instrumenter {
    counts: Counts,
    count_fixes: bool,
    normalizer: Normalizer,
    inversion_budget: usize,
    size: usize,
    stat_pack: Option<StatPack>,
}

impl Instrumenter {
    pub fn with_normalizer(normalizer: Normalizer, count_fixes: bool) -> Self {
        Self {
            counts: Counts::default(),
            count_fixes,
            normalizer,
            inversion_budget: 0,
            size: 0,
            stat_pack: None,
        }
    }

    fn pack_mut(&mut self) -> Result<&mut StatPack> {
        self.stat_pack
            .as_mut()
            .ok_or_else(|| SortError::Uninitialized("Instrumenter".to_string()))
    }
}

impl Instrument for Instrumenter {
    const ENABLED: bool = true;

    fn new(config: &HelperConfig) -> Self {
        let mut instrumenter = Self::with_normalizer(config.normalizer, config.count_fixes);
        instrumenter.inversion_budget = config.inversions;
        instrumenter
    }

    fn count_fixes(&self) -> bool {
        self.count_fixes
    }

    fn increment_compares(&mut self) {
        self.counts.compares += 1;
    }

    fn increment_swaps(&mut self, n: u64) {
        self.counts.swaps += n;
    }

    fn increment_hits(&mut self, n: u64) {
        self.counts.hits += n;
    }

    fn increment_copies(&mut self, n: u64) {
        self.counts.copies += n;
    }

    fn increment_lookups(&mut self, n: u64) {
        self.counts.lookups += n;
    }

    fn increment_fixes(&mut self, delta: i64) {
        if self.count_fixes {
            self.counts.fixes += delta;
        }
    }

    fn init(&mut self, size: usize, runs: usize) {
        self.counts = Counts::default();
        if self.stat_pack.is_none() || self.size != size {
            debug!(size, runs, "creating StatPack");
            self.stat_pack = Some(StatPack::new(self.normalizer, runs, size, &METRIC_KEYS));
        }
        self.size = size;
    }

    fn gather_statistic(&mut self) -> Result<()> {
        let samples = self.counts.samples();
        let pack = self.pack_mut()?;
        for (key, x) in samples {
            pack.add(key, x)?;
        }
        Ok(())
    }

    fn wants_inversions(&self) -> bool {
        self.inversion_budget > 0
    }

    fn record_inversions(&mut self, inversions: u64) -> Result<()> {
        self.pack_mut()?.add(INVERSIONS, inversions as f64)?;
        self.inversion_budget = self.inversion_budget.saturating_sub(1);
        Ok(())
    }

    fn counts(&self) -> Counts {
        self.counts
    }

    fn take_counts(&mut self) -> Counts {
        std::mem::take(&mut self.counts)
    }

    fn absorb(&mut self, counts: Counts) {
        self.counts.merge(counts);
    }

    fn stat_pack(&self) -> Option<&StatPack> {
        self.stat_pack.as_ref()
    }
}

/// The backend of a plain helper. Nothing is counted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInstrument;

impl Instrument for NoInstrument {
    const ENABLED: bool = false;

    #[inline(always)]
    fn new(_config: &HelperConfig) -> Self {
        NoInstrument
    }

    #[inline(always)]
    fn count_fixes(&self) -> bool {
        false
    }

    #[inline(always)]
    fn increment_compares(&mut self) {}

    #[inline(always)]
    fn increment_swaps(&mut self, _n: u64) {}

    #[inline(always)]
    fn increment_hits(&mut self, _n: u64) {}

    #[inline(always)]
    fn increment_copies(&mut self, _n: u64) {}

    #[inline(always)]
    fn increment_lookups(&mut self, _n: u64) {}

    #[inline(always)]
    fn increment_fixes(&mut self, _delta: i64) {}

    #[inline(always)]
    fn init(&mut self, _size: usize, _runs: usize) {}

    #[inline(always)]
    fn gather_statistic(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn wants_inversions(&self) -> bool {
        false
    }

    #[inline(always)]
    fn record_inversions(&mut self, _inversions: u64) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn counts(&self) -> Counts {
        Counts::default()
    }

    #[inline(always)]
    fn take_counts(&mut self) -> Counts {
        Counts::default()
    }

    #[inline(always)]
    fn absorb(&mut self, _counts: Counts) {}

    #[inline(always)]
    fn stat_pack(&self) -> Option<&StatPack> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrumenter(count_fixes: bool, inversions: usize) -> Instrumenter {
        let config = HelperConfig {
            instrument: true,
            count_fixes,
            inversions,
            ..HelperConfig::default()
        };
        Instrumenter::new(&config)
    }

    #[test]
    fn test_counters_accumulate() {
        let mut instrument = instrumenter(true, 0);
        instrument.increment_compares();
        instrument.increment_compares();
        instrument.increment_swaps(3);
        instrument.increment_hits(4);
        instrument.increment_copies(5);
        instrument.increment_lookups(2);
        instrument.increment_fixes(-1);
        assert_eq!(
            instrument.counts(),
            Counts {
                compares: 2,
                swaps: 3,
                hits: 4,
                copies: 5,
                lookups: 2,
                fixes: -1,
            }
        );
    }

    #[test]
    fn test_fixes_ignored_when_disabled() {
        let mut instrument = instrumenter(false, 0);
        instrument.increment_fixes(7);
        assert_eq!(instrument.counts().fixes, 0);
    }

    #[test]
    fn test_gather_without_init_is_uninitialized() {
        let mut instrument = instrumenter(false, 0);
        assert!(matches!(
            instrument.gather_statistic(),
            Err(SortError::Uninitialized(_))
        ));
    }

    #[test]
    fn test_init_resets_counters_and_keeps_pack() {
        let mut instrument = instrumenter(false, 0);
        instrument.init(10, 2);
        instrument.increment_hits(10);
        instrument.gather_statistic().unwrap();
        instrument.init(10, 2);
        assert_eq!(instrument.counts(), Counts::default());
        let pack = instrument.stat_pack().unwrap();
        assert_eq!(pack.count(HITS).unwrap(), 1);
        assert_eq!(pack.mean(HITS).unwrap(), 10.0);

        instrument.init(20, 2);
        assert_eq!(instrument.stat_pack().unwrap().count(HITS).unwrap(), 0);
        assert_eq!(instrument.stat_pack().unwrap().size(), 20);
    }

    #[test]
    fn test_inversion_budget() {
        let mut instrument = instrumenter(false, 1);
        instrument.init(4, 1);
        assert!(instrument.wants_inversions());
        instrument.record_inversions(6).unwrap();
        assert!(!instrument.wants_inversions());
        assert_eq!(instrument.stat_pack().unwrap().mean(INVERSIONS).unwrap(), 6.0);
    }

    #[test]
    fn test_take_and_absorb() {
        let mut parent = instrumenter(true, 0);
        let mut child = instrumenter(true, 0);
        parent.increment_compares();
        child.increment_compares();
        child.increment_fixes(2);
        let taken = child.take_counts();
        assert_eq!(child.counts(), Counts::default());
        parent.absorb(taken);
        assert_eq!(parent.counts().compares, 2);
        assert_eq!(parent.counts().fixes, 2);
    }

    #[test]
    fn test_no_instrument_is_zero_sized() {
        assert_eq!(std::mem::size_of::<NoInstrument>(), 0);
        let mut instrument = NoInstrument::new(&HelperConfig::default());
        instrument.increment_compares();
        instrument.init(10, 1);
        assert!(instrument.gather_statistic().is_ok());
        assert_eq!(instrument.counts(), Counts::default());
        assert!(instrument.stat_pack().is_none());
    }
}
