#![allow(dead_code)]

use rand::seq::SliceRandom;
use sortlab::instrument::{COMPARES, FIXES, INVERSIONS};
use sortlab::{Helper, InstrumentedHelper, Sort};
use std::sync::Arc;

use super::{counting_helper_config, random_ints, sorted_copy};

pub fn basic_sort<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let mut sorter = factory(10);
    let xs = vec![7, 0, 8, 2, 4, 5, 6, 9, 3, 1];
    let ys = sorter.sort(&xs).unwrap();
    assert_eq!(ys, (0..10).collect::<Vec<_>>());
    // The input is left alone
    assert_eq!(xs, vec![7, 0, 8, 2, 4, 5, 6, 9, 3, 1]);
}

pub fn empty_input<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let mut sorter = factory(0);
    assert!(sorter.sort(&[]).unwrap().is_empty());
}

pub fn single_element<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let mut sorter = factory(1);
    assert_eq!(sorter.sort(&[42]).unwrap(), vec![42]);
}

pub fn duplicate_keys<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let xs: Vec<i32> = (0..200).map(|i| (i * 37) % 5).collect();
    let mut sorter = factory(xs.len());
    assert_eq!(sorter.sort(&xs).unwrap(), sorted_copy(&xs));
}

pub fn reverse_sorted<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let xs: Vec<i32> = (0..300).rev().collect();
    let mut sorter = factory(xs.len());
    assert_eq!(sorter.sort(&xs).unwrap(), (0..300).collect::<Vec<_>>());
}

pub fn large_dataset<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let mut xs: Vec<i32> = (0..2000).collect();
    let mut rng = rand::rng();
    xs.shuffle(&mut rng);
    let mut sorter = factory(xs.len());
    let ys = sorter.sort(&xs).unwrap();
    assert_eq!(ys, (0..2000).collect::<Vec<_>>());
}

/// Only `xs[from..to]` is touched.
pub fn sub_range_only<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let mut xs = random_ints(100, 17);
    let original = xs.clone();
    let mut sorter = factory(xs.len());
    sorter.sort_range(&mut xs, 20, 70).unwrap();
    assert_eq!(&xs[..20], &original[..20]);
    assert_eq!(&xs[70..], &original[70..]);
    assert_eq!(&xs[20..70], sorted_copy(&original[20..70]).as_slice());
}

/// Several runs through one sorter each leave one sample per metric.
pub fn repeated_runs_gather_statistics<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let n = 64;
    let runs = 5;
    let mut sorter = factory(n);
    for run in 0..runs {
        let mut xs = random_ints(n, run);
        sorter.mutating_sort(&mut xs).unwrap();
        assert_eq!(xs, sorted_copy(&xs));
    }
    let pack = sorter.helper().stat_pack().unwrap();
    assert_eq!(pack.count(COMPARES).unwrap(), runs as usize);
    assert_eq!(pack.size(), n);
    sorter.close();
    // Closing twice does nothing
    sorter.close();
}

/// For sorts that only move elements across inversions, the fixes counted
/// during a run add up to the inversions of its input.
pub fn fixes_match_inversions<S, F>(factory: F)
where
    S: Sort<i32>,
    F: FnOnce(usize) -> S,
{
    let xs = random_ints(500, 23);
    let mut sorter = factory(xs.len());
    let inversions = sorter.helper().inversions(&xs);
    assert!(inversions > 0);
    sorter.sort(&xs).unwrap();
    assert_eq!(sorter.helper().counts().fixes, inversions as i64);
    let pack = sorter.helper().stat_pack().unwrap();
    assert_eq!(pack.mean(FIXES).unwrap(), inversions as f64);
    assert_eq!(pack.mean(INVERSIONS).unwrap(), inversions as f64);
}

/// Instrumented and plain sorts produce the same output.
pub fn instrumented_matches_plain<S, T, F, G>(instrumented: F, plain: G)
where
    S: Sort<i32>,
    T: Sort<i32>,
    F: FnOnce(usize) -> S,
    G: FnOnce(usize) -> T,
{
    let xs = random_ints(777, 5);
    let mut counted = instrumented(xs.len());
    let mut uncounted = plain(xs.len());
    assert!(counted.helper().instrumented());
    assert!(!uncounted.helper().instrumented());
    assert_eq!(counted.sort(&xs).unwrap(), uncounted.sort(&xs).unwrap());
    assert!(counted.helper().counts().hits > 0);
    assert_eq!(uncounted.helper().counts().hits, 0);
    assert!(uncounted.helper().stat_pack().is_none());
}

type Keyed = (i32, usize);

/// Helper that orders pairs by their first component only.
pub fn key_only_helper(n: usize) -> InstrumentedHelper<Keyed> {
    InstrumentedHelper::with_comparator(
        "Keyed",
        n,
        Arc::new(|v: &Keyed, w: &Keyed| v.0.cmp(&w.0)),
        counting_helper_config(),
    )
}

/// Equal keys keep their input order.
pub fn stable<S, F>(factory: F)
where
    S: Sort<Keyed>,
    F: FnOnce(InstrumentedHelper<Keyed>) -> S,
{
    let xs: Vec<Keyed> = random_ints(300, 31)
        .into_iter()
        .map(|x| x % 10)
        .enumerate()
        .map(|(i, k)| (k, i))
        .collect();
    let mut sorter = factory(key_only_helper(xs.len()));
    let ys = sorter.sort(&xs).unwrap();
    for pair in ys.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
        if pair[0].0 == pair[1].0 {
            assert!(pair[0].1 < pair[1].1, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}
