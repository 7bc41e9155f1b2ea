mod common;
use common::{SEED, counting_config, counting_helper_config, random_ints, sorted_copy};

use sortlab::config::{INSTRUMENTING, NORMALIZER};
use sortlab::instrument::{COMPARES, INVERSIONS, SWAPS};
use sortlab::{
    Comparator, Config, HeapSort, Helper, InsertionSort, InstrumentedHelper, MergeSort, Normalizer,
    Sort, SortError, factory,
};
use std::sync::Arc;

#[test]
fn test_sorted_input_statistics_over_runs() {
    let config = counting_config().with(INSTRUMENTING, NORMALIZER, "linear");
    let mut sorter = InsertionSort::from_config(10, 4, &config).unwrap();
    for _ in 0..4 {
        let sorted: Vec<i32> = (0..10).collect();
        assert_eq!(sorter.sort(&sorted).unwrap(), sorted);
    }
    let pack = sorter.helper().stat_pack().unwrap();
    assert_eq!(pack.count(COMPARES).unwrap(), 4);
    assert_eq!(pack.mean(COMPARES).unwrap(), 9.0);
    assert_eq!(pack.std_dev(COMPARES).unwrap(), 0.0);
    assert!((pack.normalized_mean(COMPARES).unwrap() - 0.9).abs() < 1e-12);
    assert_eq!(pack.mean(SWAPS).unwrap(), 0.0);
    assert_eq!(pack.mean(INVERSIONS).unwrap(), 0.0);
    assert!(pack.to_string().contains("compares: mean=9;"));
    assert_eq!(
        sorter.helper().to_string(),
        "Helper for Insertion sort with 10 elements"
    );
}

#[test]
fn test_one_helper_shared_by_two_sorts() {
    let mut helper: InstrumentedHelper<i32> =
        InstrumentedHelper::new("shared", 200, counting_helper_config());
    let xs = random_ints(200, SEED);
    {
        let mut insertion = InsertionSort::new(&mut helper);
        assert_eq!(insertion.sort(&xs).unwrap(), sorted_copy(&xs));
        // Not the sort's helper to close
        insertion.close();
    }
    let insertion_compares = helper.counts().compares;
    {
        let mut heap = HeapSort::new(&mut helper);
        assert_eq!(heap.sort(&xs).unwrap(), sorted_copy(&xs));
    }
    let pack = helper.stat_pack().unwrap();
    assert_eq!(pack.count(COMPARES).unwrap(), 2);
    assert_eq!(pack.statistics(COMPARES).unwrap().samples()[0], insertion_compares as f64);
    helper.close();
}

#[test]
fn test_descending_comparator() {
    let reverse: Comparator<i32> = Arc::new(|v: &i32, w: &i32| w.cmp(v));
    let helper = factory::create_with_comparator("descending", 100, 1, reverse, &counting_config())
        .unwrap();
    let mut sorter = MergeSort::new(helper);
    let xs = random_ints(100, 3);
    let ys = sorter.sort(&xs).unwrap();
    let mut expected = sorted_copy(&xs);
    expected.reverse();
    assert_eq!(ys, expected);
    // Inversions are measured against the helper's own order.
    assert_eq!(sorter.helper().inversions(&ys), 0);
}

#[test]
fn test_statistics_need_init() {
    let config = Config::setup(true, false, SEED, 0, None);
    let mut helper = factory::create::<i32>("uninitialized", 3, 1, &config).unwrap();
    assert!(matches!(
        helper.post_process(&[1, 2, 3]),
        Err(SortError::Uninitialized(_))
    ));
    helper.init(3);
    assert!(helper.post_process(&[1, 2, 3]).is_ok());
    assert!(matches!(
        helper.post_process(&[2, 1, 3]),
        Err(SortError::NotSorted { index: 1, .. })
    ));
}

#[test]
fn test_normalizer_from_config() {
    let config = counting_config().with(INSTRUMENTING, NORMALIZER, "n2");
    let helper = factory::create::<i32>("quadratic", 3, 1, &config).unwrap();
    assert_eq!(helper.config().normalizer, Normalizer::Quadratic);

    let bad = counting_config().with(INSTRUMENTING, NORMALIZER, "cubic");
    assert!(matches!(
        factory::create::<i32>("cubic", 3, 1, &bad),
        Err(SortError::InvalidConfig { .. })
    ));
}
