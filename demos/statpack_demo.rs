use rand::Rng;
use sortlab::config::HelperConfig;
use sortlab::instrument::{COMPARES, FIXES, SWAPS};
use sortlab::{
    Helper, HeapSort, InsertionSort, InstrumentedHelper, MergeSort, Normalizer, Sort, Statistics,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    // Plain statistics over a handful of samples
    let mut statistics = Statistics::new("latency", Normalizer::Linear, 4, 10);
    for x in [12.0, 15.0, 9.0, 14.0, 10.0] {
        statistics.add(x);
    }
    println!("{}", statistics);

    // Ten instrumented runs of insertion sort and mergesort over the same sizes
    let n = 1000;
    let runs = 10;
    let config = HelperConfig {
        instrument: true,
        count_fixes: true,
        seed: 42,
        runs,
        inversions: runs,
        normalizer: Normalizer::Quadratic,
        ..HelperConfig::default()
    };

    let mut helper: InstrumentedHelper<i32> = InstrumentedHelper::new("Insertion sort", n, config.clone());
    {
        // The sort borrows the helper, which keeps its statistics afterwards.
        let mut sorter = InsertionSort::new(&mut helper);
        for _ in 0..runs {
            let mut xs = sorter.helper_mut().random(n, |rng| rng.random_range(0..1_000_000));
            sorter.mutating_sort(&mut xs)?;
        }
    }
    println!("{}", helper.show_stats());
    if let Some(pack) = helper.stat_pack() {
        println!(
            "insertion sort: {:.0} compares, {:.0} swaps, {:.0} fixes per run",
            pack.mean(COMPARES)?,
            pack.mean(SWAPS)?,
            pack.mean(FIXES)?
        );
    }
    helper.close();

    let merge_config = HelperConfig {
        normalizer: Normalizer::Linearithmic,
        ..config.clone()
    };
    let mut sorter = MergeSort::new(InstrumentedHelper::<i32>::new("MergeSort", n, merge_config));
    for _ in 0..runs {
        let mut xs = sorter.helper_mut().random(n, |rng| rng.random_range(0..1_000_000));
        sorter.mutating_sort(&mut xs)?;
    }
    println!("{}", sorter.helper().show_stats());
    sorter.helper_mut().close();

    // A custom comparator: case-insensitive string order
    let words: Vec<String> = ["delta", "Alpha", "charlie", "Bravo", "echo"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let helper = InstrumentedHelper::with_comparator(
        "HeapSort of words",
        words.len(),
        Arc::new(|v: &String, w: &String| v.to_lowercase().cmp(&w.to_lowercase())),
        config,
    );
    let mut sorter = HeapSort::new(helper);
    let sorted = sorter.sort(&words)?;
    println!("{:?}", sorted);
    println!("{}", sorter.helper().show_stats());

    Ok(())
}
