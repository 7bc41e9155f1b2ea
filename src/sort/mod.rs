pub mod classic;
pub mod counting;
pub mod elementary;
pub mod linearithmic;

pub use self::classic::bucket::BucketSort;
pub use self::counting::lsd_string::LsdStringSort;
pub use self::counting::msd_string::MsdStringSort;
pub use self::elementary::binary_insertion::BinaryInsertionSort;
pub use self::elementary::bubble::BubbleSort;
pub use self::elementary::heap::HeapSort;
pub use self::elementary::insertion::InsertionSort;
pub use self::elementary::shell::ShellSort;
pub use self::linearithmic::merge::MergeSort;
pub use self::linearithmic::tim::TimSort;
