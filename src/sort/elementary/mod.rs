pub mod binary_insertion;
pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod shell;
