pub mod merge;
pub mod tim;
