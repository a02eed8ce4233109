pub mod collapse_ops;
pub mod measure_ops;
pub mod recalc_ops;
pub mod splice_ops;
pub mod time_ops;

pub use splice_ops::SpliceResult;
