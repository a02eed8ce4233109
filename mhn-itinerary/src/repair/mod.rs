mod path_failure;
pub mod repair_ops;
pub mod search;
mod search_window;

pub use path_failure::{PathFailure, PathFailureReason};
pub use repair_ops::RepairOutcome;
pub use search_window::SearchWindow;
