pub mod format_ops;
mod output_rows;
pub mod writer;

pub use format_ops::FormattedOutput;
pub use output_rows::{AllowableLinkRow, ItineraryRow, PathNodeRow, RepairGapRow, RouteHeaderRow};
