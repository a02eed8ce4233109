pub mod merge_ops;
pub mod pace_ops;
pub mod pseudo_node_ops;
pub mod same_node_ops;
