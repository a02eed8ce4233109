mod action_code;
mod conflation_ops;
mod directionality;
pub mod distance_ops;
mod network_graph;
mod network_link;
mod network_rows;

pub use action_code::ActionCode;
pub use conflation_ops::conflate_links;
pub use directionality::Directionality;
pub use network_graph::NetworkGraph;
pub use network_link::{edge_id, DirectedLink, NetworkLink};
pub use network_rows::{LinkRow, NodeRow, PendingActionRow};

#[cfg(test)]
pub(crate) use network_graph::tests::test_graph;
