use crate::config::SearchWindowConfig;
use crate::model::NodeId;
use crate::network::{distance_ops, NetworkGraph};

/// planar box, in feet, bounding the network searched for one gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SearchWindow {
    /// the bounding box of the two endpoints padded by the configured margin
    /// times the distance multiplier. each expansion doubles the margin.
    /// returns None when either endpoint has no coordinates.
    pub fn around(
        graph: &NetworkGraph,
        origin: &NodeId,
        destination: &NodeId,
        config: &SearchWindowConfig,
        expansion: u32,
    ) -> Option<SearchWindow> {
        let a = graph.coordinate(origin)?;
        let b = graph.coordinate(destination)?;
        let distance = distance_ops::straight_line_miles(a, b);
        let margin = config.margin_miles * 2f64.powi(expansion as i32);
        let pad = distance_ops::miles_to_feet(margin * config.multiplier(distance));
        Some(SearchWindow {
            min_x: a.x.min(b.x) - pad,
            max_x: a.x.max(b.x) + pad,
            min_y: a.y.min(b.y) - pad,
            max_y: a.y.max(b.y) + pad,
        })
    }

    pub fn subgraph(&self, graph: &NetworkGraph) -> NetworkGraph {
        graph.bounding_subgraph(self.min_x, self.max_x, self.min_y, self.max_y)
    }
}
