use super::{
    conflate_links, distance_ops, DirectedLink, LinkRow, NetworkLink, NodeRow, PendingActionRow,
};
use crate::model::NodeId;
use geo::{Coord, Intersects, Rect};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// directed view of the conflated MHN links with node coordinates. built
/// once and shared read-only by the verifier and the repair engine.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    links: Arc<Vec<NetworkLink>>,
    directed: HashMap<(NodeId, NodeId), DirectedLink>,
    adjacency: BTreeMap<NodeId, Vec<(NodeId, f64)>>,
    coordinates: HashMap<NodeId, Coord<f64>>,
}

impl NetworkGraph {
    /// conflates the link rows with the pending actions and builds the graph.
    pub fn load(
        links: &[LinkRow],
        nodes: &[NodeRow],
        actions: &[PendingActionRow],
    ) -> NetworkGraph {
        let conflated = conflate_links(links, actions);
        let coordinates = nodes
            .iter()
            .map(|n| (n.node, Coord { x: n.x, y: n.y }))
            .collect();
        NetworkGraph::from_links(conflated, coordinates)
    }

    /// builds the directed tuples for a set of canonical links. every link
    /// contributes its coded direction; two-way links also contribute the
    /// reverse tuple unless another link is coded in that direction.
    pub fn from_links(
        links: Vec<NetworkLink>,
        coordinates: HashMap<NodeId, Coord<f64>>,
    ) -> NetworkGraph {
        let mut directed: HashMap<(NodeId, NodeId), DirectedLink> = HashMap::new();
        for (link_index, link) in links.iter().enumerate() {
            if directed.contains_key(&link.canonical()) {
                log::warn!(
                    "link {} duplicates node pair ({}, {}), keeping the first",
                    link.link_id,
                    link.anode,
                    link.bnode
                );
                continue;
            }
            directed.insert(
                link.canonical(),
                DirectedLink {
                    link_index,
                    miles: link.miles,
                },
            );
        }
        for (link_index, link) in links.iter().enumerate() {
            if !link.directionality.is_two_way() {
                continue;
            }
            directed
                .entry((link.bnode, link.anode))
                .or_insert(DirectedLink {
                    link_index,
                    miles: link.miles,
                });
        }

        let mut adjacency: BTreeMap<NodeId, Vec<(NodeId, f64)>> = BTreeMap::new();
        for ((src, dst), edge) in directed.iter() {
            if coordinates.contains_key(src) && coordinates.contains_key(dst) {
                adjacency.entry(*src).or_default().push((*dst, edge.miles));
            }
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_by_key(|(n, _)| *n);
        }

        log::info!(
            "network graph has {} links, {} directed edges and {} nodes",
            links.len(),
            directed.len(),
            coordinates.len()
        );
        NetworkGraph {
            links: Arc::new(links),
            directed,
            adjacency,
            coordinates,
        }
    }

    /// outgoing (node, miles) pairs ordered by neighbor id. empty for nodes
    /// that are not in the network.
    pub fn neighbors(&self, node: &NodeId) -> &[(NodeId, f64)] {
        self.adjacency
            .get(node)
            .map(|n| n.as_slice())
            .unwrap_or_default()
    }

    pub fn directed_link(&self, a: &NodeId, b: &NodeId) -> Option<&DirectedLink> {
        self.directed.get(&(*a, *b))
    }

    /// true if the directed tuple (a, b) can be traversed on the network.
    pub fn contains_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.directed.contains_key(&(*a, *b))
    }

    pub fn link_miles(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        self.directed_link(a, b).map(|l| l.miles)
    }

    /// the canonical link traversed by the directed tuple (a, b).
    pub fn canonical_link(&self, a: &NodeId, b: &NodeId) -> Option<&NetworkLink> {
        self.directed_link(a, b)
            .and_then(|l| self.links.get(l.link_index))
    }

    /// canonical edge id of the link traversed by (a, b), computed from the
    /// link's coded direction.
    pub fn canonical_edge_id(&self, a: &NodeId, b: &NodeId) -> Option<i64> {
        self.canonical_link(a, b).map(|l| l.edge_id())
    }

    pub fn coordinate(&self, node: &NodeId) -> Option<Coord<f64>> {
        self.coordinates.get(node).copied()
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.coordinates.contains_key(node)
    }

    /// straight-line distance in miles between two network nodes.
    pub fn node_distance_miles(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let ca = self.coordinate(a)?;
        let cb = self.coordinate(b)?;
        Some(distance_ops::straight_line_miles(ca, cb))
    }

    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    /// restricts the graph to links with both endpoints inside the box,
    /// boundaries included.
    pub fn bounding_subgraph(
        &self,
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    ) -> NetworkGraph {
        let bbox = Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y });
        let coordinates: HashMap<NodeId, Coord<f64>> = self
            .coordinates
            .iter()
            .filter(|(_, c)| bbox.intersects(*c))
            .map(|(n, c)| (*n, *c))
            .collect();
        let directed: HashMap<(NodeId, NodeId), DirectedLink> = self
            .directed
            .iter()
            .filter(|((a, b), _)| coordinates.contains_key(a) && coordinates.contains_key(b))
            .map(|(k, v)| (*k, *v))
            .collect();
        let adjacency = self
            .adjacency
            .iter()
            .filter(|(src, _)| coordinates.contains_key(*src))
            .map(|(src, neighbors)| {
                let kept = neighbors
                    .iter()
                    .filter(|(dst, _)| coordinates.contains_key(dst))
                    .copied()
                    .collect::<Vec<_>>();
                (*src, kept)
            })
            .filter(|(_, neighbors)| !neighbors.is_empty())
            .collect();
        NetworkGraph {
            links: Arc::clone(&self.links),
            directed,
            adjacency,
            coordinates,
        }
    }
}
