use crate::model::NodeId;
use crate::network::NetworkGraph;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// least-miles path from `origin` to `destination`, returned with its total
/// length in miles.
///
/// the frontier is ordered by (cost, node id) and neighbors arrive in node id
/// order, and a label only improves on a strictly lower cost, so ties always
/// resolve the same way. nodes rejected by `is_passable` may end a path but
/// are never expanded. returns None if either endpoint is not in the graph or
/// no path exists.
pub fn shortest_path<F>(
    graph: &NetworkGraph,
    origin: NodeId,
    destination: NodeId,
    is_passable: F,
) -> Option<(f64, Vec<NodeId>)>
where
    F: Fn(&NodeId) -> bool,
{
    if origin == destination {
        return Some((0.0, vec![origin]));
    }
    if !graph.contains_node(&origin) || !graph.contains_node(&destination) {
        return None;
    }

    let mut costs: HashMap<NodeId, f64> = HashMap::from([(origin, 0.0)]);
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((OrderedFloat(0.0), origin)));

    while let Some(Reverse((OrderedFloat(cost), node))) = frontier.pop() {
        if !settled.insert(node) {
            continue;
        }
        if node == destination {
            return Some((cost, build_path(&predecessors, origin, destination)));
        }
        if node != origin && !is_passable(&node) {
            continue;
        }
        for (neighbor, miles) in graph.neighbors(&node).iter() {
            if settled.contains(neighbor) {
                continue;
            }
            let next_cost = cost + miles;
            let improves = costs
                .get(neighbor)
                .map(|current| next_cost < *current)
                .unwrap_or(true);
            if improves {
                costs.insert(*neighbor, next_cost);
                predecessors.insert(*neighbor, node);
                frontier.push(Reverse((OrderedFloat(next_cost), *neighbor)));
            }
        }
    }
    None
}

fn build_path(
    predecessors: &HashMap<NodeId, NodeId>,
    origin: NodeId,
    destination: NodeId,
) -> Vec<NodeId> {
    let mut path = vec![destination];
    let mut current = destination;
    while current != origin {
        match predecessors.get(&current) {
            Some(previous) => {
                path.push(*previous);
                current = *previous;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
