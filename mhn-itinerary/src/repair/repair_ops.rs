use super::{search, PathFailure, PathFailureReason, SearchWindow};
use crate::config::ItineraryConfig;
use crate::model::{Diagnostic, DiagnosticKind, Diagnostics, ItineraryError, NodeId, RepairGap};
use crate::network::NetworkGraph;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// replacement paths keyed by (origin, destination), and the pairs that
/// could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct RepairOutcome {
    pub paths: BTreeMap<(NodeId, NodeId), Vec<NodeId>>,
    pub failures: Vec<PathFailure>,
}

impl RepairOutcome {
    pub fn path(&self, od: &(NodeId, NodeId)) -> Option<&[NodeId]> {
        self.paths.get(od).map(|p| p.as_slice())
    }
}

/// searches a replacement path for every distinct gap (origin, destination).
///
/// each pair is searched once on a pool of `parallelism` workers sharing the
/// graph. a failed pair produces a single `path_not_found` diagnostic naming
/// every affected route.
pub fn repair_gaps(
    gaps: &[RepairGap],
    graph: &NetworkGraph,
    config: &ItineraryConfig,
    parallelism: usize,
    diagnostics: &mut Diagnostics,
) -> Result<RepairOutcome, ItineraryError> {
    let mut pairs: BTreeMap<(NodeId, NodeId), BTreeSet<&str>> = BTreeMap::new();
    for gap in gaps.iter() {
        pairs.entry(gap.od()).or_default().insert(gap.line.as_str());
    }
    if pairs.is_empty() {
        return Ok(RepairOutcome::default());
    }
    log::info!(
        "searching {} distinct gaps with {} worker(s)",
        pairs.len(),
        parallelism
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()
        .map_err(|e| ItineraryError::WorkerPoolError(e.to_string()))?;
    let searched: Vec<((NodeId, NodeId), Result<Vec<NodeId>, PathFailureReason>)> =
        pool.install(|| {
            pairs
                .keys()
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(|(o, d)| ((*o, *d), find_replacement_path(graph, *o, *d, config)))
                .collect()
        });

    let mut outcome = RepairOutcome::default();
    for (od, result) in searched.into_iter() {
        match result {
            Ok(path) => {
                outcome.paths.insert(od, path);
            }
            Err(reason) => {
                let lines = pairs
                    .get(&od)
                    .map(|l| l.iter().map(|s| s.to_string()).collect::<Vec<_>>())
                    .unwrap_or_default();
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::PathNotFound,
                        format!(
                            "no path from {} to {}: {} (routes {})",
                            od.0,
                            od.1,
                            reason,
                            lines.join(" ")
                        ),
                    )
                    .with_nodes(od.0, od.1),
                );
                outcome.failures.push(PathFailure {
                    origin: od.0,
                    destination: od.1,
                    reason,
                    lines,
                });
            }
        }
    }
    log::info!(
        "repaired {} of {} distinct gaps",
        outcome.paths.len(),
        pairs.len()
    );
    Ok(outcome)
}

/// bounded search for a single pair, retried on a widened window up to the
/// configured number of expansions.
pub fn find_replacement_path(
    graph: &NetworkGraph,
    origin: NodeId,
    destination: NodeId,
    config: &ItineraryConfig,
) -> Result<Vec<NodeId>, PathFailureReason> {
    if origin == destination {
        return Ok(vec![origin]);
    }
    if !graph.contains_node(&origin) {
        return Err(PathFailureReason::OriginNotInNetwork);
    }
    if !graph.contains_node(&destination) {
        return Err(PathFailureReason::DestinationNotInNetwork);
    }
    let is_passable = |n: &NodeId| {
        !config
            .centroid_nodes
            .as_ref()
            .is_some_and(|range| range.contains(n))
    };
    for expansion in 0..=config.search.max_expansions {
        let window = SearchWindow::around(graph, &origin, &destination, &config.search, expansion)
            .ok_or(PathFailureReason::NoPath)?;
        let subgraph = window.subgraph(graph);
        if let Some((miles, path)) = search::shortest_path(&subgraph, origin, destination, is_passable) {
            log::debug!(
                "path {origin} -> {destination}: {} nodes, {miles:.2} miles",
                path.len()
            );
            return Ok(path);
        }
    }
    Err(PathFailureReason::NoPath)
}
