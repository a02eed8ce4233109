use super::VerificationResult;
use crate::config::CentroidRange;
use crate::model::{
    Diagnostic, DiagnosticKind, Diagnostics, ItinerarySegment, NodeId, RepairGap,
};
use crate::network::NetworkGraph;
use std::collections::BTreeSet;

/// matches every itinerary segment against the directed network links and
/// carves the unmatched ones into repair gaps. a segment only matches when
/// both of its nodes also have network coordinates.
///
/// held segments are grouped into runs of adjacent segments of one route.
/// a run touching a node missing from the network becomes a single gap from
/// its first origin to its last destination. otherwise every held segment is
/// its own gap so that the coded stops between them survive the repair.
/// input must be sorted by route and order.
pub fn verify_itinerary(
    segments: Vec<ItinerarySegment>,
    graph: &NetworkGraph,
    diagnostics: &mut Diagnostics,
) -> VerificationResult {
    let missing_nodes: BTreeSet<NodeId> = segments
        .iter()
        .flat_map(|s| [s.itin_a, s.itin_b])
        .filter(|n| !graph.contains_node(n))
        .collect();
    for node in missing_nodes.iter() {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::MissingNetworkNode,
                format!("itinerary node {node} is not in the network"),
            )
            .with_node(*node),
        );
    }

    let mut result = VerificationResult {
        missing_nodes,
        ..Default::default()
    };
    let mut run: Vec<ItinerarySegment> = vec![];
    for segment in segments.into_iter() {
        let matches = graph.contains_edge(&segment.itin_a, &segment.itin_b)
            && graph.contains_node(&segment.itin_a)
            && graph.contains_node(&segment.itin_b);
        if matches {
            flush_run(&mut run, &mut result);
            result.matched.push(segment);
            continue;
        }
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::UnmatchedSegment,
                format!(
                    "segment {} ({}, {}) has no matching network link",
                    segment.order, segment.itin_a, segment.itin_b
                ),
            )
            .with_line(&segment.line)
            .with_nodes(segment.itin_a, segment.itin_b),
        );
        if run.last().is_some_and(|last| !last.continues_into(&segment)) {
            flush_run(&mut run, &mut result);
        }
        result.held_count += 1;
        run.push(segment);
    }
    flush_run(&mut run, &mut result);

    log::info!(
        "{} segments matched the network, {} held in {} gaps",
        result.matched.len(),
        result.held_count,
        result.gaps.len()
    );
    result
}

fn flush_run(run: &mut Vec<ItinerarySegment>, result: &mut VerificationResult) {
    if run.is_empty() {
        return;
    }
    let held = std::mem::take(run);
    let touches_missing = held.iter().any(|s| {
        result.missing_nodes.contains(&s.itin_a) || result.missing_nodes.contains(&s.itin_b)
    });
    if touches_missing {
        result.gaps.extend(RepairGap::from_run(held));
    } else {
        result
            .gaps
            .extend(held.into_iter().filter_map(|s| RepairGap::from_run(vec![s])));
    }
}

/// reports itinerary segments coded on a zone centroid node.
pub fn report_centroid_connectors(
    segments: &[ItinerarySegment],
    centroids: &CentroidRange,
    diagnostics: &mut Diagnostics,
) {
    for segment in segments.iter() {
        if centroids.contains(&segment.itin_a) || centroids.contains(&segment.itin_b) {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::CentroidConnector,
                    format!("segment {} is coded on a centroid connector", segment.order),
                )
                .with_line(&segment.line)
                .with_nodes(segment.itin_a, segment.itin_b),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Imputed;
    use crate::network::test_graph;

    fn segment(line: &str, a: i64, b: i64, order: f64) -> ItinerarySegment {
        ItinerarySegment {
            line: String::from(line),
            order,
            itin_a: NodeId(a),
            itin_b: NodeId(b),
            dwell_code: 0,
            zone_fare: 0.0,
            line_serv_time: 1.0,
            ttf: 0,
            dep_time: 0,
            arr_time: 0,
            stop_count: 1,
            imputed: Imputed::Original,
        }
    }

    fn graph() -> NetworkGraph {
        test_graph(
            &[(5001, 5002, true, 1.0), (5004, 5005, false, 1.0)],
            &[
                (5001, 0.0, 0.0),
                (5002, 1.0, 0.0),
                (5003, 2.0, 0.0),
                (5004, 3.0, 0.0),
                (5005, 4.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_each_held_segment_is_a_gap() {
        let segments = vec![
            segment("b00001", 5001, 5002, 1.0),
            segment("b00001", 5002, 5003, 2.0),
            segment("b00001", 5003, 5004, 3.0),
            segment("b00001", 5004, 5005, 4.0),
        ];
        let mut diagnostics = Diagnostics::default();
        let result = verify_itinerary(segments, &graph(), &mut diagnostics);
        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.gaps.len(), 2);
        assert_eq!(result.held_count, 2);
        assert_eq!(result.gaps[0].od(), (NodeId(5002), NodeId(5003)));
        assert_eq!(diagnostics.count(DiagnosticKind::UnmatchedSegment), 2);
    }

    #[test]
    fn test_run_through_missing_node_is_one_gap() {
        let segments = vec![
            segment("b00001", 5001, 5002, 1.0),
            segment("b00001", 5002, 9999, 2.0),
            segment("b00001", 9999, 5004, 3.0),
            segment("b00001", 5004, 5005, 4.0),
        ];
        let mut diagnostics = Diagnostics::default();
        let result = verify_itinerary(segments, &graph(), &mut diagnostics);
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].od(), (NodeId(5002), NodeId(5004)));
        assert_eq!(result.gaps[0].excised.len(), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::MissingNetworkNode), 1);
    }

    #[test]
    fn test_link_to_node_without_coordinates_is_held() {
        let graph = test_graph(
            &[
                (5001, 5002, true, 1.0),
                (5002, 5006, true, 1.0),
                (5006, 5004, true, 1.0),
                (5004, 5005, true, 1.0),
            ],
            &[(5001, 0.0, 0.0), (5002, 1.0, 0.0), (5004, 3.0, 0.0), (5005, 4.0, 0.0)],
        );
        let segments = vec![
            segment("b00001", 5001, 5002, 1.0),
            segment("b00001", 5002, 5006, 2.0),
            segment("b00001", 5006, 5004, 3.0),
            segment("b00001", 5004, 5005, 4.0),
        ];
        let mut diagnostics = Diagnostics::default();
        let result = verify_itinerary(segments, &graph, &mut diagnostics);
        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.held_count, 2);
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].od(), (NodeId(5002), NodeId(5004)));
        assert_eq!(result.gaps[0].excised.len(), 2);
        assert!(result.missing_nodes.contains(&NodeId(5006)));
        assert_eq!(diagnostics.count(DiagnosticKind::MissingNetworkNode), 1);
    }

    #[test]
    fn test_reverse_of_one_way_link_is_held() {
        let segments = vec![segment("b00001", 5005, 5004, 1.0)];
        let mut diagnostics = Diagnostics::default();
        let result = verify_itinerary(segments, &graph(), &mut diagnostics);
        assert!(!result.is_clean());
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_runs_break_on_route_change() {
        let segments = vec![
            segment("b00001", 5002, 9999, 1.0),
            segment("b00002", 9999, 5004, 1.0),
        ];
        let mut diagnostics = Diagnostics::default();
        let result = verify_itinerary(segments, &graph(), &mut diagnostics);
        assert_eq!(result.gaps.len(), 2);
    }

    #[test]
    fn test_centroid_report() {
        let segments = vec![segment("b00001", 12, 5001, 1.0), segment("b00001", 5001, 5002, 2.0)];
        let mut diagnostics = Diagnostics::default();
        let centroids = CentroidRange {
            min: NodeId(1),
            max: NodeId(1961),
        };
        report_centroid_connectors(&segments, &centroids, &mut diagnostics);
        assert_eq!(diagnostics.count(DiagnosticKind::CentroidConnector), 1);
    }
}
