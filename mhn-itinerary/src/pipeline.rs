//! composes the reconciliation stages into a single run over in-memory
//! tables.
use crate::config::ItineraryConfig;
use crate::itinerary::{merge_ops, pace_ops, pseudo_node_ops, same_node_ops};
use crate::model::{Diagnostics, ItineraryError, ItinerarySegment, RawRouteRow, RawSegmentRow, Route};
use crate::network::{LinkRow, NetworkGraph, NodeRow, PendingActionRow};
use crate::output::{format_ops, FormattedOutput};
use crate::repair::{repair_ops, PathFailure};
use crate::route::route_ops;
use crate::splice::{collapse_ops, recalc_ops, splice_ops, time_ops};
use crate::verify::{verify_ops, VerificationResult};

/// raw input tables of a run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub routes: Vec<RawRouteRow>,
    pub segments: Vec<RawSegmentRow>,
    pub links: Vec<LinkRow>,
    pub nodes: Vec<NodeRow>,
    pub actions: Vec<PendingActionRow>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub routes: Vec<Route>,
    pub segments: Vec<ItinerarySegment>,
    pub formatted: FormattedOutput,
    pub failures: Vec<PathFailure>,
    pub diagnostics: Diagnostics,
}

/// result of checking the preprocessed itinerary against the network
/// without repairing it.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub routes: Vec<Route>,
    pub verification: VerificationResult,
    pub diagnostics: Diagnostics,
}

/// normalizes routes and runs the preprocessing passes up to the point where
/// the itinerary is ready to be matched against the network.
pub fn prepare(
    routes: Vec<RawRouteRow>,
    segments: Vec<RawSegmentRow>,
    graph: &NetworkGraph,
    config: &ItineraryConfig,
    diagnostics: &mut Diagnostics,
) -> (Vec<Route>, Vec<ItinerarySegment>) {
    let routes = route_ops::normalize_routes(routes, config, diagnostics);
    let (routes, segments) = merge_ops::merge_segments(routes, segments, diagnostics);
    let (routes, segments) = merge_ops::remove_degenerate_routes(routes, segments, diagnostics);
    let segments = same_node_ops::repair_same_node_segments(segments, diagnostics);
    let routes = merge_ops::retain_routes_with_segments(routes, &segments, diagnostics);

    let mut segments =
        pseudo_node_ops::insert_pseudo_nodes(segments, &routes, &config.correction_tables);
    merge_ops::renumber_orders(&mut segments);
    pace_ops::apportion_pace_times(&mut segments, graph, config);
    pace_ops::apply_pace_fares(&mut segments, &routes, &config.correction_tables);
    if let Some(centroids) = config.centroid_nodes.as_ref() {
        verify_ops::report_centroid_connectors(&segments, centroids, diagnostics);
    }
    (routes, segments)
}

/// preprocesses the itinerary and reports how it matches the network.
pub fn run_verification(input: PipelineInput, config: &ItineraryConfig) -> VerificationReport {
    let mut diagnostics = Diagnostics::default();
    let graph = NetworkGraph::load(&input.links, &input.nodes, &input.actions);
    let (routes, segments) =
        prepare(input.routes, input.segments, &graph, config, &mut diagnostics);
    let verification = verify_ops::verify_itinerary(segments, &graph, &mut diagnostics);
    diagnostics.log_summary();
    VerificationReport {
        routes,
        verification,
        diagnostics,
    }
}

/// runs the full reconciliation: preprocessing, verification, gap repair on
/// `parallelism` workers, splicing, recalculation and formatting.
pub fn run_pipeline(
    input: PipelineInput,
    config: &ItineraryConfig,
    parallelism: usize,
) -> Result<PipelineOutput, ItineraryError> {
    config.validate()?;
    let mut diagnostics = Diagnostics::default();
    let graph = NetworkGraph::load(&input.links, &input.nodes, &input.actions);
    let (routes, segments) =
        prepare(input.routes, input.segments, &graph, config, &mut diagnostics);

    let verification = verify_ops::verify_itinerary(segments, &graph, &mut diagnostics);
    let outcome = repair_ops::repair_gaps(
        &verification.gaps,
        &graph,
        config,
        parallelism,
        &mut diagnostics,
    )?;
    let spliced = splice_ops::splice_paths(
        verification.matched,
        verification.gaps,
        &outcome,
        &graph,
        &mut diagnostics,
    );

    let segments = same_node_ops::repair_same_node_segments(spliced.segments, &mut diagnostics);
    let mut segments = collapse_ops::collapse_back_and_forth(segments);
    merge_ops::renumber_orders(&mut segments);
    time_ops::validate_itinerary_times(&mut segments, &graph, config, &mut diagnostics);
    recalc_ops::report_itinerary_breaks(&segments, &mut diagnostics);

    let routes = merge_ops::retain_routes_with_segments(routes, &segments, &mut diagnostics);
    let routes = recalc_ops::recalculate_routes(routes, &segments, &spliced.incomplete_lines);
    let formatted = format_ops::format_outputs(&routes, &segments, &graph, config);
    diagnostics.log_summary();
    log::info!(
        "finished {} routes with {} itinerary segments",
        routes.len(),
        segments.len()
    );
    Ok(PipelineOutput {
        routes,
        segments,
        formatted,
        failures: outcome.failures,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CentroidRange;
    use crate::model::{DiagnosticKind, Imputed, NodeId};

    const MILE: f64 = 5280.0;

    fn route(route_id: &str) -> RawRouteRow {
        RawRouteRow {
            route_id: String::from(route_id),
            mode: String::from("B"),
            long_name: format!("Route {route_id}"),
            ..Default::default()
        }
    }

    fn segment(route_id: &str, a: i64, b: i64, order: f64, dep: i64, arr: i64) -> RawSegmentRow {
        RawSegmentRow {
            route_id: String::from(route_id),
            itin_a: Some(NodeId(a)),
            itin_b: Some(NodeId(b)),
            order,
            line_serv_time: (arr - dep) as f64 / 60.0,
            dep_time: dep,
            arr_time: arr,
            stop_count: 1,
            ..Default::default()
        }
    }

    fn link(a: i64, b: i64, miles: f64) -> LinkRow {
        LinkRow {
            link_id: format!("{a}-{b}"),
            anode: NodeId(a),
            bnode: NodeId(b),
            directions: 2,
            miles,
            type1: 1,
            type2: 1,
            speed1: 30.0,
            speed2: 30.0,
            baselink: 1,
        }
    }

    fn node(id: i64, x: f64, y: f64) -> NodeRow {
        NodeRow { node: NodeId(id), x, y }
    }

    fn config() -> ItineraryConfig {
        ItineraryConfig {
            centroid_nodes: Some(CentroidRange {
                min: NodeId(900),
                max: NodeId(999),
            }),
            ..Default::default()
        }
    }

    fn pairs(output: &PipelineOutput) -> Vec<(i64, i64)> {
        output
            .segments
            .iter()
            .map(|s| (s.itin_a.0, s.itin_b.0))
            .collect()
    }

    /// a straight line of nodes 4-5-6-8 one mile apart with a detour 5-7-6.
    /// the direct 5-6 link only exists when `with_direct_link` is set.
    fn network(with_direct_link: bool) -> (Vec<LinkRow>, Vec<NodeRow>) {
        let mut links = vec![
            link(4, 5, 1.0),
            link(5, 7, 1.0),
            link(7, 6, 1.0),
            link(6, 8, 1.0),
        ];
        if with_direct_link {
            links.push(link(5, 6, 1.0));
        }
        let nodes = vec![
            node(4, 0.0, 0.0),
            node(5, MILE, 0.0),
            node(6, 2.0 * MILE, 0.0),
            node(7, 1.5 * MILE, 0.8 * MILE),
            node(8, 3.0 * MILE, 0.0),
            node(9, 50.0 * MILE, 50.0 * MILE),
        ];
        (links, nodes)
    }

    #[test]
    fn test_same_node_segment_is_folded() {
        let links = vec![link(10, 20, 0.5), link(20, 30, 0.5)];
        let nodes = vec![node(10, 0.0, 0.0), node(20, 2640.0, 0.0), node(30, MILE, 0.0)];
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                segment("1", 10, 20, 1.0, 25200, 25260),
                segment("1", 20, 20, 2.0, 25260, 25290),
                segment("1", 20, 30, 3.0, 25290, 25350),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &config(), 1).expect("pipeline runs");
        assert_eq!(pairs(&output), vec![(10, 20), (20, 30)]);
        assert_eq!(output.segments[0].arr_time, 25290);
        assert_eq!(output.segments[0].stop_count, 2);
        let total: f64 = output.segments.iter().map(|s| s.line_serv_time).sum();
        assert!((total - 2.5).abs() < 1e-9);
        let orders = output.segments.iter().map(|s| s.order).collect::<Vec<_>>();
        assert_eq!(orders, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_link_is_repaired_through_detour() {
        let (links, nodes) = network(false);
        let mut gap_segment = segment("1", 5, 6, 2.0, 1000, 1360);
        gap_segment.zone_fare = 0.25;
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                segment("1", 4, 5, 1.0, 820, 1000),
                gap_segment,
                segment("1", 6, 8, 3.0, 1360, 1540),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &config(), 2).expect("pipeline runs");
        assert_eq!(pairs(&output), vec![(4, 5), (5, 7), (7, 6), (6, 8)]);
        let repaired = &output.segments[1..3];
        assert!(repaired.iter().all(|s| s.imputed == Imputed::Repaired));
        assert_eq!(repaired[0].zone_fare, 0.25);
        assert_eq!(repaired[1].zone_fare, 0.25);
        let time: f64 = repaired.iter().map(|s| s.line_serv_time).sum();
        assert!((time - 6.0).abs() < 1e-9);
        assert_eq!(repaired[1].stop_count, 1);
        let orders = output.segments.iter().map(|s| s.order).collect::<Vec<_>>();
        assert_eq!(orders, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(output.failures.is_empty());
        assert_eq!(output.diagnostics.count(DiagnosticKind::ItineraryGap), 0);
        assert!(!output.routes[0].review);
        assert_eq!(output.formatted.itinerary[3].layover, 3);
    }

    #[test]
    fn test_detour_with_default_configuration() {
        let (links, nodes) = network(false);
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                segment("1", 4, 5, 1.0, 820, 1000),
                segment("1", 5, 6, 2.0, 1000, 1360),
                segment("1", 6, 8, 3.0, 1360, 1540),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &ItineraryConfig::default(), 1).expect("pipeline runs");
        assert_eq!(pairs(&output), vec![(4, 5), (5, 7), (7, 6), (6, 8)]);
        assert!(output.segments[1..3].iter().all(|s| s.imputed == Imputed::Repaired));
        assert!(output.failures.is_empty());
        assert_eq!(output.diagnostics.count(DiagnosticKind::CentroidConnector), 0);
    }

    #[test]
    fn test_untimed_feed_keeps_folded_time() {
        let links = vec![link(5010, 5020, 1.0), link(5020, 5030, 1.0)];
        let nodes = vec![node(5010, 0.0, 0.0), node(5020, MILE, 0.0), node(5030, 2.0 * MILE, 0.0)];
        let untimed = |a: i64, b: i64, order: f64, minutes: f64| RawSegmentRow {
            line_serv_time: minutes,
            ..segment("1", a, b, order, 0, 0)
        };
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                untimed(5010, 5020, 1.0, 2.0),
                untimed(5020, 5020, 2.0, 1.5),
                untimed(5020, 5030, 3.0, 2.0),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &ItineraryConfig::default(), 1).expect("pipeline runs");
        assert_eq!(pairs(&output), vec![(5010, 5020), (5020, 5030)]);
        let total: f64 = output.segments.iter().map(|s| s.line_serv_time).sum();
        assert!((total - 5.5).abs() < 1e-9);
        assert!((output.segments[0].line_serv_time - 3.5).abs() < 1e-9);
        assert_eq!(output.segments[0].stop_count, 2);
        assert_eq!(output.segments[0].arr_time, 210);
        assert_eq!(output.segments[1].dep_time, 210);
        assert_eq!(output.segments[1].arr_time, 330);
    }

    #[test]
    fn test_unreachable_pair_reported_once() {
        let (links, nodes) = network(true);
        let input = PipelineInput {
            routes: vec![route("1"), route("2")],
            segments: vec![
                segment("1", 4, 5, 1.0, 820, 1000),
                segment("1", 5, 9, 2.0, 1000, 1360),
                segment("2", 4, 5, 1.0, 820, 1000),
                segment("2", 5, 9, 2.0, 1000, 1360),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &config(), 2).expect("pipeline runs");
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.diagnostics.count(DiagnosticKind::PathNotFound), 1);
        assert_eq!(output.diagnostics.count(DiagnosticKind::IncompleteRoute), 2);
        assert!(output.routes.iter().all(|r| r.review));
        // the unrepaired segment is kept
        assert_eq!(output.segments.len(), 4);
        assert_eq!(output.formatted.itinerary[1].edge_id, None);
    }

    #[test]
    fn test_back_and_forth_collapses() {
        let (links, nodes) = network(true);
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                segment("1", 4, 5, 1.0, 700, 880),
                segment("1", 5, 4, 2.0, 880, 1060),
                segment("1", 4, 5, 3.0, 1060, 1240),
                segment("1", 5, 6, 4.0, 1240, 1420),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let output = run_pipeline(input, &config(), 1).expect("pipeline runs");
        assert_eq!(pairs(&output), vec![(4, 5), (5, 6)]);
        assert_eq!(output.segments[0].stop_count, 3);
        assert_eq!(output.segments[0].imputed, Imputed::Repaired);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let build = || {
            let (links, nodes) = network(false);
            PipelineInput {
                routes: vec![route("1"), route("2")],
                segments: vec![
                    segment("1", 4, 5, 1.0, 820, 1000),
                    segment("1", 5, 6, 2.0, 1000, 1360),
                    segment("2", 8, 6, 1.0, 820, 1000),
                    segment("2", 6, 5, 2.0, 1000, 1360),
                ],
                links,
                nodes,
                actions: vec![],
            }
        };
        let first = run_pipeline(build(), &config(), 4).expect("pipeline runs");
        let second = run_pipeline(build(), &config(), 1).expect("pipeline runs");
        assert_eq!(first.formatted.itinerary, second.formatted.itinerary);
        assert_eq!(first.formatted.path_nodes, second.formatted.path_nodes);
    }

    #[test]
    fn test_verification_report() {
        let (links, nodes) = network(false);
        let input = PipelineInput {
            routes: vec![route("1")],
            segments: vec![
                segment("1", 4, 5, 1.0, 820, 1000),
                segment("1", 5, 6, 2.0, 1000, 1360),
            ],
            links,
            nodes,
            actions: vec![],
        };
        let report = run_verification(input, &config());
        assert_eq!(report.verification.matched.len(), 1);
        assert_eq!(report.verification.gaps.len(), 1);
        assert_eq!(report.diagnostics.count(DiagnosticKind::UnmatchedSegment), 1);
    }
}
