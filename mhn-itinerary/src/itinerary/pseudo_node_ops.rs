use crate::config::CorrectionTables;
use crate::model::{clock, Imputed, ItinerarySegment, NodeId, Route};
use std::collections::HashMap;

/// splits a segment into `nodes.len() + 1` sub-segments routed through the
/// given intermediate nodes.
///
/// each sub-segment receives the travel time divided evenly and rounded to
/// 0.1 minute, so the split total may drift from the original by up to
/// 0.05 per sub-segment. stops are divided evenly with the remainder on the
/// last sub-segment. clock times are interpolated linearly and the zone fare
/// stays on the first sub-segment.
pub fn split_segment(segment: &ItinerarySegment, nodes: &[NodeId]) -> Vec<ItinerarySegment> {
    if nodes.is_empty() {
        return vec![segment.clone()];
    }
    let k = nodes.len() + 1;
    let chain: Vec<NodeId> = std::iter::once(segment.itin_a)
        .chain(nodes.iter().copied())
        .chain(std::iter::once(segment.itin_b))
        .collect();
    let time = clock::round_to_tenth(segment.line_serv_time / k as f64);
    let base_stops = segment.stop_count / k as u32;
    let span = segment.arr_time - segment.dep_time;
    let clock_at = |i: usize| -> i64 {
        segment.dep_time + ((span * i as i64) as f64 / k as f64).round() as i64
    };

    chain
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let is_last = i == k - 1;
            let stop_count = if is_last {
                segment.stop_count - base_stops * (k as u32 - 1)
            } else {
                base_stops
            };
            ItinerarySegment {
                line: segment.line.clone(),
                order: segment.order + i as f64 / k as f64,
                itin_a: pair[0],
                itin_b: pair[1],
                dwell_code: segment.dwell_code,
                zone_fare: if i == 0 { segment.zone_fare } else { 0.0 },
                line_serv_time: time,
                ttf: segment.ttf,
                dep_time: clock_at(i),
                arr_time: if is_last { segment.arr_time } else { clock_at(i + 1) },
                stop_count,
                imputed: segment.imputed.max(Imputed::PseudoNode),
            }
        })
        .collect()
}

/// applies the pseudo-node correction table, splitting every segment whose
/// (mode, route id, itin_a, itin_b) is listed.
pub fn insert_pseudo_nodes(
    segments: Vec<ItinerarySegment>,
    routes: &[Route],
    tables: &CorrectionTables,
) -> Vec<ItinerarySegment> {
    let lookup = tables.pseudo_node_lookup();
    if lookup.is_empty() {
        return segments;
    }
    let route_keys: HashMap<&str, &Route> = routes.iter().map(|r| (r.line.as_str(), r)).collect();
    let mut split_count = 0;
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments.into_iter() {
        let nodes = route_keys.get(segment.line.as_str()).and_then(|route| {
            lookup
                .get(&(route.mode, route.route_id.as_str(), segment.itin_a, segment.itin_b))
                .copied()
        });
        match nodes {
            Some(nodes) => {
                split_count += 1;
                result.extend(split_segment(&segment, nodes));
            }
            None => result.push(segment),
        }
    }
    log::info!("split {split_count} segments through pseudo-nodes");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PseudoNodeCorrection;
    use crate::itinerary::merge_ops::tests::test_route;
    use crate::model::TransitMode;

    fn segment(time: f64, stops: u32) -> ItinerarySegment {
        ItinerarySegment {
            line: String::from("p00001"),
            order: 4.0,
            itin_a: NodeId(100),
            itin_b: NodeId(200),
            dwell_code: 0,
            zone_fare: 0.75,
            line_serv_time: time,
            ttf: 1,
            dep_time: 1000,
            arr_time: 1300,
            stop_count: stops,
            imputed: Imputed::Original,
        }
    }

    #[test]
    fn test_two_way_split() {
        let parts = split_segment(&segment(2.5, 3), &[NodeId(150)]);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].node_pair(), (NodeId(100), NodeId(150)));
        assert_eq!(parts[1].node_pair(), (NodeId(150), NodeId(200)));
        assert_eq!(parts[0].order, 4.0);
        assert_eq!(parts[1].order, 4.5);
        assert_eq!(parts[0].arr_time, 1150);
        assert_eq!(parts[1].dep_time, 1150);
        assert_eq!(parts[1].arr_time, 1300);
        assert_eq!(parts[0].zone_fare, 0.75);
        assert_eq!(parts[1].zone_fare, 0.0);
        assert_eq!(parts[0].stop_count + parts[1].stop_count, 3);
        assert_eq!(parts[1].stop_count, 2);
        assert!(parts.iter().all(|p| p.imputed == Imputed::PseudoNode));
        // each half rounds 1.25 up to 1.3, within the rounding tolerance
        let total: f64 = parts.iter().map(|p| p.line_serv_time).sum();
        assert!((total - 2.5).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn test_three_way_split_orders() {
        let parts = split_segment(&segment(3.0, 1), &[NodeId(120), NodeId(160)]);
        let orders = parts.iter().map(|p| p.order).collect::<Vec<_>>();
        assert_eq!(orders.len(), 3);
        assert!((orders[1] - (4.0 + 1.0 / 3.0)).abs() < 1e-9);
        assert!((orders[2] - (4.0 + 2.0 / 3.0)).abs() < 1e-9);
        assert_eq!(parts.iter().map(|p| p.stop_count).collect::<Vec<_>>(), vec![0, 0, 1]);
        assert_eq!(parts[2].itin_b, NodeId(200));
    }

    #[test]
    fn test_table_lookup_matches_mode_and_route() {
        let mut route = test_route("p00001", "208");
        route.mode = TransitMode::Pace;
        let tables = CorrectionTables {
            version: None,
            pseudo_nodes: vec![PseudoNodeCorrection {
                mode: TransitMode::Pace,
                route_id: String::from("208"),
                itin_a: NodeId(100),
                itin_b: NodeId(200),
                nodes: vec![NodeId(150)],
            }],
            pace_fares: vec![],
        };
        let mut other = segment(1.0, 1);
        other.itin_a = NodeId(200);
        other.itin_b = NodeId(300);
        other.order = 5.0;
        let result = insert_pseudo_nodes(vec![segment(2.0, 1), other], &[route], &tables);
        assert_eq!(result.len(), 3);
        assert_eq!(result[2].imputed, Imputed::Original);
    }
}
