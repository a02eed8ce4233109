use super::{AllowableLinkRow, ItineraryRow, PathNodeRow, RouteHeaderRow};
use crate::config::ItineraryConfig;
use crate::model::{clock, ItinerarySegment, Route};
use crate::network::NetworkGraph;
use crate::splice::measure_ops;
use std::collections::{BTreeMap, HashMap};

/// all tabular outputs of a run except the diagnostics.
#[derive(Debug, Clone, Default)]
pub struct FormattedOutput {
    pub itinerary: Vec<ItineraryRow>,
    pub path_nodes: Vec<PathNodeRow>,
    pub route_headers: Vec<RouteHeaderRow>,
    pub allowable_links: Vec<AllowableLinkRow>,
}

/// builds the output rows from the final routes and itinerary. segments must
/// be sorted and finalized.
pub fn format_outputs(
    routes: &[Route],
    segments: &[ItinerarySegment],
    graph: &NetworkGraph,
    config: &ItineraryConfig,
) -> FormattedOutput {
    let route_lookup: HashMap<&str, &Route> = routes.iter().map(|r| (r.line.as_str(), r)).collect();
    let measures = measure_ops::route_measures(segments, graph);

    let mut output = FormattedOutput::default();
    let mut allowable: BTreeMap<i64, AllowableLinkRow> = BTreeMap::new();
    let mut counts: HashMap<&str, (usize, u32)> = HashMap::new();

    for (idx, segment) in segments.iter().enumerate() {
        let Some(route) = route_lookup.get(segment.line.as_str()) else {
            log::warn!("segment of unknown route {} left out of the output", segment.line);
            continue;
        };
        let is_last = segments
            .get(idx + 1)
            .map(|next| next.line != segment.line)
            .unwrap_or(true);
        let is_first = idx == 0 || segments[idx - 1].line != segment.line;
        let (f_meas, t_meas) = measures.get(idx).copied().unwrap_or((0.0, 0.0));
        let canonical = graph.canonical_link(&segment.itin_a, &segment.itin_b);
        let edge_id = canonical.map(|l| l.edge_id());
        if let Some(link) = canonical {
            allowable.entry(link.edge_id()).or_insert(AllowableLinkRow {
                edge_id: link.edge_id(),
                anode: link.anode,
                bnode: link.bnode,
                forward: 1,
                backward: u8::from(link.directionality.is_two_way()),
            });
        }
        let entry = counts.entry(segment.line.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += segment.stop_count;

        output.itinerary.push(ItineraryRow {
            line: segment.line.clone(),
            itin_a: segment.itin_a,
            itin_b: segment.itin_b,
            layover: if is_last { config.layover_sentinel } else { 0 },
            dwell_code: segment.dwell_code,
            zone_fare: segment.zone_fare,
            line_serv_time: segment.line_serv_time,
            ttf: segment.ttf,
            itin_order: segment.order as usize,
            route_sequence: route.sequence,
            row_index: output.itinerary.len() + 1,
            edge_id,
            batch: route.batch,
            dep_time: segment.dep_time,
            arr_time: segment.arr_time,
            stop_count: segment.stop_count,
            imputed: segment.imputed,
            f_meas,
            t_meas,
        });

        if is_first {
            output.path_nodes.push(PathNodeRow {
                line: segment.line.clone(),
                node: segment.itin_a,
                rank: 1,
                batch: route.batch,
            });
        }
        let rank = output.path_nodes.last().map(|p| p.rank + 1).unwrap_or(1);
        output.path_nodes.push(PathNodeRow {
            line: segment.line.clone(),
            node: segment.itin_b,
            rank,
            batch: route.batch,
        });
    }

    output.route_headers = routes
        .iter()
        .filter_map(|route| {
            let (segment_count, stop_count) = counts.get(route.line.as_str()).copied()?;
            Some(RouteHeaderRow {
                line: route.line.clone(),
                description: route.description.clone(),
                mode: route.mode,
                type_code: route.mode.type_code(),
                headway: route.headway,
                speed: route.speed,
                segment_count,
                stop_count,
                batch: route.batch,
                route_id: route.route_id.clone(),
                long_name: route.long_name.clone(),
                direction: route.direction.clone(),
                terminal: route.terminal.clone(),
                start_time: route.start_time.and_then(clock::format_clock),
                start_hour: route.start_hour(),
                am_share: route.am_share,
                tod: route.tod_period(),
                review: u8::from(route.review),
                vehicle: route.vehicle.clone(),
            })
        })
        .collect();
    output.allowable_links = allowable.into_values().collect();
    output
}
