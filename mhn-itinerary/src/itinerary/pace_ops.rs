use crate::config::{CorrectionTables, ItineraryConfig};
use crate::model::{clock, is_pace_line, ItinerarySegment, Route};
use crate::network::{distance_ops, NetworkGraph};
use itertools::Itertools;
use std::collections::HashMap;
use uom::si::f64::Length;

/// estimates a schedule for Pace routes delivered without segment timing.
///
/// only routes where every segment departs and arrives at the same clock
/// time are touched. consecutive segments sharing a time stamp form a group
/// whose span runs to the stamp of the next group. a group with a positive
/// span shares it pro-rata by straight-line segment distance. a group without
/// one (including the last group) is timed at the Pace speed. times are
/// chained from the route's first departure. input must be sorted.
pub fn apportion_pace_times(
    segments: &mut [ItinerarySegment],
    graph: &NetworkGraph,
    config: &ItineraryConfig,
) {
    let mut estimated = 0;
    let mut start = 0;
    while start < segments.len() {
        let end = start
            + segments[start..]
                .iter()
                .take_while(|s| s.line == segments[start].line)
                .count();
        let route = &mut segments[start..end];
        start = end;
        if !is_pace_line(&route[0].line) || !route.iter().all(|s| s.dep_time == s.arr_time) {
            continue;
        }
        estimate_route_times(route, graph, config.pace_speed_mph);
        estimated += 1;
    }
    if estimated > 0 {
        log::info!("estimated travel times for {estimated} untimed Pace routes");
    }
}

fn estimate_route_times(route: &mut [ItinerarySegment], graph: &NetworkGraph, speed_mph: f64) {
    let miles = route
        .iter()
        .map(|s| graph.node_distance_miles(&s.itin_a, &s.itin_b).unwrap_or(0.0))
        .collect_vec();
    let stamps = route.iter().map(|s| s.dep_time).collect_vec();
    let groups = (0..route.len())
        .chunk_by(|i| stamps[*i])
        .into_iter()
        .map(|(stamp, group)| (stamp, group.collect_vec()))
        .collect_vec();

    let mut cursor = stamps[0];
    for (g, (stamp, members)) in groups.iter().enumerate() {
        let span = groups
            .get(g + 1)
            .map(|(next, _)| next - stamp)
            .filter(|s| *s > 0);
        let seconds: Vec<i64> = match span {
            Some(span) => prorate(span, &members.iter().map(|i| miles[*i]).collect_vec()),
            None => members
                .iter()
                .map(|i| {
                    let distance = Length::new::<uom::si::length::mile>(miles[*i]);
                    distance_ops::travel_seconds(distance, speed_mph).round() as i64
                })
                .collect(),
        };
        for (i, secs) in members.iter().zip(seconds) {
            let segment = &mut route[*i];
            segment.dep_time = cursor;
            segment.arr_time = cursor + secs;
            segment.line_serv_time = clock::travel_minutes(secs as f64);
            cursor = segment.arr_time;
        }
    }
}

/// divides `span` units by weight using largest remainders: every share is
/// floored, then the leftover units go one each to the shares with the
/// largest fractional parts, lower index first on ties. shares sum to `span`
/// and are never negative for a non-negative span. equal shares are used
/// when every weight is zero.
pub fn prorate(span: i64, weights: &[f64]) -> Vec<i64> {
    let n = weights.len();
    if n == 0 {
        return vec![];
    }
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    let exact = weights
        .iter()
        .map(|w| {
            let fraction = if total > 0.0 {
                w.max(0.0) / total
            } else {
                1.0 / n as f64
            };
            span as f64 * fraction
        })
        .collect_vec();
    let mut shares = exact.iter().map(|e| e.floor() as i64).collect_vec();
    let by_remainder = (0..n)
        .sorted_by(|a, b| {
            let ra = exact[*a] - exact[*a].floor();
            let rb = exact[*b] - exact[*b].floor();
            rb.total_cmp(&ra).then_with(|| a.cmp(b))
        })
        .collect_vec();

    let mut leftover = span - shares.iter().sum::<i64>();
    // float error may overshoot by a unit, taken back from the smallest
    // remainders
    for i in by_remainder.iter().rev() {
        if leftover >= 0 {
            break;
        }
        if shares[*i] > 0 {
            shares[*i] -= 1;
            leftover += 1;
        }
    }
    for i in by_remainder.iter().cycle().take(leftover.max(0) as usize) {
        shares[*i] += 1;
    }
    shares
}

/// sets the zone fare of the first segment of every route listed in the
/// Pace fare table. input must be sorted.
pub fn apply_pace_fares(
    segments: &mut [ItinerarySegment],
    routes: &[Route],
    tables: &CorrectionTables,
) {
    let fares = tables.pace_fare_lookup();
    if fares.is_empty() {
        return;
    }
    let by_line: HashMap<&str, f64> = routes
        .iter()
        .filter_map(|r| {
            fares
                .get(&(r.mode, r.route_id.as_str()))
                .map(|fare| (r.line.as_str(), *fare))
        })
        .collect();
    let mut previous: Option<String> = None;
    let mut applied = 0;
    for segment in segments.iter_mut() {
        if previous.as_deref() == Some(segment.line.as_str()) {
            continue;
        }
        previous = Some(segment.line.clone());
        if let Some(fare) = by_line.get(segment.line.as_str()) {
            segment.zone_fare = *fare;
            applied += 1;
        }
    }
    log::info!("applied Pace zone fares to {applied} routes");
}
