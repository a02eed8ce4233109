use crate::model::{clock, Imputed, ItinerarySegment, NodeId};
use itertools::Itertools;
use std::collections::HashSet;

/// collapses spurious back-and-forth travel on a single link.
///
/// in a route where an undirected node pair is traversed more than once, a
/// maximal run alternating (a,b),(b,a),(a,b).. of odd length three or more
/// is replaced with a single (a,b) segment. even-length runs return to their
/// starting node and are left untouched. input must be sorted.
pub fn collapse_back_and_forth(segments: Vec<ItinerarySegment>) -> Vec<ItinerarySegment> {
    let mut result = Vec::with_capacity(segments.len());
    let mut collapsed = 0;
    for (_, group) in segments.into_iter().chunk_by(|s| s.line.clone()).into_iter() {
        let route = group.collect_vec();
        if !has_repeated_link(&route) {
            result.extend(route);
            continue;
        }
        let mut start = 0;
        while start < route.len() {
            let mut end = start;
            while end + 1 < route.len() && route[end + 1].reverses(&route[end]) {
                end += 1;
            }
            let run = &route[start..=end];
            if run.len() >= 3 && run.len() % 2 == 1 {
                collapsed += 1;
                result.push(collapse_run(run));
            } else {
                result.extend(run.iter().cloned());
            }
            start = end + 1;
        }
    }
    if collapsed > 0 {
        log::info!("collapsed {collapsed} back-and-forth runs");
    }
    result
}

fn has_repeated_link(route: &[ItinerarySegment]) -> bool {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
    route.iter().any(|s| {
        let key = (s.itin_a.min(s.itin_b), s.itin_a.max(s.itin_b));
        !seen.insert(key)
    })
}

fn collapse_run(run: &[ItinerarySegment]) -> ItinerarySegment {
    let first = &run[0];
    let last = &run[run.len() - 1];
    let elapsed = last.arr_time - first.dep_time;
    let line_serv_time = if elapsed > 0 {
        clock::travel_minutes(elapsed as f64)
    } else {
        run.iter().map(|s| s.line_serv_time).sum()
    };
    ItinerarySegment {
        line: first.line.clone(),
        order: first.order,
        itin_a: first.itin_a,
        itin_b: first.itin_b,
        dwell_code: run.iter().map(|s| s.dwell_code).max().unwrap_or(first.dwell_code),
        zone_fare: run.iter().map(|s| s.zone_fare).fold(f64::MIN, f64::max),
        line_serv_time,
        ttf: run.iter().map(|s| s.ttf).max().unwrap_or(first.ttf),
        dep_time: first.dep_time,
        arr_time: last.arr_time,
        stop_count: run.iter().map(|s| s.stop_count).sum(),
        imputed: Imputed::Repaired,
    }
}
