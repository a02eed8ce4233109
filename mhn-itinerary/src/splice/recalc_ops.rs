use crate::model::{
    clock, Diagnostic, DiagnosticKind, Diagnostics, ItinerarySegment, Route,
};
use crate::route::route_ops::headway_for_start_hour;
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};

/// share of a route's segments running entirely inside the AM peak,
/// rounded to two decimals.
pub fn am_share(route: &[ItinerarySegment]) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let in_peak = route
        .iter()
        .filter(|s| s.dep_time >= clock::AM_PEAK_START && s.arr_time <= clock::AM_PEAK_END)
        .count();
    clock::round_to_hundredth(in_peak as f64 / route.len() as f64)
}

/// earliest non-zero clock time of the first segment. zero is the feed's
/// marker for a missing time.
pub fn route_start_time(first: &ItinerarySegment) -> Option<i64> {
    [first.dep_time, first.arr_time]
        .into_iter()
        .filter(|t| *t != 0)
        .min()
}

/// refreshes the start time, headway, AM share and review flag of every
/// route from its final itinerary. input segments must be sorted.
pub fn recalculate_routes(
    routes: Vec<Route>,
    segments: &[ItinerarySegment],
    incomplete_lines: &BTreeSet<String>,
) -> Vec<Route> {
    let mut by_line: HashMap<&str, &[ItinerarySegment]> = HashMap::new();
    let mut start = 0;
    while start < segments.len() {
        let line = segments[start].line.as_str();
        let len = segments[start..].iter().take_while(|s| s.line == line).count();
        by_line.insert(line, &segments[start..start + len]);
        start += len;
    }
    routes
        .into_iter()
        .map(|mut route| {
            if let Some(itinerary) = by_line.get(route.line.as_str()) {
                route.start_time = itinerary.first().and_then(route_start_time);
                route.am_share = am_share(itinerary);
            }
            route.headway = headway_for_start_hour(route.start_hour());
            route.review = incomplete_lines.contains(&route.line);
            route
        })
        .collect()
}

/// reports every place a route's itinerary does not continue from the node
/// where the previous segment ended.
pub fn report_itinerary_breaks(segments: &[ItinerarySegment], diagnostics: &mut Diagnostics) {
    let breaks = segments
        .iter()
        .tuple_windows()
        .filter(|(prev, next)| prev.line == next.line && !prev.continues_into(next))
        .collect_vec();
    for (prev, next) in breaks.iter() {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::ItineraryGap,
                format!(
                    "segment {} ends at {} but segment {} starts at {}",
                    prev.order, prev.itin_b, next.order, next.itin_a
                ),
            )
            .with_line(&next.line)
            .with_nodes(prev.itin_b, next.itin_a),
        );
    }
}
