use crate::model::{
    sort_segments, Diagnostic, DiagnosticKind, Diagnostics, Imputed, ItinerarySegment,
    RawSegmentRow, Route,
};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// joins raw segments to their routes on the external route id.
///
/// segments without a route, and segments with a missing or non-positive
/// node id, are dropped and reported. routes left without any segment are
/// dropped and reported as orphans. returned segments are sorted and their
/// orders renumbered 1..N per route.
pub fn merge_segments(
    routes: Vec<Route>,
    rows: Vec<RawSegmentRow>,
    diagnostics: &mut Diagnostics,
) -> (Vec<Route>, Vec<ItinerarySegment>) {
    let lines: HashMap<String, String> = routes
        .iter()
        .map(|r| (r.route_id.clone(), r.line.clone()))
        .collect();

    let mut segments: Vec<ItinerarySegment> = Vec::with_capacity(rows.len());
    for row in rows.into_iter() {
        let route_id = row.route_id.trim();
        let Some(line) = lines.get(route_id) else {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::OrphanSegment,
                    format!("segment {} references an unknown route", row.order),
                )
                .with_route_id(route_id),
            );
            continue;
        };
        let (itin_a, itin_b) = match (row.itin_a, row.itin_b) {
            (Some(a), Some(b)) if a.is_valid() && b.is_valid() => (a, b),
            (a, b) => {
                let mut diagnostic = Diagnostic::new(
                    DiagnosticKind::BadItineraryCoding,
                    format!(
                        "segment {} is coded with nodes ({}, {})",
                        row.order,
                        a.map(|n| n.to_string()).unwrap_or_default(),
                        b.map(|n| n.to_string()).unwrap_or_default()
                    ),
                )
                .with_line(line)
                .with_route_id(route_id);
                diagnostic.itin_a = a;
                diagnostic.itin_b = b;
                diagnostics.push(diagnostic);
                continue;
            }
        };
        segments.push(ItinerarySegment {
            line: line.clone(),
            order: row.order,
            itin_a,
            itin_b,
            dwell_code: row.dwell_code,
            zone_fare: row.zone_fare,
            line_serv_time: row.line_serv_time,
            ttf: row.ttf,
            dep_time: row.dep_time,
            arr_time: row.arr_time,
            stop_count: row.stop_count,
            imputed: Imputed::Original,
        });
    }

    renumber_orders(&mut segments);
    let routes = retain_routes_with_segments(routes, &segments, diagnostics);
    log::info!(
        "merged {} segments onto {} routes",
        segments.len(),
        routes.len()
    );
    (routes, segments)
}

/// drops routes that no longer own a segment, reporting each as an orphan.
pub fn retain_routes_with_segments(
    routes: Vec<Route>,
    segments: &[ItinerarySegment],
    diagnostics: &mut Diagnostics,
) -> Vec<Route> {
    let present: HashSet<&str> = segments.iter().map(|s| s.line.as_str()).collect();
    let (kept, dropped): (Vec<Route>, Vec<Route>) = routes
        .into_iter()
        .partition(|r| present.contains(r.line.as_str()));
    for route in dropped.iter() {
        diagnostics.push(
            Diagnostic::new(DiagnosticKind::OrphanRoute, "route has no itinerary segments")
                .with_line(&route.line)
                .with_route_id(&route.route_id),
        );
    }
    kept
}

/// removes routes coded as a single segment from a node to itself.
pub fn remove_degenerate_routes(
    routes: Vec<Route>,
    segments: Vec<ItinerarySegment>,
    diagnostics: &mut Diagnostics,
) -> (Vec<Route>, Vec<ItinerarySegment>) {
    let degenerate: HashSet<String> = segments
        .iter()
        .chunk_by(|s| s.line.clone())
        .into_iter()
        .filter_map(|(line, group)| {
            let group = group.collect_vec();
            match group.as_slice() {
                [only] if only.is_same_node() => Some(line),
                _ => None,
            }
        })
        .collect();
    if degenerate.is_empty() {
        return (routes, segments);
    }

    let (routes, dropped): (Vec<Route>, Vec<Route>) = routes
        .into_iter()
        .partition(|r| !degenerate.contains(&r.line));
    for route in dropped.iter() {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::DegenerateRoute,
                "route is a single segment from a node to itself",
            )
            .with_line(&route.line)
            .with_route_id(&route.route_id),
        );
    }
    let segments = segments
        .into_iter()
        .filter(|s| !degenerate.contains(&s.line))
        .collect();
    (routes, segments)
}

/// sorts segments and assigns orders 1..N per route, restarting the counter
/// whenever the route changes.
pub fn renumber_orders(segments: &mut [ItinerarySegment]) {
    sort_segments(segments);
    let mut previous: Option<String> = None;
    let mut counter = 0;
    for segment in segments.iter_mut() {
        if previous.as_deref() == Some(segment.line.as_str()) {
            counter += 1;
        } else {
            counter = 1;
            previous = Some(segment.line.clone());
        }
        segment.order = counter as f64;
    }
}
