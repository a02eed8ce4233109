use crate::itinerary::pace_ops::prorate;
use crate::model::{
    clock, sort_segments, Diagnostic, DiagnosticKind, Diagnostics, Imputed, ItinerarySegment,
    NodeId, RepairGap,
};
use crate::network::NetworkGraph;
use crate::repair::RepairOutcome;
use itertools::Itertools;
use std::collections::BTreeSet;

/// itinerary after replacement paths have been spliced in.
#[derive(Debug, Clone, Default)]
pub struct SpliceResult {
    /// all segments, sorted by route and order
    pub segments: Vec<ItinerarySegment>,
    /// routes left with at least one unrepaired gap
    pub incomplete_lines: BTreeSet<String>,
}

/// replaces every gap that has a path with one segment per path link.
/// gaps without a path get their original segments back and their route is
/// reported incomplete.
pub fn splice_paths(
    matched: Vec<ItinerarySegment>,
    gaps: Vec<RepairGap>,
    outcome: &RepairOutcome,
    graph: &NetworkGraph,
    diagnostics: &mut Diagnostics,
) -> SpliceResult {
    let mut result = SpliceResult {
        segments: matched,
        incomplete_lines: BTreeSet::new(),
    };
    let mut spliced = 0;
    for gap in gaps.into_iter() {
        match outcome.path(&gap.od()) {
            Some(path) => {
                spliced += 1;
                result.segments.extend(expand_gap(&gap, path, graph));
            }
            None => {
                result.incomplete_lines.insert(gap.line.clone());
                result.segments.extend(gap.excised);
            }
        }
    }
    for line in result.incomplete_lines.iter() {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::IncompleteRoute,
                "route keeps segments that could not be matched to the network",
            )
            .with_line(line),
        );
    }
    sort_segments(&mut result.segments);
    log::info!(
        "spliced {} paths, {} routes incomplete",
        spliced,
        result.incomplete_lines.len()
    );
    result
}

/// expands a gap along `path` into one segment per consecutive node pair.
///
/// every new segment carries the gap's dwell code, ttf and zone fare, so
/// their maxima over the new segments equal the gap's. the stop count goes
/// on the last segment. the gap's wall-clock
/// span is split in proportion to link miles, or its summed travel time when
/// the span is zero. a single-node path yields one same-node segment holding
/// all of the gap's attributes.
pub fn expand_gap(gap: &RepairGap, path: &[NodeId], graph: &NetworkGraph) -> Vec<ItinerarySegment> {
    let pairs = match path {
        [] => return gap.excised.clone(),
        [only] => vec![(*only, *only)],
        _ => path.iter().copied().tuple_windows::<(_, _)>().collect_vec(),
    };
    let n = pairs.len();
    let miles = pairs
        .iter()
        .map(|(a, b)| graph.link_miles(a, b).unwrap_or(0.0))
        .collect_vec();

    let elapsed = gap.elapsed_seconds();
    let (seconds, minutes): (Vec<i64>, Vec<f64>) = if elapsed > 0 {
        let seconds = prorate(elapsed, &miles);
        let minutes = seconds
            .iter()
            .map(|s| clock::travel_minutes(*s as f64))
            .collect();
        (seconds, minutes)
    } else {
        let tenths = (gap.line_serv_time * 10.0).round() as i64;
        let minutes = prorate(tenths, &miles)
            .into_iter()
            .map(|t| t as f64 / 10.0)
            .collect();
        (vec![0; n], minutes)
    };

    let mut cursor = gap.dep_time;
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| {
            let dep_time = cursor;
            cursor += seconds[i];
            let is_last = i == n - 1;
            ItinerarySegment {
                line: gap.line.clone(),
                order: gap.order + i as f64 / n as f64,
                itin_a: a,
                itin_b: b,
                dwell_code: gap.dwell_code,
                zone_fare: gap.zone_fare,
                line_serv_time: minutes[i],
                ttf: gap.ttf,
                dep_time,
                arr_time: if is_last { gap.arr_time.max(cursor) } else { cursor },
                stop_count: if is_last { gap.stop_count } else { 0 },
                imputed: Imputed::Repaired,
            }
        })
        .collect()
}
