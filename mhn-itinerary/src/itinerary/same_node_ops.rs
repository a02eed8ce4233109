use crate::model::{Diagnostic, DiagnosticKind, Diagnostics, ItinerarySegment};
use itertools::Itertools;

/// attributes of a same-node segment waiting to be folded into the next
/// segment of its route.
#[derive(Debug, Clone, Copy)]
struct Carry {
    line_serv_time: f64,
    stop_count: u32,
    dep_time: i64,
    dwell_code: i32,
    ttf: i32,
    zone_fare: f64,
}

impl Carry {
    fn from_segment(segment: &ItinerarySegment) -> Carry {
        Carry {
            line_serv_time: segment.line_serv_time,
            stop_count: segment.stop_count,
            dep_time: segment.dep_time,
            dwell_code: segment.dwell_code,
            ttf: segment.ttf,
            zone_fare: segment.zone_fare,
        }
    }

    fn absorb(&mut self, segment: &ItinerarySegment) {
        self.line_serv_time += segment.line_serv_time;
        self.stop_count += segment.stop_count;
        self.dwell_code = self.dwell_code.max(segment.dwell_code);
        self.ttf = self.ttf.max(segment.ttf);
        self.zone_fare = self.zone_fare.max(segment.zone_fare);
    }
}

/// folds the travel time and stops of a same-node segment into the segment
/// that precedes it.
fn fold_into_previous(previous: &mut ItinerarySegment, degenerate: &ItinerarySegment) {
    previous.line_serv_time += degenerate.line_serv_time;
    previous.stop_count += degenerate.stop_count;
    previous.arr_time = previous.arr_time.max(degenerate.arr_time);
    previous.dwell_code = previous.dwell_code.max(degenerate.dwell_code);
    previous.ttf = previous.ttf.max(degenerate.ttf);
    previous.zone_fare = previous.zone_fare.max(degenerate.zone_fare);
}

/// removes segments that start and end at the same node.
///
/// the removed segment's travel time and stop count are added to the
/// preceding segment of the route, extending its arrival. same-node segments
/// at the start of a route are folded into the first segment that moves,
/// pulling its departure back. routes that never move are dropped and
/// reported. input must be sorted by route and order.
pub fn repair_same_node_segments(
    segments: Vec<ItinerarySegment>,
    diagnostics: &mut Diagnostics,
) -> Vec<ItinerarySegment> {
    let mut result: Vec<ItinerarySegment> = Vec::with_capacity(segments.len());
    let mut repaired = 0;
    for (line, group) in segments.into_iter().chunk_by(|s| s.line.clone()).into_iter() {
        let mut route: Vec<ItinerarySegment> = vec![];
        let mut carry: Option<Carry> = None;
        for segment in group {
            if segment.is_same_node() {
                repaired += 1;
                if let Some(previous) = route.last_mut() {
                    fold_into_previous(previous, &segment);
                } else if let Some(c) = carry.as_mut() {
                    c.absorb(&segment);
                } else {
                    carry = Some(Carry::from_segment(&segment));
                }
                continue;
            }
            let mut segment = segment;
            if let Some(c) = carry.take() {
                segment.line_serv_time += c.line_serv_time;
                segment.stop_count += c.stop_count;
                segment.dep_time = segment.dep_time.min(c.dep_time);
                segment.dwell_code = segment.dwell_code.max(c.dwell_code);
                segment.ttf = segment.ttf.max(c.ttf);
                segment.zone_fare = segment.zone_fare.max(c.zone_fare);
            }
            route.push(segment);
        }
        if route.is_empty() {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::DegenerateRoute,
                    "every segment of the route starts and ends at the same node",
                )
                .with_line(&line),
            );
            continue;
        }
        result.extend(route);
    }
    if repaired > 0 {
        log::info!("folded {repaired} same-node segments into adjacent segments");
    }
    result
}
