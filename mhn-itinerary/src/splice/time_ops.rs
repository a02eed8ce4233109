use crate::config::ItineraryConfig;
use crate::model::{clock, Diagnostic, DiagnosticKind, Diagnostics, ItinerarySegment};
use crate::network::{distance_ops, NetworkGraph};
use uom::si::f64::Length;

/// network length of a segment, falling back to the straight-line distance
/// between its nodes.
fn segment_miles(segment: &ItinerarySegment, graph: &NetworkGraph) -> f64 {
    graph
        .link_miles(&segment.itin_a, &segment.itin_b)
        .or_else(|| graph.node_distance_miles(&segment.itin_a, &segment.itin_b))
        .unwrap_or(0.0)
}

/// walks each route in order making departure and arrival times consistent.
///
/// a departure earlier than the previous arrival is pushed forward to it,
/// and the arrival with it if needed. a segment that departs and arrives at
/// the same time keeps a positive travel time and has its arrival extended by
/// it; without one it is re-timed at the Pace speed over its link length.
/// segments
/// whose travel time is non-positive, or implies a speed above the
/// questionable threshold, are reported. input must be sorted.
pub fn validate_itinerary_times(
    segments: &mut [ItinerarySegment],
    graph: &NetworkGraph,
    config: &ItineraryConfig,
    diagnostics: &mut Diagnostics,
) {
    let mut previous: Option<(String, i64)> = None;
    let mut retimed = 0;
    for segment in segments.iter_mut() {
        let miles = segment_miles(segment, graph);
        if let Some((line, prev_arr)) = previous.as_ref() {
            if *line == segment.line && segment.dep_time < *prev_arr {
                segment.dep_time = *prev_arr;
                segment.arr_time = segment.arr_time.max(segment.dep_time);
            }
        }
        if segment.dep_time == segment.arr_time {
            if segment.line_serv_time > 0.0 {
                let seconds = (segment.line_serv_time * clock::SECONDS_PER_MINUTE).round();
                segment.arr_time += seconds as i64;
            } else {
                let distance = Length::new::<uom::si::length::mile>(miles);
                let estimate = distance_ops::travel_seconds(distance, config.pace_speed_mph).round();
                segment.arr_time += estimate as i64;
                segment.line_serv_time = clock::travel_minutes(estimate);
                retimed += 1;
            }
        }
        report_questionable_time(segment, miles, config.questionable_speed_mph, diagnostics);
        previous = Some((segment.line.clone(), segment.arr_time));
    }
    if retimed > 0 {
        log::info!("re-estimated travel time for {retimed} segments at {} mph", config.pace_speed_mph);
    }
}

fn report_questionable_time(
    segment: &ItinerarySegment,
    miles: f64,
    threshold_mph: f64,
    diagnostics: &mut Diagnostics,
) {
    let message = if segment.line_serv_time <= 0.0 {
        Some(format!(
            "segment {} has travel time {}",
            segment.order, segment.line_serv_time
        ))
    } else {
        let mph = miles / (segment.line_serv_time / 60.0);
        (mph > threshold_mph).then(|| {
            format!(
                "segment {} covers {:.2} miles in {} minutes ({:.1} mph)",
                segment.order, miles, segment.line_serv_time, mph
            )
        })
    };
    if let Some(message) = message {
        diagnostics.push(
            Diagnostic::new(DiagnosticKind::QuestionableLineTime, message)
                .with_line(&segment.line)
                .with_nodes(segment.itin_a, segment.itin_b),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Imputed, NodeId};
    use crate::network::test_graph;

    fn segment(a: i64, b: i64, order: f64, dep: i64, arr: i64, time: f64) -> ItinerarySegment {
        ItinerarySegment {
            line: String::from("b00001"),
            order,
            itin_a: NodeId(a),
            itin_b: NodeId(b),
            dwell_code: 0,
            zone_fare: 0.0,
            line_serv_time: time,
            ttf: 0,
            dep_time: dep,
            arr_time: arr,
            stop_count: 1,
            imputed: Imputed::Original,
        }
    }

    fn graph() -> NetworkGraph {
        test_graph(
            &[(1, 2, true, 1.0), (2, 3, true, 1.0), (3, 4, true, 0.5)],
            &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 3.0, 0.0)],
        )
    }

    #[test]
    fn test_departure_pushed_to_previous_arrival() {
        let mut segments = vec![
            segment(1, 2, 1.0, 1000, 1200, 3.3),
            segment(2, 3, 2.0, 1100, 1150, 2.0),
        ];
        let mut diagnostics = Diagnostics::default();
        validate_itinerary_times(&mut segments, &graph(), &ItineraryConfig::default(), &mut diagnostics);
        assert_eq!(segments[1].dep_time, 1200);
        // arrival caught up with the pushed departure and was extended by
        // the scheduled travel time
        assert_eq!(segments[1].arr_time, 1320);
        assert_eq!(segments[1].line_serv_time, 2.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_untimed_segment_at_thirty_mph() {
        let mut segments = vec![segment(3, 4, 1.0, 5000, 5000, 0.0)];
        let mut diagnostics = Diagnostics::default();
        validate_itinerary_times(&mut segments, &graph(), &ItineraryConfig::default(), &mut diagnostics);
        assert_eq!(segments[0].arr_time, 5060);
        assert_eq!(segments[0].line_serv_time, 1.0);
    }

    #[test]
    fn test_untimed_segment_keeps_travel_time() {
        let mut segments = vec![
            segment(1, 2, 1.0, 0, 0, 3.5),
            segment(2, 3, 2.0, 0, 0, 2.0),
        ];
        let mut diagnostics = Diagnostics::default();
        validate_itinerary_times(&mut segments, &graph(), &ItineraryConfig::default(), &mut diagnostics);
        assert_eq!(segments[0].arr_time, 210);
        assert_eq!(segments[0].line_serv_time, 3.5);
        assert_eq!(segments[1].dep_time, 210);
        assert_eq!(segments[1].arr_time, 330);
        assert_eq!(segments[1].line_serv_time, 2.0);
    }

    #[test]
    fn test_questionable_speed() {
        let mut segments = vec![segment(1, 2, 1.0, 1000, 1030, 0.5)];
        let mut diagnostics = Diagnostics::default();
        validate_itinerary_times(&mut segments, &graph(), &ItineraryConfig::default(), &mut diagnostics);
        assert_eq!(diagnostics.count(DiagnosticKind::QuestionableLineTime), 1);
    }
}
