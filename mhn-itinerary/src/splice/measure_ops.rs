use crate::model::ItinerarySegment;
use crate::network::NetworkGraph;

/// from/to measures of every segment as the cumulative percentage of its
/// route's network length, aligned with the input. routes of zero length
/// measure 0 throughout. input must be sorted.
pub fn route_measures(segments: &[ItinerarySegment], graph: &NetworkGraph) -> Vec<(f64, f64)> {
    let miles: Vec<f64> = segments
        .iter()
        .map(|s| graph.link_miles(&s.itin_a, &s.itin_b).unwrap_or(0.0))
        .collect();
    let mut measures = Vec::with_capacity(segments.len());
    let mut start = 0;
    while start < segments.len() {
        let line = &segments[start].line;
        let len = segments[start..].iter().take_while(|s| &s.line == line).count();
        let route_miles = &miles[start..start + len];
        let total: f64 = route_miles.iter().sum();
        let mut cumulative = 0.0;
        for m in route_miles.iter() {
            let percent = if total > 0.0 { m / total * 100.0 } else { 0.0 };
            measures.push((cumulative, cumulative + percent));
            cumulative += percent;
        }
        start += len;
    }
    measures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Imputed, NodeId};
    use crate::network::test_graph;

    fn segment(line: &str, a: i64, b: i64) -> ItinerarySegment {
        ItinerarySegment {
            line: String::from(line),
            order: 1.0,
            itin_a: NodeId(a),
            itin_b: NodeId(b),
            dwell_code: 0,
            zone_fare: 0.0,
            line_serv_time: 1.0,
            ttf: 0,
            dep_time: 0,
            arr_time: 0,
            stop_count: 1,
            imputed: Imputed::Original,
        }
    }

    #[test]
    fn test_cumulative_percent() {
        let graph = test_graph(
            &[(1, 2, true, 1.0), (2, 3, true, 3.0)],
            &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0)],
        );
        let segments = vec![
            segment("b00001", 1, 2),
            segment("b00001", 2, 3),
            segment("b00002", 3, 2),
        ];
        let measures = route_measures(&segments, &graph);
        assert_eq!(measures, vec![(0.0, 25.0), (25.0, 100.0), (0.0, 100.0)]);
    }
}
