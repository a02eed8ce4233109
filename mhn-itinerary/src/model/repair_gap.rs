use super::{Imputed, ItinerarySegment, NodeId};
use serde::{Deserialize, Serialize};

/// a run of consecutive itinerary segments of one route that could not be
/// matched to the network, reduced to its endpoints and the aggregate of the
/// attributes that must be redistributed once a replacement path is found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairGap {
    pub line: String,
    /// order of the first excised segment
    pub order: f64,
    pub origin: NodeId,
    pub destination: NodeId,
    /// departure of the first excised segment
    pub dep_time: i64,
    /// arrival of the last excised segment
    pub arr_time: i64,
    pub dwell_code: i32,
    pub ttf: i32,
    pub zone_fare: f64,
    pub stop_count: u32,
    pub line_serv_time: f64,
    pub imputed: Imputed,
    /// the excised segments, restored when the gap cannot be repaired
    pub excised: Vec<ItinerarySegment>,
}

impl RepairGap {
    /// aggregates a run of segments. the run is expected to be ordered and
    /// to belong to a single route. returns None for an empty run.
    pub fn from_run(run: Vec<ItinerarySegment>) -> Option<RepairGap> {
        let first = run.first()?;
        let last = run.last()?;
        let mut gap = RepairGap {
            line: first.line.clone(),
            order: first.order,
            origin: first.itin_a,
            destination: last.itin_b,
            dep_time: first.dep_time,
            arr_time: last.arr_time,
            dwell_code: i32::MIN,
            ttf: i32::MIN,
            zone_fare: f64::MIN,
            stop_count: 0,
            line_serv_time: 0.0,
            imputed: Imputed::Original,
            excised: vec![],
        };
        for segment in run.iter() {
            gap.dwell_code = gap.dwell_code.max(segment.dwell_code);
            gap.ttf = gap.ttf.max(segment.ttf);
            gap.zone_fare = gap.zone_fare.max(segment.zone_fare);
            gap.stop_count += segment.stop_count;
            gap.line_serv_time += segment.line_serv_time;
            gap.imputed = gap.imputed.max(segment.imputed);
        }
        gap.excised = run;
        Some(gap)
    }

    pub fn od(&self) -> (NodeId, NodeId) {
        (self.origin, self.destination)
    }

    /// scheduled wall-clock seconds spanned by the gap.
    pub fn elapsed_seconds(&self) -> i64 {
        (self.arr_time - self.dep_time).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(a: i64, b: i64, order: f64) -> ItinerarySegment {
        ItinerarySegment {
            line: String::from("p00001"),
            order,
            itin_a: NodeId(a),
            itin_b: NodeId(b),
            dwell_code: 0,
            zone_fare: 0.0,
            line_serv_time: 1.5,
            ttf: 0,
            dep_time: 100 * order as i64,
            arr_time: 100 * order as i64 + 90,
            stop_count: 1,
            imputed: Imputed::Original,
        }
    }

    #[test]
    fn test_gap_aggregates_run() {
        let mut second = segment(2, 3, 2.0);
        second.dwell_code = 1;
        second.zone_fare = 0.5;
        let run = vec![segment(1, 2, 1.0), second, segment(3, 4, 3.0)];
        let gap = RepairGap::from_run(run).expect("run is not empty");
        assert_eq!(gap.od(), (NodeId(1), NodeId(4)));
        assert_eq!(gap.dep_time, 100);
        assert_eq!(gap.arr_time, 390);
        assert_eq!(gap.dwell_code, 1);
        assert_eq!(gap.zone_fare, 0.5);
        assert_eq!(gap.stop_count, 3);
        assert!((gap.line_serv_time - 4.5).abs() < 1e-9);
        assert_eq!(gap.excised.len(), 3);
    }

    #[test]
    fn test_empty_run() {
        assert!(RepairGap::from_run(vec![]).is_none());
    }
}
