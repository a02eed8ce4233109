use crate::config::ItineraryConfig;
use crate::model::{Diagnostic, DiagnosticKind, Diagnostics, RawRouteRow, Route, TransitMode};
use itertools::Itertools;
use std::collections::HashSet;
use std::str::FromStr;

/// width of the route description field
pub const DESCRIPTION_WIDTH: usize = 20;

/// headway in seconds assigned when the start hour is unknown or outside the
/// other buckets.
pub const DEFAULT_HEADWAY: u32 = 120;

/// headway bucket for a route start hour:
///
/// | start hour     | headway |
/// |----------------|---------|
/// | 20:00 - 05:59  | 600     |
/// | 06:00 or 09:00 | 60      |
/// | 10:00 - 13:59  | 240     |
/// | otherwise      | 120     |
pub fn headway_for_start_hour(hour: Option<i64>) -> u32 {
    match hour {
        Some(h) if h >= 20 || h <= 5 => 600,
        Some(6) | Some(9) => 60,
        Some(10..=13) => 240,
        _ => DEFAULT_HEADWAY,
    }
}

/// generated route code, the lowercase mode letter followed by a five digit
/// ordinal within the mode.
pub fn route_code(mode: &TransitMode, ordinal: usize) -> String {
    format!("{}{:05}", mode.line_prefix(), ordinal)
}

/// cleans raw route headers and assigns route codes, speeds and batches.
///
/// rows with an empty route id or an unknown mode letter are dropped and
/// reported. the remaining rows are sorted by mode and route id and numbered
/// in a single pass, the ordinal restarting at 1 for each mode.
pub fn normalize_routes(
    rows: Vec<RawRouteRow>,
    config: &ItineraryConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<Route> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut valid: Vec<(TransitMode, RawRouteRow)> = vec![];
    for row in rows.into_iter() {
        let route_id = row.route_id.trim().to_string();
        if route_id.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyRouteId,
                format!("route header '{}' has no route id", row.long_name),
            ));
            continue;
        }
        let mode = match TransitMode::from_str(&row.mode) {
            Ok(mode) => mode,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::UnknownMode, e).with_route_id(&route_id),
                );
                continue;
            }
        };
        if !seen.insert(route_id.clone()) {
            log::warn!("duplicate route header for route id {route_id}, keeping the first");
            continue;
        }
        valid.push((mode, RawRouteRow { route_id, ..row }));
    }

    let sorted = valid
        .into_iter()
        .sorted_by(|(ma, ra), (mb, rb)| ma.cmp(mb).then_with(|| ra.route_id.cmp(&rb.route_id)));

    let (routes, _) = sorted.enumerate().fold(
        (Vec::new(), None::<(TransitMode, usize)>),
        |(mut acc, prev), (idx, (mode, row))| {
            let ordinal = match prev {
                Some((prev_mode, n)) if prev_mode == mode => n + 1,
                _ => 1,
            };
            let speed = row
                .speed
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(config.default_speed_mph)
                .max(config.min_speed_mph);
            let sequence = idx + 1;
            acc.push(Route {
                line: route_code(&mode, ordinal),
                description: row.long_name.chars().take(DESCRIPTION_WIDTH).collect(),
                route_id: row.route_id,
                mode,
                long_name: row.long_name,
                direction: row.direction,
                terminal: row.terminal,
                speed,
                vehicle: row.vehicle,
                sequence,
                batch: idx / config.batch_size + 1,
                headway: DEFAULT_HEADWAY,
                start_time: None,
                am_share: 0.0,
                review: false,
            });
            (acc, Some((mode, ordinal)))
        },
    );
    log::info!("normalized {} route headers", routes.len());
    routes
}
