use super::{ActionCode, Directionality, LinkRow, NetworkLink, PendingActionRow};
use kdam::tqdm;
use std::collections::{HashMap, HashSet};

/// resolves the pending actions recorded against each link id to the
/// single action that applies. a delete dominates all other actions,
/// otherwise the highest priority action wins.
fn resolve_actions(actions: &[PendingActionRow]) -> HashMap<&str, &PendingActionRow> {
    let mut resolved: HashMap<&str, &PendingActionRow> = HashMap::new();
    for action in actions.iter() {
        match resolved.get(action.link_id.as_str()) {
            Some(current) if current.action >= action.action => {}
            _ => {
                resolved.insert(action.link_id.as_str(), action);
            }
        }
    }
    resolved
}

/// conflates link rows with pending project actions into the canonical link
/// set used for itinerary matching.
///
/// base links are kept unless deleted, non-base links only when an add,
/// modify or replace action references them. the winning action's speed and
/// directionality, when present, override the link's own values. rows with
/// an invalid directions code, node id or length are skipped with a warning.
pub fn conflate_links(links: &[LinkRow], actions: &[PendingActionRow]) -> Vec<NetworkLink> {
    let resolved = resolve_actions(actions);
    let mut result: Vec<NetworkLink> = Vec::with_capacity(links.len());
    let mut deleted = 0;
    let mut skipped = 0;

    let link_iter = tqdm!(links.iter(), total = links.len(), desc = "conflate links");
    for row in link_iter {
        let action = resolved.get(row.link_id.as_str()).copied();
        let is_base = row.baselink != 0;
        match action.map(|a| a.action) {
            Some(ActionCode::Delete) => {
                deleted += 1;
                continue;
            }
            None if !is_base => continue,
            _ => {}
        }

        if !row.anode.is_valid() || !row.bnode.is_valid() || row.anode == row.bnode {
            log::warn!(
                "link {} has invalid endpoints ({}, {}), skipping",
                row.link_id,
                row.anode,
                row.bnode
            );
            skipped += 1;
            continue;
        }
        if !row.miles.is_finite() || row.miles < 0.0 {
            log::warn!("link {} has invalid length {}, skipping", row.link_id, row.miles);
            skipped += 1;
            continue;
        }
        let directions = action.and_then(|a| a.directions).unwrap_or(row.directions);
        let directionality = match Directionality::try_from(directions) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("link {}: {}, skipping", row.link_id, e);
                skipped += 1;
                continue;
            }
        };
        let (speed1, speed2) = match action.and_then(|a| a.speed) {
            Some(speed) => (speed, speed),
            None => (row.speed1, row.speed2),
        };
        result.push(NetworkLink {
            link_id: row.link_id.clone(),
            anode: row.anode,
            bnode: row.bnode,
            directionality,
            miles: row.miles,
            type1: row.type1,
            type2: row.type2,
            speed1,
            speed2,
        });
    }
    eprintln!();

    let known: HashSet<&str> = links.iter().map(|l| l.link_id.as_str()).collect();
    let unknown = resolved.keys().filter(|id| !known.contains(**id)).count();
    if unknown > 0 {
        log::warn!("{unknown} pending action(s) reference links missing from the network");
    }
    log::info!(
        "conflated {} links ({} deleted by pending actions, {} invalid)",
        result.len(),
        deleted,
        skipped
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn link(id: &str, a: i64, b: i64, directions: u8, baselink: u8) -> LinkRow {
        LinkRow {
            link_id: String::from(id),
            anode: NodeId(a),
            bnode: NodeId(b),
            directions,
            miles: 1.0,
            type1: 1,
            type2: 1,
            speed1: 30.0,
            speed2: 30.0,
            baselink,
        }
    }

    fn action(id: &str, action: ActionCode, speed: Option<f64>) -> PendingActionRow {
        PendingActionRow {
            link_id: String::from(id),
            action,
            speed,
            directions: None,
        }
    }

    #[test]
    fn test_delete_dominates() {
        let links = vec![link("1-2", 1, 2, 2, 1)];
        let actions = vec![
            action("1-2", ActionCode::Replace, Some(45.0)),
            action("1-2", ActionCode::Delete, None),
            action("1-2", ActionCode::Modify, None),
        ];
        assert!(conflate_links(&links, &actions).is_empty());
    }

    #[test]
    fn test_replace_beats_modify() {
        let links = vec![link("1-2", 1, 2, 1, 1)];
        let actions = vec![
            action("1-2", ActionCode::Modify, Some(20.0)),
            action("1-2", ActionCode::Replace, Some(45.0)),
            action("1-2", ActionCode::Add, Some(10.0)),
        ];
        let result = conflate_links(&links, &actions);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].speed1, 45.0);
        assert_eq!(result[0].speed2, 45.0);
    }

    #[test]
    fn test_non_base_links_need_an_action() {
        let links = vec![link("1-2", 1, 2, 1, 0), link("2-3", 2, 3, 1, 0)];
        let mut add = action("2-3", ActionCode::Add, None);
        add.directions = Some(2);
        let result = conflate_links(&links, &[add]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].link_id, "2-3");
        assert_eq!(result[0].directionality, Directionality::TwoWay);
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let links = vec![link("1-2", 1, 2, 7, 1), link("0-2", 0, 2, 1, 1), link("3-4", 3, 4, 3, 1)];
        let result = conflate_links(&links, &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].link_id, "3-4");
    }
}
