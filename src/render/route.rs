// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::model::ManifestEntry;
use crate::ops::Action;

use super::text::{count_noun, truncate_with_ellipsis};
use super::{ActionButton, Reply};

pub const EMPTY_ROUTE_TEXT: &str = "The route is empty.";

const ROUTE_HEADER: &str = "ROUTE";
const CLEAR_LABEL: &str = "Clear route";
const BUTTON_LABEL_MAX_CHARS: usize = 64;

fn floor_label(floor: Option<i64>) -> String {
    match floor {
        Some(floor) => floor.to_string(),
        None => "?".to_owned(),
    }
}

/// Renders a route in its current order.
///
/// Consecutive entries on the same floor share a banner. Positions are global and 1-based; the
/// action for position `n` is `MarkDelivered(n - 1)`. A clear action is always appended.
pub fn render_route(route: &[ManifestEntry]) -> Reply {
    let mut actions = route
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let label = format!(
                "✓ {}. {} · room {}",
                idx + 1,
                entry.name(),
                entry.room().unwrap_or("?")
            );
            ActionButton::new(
                truncate_with_ellipsis(&label, BUTTON_LABEL_MAX_CHARS),
                Action::MarkDelivered(idx),
            )
        })
        .collect::<Vec<_>>();
    actions.push(ActionButton::new(CLEAR_LABEL, Action::ClearAll));

    Reply::with_actions(route_text(route), actions)
}

fn route_text(route: &[ManifestEntry]) -> String {
    if route.is_empty() {
        return EMPTY_ROUTE_TEXT.to_owned();
    }

    let mut out = String::new();
    out.push_str(ROUTE_HEADER);
    out.push('\n');

    let mut current_floor: Option<Option<i64>> = None;
    for (idx, entry) in route.iter().enumerate() {
        if current_floor != Some(entry.floor()) {
            out.push('\n');
            let _ = writeln!(out, "Floor {}", floor_label(entry.floor()));
            current_floor = Some(entry.floor());
        }
        let _ = writeln!(
            out,
            "  {}. {} - room {} | order #{}",
            idx + 1,
            entry.name(),
            entry.room().unwrap_or("?"),
            entry.order_id()
        );
    }

    let floors = route.iter().map(ManifestEntry::floor).collect::<BTreeSet<_>>();
    let _ = write!(
        out,
        "\nTotal: {}, {}",
        count_noun(route.len(), "delivery", "deliveries"),
        count_noun(floors.len(), "floor", "floors")
    );
    out
}

/// Acknowledges a delivery and re-renders what is left of the route.
pub fn render_delivered(done: &ManifestEntry, remaining: &[ManifestEntry]) -> Reply {
    let mut reply = render_route(remaining);
    reply.text = format!("{} delivered.\n\n{}", done.name(), reply.text);
    reply
}

/// Acknowledges the final delivery of a route.
pub fn render_completed(done: &ManifestEntry) -> Reply {
    Reply::text(format!("{} delivered.\n\nAll orders are done!", done.name()))
}

#[cfg(test)]
mod tests {
    use super::{render_completed, render_delivered, render_route, EMPTY_ROUTE_TEXT};
    use crate::model::fixtures::{entry, resolved};
    use crate::ops::Action;

    #[test]
    fn empty_route_renders_canonical_message_with_clear_action() {
        let reply = render_route(&[]);
        assert_eq!(reply.text, EMPTY_ROUTE_TEXT);
        assert_eq!(reply.actions.len(), 1);
        assert_eq!(reply.actions[0].action, Action::ClearAll);
    }

    #[test]
    fn groups_consecutive_floors_and_numbers_globally() {
        let route = vec![
            resolved("Evstratov", "5851", 7, "7.05"),
            resolved("Pogudin", "2397", 7, "7.47"),
            resolved("Battalova Leila", "0835", 12, "12.43"),
        ];
        let reply = render_route(&route);
        let expected = "\
ROUTE

Floor 7
  1. Evstratov - room 7.05 | order #5851
  2. Pogudin - room 7.47 | order #2397

Floor 12
  3. Battalova Leila - room 12.43 | order #0835

Total: 3 deliveries, 2 floors";
        assert_eq!(reply.text, expected);

        let actions = reply.actions.iter().map(|b| b.action.clone()).collect::<Vec<_>>();
        assert_eq!(
            actions,
            vec![
                Action::MarkDelivered(0),
                Action::MarkDelivered(1),
                Action::MarkDelivered(2),
                Action::ClearAll
            ]
        );
        assert_eq!(reply.actions[2].label, "✓ 3. Battalova Leila · room 12.43");
    }

    #[test]
    fn unknown_location_renders_question_marks() {
        let reply = render_route(&[entry("ghost", "1234")]);
        assert!(reply.text.contains("Floor ?"));
        assert!(reply.text.contains("  1. ghost - room ? | order #1234"));
        assert!(reply.text.ends_with("Total: 1 delivery, 1 floor"));
    }

    #[test]
    fn delivered_reply_renumbers_remaining_entries() {
        let done = resolved("Evstratov", "5851", 7, "7.05");
        let remaining = vec![resolved("Battalova", "0835", 12, "12.43")];
        let reply = render_delivered(&done, &remaining);
        assert!(reply.text.starts_with("Evstratov delivered.\n\nROUTE"));
        assert!(reply.text.contains("  1. Battalova - room 12.43"));
        assert_eq!(reply.actions[0].action, Action::MarkDelivered(0));
        assert_eq!(reply.actions.len(), 2);
    }

    #[test]
    fn completed_reply_has_no_actions() {
        let reply = render_completed(&resolved("Pogudin", "2397", 7, "7.47"));
        assert!(reply.text.contains("All orders are done"));
        assert!(reply.actions.is_empty());
    }
}
