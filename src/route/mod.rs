// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Route ordering and delivery bookkeeping.
//!
//! A route is the session's resolved deliveries, sorted once by [`optimize`]. After that the order
//! is fixed: marking an entry delivered removes it without re-sorting the rest.

use crate::model::ManifestEntry;

/// Sort key used for a missing floor.
pub const UNKNOWN_FLOOR_KEY: i64 = i64::MAX;

/// Sort key used for a missing or unparseable room number.
pub const UNKNOWN_ROOM_KEY: u32 = u32::MAX;

/// The in-floor room number: the integer segment after the first `.` of the label
/// (`"12.43"` -> `43`). Labels without such a segment have no room number.
pub fn room_number(room: &str) -> Option<u32> {
    let segment = room.split('.').nth(1)?;
    let segment = segment.trim();
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// `(floor, room number)`, with [`UNKNOWN_FLOOR_KEY`] and [`UNKNOWN_ROOM_KEY`] standing in for
/// anything missing.
pub fn route_sort_key(entry: &ManifestEntry) -> (i64, u32) {
    let floor = entry.floor().unwrap_or(UNKNOWN_FLOOR_KEY);
    let room = entry.room().and_then(room_number).unwrap_or(UNKNOWN_ROOM_KEY);
    (floor, room)
}

/// Orders deliveries by floor, then room number.
///
/// The sort is stable: entries sharing a key keep their incoming relative order, which makes the
/// operation idempotent.
pub fn optimize(mut deliveries: Vec<ManifestEntry>) -> Vec<ManifestEntry> {
    deliveries.sort_by_key(route_sort_key);
    deliveries
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The index did not address an entry; the route is untouched.
    Ignored,
    /// The entry was removed and the route still has work left.
    Delivered(ManifestEntry),
    /// The entry was removed and it was the last one.
    Completed(ManifestEntry),
}

/// Removes the entry at `index`, keeping the remaining order.
pub fn mark_delivered(route: &mut Vec<ManifestEntry>, index: usize) -> MarkOutcome {
    if index >= route.len() {
        return MarkOutcome::Ignored;
    }

    let entry = route.remove(index);
    if route.is_empty() {
        MarkOutcome::Completed(entry)
    } else {
        MarkOutcome::Delivered(entry)
    }
}
