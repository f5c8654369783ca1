// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::employee::{Directory, EmployeeRecord, SurnameKey};
use super::entry::ManifestEntry;

pub(crate) fn surname(value: &str) -> SurnameKey {
    SurnameKey::from_name(value).expect("surname key")
}

pub(crate) fn entry(name: &str, order_id: &str) -> ManifestEntry {
    ManifestEntry::new(name, surname(name), order_id)
}

pub(crate) fn resolved(name: &str, order_id: &str, floor: i64, room: &str) -> ManifestEntry {
    let mut entry = entry(name, order_id);
    entry.resolve_from(&EmployeeRecord::new(name, floor, room));
    entry
}

/// Three employees spread over two floors, inserted out of route order.
pub(crate) fn office_directory() -> Directory {
    [
        (surname("battalova"), EmployeeRecord::new("Battalova Leila", 12, "12.43")),
        (surname("pogudin"), EmployeeRecord::new("Pogudin", 7, "7.47")),
        (surname("evstratov"), EmployeeRecord::new("Evstratov", 7, "7.05")),
    ]
    .into_iter()
    .collect()
}
