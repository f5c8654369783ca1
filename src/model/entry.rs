// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::employee::{capitalize_name, EmployeeRecord, SurnameKey};

/// One courier order from a manifest.
///
/// `floor`/`room` stay unset until the entry is resolved, either from the directory or through an
/// interview. Resolution copies the location; later directory edits do not reach back into an
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    name: String,
    surname: SurnameKey,
    order_id: String,
    floor: Option<i64>,
    room: Option<String>,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, surname: SurnameKey, order_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname,
            order_id: order_id.into(),
            floor: None,
            room: None,
        }
    }

    /// The recipient as shown to the operator: the manifest spelling until resolved, then the
    /// directory's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &SurnameKey {
        &self.surname
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn floor(&self) -> Option<i64> {
        self.floor
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.floor.is_some() && self.room.is_some()
    }

    pub fn set_floor(&mut self, floor: i64) {
        self.floor = Some(floor);
    }

    /// Stamps the entry with a directory record's name and location.
    pub fn resolve_from(&mut self, record: &EmployeeRecord) {
        self.name = record.full_name().to_owned();
        self.floor = Some(record.floor());
        self.room = Some(record.room().to_owned());
    }

    /// Builds the directory record an interview produces for this entry.
    pub fn interview_record(&self, floor: i64, room: &str) -> EmployeeRecord {
        EmployeeRecord::new(capitalize_name(&self.name), floor, room)
    }
}

#[cfg(test)]
mod tests {
    use super::ManifestEntry;
    use crate::model::{EmployeeRecord, SurnameKey};

    #[test]
    fn resolve_from_copies_name_and_location() {
        let surname = SurnameKey::from_name("petrov").expect("surname");
        let mut entry = ManifestEntry::new("petrov", surname, "2397");
        assert!(!entry.is_resolved());

        let record = EmployeeRecord::new("Petrov Ivan", 7, "7.47");
        entry.resolve_from(&record);
        assert!(entry.is_resolved());
        assert_eq!(entry.name(), "Petrov Ivan");
        assert_eq!(entry.floor(), Some(7));
        assert_eq!(entry.room(), Some("7.47"));
        assert_eq!(entry.order_id(), "2397");
    }

    #[test]
    fn interview_record_capitalizes_manifest_spelling() {
        let surname = SurnameKey::from_name("ЕВСТРАТОВ").expect("surname");
        let entry = ManifestEntry::new("ЕВСТРАТОВ", surname, "5851");
        let record = entry.interview_record(5, "5.12");
        assert_eq!(record.full_name(), "Евстратов");
        assert_eq!(record.floor(), 5);
        assert_eq!(record.room(), "5.12");
    }
}
