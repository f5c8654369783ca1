// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Directory lookup key: the first whitespace token of a name, lower-cased.
///
/// Keys are only constructed through [`SurnameKey::from_name`], so every key held by the model is
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurnameKey(String);

impl SurnameKey {
    /// Returns `None` when `name` has no non-whitespace token.
    pub fn from_name(name: &str) -> Option<Self> {
        let first = name.split_whitespace().next()?;
        Some(Self(first.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for SurnameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SurnameKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for SurnameKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

/// Upper-cases the first character and lower-cases the rest (`"иВАНОВА анна"` -> `"Иванова анна"`).
pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(name.len());
    out.extend(first.to_uppercase());
    for ch in chars {
        out.extend(ch.to_lowercase());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    full_name: String,
    floor: i64,
    room: String,
}

impl EmployeeRecord {
    pub fn new(full_name: impl Into<String>, floor: i64, room: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            floor,
            room: room.into(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Stored floors may be negative (basements); interview answers never are.
    pub fn floor(&self) -> i64 {
        self.floor
    }

    /// Free-form label, conventionally `"<floor>.<unit>"`.
    pub fn room(&self) -> &str {
        &self.room
    }
}

/// An in-memory snapshot of the employee directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    employees: BTreeMap<SurnameKey, EmployeeRecord>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, surname: &SurnameKey) -> Option<&EmployeeRecord> {
        self.employees.get(surname)
    }

    pub fn contains(&self, surname: &SurnameKey) -> bool {
        self.employees.contains_key(surname)
    }

    /// Overwrites any existing record for `surname`; returns the replaced record.
    pub fn put(&mut self, surname: SurnameKey, record: EmployeeRecord) -> Option<EmployeeRecord> {
        self.employees.insert(surname, record)
    }

    pub fn delete(&mut self, surname: &SurnameKey) -> Option<EmployeeRecord> {
        self.employees.remove(surname)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Iterates entries in surname order.
    pub fn iter(&self) -> btree_map::Iter<'_, SurnameKey, EmployeeRecord> {
        self.employees.iter()
    }

    /// Groups entries by floor (ascending); within a floor entries are ordered by room label,
    /// then surname.
    pub fn by_floor(&self) -> BTreeMap<i64, Vec<(&SurnameKey, &EmployeeRecord)>> {
        let mut floors: BTreeMap<i64, Vec<(&SurnameKey, &EmployeeRecord)>> = BTreeMap::new();
        for (surname, record) in &self.employees {
            floors.entry(record.floor()).or_default().push((surname, record));
        }
        for entries in floors.values_mut() {
            entries.sort_by(|(a_key, a), (b_key, b)| {
                a.room().cmp(b.room()).then_with(|| a_key.cmp(b_key))
            });
        }
        floors
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = (&'a SurnameKey, &'a EmployeeRecord);
    type IntoIter = btree_map::Iter<'a, SurnameKey, EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}

impl FromIterator<(SurnameKey, EmployeeRecord)> for Directory {
    fn from_iter<I: IntoIterator<Item = (SurnameKey, EmployeeRecord)>>(iter: I) -> Self {
        Self {
            employees: iter.into_iter().collect(),
        }
    }
}
