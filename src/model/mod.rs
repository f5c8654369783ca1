// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Employees are keyed by normalized surname; manifest entries carry an order id and, once
//! resolved, a copied floor/room location.

pub mod employee;
pub mod entry;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;

pub use employee::{capitalize_name, Directory, EmployeeRecord, SurnameKey};
pub use entry::ManifestEntry;
pub use ids::{Id, IdError, RequesterId};
