// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the employee directory.
//!
//! The directory lives in one JSON snapshot file that is rewritten wholesale on every mutation.

pub mod directory_file;

pub use directory_file::{DirectoryFile, StoreError, WriteDurability, DEFAULT_DIRECTORY_FILENAME};
