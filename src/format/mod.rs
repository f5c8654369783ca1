// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats accepted from the operator.
//!
//! Currently this is the courier manifest: one `<surname> <order>` pair per line.

pub mod manifest;

pub use manifest::{parse_manifest, parse_manifest_line, ManifestParseError};
