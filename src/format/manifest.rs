// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::model::{ManifestEntry, SurnameKey};

// `<name> [-|–|—] <3-6 digit order>`; the name starts with a letter and may contain letters,
// whitespace and hyphens.
const MANIFEST_LINE_PATTERN: &str = r"^(\p{L}[\p{L}\s\-]+?)\s*[-–—]?\s*([0-9]{3,6})\s*$";

static MANIFEST_LINE: OnceLock<Regex> = OnceLock::new();

fn manifest_line() -> &'static Regex {
    MANIFEST_LINE
        .get_or_init(|| Regex::new(MANIFEST_LINE_PATTERN).expect("manifest line pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestParseError {
    /// No line of the manifest matched `<surname> <order>`.
    NoEntries { non_blank_lines: usize },
}

impl fmt::Display for ManifestParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEntries { non_blank_lines: 0 } => f.write_str("manifest is empty"),
            Self::NoEntries { non_blank_lines } => write!(
                f,
                "none of {non_blank_lines} manifest line(s) matched '<surname> <order>' (order: 3-6 digits)"
            ),
        }
    }
}

impl std::error::Error for ManifestParseError {}

/// Parses one manifest line; `None` when the line does not follow the grammar.
pub fn parse_manifest_line(line: &str) -> Option<ManifestEntry> {
    let captures = manifest_line().captures(line.trim())?;
    let name = captures.get(1)?.as_str().trim();
    let order_id = captures.get(2)?.as_str();
    let surname = SurnameKey::from_name(name)?;
    Some(ManifestEntry::new(name, surname, order_id))
}

/// Parses a courier manifest into entries, in input line order.
///
/// Blank lines are skipped and lines that do not match are dropped. Duplicate surnames are kept:
/// one person may receive several parcels. Fails only when nothing matched at all.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>, ManifestParseError> {
    let mut entries = Vec::new();
    let mut non_blank_lines = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        non_blank_lines += 1;

        match parse_manifest_line(line) {
            Some(entry) => entries.push(entry),
            None => debug!(line_no = idx + 1, "dropping unrecognized manifest line"),
        }
    }

    if entries.is_empty() {
        return Err(ManifestParseError::NoEntries { non_blank_lines });
    }

    Ok(entries)
}
