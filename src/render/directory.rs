// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use crate::model::Directory;
use crate::ops::Action;

use super::text::{count_noun, truncate_with_ellipsis};
use super::{ActionButton, Reply};

pub const EMPTY_DIRECTORY_TEXT: &str =
    "The directory is empty. Send a manifest and it will fill up as you go.";

const DIRECTORY_HEADER: &str = "EMPLOYEES";
const DELETE_PROMPT_TEXT: &str = "Who should be removed?";
const CANCEL_LABEL: &str = "Cancel";
const BUTTON_LABEL_MAX_CHARS: usize = 64;

/// Lists every employee grouped by floor, floors ascending and rooms in label order.
pub fn render_directory(directory: &Directory) -> String {
    if directory.is_empty() {
        return EMPTY_DIRECTORY_TEXT.to_owned();
    }

    let mut out = String::new();
    out.push_str(DIRECTORY_HEADER);
    out.push('\n');
    for (floor, entries) in directory.by_floor() {
        let _ = writeln!(out, "\nFloor {floor}");
        for (_, record) in entries {
            let _ = writeln!(out, "  • {} - room {}", record.full_name(), record.room());
        }
    }
    let _ = write!(out, "\nTotal: {}", count_noun(directory.len(), "employee", "employees"));
    out
}

/// First half of the delete flow: one delete action per employee (by surname) plus cancel.
pub fn render_delete_prompt(directory: &Directory) -> Reply {
    if directory.is_empty() {
        return Reply::text(EMPTY_DIRECTORY_TEXT);
    }

    let mut actions = directory
        .iter()
        .map(|(surname, record)| {
            let label = format!("✗ {} (room {})", record.full_name(), record.room());
            ActionButton::new(
                truncate_with_ellipsis(&label, BUTTON_LABEL_MAX_CHARS),
                Action::DeleteEmployee(surname.clone()),
            )
        })
        .collect::<Vec<_>>();
    actions.push(ActionButton::new(CANCEL_LABEL, Action::CancelDelete));

    Reply::with_actions(DELETE_PROMPT_TEXT, actions)
}
