// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named operator actions.
//!
//! Actions travel through the transport as compact strings (`done:3`, `done:clear`,
//! `del:<surname>`, `cancel`) so they fit into button payloads. Cancel carries no `del:` prefix,
//! so every surname, `cancel` included, stays deletable.

use std::fmt;
use std::str::FromStr;

use crate::model::SurnameKey;

const DONE_PREFIX: &str = "done:";
const DELETE_PREFIX: &str = "del:";
const CLEAR_PAYLOAD: &str = "clear";
const CANCEL_ACTION: &str = "cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove the route entry at this 0-based position. Positions past the end are ignored.
    MarkDelivered(usize),
    ClearAll,
    DeleteEmployee(SurnameKey),
    CancelDelete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkDelivered(index) => write!(f, "{DONE_PREFIX}{index}"),
            Self::ClearAll => write!(f, "{DONE_PREFIX}{CLEAR_PAYLOAD}"),
            Self::DeleteEmployee(surname) => write!(f, "{DELETE_PREFIX}{surname}"),
            Self::CancelDelete => f.write_str(CANCEL_ACTION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    UnknownAction { value: String },
    InvalidIndex { value: String },
    MissingSurname,
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction { value } => write!(
                f,
                "unknown action {value:?} (expected 'done:<index>', 'done:clear', 'del:<surname>' or 'cancel')"
            ),
            Self::InvalidIndex { value } => write!(f, "invalid route index {value:?}"),
            Self::MissingSurname => f.write_str("delete action is missing a surname"),
        }
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(payload) = s.strip_prefix(DONE_PREFIX) {
            if payload == CLEAR_PAYLOAD {
                return Ok(Self::ClearAll);
            }
            if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseActionError::InvalidIndex {
                    value: payload.to_owned(),
                });
            }
            // All digits, so the only failure left is overflow: a position no route reaches.
            let index = payload.parse::<usize>().unwrap_or(usize::MAX);
            return Ok(Self::MarkDelivered(index));
        }

        if s == CANCEL_ACTION {
            return Ok(Self::CancelDelete);
        }

        if let Some(payload) = s.strip_prefix(DELETE_PREFIX) {
            let surname = SurnameKey::from_name(payload).ok_or(ParseActionError::MissingSurname)?;
            return Ok(Self::DeleteEmployee(surname));
        }

        Err(ParseActionError::UnknownAction {
            value: s.to_owned(),
        })
    }
}
