// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text rendering for routes and the employee directory.
//!
//! Renderers return a [`Reply`]: the message text plus the actions that are valid against it.
//! Markup and button layout are left to the transport.

use crate::ops::Action;

pub mod directory;
pub mod route;
mod text;

pub use directory::{render_delete_prompt, render_directory, EMPTY_DIRECTORY_TEXT};
pub use route::{render_completed, render_delivered, render_route, EMPTY_ROUTE_TEXT};

/// A button-like control offered alongside a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub action: Action,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// An outbound message for one requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub actions: Vec<ActionButton>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(text: impl Into<String>, actions: Vec<ActionButton>) -> Self {
        Self {
            text: text.into(),
            actions,
        }
    }
}
