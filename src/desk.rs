// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The delivery desk: every requester's session plus the shared employee directory.
//!
//! Transports hand events to the desk one at a time. Sessions are created on first use and
//! dropped when they return to collecting, so an absent session and a fresh one look the same.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::model::{Directory, RequesterId, SurnameKey};
use crate::ops::Action;
use crate::render::{render_delete_prompt, render_directory, Reply};
use crate::session::{transition, Effect, Event, Phase, SessionState, Transition};
use crate::store::{DirectoryFile, StoreError};

pub const HELP_TEXT: &str = "Hi! I build delivery routes.

Send a manifest, one order per line:
ivanova 0835
petrov 2397
evstratov 5851

If I don't know a recipient I'll ask for their floor and room once and remember them.

Commands:
/list - everyone in the directory
/add - add an employee by hand
/delete - remove an employee
/clear - clear the route";

pub const DELETE_CANCELLED_TEXT: &str = "Cancelled.";
pub const NOT_FOUND_TEXT: &str = "Not found.";

/// One directory read: the rendered listing and the snapshot it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub reply: Reply,
    pub directory: Directory,
}

#[derive(Debug)]
pub struct DeliveryDesk {
    store: DirectoryFile,
    sessions: BTreeMap<RequesterId, SessionState>,
}

impl DeliveryDesk {
    pub fn new(store: DirectoryFile) -> Self {
        Self {
            store,
            sessions: BTreeMap::new(),
        }
    }

    pub fn store(&self) -> &DirectoryFile {
        &self.store
    }

    pub fn session(&self, requester: &RequesterId) -> Option<&SessionState> {
        self.sessions.get(requester)
    }

    pub fn phase(&self, requester: &RequesterId) -> Phase {
        self.session(requester).map(SessionState::phase).unwrap_or(Phase::Collecting)
    }

    pub fn start(&self) -> Reply {
        Reply::text(HELP_TEXT)
    }

    /// Free text from the operator. Reads the directory so a manifest is classified against the
    /// latest snapshot.
    pub fn handle_text(
        &mut self,
        requester: &RequesterId,
        text: &str,
    ) -> Result<Vec<Reply>, StoreError> {
        let directory = self.store.load()?;
        self.dispatch(requester, Event::Text(text.to_owned()), &directory)
    }

    pub fn start_manual_add(&mut self, requester: &RequesterId) -> Result<Vec<Reply>, StoreError> {
        self.dispatch(requester, Event::StartManualAdd, &Directory::new())
    }

    pub fn clear(&mut self, requester: &RequesterId) -> Result<Vec<Reply>, StoreError> {
        self.dispatch(requester, Event::Clear, &Directory::new())
    }

    pub fn mark_delivered(
        &mut self,
        requester: &RequesterId,
        index: usize,
    ) -> Result<Vec<Reply>, StoreError> {
        self.dispatch(requester, Event::MarkDelivered(index), &Directory::new())
    }

    /// Routes a named action: route actions go to the requester's session, delete actions go
    /// straight to the directory.
    pub fn handle_action(
        &mut self,
        requester: &RequesterId,
        action: Action,
    ) -> Result<Vec<Reply>, StoreError> {
        match action {
            Action::MarkDelivered(index) => self.mark_delivered(requester, index),
            Action::ClearAll => self.clear(requester),
            Action::DeleteEmployee(surname) => Ok(vec![self.delete_employee(&surname)?]),
            Action::CancelDelete => Ok(vec![Reply::text(DELETE_CANCELLED_TEXT)]),
        }
    }

    pub fn delete_employee(&self, surname: &SurnameKey) -> Result<Reply, StoreError> {
        let removed = self.store.delete(surname).map_err(|err| {
            warn!(surname = %surname, error = %err, "failed to delete directory entry");
            err
        })?;
        Ok(match removed {
            Some(record) => Reply::text(format!("{} removed.", record.full_name())),
            None => {
                info!(surname = %surname, "delete requested for unknown surname");
                Reply::text(NOT_FOUND_TEXT)
            }
        })
    }

    pub fn list_directory(&self) -> Result<DirectoryListing, StoreError> {
        let directory = self.store.list()?;
        Ok(DirectoryListing {
            reply: Reply::text(render_directory(&directory)),
            directory,
        })
    }

    pub fn delete_prompt(&self) -> Result<Reply, StoreError> {
        Ok(render_delete_prompt(&self.store.list()?))
    }

    /// Runs one transition and applies its directory writes in order. The new state replaces the
    /// old one only if every write succeeded; on failure the requester can simply answer again.
    fn dispatch(
        &mut self,
        requester: &RequesterId,
        event: Event,
        directory: &Directory,
    ) -> Result<Vec<Reply>, StoreError> {
        let state = self.sessions.get(requester).cloned().unwrap_or_default();
        let from = state.phase();
        let Transition { state, effects } = transition(state, event, directory);

        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::Reply(reply) => replies.push(reply),
                Effect::SaveEmployee { surname, record } => {
                    if let Err(err) = self.store.put(surname.clone(), record) {
                        warn!(
                            requester = %requester,
                            surname = %surname,
                            error = %err,
                            "failed to persist directory entry; session left unchanged"
                        );
                        return Err(err);
                    }
                }
            }
        }

        debug!(
            requester = %requester,
            from = from.as_str(),
            to = state.phase().as_str(),
            "session transition"
        );
        if state == SessionState::Collecting {
            self.sessions.remove(requester);
        } else {
            self.sessions.insert(requester.clone(), state);
        }
        Ok(replies)
    }
}
