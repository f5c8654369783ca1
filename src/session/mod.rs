// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-requester resolution dialog.
//!
//! A session turns a manifest into a route. Entries whose surname is already in the directory
//! are resolved immediately; for every other entry the operator is asked for a floor and then a
//! room, one entry at a time in manifest order. The same floor/room interview also backs the
//! manual "add employee" flow, which only writes the directory.
//!
//! [`transition`] is pure: directory writes come back as [`Effect::SaveEmployee`] and are applied
//! by the caller, which decides whether the new state is committed.

use std::collections::VecDeque;

use crate::format::parse_manifest;
use crate::model::{capitalize_name, Directory, EmployeeRecord, ManifestEntry, SurnameKey};
use crate::render::{render_completed, render_delivered, render_route, Reply};
use crate::route::{mark_delivered, optimize, MarkOutcome};

pub const UNRECOGNIZED_FORMAT_TEXT: &str =
    "Unrecognized format. Send a manifest, one order per line:\n\nivanova 0835\npetrov 2397";
pub const INVALID_FLOOR_TEXT: &str = "Enter a number, for example: 7";
pub const EMPTY_ROOM_TEXT: &str = "Enter the room, for example: 7.47";
pub const ASK_SURNAME_TEXT: &str = "Enter the employee's surname:\n\nivanova";
pub const CLEARED_TEXT: &str = "Route cleared. Send a new manifest.";

/// Coarse view of [`SessionState`], for logs and transport payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Collecting,
    ParseFailed,
    AwaitingSurname,
    InterviewFloor,
    InterviewRoom,
    RouteReady,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::ParseFailed => "parse_failed",
            Self::AwaitingSurname => "awaiting_surname",
            Self::InterviewFloor => "interview_floor",
            Self::InterviewRoom => "interview_room",
            Self::RouteReady => "route_ready",
        }
    }
}

/// Who is being interviewed about, and what happens once their room is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewFlow {
    /// Filling a gap in a manifest: the resolved entry joins `deliveries` and the next `pending`
    /// entry (FIFO) is interviewed; when none is left the route is built.
    Manifest {
        current: ManifestEntry,
        deliveries: Vec<ManifestEntry>,
        pending: VecDeque<ManifestEntry>,
    },
    /// Operator-initiated directory entry; completion writes the directory and nothing else.
    ManualAdd { name: String, surname: SurnameKey },
}

impl InterviewFlow {
    pub fn surname(&self) -> &SurnameKey {
        match self {
            Self::Manifest { current, .. } => current.surname(),
            Self::ManualAdd { surname, .. } => surname,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Manifest { current, .. } => capitalize_name(current.name()),
            Self::ManualAdd { name, .. } => capitalize_name(name),
        }
    }

    fn with_floor(mut self, floor: i64) -> Self {
        if let Self::Manifest { current, .. } = &mut self {
            current.set_floor(floor);
        }
        self
    }

    fn complete(self, floor: i64, room: &str) -> Transition {
        match self {
            Self::Manifest {
                mut current,
                mut deliveries,
                mut pending,
            } => {
                let record = current.interview_record(floor, room);
                current.resolve_from(&record);
                let mut effects = vec![
                    Effect::SaveEmployee {
                        surname: current.surname().clone(),
                        record: record.clone(),
                    },
                    Effect::Reply(Reply::text(saved_text(&record))),
                ];
                deliveries.push(current);

                match pending.pop_front() {
                    Some(next) => {
                        effects.push(Effect::Reply(Reply::text(format!(
                            "One more: {}\n\nFloor?",
                            capitalize_name(next.name())
                        ))));
                        Transition {
                            state: SessionState::InterviewFloor(Self::Manifest {
                                current: next,
                                deliveries,
                                pending,
                            }),
                            effects,
                        }
                    }
                    None => {
                        let route = optimize(deliveries);
                        effects.push(Effect::Reply(render_route(&route)));
                        Transition {
                            state: SessionState::RouteReady { route },
                            effects,
                        }
                    }
                }
            }
            Self::ManualAdd { name, surname } => {
                let record = EmployeeRecord::new(capitalize_name(&name), floor, room);
                let reply = Reply::text(saved_text(&record));
                Transition {
                    state: SessionState::Collecting,
                    effects: vec![
                        Effect::SaveEmployee { surname, record },
                        Effect::Reply(reply),
                    ],
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Collecting,
    /// The last manifest had no usable line; nothing from it was kept.
    ParseFailed,
    AwaitingSurname,
    InterviewFloor(InterviewFlow),
    InterviewRoom {
        flow: InterviewFlow,
        floor: i64,
    },
    RouteReady {
        route: Vec<ManifestEntry>,
    },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Collecting => Phase::Collecting,
            Self::ParseFailed => Phase::ParseFailed,
            Self::AwaitingSurname => Phase::AwaitingSurname,
            Self::InterviewFloor(_) => Phase::InterviewFloor,
            Self::InterviewRoom { .. } => Phase::InterviewRoom,
            Self::RouteReady { .. } => Phase::RouteReady,
        }
    }

    fn flow(&self) -> Option<&InterviewFlow> {
        match self {
            Self::InterviewFloor(flow) | Self::InterviewRoom { flow, .. } => Some(flow),
            _ => None,
        }
    }

    /// Resolved entries so far: the route once it is ready, otherwise what the manifest
    /// interview has accumulated.
    pub fn deliveries(&self) -> &[ManifestEntry] {
        match self {
            Self::RouteReady { route } => route.as_slice(),
            _ => match self.flow() {
                Some(InterviewFlow::Manifest { deliveries, .. }) => deliveries.as_slice(),
                _ => &[],
            },
        }
    }

    /// Unresolved entries still waiting for an interview, in the order they will be asked.
    pub fn pending(&self) -> Vec<&ManifestEntry> {
        match self.flow() {
            Some(InterviewFlow::Manifest { pending, .. }) => pending.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// The manifest entry currently being interviewed about.
    pub fn current(&self) -> Option<&ManifestEntry> {
        match self.flow() {
            Some(InterviewFlow::Manifest { current, .. }) => Some(current),
            _ => None,
        }
    }

    pub fn route(&self) -> Option<&[ManifestEntry]> {
        match self {
            Self::RouteReady { route } => Some(route.as_slice()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Free text from the operator: a manifest, or an answer to the pending question.
    Text(String),
    StartManualAdd,
    MarkDelivered(usize),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    SaveEmployee {
        surname: SurnameKey,
        record: EmployeeRecord,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn reply(state: SessionState, reply: Reply) -> Self {
        Self {
            state,
            effects: vec![Effect::Reply(reply)],
        }
    }

    fn silent(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn replies(&self) -> impl Iterator<Item = &Reply> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Reply(reply) => Some(reply),
            Effect::SaveEmployee { .. } => None,
        })
    }
}

/// Manifest entries split by whether the directory knows the recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Already stamped with the directory's name and location.
    pub known: Vec<ManifestEntry>,
    pub unknown: Vec<ManifestEntry>,
}

/// Splits entries against the directory as it is now; both halves keep manifest order.
pub fn classify(entries: Vec<ManifestEntry>, directory: &Directory) -> Classified {
    let mut classified = Classified::default();
    for mut entry in entries {
        match directory.get(entry.surname()) {
            Some(record) => {
                entry.resolve_from(record);
                classified.known.push(entry);
            }
            None => classified.unknown.push(entry),
        }
    }
    classified
}

/// Accepts ASCII digits only, so `"+3"`, `"-1"` and `"3.5"` are rejected.
pub fn parse_floor(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn saved_text(record: &EmployeeRecord) -> String {
    format!(
        "{} saved: floor {}, room {}",
        record.full_name(),
        record.floor(),
        record.room()
    )
}

fn manifest_received(text: &str, directory: &Directory) -> Transition {
    let entries = match parse_manifest(text) {
        Ok(entries) => entries,
        Err(_) => {
            return Transition::reply(
                SessionState::ParseFailed,
                Reply::text(UNRECOGNIZED_FORMAT_TEXT),
            )
        }
    };

    let Classified { known, unknown } = classify(entries, directory);
    let mut pending = VecDeque::from(unknown);
    let Some(current) = pending.pop_front() else {
        let route = optimize(known);
        let reply = render_route(&route);
        return Transition::reply(SessionState::RouteReady { route }, reply);
    };

    let prompt = format!(
        "Unknown recipient: {}\n\nWhich floor? (enter a number)",
        capitalize_name(current.name())
    );
    Transition::reply(
        SessionState::InterviewFloor(InterviewFlow::Manifest {
            current,
            deliveries: known,
            pending,
        }),
        Reply::text(prompt),
    )
}

fn surname_input(text: &str) -> Transition {
    let name = text.trim();
    let Some(surname) = SurnameKey::from_name(name) else {
        return Transition::reply(SessionState::AwaitingSurname, Reply::text(ASK_SURNAME_TEXT));
    };

    let flow = InterviewFlow::ManualAdd {
        name: name.to_owned(),
        surname,
    };
    let prompt = format!("{}: which floor?", flow.display_name());
    Transition::reply(SessionState::InterviewFloor(flow), Reply::text(prompt))
}

fn floor_input(flow: InterviewFlow, text: &str) -> Transition {
    let Some(floor) = parse_floor(text) else {
        return Transition::reply(
            SessionState::InterviewFloor(flow),
            Reply::text(INVALID_FLOOR_TEXT),
        );
    };

    let prompt = format!("Floor {floor} ✓\n\nNow the room, for example: {floor}.47");
    Transition::reply(
        SessionState::InterviewRoom {
            flow: flow.with_floor(floor),
            floor,
        },
        Reply::text(prompt),
    )
}

fn room_input(flow: InterviewFlow, floor: i64, text: &str) -> Transition {
    let room = text.trim();
    if room.is_empty() {
        return Transition::reply(
            SessionState::InterviewRoom { flow, floor },
            Reply::text(EMPTY_ROOM_TEXT),
        );
    }
    flow.complete(floor, room)
}

fn route_action(mut route: Vec<ManifestEntry>, index: usize) -> Transition {
    match mark_delivered(&mut route, index) {
        MarkOutcome::Ignored => Transition::silent(SessionState::RouteReady { route }),
        MarkOutcome::Delivered(done) => {
            let reply = render_delivered(&done, &route);
            Transition::reply(SessionState::RouteReady { route }, reply)
        }
        MarkOutcome::Completed(done) => {
            Transition::reply(SessionState::Collecting, render_completed(&done))
        }
    }
}

/// Advances one session by one event.
///
/// `directory` is only consulted when a manifest is classified.
pub fn transition(state: SessionState, event: Event, directory: &Directory) -> Transition {
    match (state, event) {
        (_, Event::Clear) => {
            Transition::reply(SessionState::Collecting, Reply::text(CLEARED_TEXT))
        }
        (_, Event::StartManualAdd) => {
            Transition::reply(SessionState::AwaitingSurname, Reply::text(ASK_SURNAME_TEXT))
        }
        (SessionState::AwaitingSurname, Event::Text(text)) => surname_input(&text),
        (SessionState::InterviewFloor(flow), Event::Text(text)) => floor_input(flow, &text),
        (SessionState::InterviewRoom { flow, floor }, Event::Text(text)) => {
            room_input(flow, floor, &text)
        }
        (
            SessionState::Collecting | SessionState::ParseFailed | SessionState::RouteReady { .. },
            Event::Text(text),
        ) => manifest_received(&text, directory),
        (SessionState::RouteReady { route }, Event::MarkDelivered(index)) => {
            route_action(route, index)
        }
        (state, Event::MarkDelivered(_)) => Transition::silent(state),
    }
}
