// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RequesterParams {
    /// Opaque conversation id; each id has its own session.
    pub requester_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatMessageParams {
    pub requester_id: String,
    /// A manifest (one `<surname> <order>` per line) or the answer to the last question.
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatActionParams {
    pub requester_id: String,
    /// Wire action taken from a previous reply: `done:<index>`, `done:clear`, `del:<surname>`
    /// or `cancel`.
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpAction {
    pub label: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpReply {
    pub text: String,
    pub actions: Vec<McpAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpRouteEntry {
    /// 1-based position as displayed; the matching action index is `position - 1`.
    pub position: u64,
    pub name: String,
    pub surname: String,
    pub order_id: String,
    pub floor: Option<i64>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatResponse {
    pub replies: Vec<McpReply>,
    /// Session phase after the event (`collecting`, `interview_floor`, `route_ready`, ...).
    pub phase: String,
    /// Current route when the phase is `route_ready`, otherwise empty.
    pub route: Vec<McpRouteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StartResponse {
    pub reply: McpReply,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpEmployee {
    pub surname: String,
    pub full_name: String,
    pub floor: i64,
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DirectoryListResponse {
    /// Rendered listing, grouped by floor.
    pub text: String,
    /// Sorted by surname.
    pub employees: Vec<McpEmployee>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeletePromptResponse {
    pub reply: McpReply,
}
