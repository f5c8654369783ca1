// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;

use crate::desk::DeliveryDesk;
use crate::model::{Directory, ManifestEntry, RequesterId};
use crate::ops::Action;
use crate::render::Reply;
use crate::store::StoreError;

use super::types::*;

#[derive(Clone)]
pub struct FloorwalkMcp {
    desk: Arc<Mutex<DeliveryDesk>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FloorwalkMcp {
    pub fn new(desk: DeliveryDesk) -> Self {
        Self::with_shared_desk(Arc::new(Mutex::new(desk)))
    }

    /// Every handle built from the same desk serializes its events through one lock.
    pub fn with_shared_desk(desk: Arc<Mutex<DeliveryDesk>>) -> Self {
        Self {
            desk,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Greeting and usage help; start here, then send a manifest with `chat.message`.
    #[tool(name = "chat.start")]
    async fn chat_start(&self) -> Result<Json<StartResponse>, ErrorData> {
        let desk = self.desk.lock().await;
        Ok(Json(StartResponse {
            reply: mcp_reply(desk.start()),
        }))
    }

    /// Send free text for a requester: a manifest (`<surname> <order>` per line) or the answer to
    /// the pending floor/room/surname question. Returns replies plus the current route.
    #[tool(name = "chat.message")]
    async fn chat_message(
        &self,
        params: Parameters<ChatMessageParams>,
    ) -> Result<Json<ChatResponse>, ErrorData> {
        let ChatMessageParams { requester_id, text } = params.0;
        let requester = parse_requester(requester_id)?;

        let mut desk = self.desk.lock().await;
        let replies = desk
            .handle_text(&requester, &text)
            .map_err(|err| store_error("failed to handle message", &err))?;
        Ok(Json(chat_response(&desk, &requester, replies)))
    }

    /// Apply a wire action offered by an earlier reply (`done:<index>`, `done:clear`,
    /// `del:<surname>`, `cancel`). Out-of-range indices are ignored.
    #[tool(name = "chat.action")]
    async fn chat_action(
        &self,
        params: Parameters<ChatActionParams>,
    ) -> Result<Json<ChatResponse>, ErrorData> {
        let ChatActionParams { requester_id, action } = params.0;
        let requester = parse_requester(requester_id)?;
        let parsed = action.parse::<Action>().map_err(|err| {
            ErrorData::invalid_params(
                format!("invalid action: {err}"),
                Some(serde_json::json!({ "action": action })),
            )
        })?;

        let mut desk = self.desk.lock().await;
        let replies = desk
            .handle_action(&requester, parsed)
            .map_err(|err| store_error("failed to apply action", &err))?;
        Ok(Json(chat_response(&desk, &requester, replies)))
    }

    /// Begin adding an employee by hand; answer the surname, floor and room questions with
    /// `chat.message`. Abandons any interview in progress for this requester.
    #[tool(name = "employee.add")]
    async fn employee_add(
        &self,
        params: Parameters<RequesterParams>,
    ) -> Result<Json<ChatResponse>, ErrorData> {
        let requester = parse_requester(params.0.requester_id)?;

        let mut desk = self.desk.lock().await;
        let replies = desk
            .start_manual_add(&requester)
            .map_err(|err| store_error("failed to start manual add", &err))?;
        Ok(Json(chat_response(&desk, &requester, replies)))
    }

    /// Drop the requester's route or interview and go back to waiting for a manifest.
    #[tool(name = "route.clear")]
    async fn route_clear(
        &self,
        params: Parameters<RequesterParams>,
    ) -> Result<Json<ChatResponse>, ErrorData> {
        let requester = parse_requester(params.0.requester_id)?;

        let mut desk = self.desk.lock().await;
        let replies =
            desk.clear(&requester).map_err(|err| store_error("failed to clear route", &err))?;
        Ok(Json(chat_response(&desk, &requester, replies)))
    }

    /// List every employee in the directory, grouped by floor.
    #[tool(name = "directory.list")]
    async fn directory_list(&self) -> Result<Json<DirectoryListResponse>, ErrorData> {
        let desk = self.desk.lock().await;
        let listing = desk
            .list_directory()
            .map_err(|err| store_error("failed to load directory", &err))?;
        drop(desk);

        Ok(Json(DirectoryListResponse {
            text: listing.reply.text,
            employees: mcp_employees(&listing.directory),
        }))
    }

    /// Offer one `del:<surname>` action per employee plus `cancel`; apply the choice with
    /// `chat.action`.
    #[tool(name = "directory.delete_prompt")]
    async fn directory_delete_prompt(&self) -> Result<Json<DeletePromptResponse>, ErrorData> {
        let desk = self.desk.lock().await;
        let reply = desk
            .delete_prompt()
            .map_err(|err| store_error("failed to load directory", &err))?;
        Ok(Json(DeletePromptResponse {
            reply: mcp_reply(reply),
        }))
    }
}

#[tool_handler]
impl ServerHandler for FloorwalkMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Floorwalk delivery-route desk (tools: chat.start, chat.message, chat.action, employee.add, route.clear, directory.list, directory.delete_prompt)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn parse_requester(requester_id: String) -> Result<RequesterId, ErrorData> {
    RequesterId::new(requester_id.clone()).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid requester_id: {err}"),
            Some(serde_json::json!({ "requester_id": requester_id })),
        )
    })
}

fn store_error(context: &str, err: &StoreError) -> ErrorData {
    ErrorData::internal_error(format!("{context}: {err}"), None)
}

fn mcp_reply(reply: Reply) -> McpReply {
    McpReply {
        text: reply.text,
        actions: reply
            .actions
            .into_iter()
            .map(|button| McpAction {
                label: button.label,
                action: button.action.to_string(),
            })
            .collect(),
    }
}

fn mcp_route(route: &[ManifestEntry]) -> Vec<McpRouteEntry> {
    route
        .iter()
        .enumerate()
        .map(|(idx, entry)| McpRouteEntry {
            position: idx as u64 + 1,
            name: entry.name().to_owned(),
            surname: entry.surname().as_str().to_owned(),
            order_id: entry.order_id().to_owned(),
            floor: entry.floor(),
            room: entry.room().map(ToOwned::to_owned),
        })
        .collect()
}

fn mcp_employees(directory: &Directory) -> Vec<McpEmployee> {
    directory
        .iter()
        .map(|(surname, record)| McpEmployee {
            surname: surname.as_str().to_owned(),
            full_name: record.full_name().to_owned(),
            floor: record.floor(),
            room: record.room().to_owned(),
        })
        .collect()
}

fn chat_response(desk: &DeliveryDesk, requester: &RequesterId, replies: Vec<Reply>) -> ChatResponse {
    let session = desk.session(requester);
    ChatResponse {
        replies: replies.into_iter().map(mcp_reply).collect(),
        phase: desk.phase(requester).as_str().to_owned(),
        route: session.and_then(|session| session.route()).map(mcp_route).unwrap_or_default(),
    }
}
