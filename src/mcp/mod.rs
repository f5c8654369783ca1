// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer stands in for a chat transport: each tool call is one inbound event from one
//! requester, and each response carries the replies plus the actions valid against them.

mod server;
mod types;

pub use server::FloorwalkMcp;
