// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Floorwalk: turns a courier's order manifest into a floor-by-floor delivery route.
//!
//! Recipients are looked up in a persistent employee directory; unknown ones are interviewed for
//! floor and room once and remembered. The MCP server in [`mcp`] is the chat-facing surface.

pub mod desk;
pub mod format;
pub mod mcp;
pub mod model;
pub mod ops;
pub mod render;
pub mod route;
pub mod session;
pub mod store;
