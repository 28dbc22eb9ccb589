// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Trimflow bot.
//!
//! Exposes the inbound message webhook (the transport boundary) and the
//! lead dashboard REST API with CSV export.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
