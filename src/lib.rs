//! Chat-access verification engine for the Telegram relay.
//!
//! Given a bot token and a target chat id, the engine decides whether the
//! bot can reach the chat at all, derives what it is allowed to do there
//! (send / delete messages), and normalizes every upstream failure into a
//! small, stable error taxonomy the HTTP layer can return to users as-is.

/// Configuration management
pub mod config;
/// Telegram Bot API transport, wire types and relay helpers
pub mod telegram;
pub mod utils;
/// The verification pipeline
pub mod verify;

pub use telegram::gateway::{ApiMethod, ApiResponse, BotApi, BotApiGateway};
pub use telegram::types::{BotIdentity, ChatDescriptor, ChatType, MembershipStatus, PermissionSet};
pub use verify::errors::{AccessError, ErrorKind};
pub use verify::{ChatAccessResult, Verifier};
