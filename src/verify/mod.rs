//! The verification pipeline: given a bot token and a chat id, decide
//! whether the bot can reach the chat and what it may do there.
//!
//! Stages run strictly in order because each depends on the previous
//! result: chat lookup, then (for groups and channels) the bot's identity,
//! then its membership record. Every failure at any stage is normalized
//! through [`errors::translate`] before it leaves this module; nothing is
//! thrown past the orchestrator boundary.

pub mod chat;
pub mod errors;
pub mod membership;
pub mod token;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::telegram::gateway::{BotApi, BotApiGateway};
use crate::telegram::types::{ChatDescriptor, ChatType, PermissionSet};
use errors::{translate, AccessError, ErrorKind};
use membership::PermissionOutcome;
use token::TokenCheck;

/// Final verdict of a verification run.
///
/// Exactly one of two shapes is ever produced: access granted with chat
/// and permissions, or access denied with an error. The constructors keep
/// partially-populated results unrepresentable at the call sites.
#[derive(Clone, Debug, Serialize)]
pub struct ChatAccessResult {
    /// Whether the bot can act in the chat
    pub has_access: bool,
    /// The resolved chat, present iff `has_access`
    pub chat: Option<ChatDescriptor>,
    /// Derived permissions, present iff `has_access`
    pub permissions: Option<PermissionSet>,
    /// The normalized failure, present iff not `has_access`
    pub error: Option<AccessError>,
}

impl ChatAccessResult {
    fn granted(chat: ChatDescriptor, permissions: PermissionSet) -> Self {
        Self {
            has_access: true,
            chat: Some(chat),
            permissions: Some(permissions),
            error: None,
        }
    }

    fn denied(error: AccessError) -> Self {
        Self {
            has_access: false,
            chat: None,
            permissions: None,
            error: Some(error),
        }
    }
}

/// Sequences token, chat and membership checks into one decision.
///
/// Holds no state beyond the transport; concurrent verification runs for
/// different tokens and chats share nothing.
pub struct Verifier {
    api: Arc<dyn BotApi>,
}

impl Verifier {
    /// Build a verifier over the real Bot API gateway.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            api: Arc::new(BotApiGateway::new(
                settings.api_base_url.clone(),
                settings.http_timeout(),
            )),
        }
    }

    /// Build a verifier over any transport (tests inject a scripted one).
    #[must_use]
    pub fn with_gateway(api: Arc<dyn BotApi>) -> Self {
        Self { api }
    }

    /// Standalone token check, exposed for bot-only verification.
    pub async fn verify_token(&self, token: &str) -> TokenCheck {
        token::validate_token(self.api.as_ref(), token).await
    }

    /// Decide whether the bot behind `token` can reach `chat_id` and what
    /// it is allowed to do there.
    pub async fn verify_chat(&self, token: &str, chat_id: &str) -> ChatAccessResult {
        if token.is_empty() {
            return ChatAccessResult::denied(AccessError::new(
                ErrorKind::InvalidToken,
                "bot token not provided",
            ));
        }
        if chat_id.is_empty() {
            return ChatAccessResult::denied(AccessError::new(
                ErrorKind::InvalidChatId,
                "chat id not provided",
            ));
        }

        let resolved = match chat::resolve_chat(self.api.as_ref(), token, chat_id).await {
            Ok(resolved) => resolved,
            Err(failure) => {
                debug!(
                    "chat lookup failed for {}: status={} {:?}",
                    chat_id, failure.status, failure.description
                );
                return ChatAccessResult::denied(translate(
                    failure.status,
                    failure.description.as_deref(),
                ));
            }
        };

        // Private chats need no membership check: reachable once resolved.
        if resolved.kind == ChatType::Private {
            return ChatAccessResult::granted(resolved, PermissionSet::private_default());
        }

        let identity = token::validate_token(self.api.as_ref(), token).await;
        let bot = match identity.bot {
            Some(bot) if identity.valid => bot,
            _ => {
                // No membership call is attempted on a bad identity.
                return ChatAccessResult::denied(translate(401, Some("bot token invalid")));
            }
        };

        match membership::resolve_membership(self.api.as_ref(), token, chat_id, bot.id, resolved.kind)
            .await
        {
            PermissionOutcome::Granted(permissions) => {
                ChatAccessResult::granted(resolved, permissions)
            }
            PermissionOutcome::Denied {
                status,
                description,
            } => {
                debug!(
                    "membership denied for {}: status={} {}",
                    chat_id, status, description
                );
                ChatAccessResult::denied(translate(status, Some(&description)))
            }
        }
    }
}
