//! Membership policy: what the bot may do in a chat, keyed on chat type
//! and member status.
//!
//! Channels are stricter than groups: only an administrator can post
//! there at all, so any non-admin status denies access.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::telegram::gateway::{ApiMethod, BotApi};
use crate::telegram::types::{ChatType, MembershipStatus, PermissionSet};

/// Outcome of the membership stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// The bot can act in the chat with the derived permissions
    Granted(PermissionSet),
    /// The bot cannot act there; `status`/`description` feed the translator
    Denied {
        /// Status handed to the error translator
        status: u16,
        /// Reason handed to the error translator
        description: String,
    },
}

/// Lenient view of a `getChatMember` result.
#[derive(Debug, Deserialize)]
struct ChatMemberRecord {
    status: MembershipStatus,
    #[serde(default)]
    can_post_messages: Option<bool>,
    #[serde(default)]
    can_delete_messages: Option<bool>,
}

// Policy denials reuse the upstream bad-request status so the translator's
// description table applies to them.
fn denied(description: impl Into<String>) -> PermissionOutcome {
    PermissionOutcome::Denied {
        status: 400,
        description: description.into(),
    }
}

/// Derive the bot's permission set in `chat_id`.
///
/// Private chats short-circuit to the default set without a network call.
/// For everything else the bot's own member record is fetched and run
/// through the policy table. This stage never propagates a fault: any
/// transport or parse surprise becomes a `Denied` outcome.
pub async fn resolve_membership(
    api: &dyn BotApi,
    token: &str,
    chat_id: &str,
    bot_user_id: i64,
    chat_type: ChatType,
) -> PermissionOutcome {
    if chat_type == ChatType::Private {
        return PermissionOutcome::Granted(PermissionSet::private_default());
    }

    let payload = json!({ "chat_id": chat_id, "user_id": bot_user_id });
    let response = api.call(token, ApiMethod::GetChatMember, Some(payload)).await;
    if !response.ok {
        return PermissionOutcome::Denied {
            status: response.status,
            description: response
                .description
                .unwrap_or_else(|| "could not verify group membership".to_string()),
        };
    }

    let record = response
        .result
        .and_then(|r| serde_json::from_value::<ChatMemberRecord>(r).ok());
    let Some(record) = record else {
        return denied("could not verify group membership");
    };

    debug!(
        "bot {} has status {} in {} {}",
        bot_user_id, record.status, chat_type, chat_id
    );
    decide(chat_type, &record)
}

// The whole policy, keyed on (chat type, status).
fn decide(chat_type: ChatType, record: &ChatMemberRecord) -> PermissionOutcome {
    use MembershipStatus::{Administrator, Creator, Kicked, Left, Member};

    match (chat_type, record.status) {
        (ChatType::Group | ChatType::Supergroup, Administrator | Creator) => {
            PermissionOutcome::Granted(admin_permissions(record))
        }
        (ChatType::Group | ChatType::Supergroup, Member) => {
            PermissionOutcome::Granted(PermissionSet {
                can_send_messages: true,
                can_delete_messages: false,
            })
        }
        (ChatType::Group | ChatType::Supergroup, Left | Kicked) => {
            denied("bot is not a member of the group; add it first")
        }
        (ChatType::Channel, Administrator) => {
            PermissionOutcome::Granted(admin_permissions(record))
        }
        (ChatType::Channel, Left | Kicked) => {
            denied("bot is not an administrator of the channel; add it as admin first")
        }
        (kind, status) => denied(format!(
            "bot has no access to the {}. Status: {status}",
            kind.noun()
        )),
    }
}

// Administrators with no explicit permission payload are unrestricted.
fn admin_permissions(record: &ChatMemberRecord) -> PermissionSet {
    match record.can_post_messages {
        Some(can_post) => PermissionSet {
            can_send_messages: can_post,
            can_delete_messages: record.can_delete_messages == Some(true),
        },
        None => PermissionSet::full(),
    }
}
