//! Translation of upstream Bot API failures into the relay's error
//! taxonomy.
//!
//! The upstream reports failures as free-form description strings; users
//! get a stable kind plus a message that tells them what to fix.

use serde::Serialize;
use thiserror::Error;

/// Canonical categories for everything that can go wrong while verifying
/// chat access.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// The chat id does not resolve to a chat the bot can see
    ChatNotFound,
    /// The chat id is missing or malformed
    InvalidChatId,
    /// The token is missing, malformed, or revoked
    InvalidToken,
    /// The token path does not resolve to a bot at all
    BotNotFound,
    /// The bot is not (or no longer) a member/admin of the chat
    BotNotMember,
    /// The target user blocked the bot
    BotBlocked,
    /// The target user account is deactivated
    UserDeactivated,
    /// The group migrated; the old chat id is stale
    ChatMigrated,
    /// Upstream refused the operation outright
    Forbidden,
    /// Anything we cannot classify
    Unknown,
}

/// A failure normalized for the caller: stable kind + user-facing message.
#[derive(Clone, Debug, Error, Serialize, PartialEq, Eq)]
#[error("{message}")]
pub struct AccessError {
    /// Canonical category
    pub kind: ErrorKind,
    /// User-facing explanation
    pub message: String,
}

impl AccessError {
    /// Build an error of `kind` with `message`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

struct Translation {
    needle: &'static str,
    kind: ErrorKind,
    message: &'static str,
}

// Matched top to bottom against lowercased HTTP 400 descriptions; the
// first hit wins. Keep the original ordering: some needles shadow others.
const TRANSLATIONS: &[Translation] = &[
    Translation {
        needle: "chat not found",
        kind: ErrorKind::ChatNotFound,
        message: "chat not found; add the bot to the chat and try again",
    },
    Translation {
        needle: "chat_id is empty",
        kind: ErrorKind::InvalidChatId,
        message: "chat id is empty",
    },
    Translation {
        needle: "invalid chat_id",
        kind: ErrorKind::InvalidChatId,
        message: "invalid chat id",
    },
    Translation {
        needle: "chat id is invalid",
        kind: ErrorKind::InvalidChatId,
        message: "invalid chat id",
    },
    Translation {
        needle: "bot was blocked by the user",
        kind: ErrorKind::BotBlocked,
        message: "the bot was blocked by this user",
    },
    Translation {
        needle: "user is deactivated",
        kind: ErrorKind::UserDeactivated,
        message: "this user account is deactivated",
    },
    Translation {
        needle: "bot was kicked",
        kind: ErrorKind::BotNotMember,
        message: "the bot was removed from this chat; add it back first",
    },
    Translation {
        needle: "not enough rights",
        kind: ErrorKind::Forbidden,
        message: "the bot does not have enough rights in this chat",
    },
    Translation {
        needle: "bot is not a member",
        kind: ErrorKind::BotNotMember,
        message: "the bot is not a member of this chat; add it first",
    },
    Translation {
        needle: "bot is not an administrator",
        kind: ErrorKind::BotNotMember,
        message: "the bot is not an administrator of this channel; add it as admin first",
    },
    Translation {
        needle: "group chat was upgraded to a supergroup",
        kind: ErrorKind::ChatMigrated,
        message: "the group was upgraded to a supergroup; use the new chat id",
    },
];

/// Map an upstream `(status, description)` pair onto the taxonomy.
///
/// Three stages: the ordered description table (400 only), a per-status
/// fallback, and finally `Unknown` carrying whatever the upstream said.
#[must_use]
pub fn translate(status: u16, description: Option<&str>) -> AccessError {
    if status == 400 {
        if let Some(desc) = description {
            let lowered = desc.to_lowercase();
            for row in TRANSLATIONS {
                if lowered.contains(row.needle) {
                    return AccessError::new(row.kind, row.message);
                }
            }
            if lowered.contains("not found") {
                return AccessError::new(
                    ErrorKind::ChatNotFound,
                    "chat not found; add the bot to the chat and try again",
                );
            }
            if lowered.contains("forbidden") {
                return AccessError::new(
                    ErrorKind::Forbidden,
                    "the bot is not allowed to access this chat",
                );
            }
        }
    }

    match (status, description) {
        (401, _) => AccessError::new(ErrorKind::InvalidToken, "bot token is invalid"),
        (403, _) => AccessError::new(
            ErrorKind::Forbidden,
            "the bot is not allowed to access this chat",
        ),
        (404, _) => AccessError::new(ErrorKind::BotNotFound, "bot not found; check the token"),
        (_, Some(desc)) => AccessError::new(ErrorKind::Unknown, desc),
        (_, None) => AccessError::new(ErrorKind::Unknown, "error verifying chat access"),
    }
}
