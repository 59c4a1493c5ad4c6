//! Domain types shared by the verification pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the bot behind a token, as reported by `getMe`.
///
/// Fields map the upstream payload verbatim; nothing is derived.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BotIdentity {
    /// Numeric user id of the bot account
    pub id: i64,
    /// Bot username, without the leading `@`
    #[serde(default)]
    pub username: Option<String>,
    /// Display name
    #[serde(default)]
    pub first_name: String,
    /// Always `true` for real bot accounts
    #[serde(default)]
    pub is_bot: bool,
}

/// Kind of chat a verification run targets.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// One-on-one conversation with a user
    Private,
    /// Basic group
    Group,
    /// Large group with extended admin features
    Supergroup,
    /// Broadcast channel
    Channel,
}

impl ChatType {
    /// Noun used when interpolating this chat kind into user-facing text.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Private => "chat",
            Self::Group | Self::Supergroup => "group",
            Self::Channel => "channel",
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
        };
        f.write_str(word)
    }
}

/// A chat the bot attempted to reach, as resolved by `getChat`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ChatDescriptor {
    /// Canonical chat id as reported upstream
    pub id: String,
    /// Chat classification driving the membership policy
    #[serde(rename = "type")]
    pub kind: ChatType,
    /// Display title, already resolved (title, then username, then first name)
    pub title: Option<String>,
    /// Public username of the chat, if it has one
    pub username: Option<String>,
}

/// The bot's relationship to a chat, from the upstream member-status
/// vocabulary. Anything unrecognized collapses to [`Self::Unknown`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Chat owner
    Creator,
    /// Admin rights, possibly restricted per permission flags
    Administrator,
    /// Ordinary member
    Member,
    /// Member with restrictions applied
    Restricted,
    /// Left on its own
    Left,
    /// Removed and banned
    Kicked,
    /// Any status this engine does not recognize
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Creator => "creator",
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Restricted => "restricted",
            Self::Left => "left",
            Self::Kicked => "kicked",
            Self::Unknown => "unknown",
        };
        f.write_str(word)
    }
}

/// What the bot is currently allowed to do in a chat.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PermissionSet {
    /// Posting messages
    pub can_send_messages: bool,
    /// Deleting messages (other members' included)
    pub can_delete_messages: bool,
}

impl PermissionSet {
    /// Permissions assumed for private chats: sending works once the chat
    /// resolved, deleting the other party's messages does not.
    #[must_use]
    pub const fn private_default() -> Self {
        Self {
            can_send_messages: true,
            can_delete_messages: false,
        }
    }

    /// Unrestricted permissions.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            can_send_messages: true,
            can_delete_messages: true,
        }
    }
}
