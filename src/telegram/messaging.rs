//! Relay send/delete helpers over the shared gateway.
//!
//! Failures surface through the same error taxonomy as the verification
//! pipeline, so the HTTP layer renders one shape regardless of which
//! operation failed. No retries here: a transient upstream error is the
//! caller's to see.

use serde_json::{json, Value};

use crate::verify::errors::{translate, AccessError};

use super::gateway::{ApiMethod, BotApi};

/// Text formatting modes accepted by `sendMessage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    /// Telegram `MarkdownV2` (escape bodies with [`crate::utils::escape_markdown`])
    MarkdownV2,
    /// Telegram HTML subset
    Html,
}

impl ParseMode {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarkdownV2 => "MarkdownV2",
            Self::Html => "HTML",
        }
    }
}

/// Send `text` to `chat_id`, returning the new message id.
///
/// # Errors
///
/// Returns the translated [`AccessError`] when the upstream rejects the
/// send or the response is malformed.
pub async fn send_message(
    api: &dyn BotApi,
    token: &str,
    chat_id: &str,
    text: &str,
    parse_mode: Option<ParseMode>,
) -> Result<i64, AccessError> {
    let mut payload = json!({ "chat_id": chat_id, "text": text });
    if let Some(mode) = parse_mode {
        payload["parse_mode"] = json!(mode.as_str());
    }

    let response = api.call(token, ApiMethod::SendMessage, Some(payload)).await;
    if !response.ok {
        return Err(translate(response.status, response.description.as_deref()));
    }

    response
        .result
        .as_ref()
        .and_then(|r| r.get("message_id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| translate(response.status, Some("sendMessage result missing message_id")))
}

/// Delete a previously sent message.
///
/// # Errors
///
/// Returns the translated [`AccessError`] when the upstream rejects the
/// deletion.
pub async fn delete_message(
    api: &dyn BotApi,
    token: &str,
    chat_id: &str,
    message_id: i64,
) -> Result<(), AccessError> {
    let payload = json!({ "chat_id": chat_id, "message_id": message_id });
    let response = api.call(token, ApiMethod::DeleteMessage, Some(payload)).await;
    if response.ok {
        Ok(())
    } else {
        Err(translate(response.status, response.description.as_deref()))
    }
}
