//! Chat lookup and classification via `getChat`.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::telegram::gateway::{ApiMethod, BotApi};
use crate::telegram::types::{ChatDescriptor, ChatType};

/// A failed chat lookup, carrying whatever the upstream reported.
#[derive(Clone, Debug)]
pub struct LookupFailure {
    /// HTTP status of the failed exchange (`0` when no call happened)
    pub status: u16,
    /// Upstream description, if any
    pub description: Option<String>,
}

/// Lenient view of a `getChat` result.
#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
    #[serde(rename = "type")]
    kind: ChatType,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
}

impl RawChat {
    // Display title resolution: title, then username, then first_name.
    fn into_descriptor(self) -> ChatDescriptor {
        let RawChat {
            id,
            kind,
            title,
            username,
            first_name,
        } = self;
        let title = title.or_else(|| username.clone()).or(first_name);
        ChatDescriptor {
            id: id.to_string(),
            kind,
            title,
            username,
        }
    }
}

/// Fetch chat metadata and classify the chat type.
///
/// Both inputs are required; with either missing this fails with a fixed
/// description and no HTTP call. A `getChat` result whose `type` falls
/// outside the known vocabulary is a failure, not a guess.
pub async fn resolve_chat(
    api: &dyn BotApi,
    token: &str,
    chat_id: &str,
) -> Result<ChatDescriptor, LookupFailure> {
    if token.is_empty() || chat_id.is_empty() {
        return Err(LookupFailure {
            status: 0,
            description: Some("token or chat id not provided".to_string()),
        });
    }

    let response = api
        .call(token, ApiMethod::GetChat, Some(json!({ "chat_id": chat_id })))
        .await;
    if !response.ok {
        return Err(LookupFailure {
            status: response.status,
            description: response.description,
        });
    }

    let Some(result) = response.result else {
        return Err(LookupFailure {
            status: response.status,
            description: Some("empty getChat result".to_string()),
        });
    };

    match serde_json::from_value::<RawChat>(result) {
        Ok(raw) => {
            let chat = raw.into_descriptor();
            debug!("resolved chat {} as {}", chat.id, chat.kind);
            Ok(chat)
        }
        Err(e) => Err(LookupFailure {
            status: response.status,
            description: Some(format!("unrecognized chat payload: {e}")),
        }),
    }
}
