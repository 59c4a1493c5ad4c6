//! Low-level transport for the Telegram Bot API.
//!
//! One fixed-timeout HTTP call per invocation, no retries. Upstream
//! 4xx/5xx responses are ordinary data for callers to inspect; only a true
//! transport fault (connect error, timeout, unparseable body) produces a
//! synthetic `status: 0` response. Nothing here ever returns `Err`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

use crate::utils::redact_token;

/// Upstream operations this crate is allowed to issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiMethod {
    /// Identity of the bot behind a token
    GetMe,
    /// Chat metadata lookup
    GetChat,
    /// The bot's own membership record in a chat
    GetChatMember,
    /// Post a text message
    SendMessage,
    /// Delete a previously posted message
    DeleteMessage,
}

impl ApiMethod {
    /// Wire name of the method as it appears in the request path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetMe => "getMe",
            Self::GetChat => "getChat",
            Self::GetChatMember => "getChatMember",
            Self::SendMessage => "sendMessage",
            Self::DeleteMessage => "deleteMessage",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response envelope of a Bot API call.
///
/// `status: 0` marks a synthetic response built from a transport fault;
/// real upstream responses carry the HTTP status they arrived with.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// Upstream `ok` flag (`false` for synthetic responses)
    pub ok: bool,
    /// HTTP status, or `0` when no HTTP exchange happened
    pub status: u16,
    /// Upstream `result` payload, if any
    pub result: Option<Value>,
    /// Upstream `description`, or the transport error text
    pub description: Option<String>,
}

impl ApiResponse {
    /// Synthetic failure for transport-level faults (no HTTP exchange).
    #[must_use]
    pub fn transport_failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: 0,
            result: None,
            description: Some(description.into()),
        }
    }
}

/// Transport seam for the Bot API.
///
/// The verification pipeline only talks to this trait, so tests swap in a
/// scripted transport instead of the network.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Issue a single Bot API call on behalf of `token`.
    async fn call(&self, token: &str, method: ApiMethod, payload: Option<Value>) -> ApiResponse;
}

/// reqwest-backed [`BotApi`] implementation.
pub struct BotApiGateway {
    client: HttpClient,
    base_url: String,
}

impl BotApiGateway {
    /// Create a gateway against `base_url` with a fixed per-call timeout.
    ///
    /// The timeout prevents infinite hangs when the API is slow or
    /// unresponsive.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, token: &str, method: ApiMethod) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            token,
            method.as_str()
        )
    }
}

#[async_trait]
impl BotApi for BotApiGateway {
    async fn call(&self, token: &str, method: ApiMethod, payload: Option<Value>) -> ApiResponse {
        let url = self.endpoint(token, method);
        debug!("calling {} at {}", method, redact_token(&url));

        let request = match payload {
            Some(body) => self.client.post(&url).json(&body),
            None => self.client.get(&url),
        };

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("{} transport fault: {}", method, redact_token(&e.to_string()));
                return ApiResponse::transport_failure(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let envelope: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => return ApiResponse::transport_failure(format!("invalid response body: {e}")),
        };

        ApiResponse {
            ok: envelope.get("ok").and_then(Value::as_bool).unwrap_or(false),
            status,
            result: envelope.get("result").cloned(),
            description: envelope
                .get("description")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        }
    }
}
