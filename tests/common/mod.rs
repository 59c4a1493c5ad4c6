//! Scripted Bot API transport shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dotenvy::dotenv;
use oxide_relay::telegram::gateway::{ApiMethod, ApiResponse, BotApi};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_test_env() {
    let _ = dotenv();
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Canned success envelope.
pub fn ok(result: Value) -> ApiResponse {
    ApiResponse {
        ok: true,
        status: 200,
        result: Some(result),
        description: None,
    }
}

/// Canned upstream failure.
pub fn err(status: u16, description: &str) -> ApiResponse {
    ApiResponse {
        ok: false,
        status,
        result: None,
        description: Some(description.to_string()),
    }
}

/// Scripted [`BotApi`]: one canned answer per method, a total call
/// counter, and the last payload for wire-shape assertions.
pub struct ScriptedApi {
    pub get_me: ApiResponse,
    pub get_chat: ApiResponse,
    pub get_chat_member: ApiResponse,
    pub send_message: ApiResponse,
    pub delete_message: ApiResponse,
    calls: AtomicUsize,
    last_payload: Mutex<Option<Value>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        let unscripted = err(500, "unscripted method");
        Self {
            get_me: unscripted.clone(),
            get_chat: unscripted.clone(),
            get_chat_member: unscripted.clone(),
            send_message: unscripted.clone(),
            delete_message: unscripted,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }
}

impl ScriptedApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().expect("payload lock").clone()
    }
}

#[async_trait]
impl BotApi for ScriptedApi {
    async fn call(&self, _token: &str, method: ApiMethod, payload: Option<Value>) -> ApiResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().expect("payload lock") = payload;
        match method {
            ApiMethod::GetMe => self.get_me.clone(),
            ApiMethod::GetChat => self.get_chat.clone(),
            ApiMethod::GetChatMember => self.get_chat_member.clone(),
            ApiMethod::SendMessage => self.send_message.clone(),
            ApiMethod::DeleteMessage => self.delete_message.clone(),
        }
    }
}

/// A `getMe` payload for the relay's own test bot.
pub fn bot_identity() -> Value {
    serde_json::json!({
        "id": 7_000_001,
        "is_bot": true,
        "first_name": "relay",
        "username": "relay_check_bot"
    })
}
