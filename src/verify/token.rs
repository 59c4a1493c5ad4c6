//! Token validation against `getMe`.

use tracing::debug;

use crate::telegram::gateway::{ApiMethod, BotApi};
use crate::telegram::types::BotIdentity;

/// Outcome of a standalone token check.
#[derive(Clone, Debug)]
pub struct TokenCheck {
    /// Whether the token identifies a real bot
    pub valid: bool,
    /// The bot's identity when `valid`
    pub bot: Option<BotIdentity>,
    /// Failure reason when not `valid`
    pub error: Option<String>,
}

impl TokenCheck {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            bot: None,
            error: Some(error.into()),
        }
    }
}

/// Confirm `token` identifies a real bot and return its identity.
///
/// An empty token short-circuits without a network call. The identity
/// fields are mapped from the `getMe` payload verbatim.
pub async fn validate_token(api: &dyn BotApi, token: &str) -> TokenCheck {
    if token.is_empty() {
        return TokenCheck::failure("token not provided");
    }

    let response = api.call(token, ApiMethod::GetMe, None).await;
    if !response.ok {
        return TokenCheck::failure(
            response
                .description
                .unwrap_or_else(|| "unable to verify token".to_string()),
        );
    }

    let Some(result) = response.result else {
        return TokenCheck::failure("unable to verify token");
    };

    match serde_json::from_value::<BotIdentity>(result) {
        Ok(bot) => {
            debug!(
                "token resolves to bot {} (@{})",
                bot.id,
                bot.username.as_deref().unwrap_or("-")
            );
            TokenCheck {
                valid: true,
                bot: Some(bot),
                error: None,
            }
        }
        Err(e) => TokenCheck::failure(format!("malformed getMe payload: {e}")),
    }
}
