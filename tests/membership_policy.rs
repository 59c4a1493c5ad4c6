//! The full chat-type × member-status policy matrix, driven through
//! `resolve_membership` with a scripted transport.

mod common;

use common::{err, init_test_env, ok, ScriptedApi};
use oxide_relay::verify::membership::{resolve_membership, PermissionOutcome};
use oxide_relay::{ChatType, PermissionSet};
use serde_json::json;

const TOKEN: &str = "7000001:AAFxT9qwertyuiopasdfghjklzxcvbnm123";
const BOT_ID: i64 = 7_000_001;

async fn outcome_for(chat_type: ChatType, status: &str) -> PermissionOutcome {
    let mut api = ScriptedApi::default();
    api.get_chat_member = ok(json!({ "status": status }));
    resolve_membership(&api, TOKEN, "-100200300", BOT_ID, chat_type).await
}

fn granted(can_send: bool, can_delete: bool) -> PermissionOutcome {
    PermissionOutcome::Granted(PermissionSet {
        can_send_messages: can_send,
        can_delete_messages: can_delete,
    })
}

fn denied_with(description: &str) -> PermissionOutcome {
    PermissionOutcome::Denied {
        status: 400,
        description: description.to_string(),
    }
}

#[tokio::test]
async fn test_private_chat_short_circuits() {
    init_test_env();
    let api = ScriptedApi::default();
    let outcome = resolve_membership(&api, TOKEN, "555", BOT_ID, ChatType::Private).await;
    assert_eq!(outcome, granted(true, false));
    assert_eq!(api.calls(), 0, "private chats never hit getChatMember");
}

#[tokio::test]
async fn test_group_status_matrix() {
    init_test_env();
    for kind in [ChatType::Group, ChatType::Supergroup] {
        let noun_msg = |status: &str| format!("bot has no access to the group. Status: {status}");

        assert_eq!(outcome_for(kind, "administrator").await, granted(true, true));
        assert_eq!(outcome_for(kind, "creator").await, granted(true, true));
        assert_eq!(outcome_for(kind, "member").await, granted(true, false));
        assert_eq!(
            outcome_for(kind, "left").await,
            denied_with("bot is not a member of the group; add it first")
        );
        assert_eq!(
            outcome_for(kind, "kicked").await,
            denied_with("bot is not a member of the group; add it first")
        );
        assert_eq!(
            outcome_for(kind, "restricted").await,
            denied_with(&noun_msg("restricted"))
        );
        // A status outside the vocabulary collapses to "unknown"
        assert_eq!(
            outcome_for(kind, "owner").await,
            denied_with(&noun_msg("unknown"))
        );
    }
}

#[tokio::test]
async fn test_channel_status_matrix() {
    init_test_env();
    let noun_msg = |status: &str| format!("bot has no access to the channel. Status: {status}");

    assert_eq!(
        outcome_for(ChatType::Channel, "administrator").await,
        granted(true, true)
    );
    for status in ["member", "creator", "restricted"] {
        assert_eq!(
            outcome_for(ChatType::Channel, status).await,
            denied_with(&noun_msg(status)),
            "channel must deny status {status}"
        );
    }
    for status in ["left", "kicked"] {
        assert_eq!(
            outcome_for(ChatType::Channel, status).await,
            denied_with("bot is not an administrator of the channel; add it as admin first"),
            "channel must name the admin requirement for {status}"
        );
    }
}

#[tokio::test]
async fn test_admin_permission_flags_apply_in_channels() {
    init_test_env();
    let mut api = ScriptedApi::default();
    api.get_chat_member = ok(json!({
        "status": "administrator",
        "can_post_messages": true,
        "can_delete_messages": false
    }));
    let outcome = resolve_membership(&api, TOKEN, "-100900", BOT_ID, ChatType::Channel).await;
    assert_eq!(outcome, granted(true, false));
}

#[tokio::test]
async fn test_unusable_member_record_is_denied() {
    init_test_env();
    let mut api = ScriptedApi::default();
    // ok=true but the result is not a member record
    api.get_chat_member = ok(json!({ "unexpected": "shape" }));
    let outcome = resolve_membership(&api, TOKEN, "-100200300", BOT_ID, ChatType::Group).await;
    assert_eq!(outcome, denied_with("could not verify group membership"));
}

#[tokio::test]
async fn test_failed_member_call_keeps_upstream_description() {
    init_test_env();
    let mut api = ScriptedApi::default();
    api.get_chat_member = err(400, "Bad Request: user not found");
    let outcome = resolve_membership(&api, TOKEN, "-100200300", BOT_ID, ChatType::Group).await;
    assert_eq!(
        outcome,
        PermissionOutcome::Denied {
            status: 400,
            description: "Bad Request: user not found".to_string(),
        }
    );
}
