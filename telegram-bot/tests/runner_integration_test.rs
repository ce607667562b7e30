//! Integration tests for the update loop against a mock Telegram Bot API.
//!
//! Uses a mockito server as `TELEGRAM_API_URL` and the real reqwest transport, so request
//! paths, query strings and text encoding are exercised end to end.
//! Mock guards must be held until the poll completes; a dropped mock answers 501.

use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;
use telegram_bot::{
    build_bot_components_with_transport, BackoffReason, BotConfig, CancellationToken,
    PollOutcome, ReqwestTransport, Transport, UpdateLoop,
};

/// Request paths are `/bot<token>/<method>`.
const TEST_BOT_TOKEN: &str = "test_token";

fn get_updates_path() -> String {
    format!("/bot{}/getUpdates", TEST_BOT_TOKEN)
}

fn send_message_path() -> String {
    format!("/bot{}/sendMessage", TEST_BOT_TOKEN)
}

fn update_loop_for(server: &mockito::ServerGuard, admin_id: i64) -> UpdateLoop {
    let mut config = BotConfig::with_token(TEST_BOT_TOKEN);
    config.telegram_api_url = server.url();
    config.admin_id = admin_id;
    config.backoff_ms = 10;

    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(Duration::from_secs(5)).expect("reqwest client"));
    let components = build_bot_components_with_transport(&config, transport);
    UpdateLoop::new(
        components.client,
        components.bot,
        components.handler_chain,
        config.backoff(),
    )
}

fn text_update(update_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": 1,
            "date": 1706529600,
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test"},
            "chat": {"id": chat_id, "type": "private"},
            "text": text
        }
    })
}

fn updates_body(updates: Vec<serde_json::Value>) -> String {
    serde_json::json!({ "ok": true, "result": updates }).to_string()
}

const SEND_OK: &str = r#"{"ok":true,"result":{"message_id":2,"date":1706529601,"chat":{"id":42,"type":"private"},"text":"pong"}}"#;

/// **Test: /ping from an allowed chat is answered with pong and the offset advances.**
///
/// **Setup:** admin 0 (unrestricted); getUpdates at offset 0 returns update 500 with "/ping"
/// from chat 42.
/// **Action:** one `poll_once`.
/// **Expected:** exactly one sendMessage with chat_id=42, text=pong, previews disabled;
/// offset is 501.
#[tokio::test]
async fn test_ping_is_answered_and_offset_advances() {
    let mut server = mockito::Server::new_async().await;
    let get_updates = server
        .mock("GET", get_updates_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("timeout".into(), "25".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(updates_body(vec![text_update(500, 42, "/ping")]))
        .expect(1)
        .create_async()
        .await;
    let send = server
        .mock("GET", send_message_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chat_id".into(), "42".into()),
            Matcher::UrlEncoded("text".into(), "pong".into()),
            Matcher::UrlEncoded("disable_web_page_preview".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEND_OK)
        .expect(1)
        .create_async()
        .await;

    let mut update_loop = update_loop_for(&server, 0);
    let outcome = update_loop.poll_once(&CancellationToken::new()).await;

    assert_eq!(
        outcome,
        PollOutcome::Processed {
            received: 1,
            dispatched: 1
        }
    );
    assert_eq!(update_loop.offset(), 501);
    get_updates.assert_async().await;
    send.assert_async().await;
}

/// **Test: echo text with spaces and non-ASCII survives the query string.**
#[tokio::test]
async fn test_echo_text_is_encoded() {
    let mut server = mockito::Server::new_async().await;
    let _get_updates = server
        .mock("GET", get_updates_path().as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(updates_body(vec![text_update(7, 42, "héllo & bye?")]))
        .create_async()
        .await;
    let send = server
        .mock("GET", send_message_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chat_id".into(), "42".into()),
            Matcher::UrlEncoded("text".into(), "Echo: héllo & bye?".into()),
        ]))
        .with_status(200)
        .with_body(SEND_OK)
        .expect(1)
        .create_async()
        .await;

    let mut update_loop = update_loop_for(&server, 0);
    update_loop.poll_once(&CancellationToken::new()).await;

    send.assert_async().await;
    assert_eq!(update_loop.offset(), 8);
}

/// **Test: a chat other than the admin gets only the denial.**
///
/// **Setup:** admin 7; chat 8 sends "/start".
/// **Expected:** one sendMessage with "Access denied."; the start reply is never sent.
#[tokio::test]
async fn test_non_admin_chat_is_denied() {
    let mut server = mockito::Server::new_async().await;
    let _get_updates = server
        .mock("GET", get_updates_path().as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(updates_body(vec![text_update(3, 8, "/start")]))
        .create_async()
        .await;
    let denied = server
        .mock("GET", send_message_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chat_id".into(), "8".into()),
            Matcher::UrlEncoded("text".into(), "Access denied.".into()),
        ]))
        .with_status(200)
        .with_body(SEND_OK)
        .expect(1)
        .create_async()
        .await;
    let started = server
        .mock("GET", send_message_path().as_str())
        .match_query(Matcher::UrlEncoded(
            "text".into(),
            "Bot is online. Commands: /ping /help".into(),
        ))
        .with_status(200)
        .with_body(SEND_OK)
        .expect(0)
        .create_async()
        .await;

    let mut update_loop = update_loop_for(&server, 7);
    update_loop.poll_once(&CancellationToken::new()).await;

    denied.assert_async().await;
    started.assert_async().await;
    assert_eq!(update_loop.offset(), 4);
}

/// **Test: empty body and HTTP error both back off without sending or moving the offset.**
#[tokio::test]
async fn test_empty_body_and_http_error_back_off() {
    for (status, body) in [(200, ""), (502, "Bad Gateway")] {
        let mut server = mockito::Server::new_async().await;
        let _get_updates = server
            .mock("GET", get_updates_path().as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;
        let send = server
            .mock("GET", send_message_path().as_str())
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut update_loop = update_loop_for(&server, 0);
        let outcome = update_loop.poll_once(&CancellationToken::new()).await;

        assert_eq!(
            outcome,
            PollOutcome::Backoff(BackoffReason::EmptyResponse),
            "status {status}"
        );
        assert_eq!(update_loop.offset(), 0);
        send.assert_async().await;
    }
}

/// **Test: ok=false and non-JSON bodies are malformed batches.**
#[tokio::test]
async fn test_malformed_batches_back_off() {
    for body in [r#"{"ok":false,"description":"Unauthorized"}"#, "<html>"] {
        let mut server = mockito::Server::new_async().await;
        let _get_updates = server
            .mock("GET", get_updates_path().as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let mut update_loop = update_loop_for(&server, 0);
        let outcome = update_loop.poll_once(&CancellationToken::new()).await;

        assert_eq!(
            outcome,
            PollOutcome::Backoff(BackoffReason::MalformedResponse),
            "body {body}"
        );
        assert_eq!(update_loop.offset(), 0);
    }
}

/// **Test: a failed sendMessage is logged, not fatal; the offset still advances.**
#[tokio::test]
async fn test_send_failure_does_not_stop_batch() {
    let mut server = mockito::Server::new_async().await;
    let _get_updates = server
        .mock("GET", get_updates_path().as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(updates_body(vec![
            text_update(10, 42, "/ping"),
            text_update(11, 42, "/help"),
        ]))
        .create_async()
        .await;
    let send = server
        .mock("GET", send_message_path().as_str())
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
        .expect(2)
        .create_async()
        .await;

    let mut update_loop = update_loop_for(&server, 0);
    let outcome = update_loop.poll_once(&CancellationToken::new()).await;

    assert_eq!(
        outcome,
        PollOutcome::Processed {
            received: 2,
            dispatched: 2
        }
    );
    assert_eq!(update_loop.offset(), 12);
    send.assert_async().await;
}
