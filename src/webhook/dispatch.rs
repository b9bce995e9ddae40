//! Webhook verification and event dispatch.
//!
//! Dispatch is stateless: each call walks one delivered payload, classifies
//! events and hands the first recognizable one to the matching handler
//! method. Anything a handler needs for follow-up sends (typically the
//! sender id) it takes from the event itself.

use crate::error::Error;
use crate::webhook::event::{EventKind, MessagingEvent, WebhookPayload};
use async_trait::async_trait;
use serde::Deserialize;
use subtle::ConstantTimeEq;

/// The capability set a webhook consumer must provide, one method per
/// event category. Every method is required, so an unhandled category is
/// a compile-time error rather than a runtime surprise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventHandler {
    async fn message(&self, event: &MessagingEvent) -> anyhow::Result<()>;
    async fn delivery(&self, event: &MessagingEvent) -> anyhow::Result<()>;
    async fn postback(&self, event: &MessagingEvent) -> anyhow::Result<()>;
    async fn optin(&self, event: &MessagingEvent) -> anyhow::Result<()>;
    async fn read(&self, event: &MessagingEvent) -> anyhow::Result<()>;
    async fn account_linking(&self, event: &MessagingEvent) -> anyhow::Result<()>;
}

/// Routes one webhook delivery to the handler.
///
/// Entries and their messaging events are walked in order; the first event
/// with a recognized capability key is dispatched and the call returns
/// immediately without touching the remaining events — one delivery, one
/// handled event. Events without a recognized key are skipped silently.
/// Handler errors propagate to the caller unmodified.
///
/// Returns the [`EventKind`] that was handled, or `None` when no event in
/// the delivery matched.
pub async fn dispatch<H: EventHandler>(
    payload: &WebhookPayload,
    handler: &H,
) -> anyhow::Result<Option<EventKind>> {
    for entry in &payload.entry {
        for event in &entry.messaging {
            let Some(kind) = event.kind() else { continue };
            match kind {
                EventKind::AccountLinking => handler.account_linking(event).await?,
                EventKind::Delivery => handler.delivery(event).await?,
                EventKind::Message => handler.message(event).await?,
                EventKind::Optin => handler.optin(event).await?,
                EventKind::Postback => handler.postback(event).await?,
                EventKind::Read => handler.read(event).await?,
            }
            return Ok(Some(kind));
        }
    }
    Ok(None)
}

/// Query parameters of a webhook verification request.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: String,
    /// The token to compare against the configured verify token
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

/// Validates a verification request and returns the challenge to echo.
///
/// The token comparison is constant-time. Fails when the mode is not
/// "subscribe" or the token does not match.
pub fn verify(query: &VerifyQuery, verify_token: &str) -> Result<String, Error> {
    let token_matches: bool = query
        .verify_token
        .as_bytes()
        .ct_eq(verify_token.as_bytes())
        .into();
    if query.mode == "subscribe" && token_matches {
        Ok(query.challenge.clone())
    } else {
        Err(Error::VerifyTokenMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with(event: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(json!({
            "object": "page",
            "entry": [
                {
                    "id": 1234,
                    "time": 1457764198246u64,
                    "messaging": [event]
                }
            ]
        }))
        .unwrap()
    }

    /// Marks every handler method except `allowed` as never-called.
    fn expect_silence(handler: &mut MockEventHandler, allowed: EventKind) {
        if allowed != EventKind::Message {
            handler.expect_message().never();
        }
        if allowed != EventKind::Delivery {
            handler.expect_delivery().never();
        }
        if allowed != EventKind::Postback {
            handler.expect_postback().never();
        }
        if allowed != EventKind::Optin {
            handler.expect_optin().never();
        }
        if allowed != EventKind::Read {
            handler.expect_read().never();
        }
        if allowed != EventKind::AccountLinking {
            handler.expect_account_linking().never();
        }
    }

    #[tokio::test]
    async fn message_events_reach_only_the_message_handler() {
        let payload = payload_with(json!({
            "sender": { "id": 1234 },
            "message": { "text": "hello, world!" }
        }));

        let mut handler = MockEventHandler::new();
        handler
            .expect_message()
            .withf(|event| {
                event.sender_id() == "1234"
                    && event.message.as_ref().unwrap().text.as_deref() == Some("hello, world!")
            })
            .times(1)
            .returning(|_| Ok(()));
        expect_silence(&mut handler, EventKind::Message);

        let handled = dispatch(&payload, &handler).await.unwrap();
        assert_eq!(handled, Some(EventKind::Message));
    }

    #[tokio::test]
    async fn tie_break_follows_the_documented_order() {
        // both postback and read present: postback is first in the order
        let payload = payload_with(json!({
            "sender": { "id": 1234 },
            "postback": { "payload": "USER_DEFINED_PAYLOAD" },
            "read": { "watermark": 1458668856253u64 }
        }));

        let mut handler = MockEventHandler::new();
        handler.expect_postback().times(1).returning(|_| Ok(()));
        expect_silence(&mut handler, EventKind::Postback);

        let handled = dispatch(&payload, &handler).await.unwrap();
        assert_eq!(handled, Some(EventKind::Postback));
    }

    #[tokio::test]
    async fn only_the_first_matching_event_is_handled() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": "page",
            "entry": [
                {
                    "messaging": [
                        { "sender": { "id": 1 }, "timestamp": 1u64 },
                        { "sender": { "id": 2 }, "message": { "text": "first" } },
                        { "sender": { "id": 3 }, "message": { "text": "second" } }
                    ]
                },
                {
                    "messaging": [
                        { "sender": { "id": 4 }, "postback": { "payload": "later" } }
                    ]
                }
            ]
        }))
        .unwrap();

        let mut handler = MockEventHandler::new();
        handler
            .expect_message()
            .withf(|event| event.sender_id() == "2")
            .times(1)
            .returning(|_| Ok(()));
        expect_silence(&mut handler, EventKind::Message);

        let handled = dispatch(&payload, &handler).await.unwrap();
        assert_eq!(handled, Some(EventKind::Message));
    }

    #[tokio::test]
    async fn unmatched_deliveries_are_dropped_silently() {
        let payload = payload_with(json!({
            "sender": { "id": 1234 },
            "recipient": { "id": 1234 },
            "timestamp": 1457764197627u64
        }));

        let mut handler = MockEventHandler::new();
        handler.expect_message().never();
        expect_silence(&mut handler, EventKind::Message);

        let handled = dispatch(&payload, &handler).await.unwrap();
        assert_eq!(handled, None);
    }

    #[tokio::test]
    async fn handler_errors_propagate_to_the_caller() {
        let payload = payload_with(json!({
            "sender": { "id": 1234 },
            "message": { "text": "hello" }
        }));

        let mut handler = MockEventHandler::new();
        handler
            .expect_message()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("downstream failure")));

        let err = dispatch(&payload, &handler).await.unwrap_err();
        assert_eq!(err.to_string(), "downstream failure");
    }

    #[test]
    fn verify_echoes_the_challenge_on_match() {
        let query = VerifyQuery {
            mode: "subscribe".to_string(),
            verify_token: "my-secret".to_string(),
            challenge: "challenge-string".to_string(),
        };
        assert_eq!(verify(&query, "my-secret").unwrap(), "challenge-string");
    }

    #[test]
    fn verify_rejects_bad_tokens_and_modes() {
        let query = VerifyQuery {
            mode: "subscribe".to_string(),
            verify_token: "wrong".to_string(),
            challenge: "challenge-string".to_string(),
        };
        assert_eq!(verify(&query, "my-secret"), Err(Error::VerifyTokenMismatch));

        let query = VerifyQuery {
            mode: "unsubscribe".to_string(),
            verify_token: "my-secret".to_string(),
            challenge: "challenge-string".to_string(),
        };
        assert_eq!(verify(&query, "my-secret"), Err(Error::VerifyTokenMismatch));
    }

    #[test]
    fn verify_query_deserializes_from_hub_parameters() {
        let query: VerifyQuery = serde_json::from_str(
            r#"{"hub.mode":"subscribe","hub.verify_token":"test123","hub.challenge":"challenge123"}"#,
        )
        .unwrap();
        assert_eq!(query.mode, "subscribe");
        assert_eq!(query.verify_token, "test123");
        assert_eq!(query.challenge, "challenge123");
    }
}
