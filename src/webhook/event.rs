//! Inbound webhook payload schemas.
//!
//! These structs mirror the JSON the platform delivers to the webhook
//! endpoint: a batch of entries, each carrying a sequence of messaging
//! events. Unknown fields are ignored so new payload generations do not
//! break deserialization.

use crate::util::{de_id, de_opt_id};
use serde::{Deserialize, Serialize};

/// Top-level webhook delivery, `{"object": "page", "entry": [...]}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub entry: Vec<Entry>,
}

/// One page entry within a delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

/// A sender or recipient reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Principal {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
}

/// One messaging event: a sender/recipient pair plus exactly one semantic
/// payload in practice, though the shape tolerates absent or co-occurring
/// keys (see [`MessagingEvent::kind`]).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingEvent {
    pub sender: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Principal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optin: Option<Optin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Read>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_linking: Option<AccountLinking>,
}

/// The category a messaging event was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AccountLinking,
    Delivery,
    Message,
    Optin,
    Postback,
    Read,
}

impl MessagingEvent {
    /// Classifies the event into exactly one category.
    ///
    /// The capability keys are tested in a fixed priority order —
    /// account_linking, delivery, message, optin, postback, read — and the
    /// first present key wins. The platform never sends two keys on one
    /// event, but the tie-break keeps classification deterministic if it
    /// ever did. Returns `None` when no known key is present.
    pub fn kind(&self) -> Option<EventKind> {
        if self.account_linking.is_some() {
            Some(EventKind::AccountLinking)
        } else if self.delivery.is_some() {
            Some(EventKind::Delivery)
        } else if self.message.is_some() {
            Some(EventKind::Message)
        } else if self.optin.is_some() {
            Some(EventKind::Optin)
        } else if self.postback.is_some() {
            Some(EventKind::Postback)
        } else if self.read.is_some() {
            Some(EventKind::Read)
        } else {
            None
        }
    }

    pub fn sender_id(&self) -> &str {
        &self.sender.id
    }
}

/// An inbound message: text, quick-reply tap or attachments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<MessageQuickReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<MessageAttachment>>,
}

/// The payload of a tapped quick reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageQuickReply {
    pub payload: String,
}

/// A media or location attachment on an inbound message. The payload shape
/// varies per type, so it stays a raw JSON value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Delivery confirmation for previously sent messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mids: Option<Vec<String>>,
    pub watermark: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

/// A tap on a postback button or the get-started button.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Postback {
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<serde_json::Value>,
}

/// A plugin opt-in with its pass-through parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Optin {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ref: Option<String>,
}

/// A read receipt watermark.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Read {
    pub watermark: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

/// An account linking status change.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountLinking {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_from(value: serde_json::Value) -> MessagingEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_a_message_delivery() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": "page",
            "entry": [
                {
                    "id": 1234,
                    "time": 1457764198246u64,
                    "messaging": [
                        {
                            "sender": { "id": 1234 },
                            "recipient": { "id": 1234 },
                            "timestamp": 1457764197627u64,
                            "message": {
                                "mid": "mid.1457764197618:41d102a3e1ae206a38",
                                "seq": 73,
                                "text": "hello, world!"
                            }
                        }
                    ]
                }
            ]
        }))
        .unwrap();

        let event = &payload.entry[0].messaging[0];
        assert_eq!(event.sender_id(), "1234");
        assert_eq!(event.kind(), Some(EventKind::Message));
        assert_eq!(event.message.as_ref().unwrap().text.as_deref(), Some("hello, world!"));
    }

    #[test]
    fn numeric_and_string_ids_normalize_to_strings() {
        let event = event_from(json!({ "sender": { "id": "page-scoped-id" } }));
        assert_eq!(event.sender_id(), "page-scoped-id");
        let event = event_from(json!({ "sender": { "id": 42 } }));
        assert_eq!(event.sender_id(), "42");
    }

    #[test]
    fn each_capability_key_maps_to_its_kind() {
        let cases = [
            (json!({ "sender": { "id": 1 }, "delivery": { "mids": ["mid.1"], "watermark": 1458668856253u64, "seq": 37 } }), EventKind::Delivery),
            (json!({ "sender": { "id": 1 }, "postback": { "payload": "USER_DEFINED_PAYLOAD" } }), EventKind::Postback),
            (json!({ "sender": { "id": 1 }, "optin": { "ref": "PASS_THROUGH_PARAM" } }), EventKind::Optin),
            (json!({ "sender": { "id": 1 }, "read": { "watermark": 1458668856253u64, "seq": 38 } }), EventKind::Read),
            (json!({ "sender": { "id": 1 }, "account_linking": { "status": "linked", "authorization_code": "CODE" } }), EventKind::AccountLinking),
        ];
        for (value, expected) in cases {
            assert_eq!(event_from(value).kind(), Some(expected));
        }
    }

    #[test]
    fn classification_order_breaks_ties_deterministically() {
        // postback comes before read in the documented order
        let event = event_from(json!({
            "sender": { "id": 1 },
            "postback": { "payload": "USER_DEFINED_PAYLOAD" },
            "read": { "watermark": 1458668856253u64 }
        }));
        assert_eq!(event.kind(), Some(EventKind::Postback));

        // account_linking outranks everything
        let event = event_from(json!({
            "sender": { "id": 1 },
            "message": { "text": "hi" },
            "account_linking": { "status": "unlinked" }
        }));
        assert_eq!(event.kind(), Some(EventKind::AccountLinking));
    }

    #[test]
    fn bare_events_classify_as_none() {
        let event = event_from(json!({
            "sender": { "id": 1234 },
            "recipient": { "id": 1234 },
            "timestamp": 1457764197627u64
        }));
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let event = event_from(json!({
            "sender": { "id": 1 },
            "message": { "text": "hi", "is_echo": false, "nlp": { "entities": {} } },
            "some_future_key": { "x": 1 }
        }));
        assert_eq!(event.kind(), Some(EventKind::Message));
    }
}
