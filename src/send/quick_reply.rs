//! Quick replies: suggested short-reply chips attached to an outbound
//! message.

use crate::{error::Error, validate};
use serde::Serialize;
use std::str::FromStr;

const TITLE_LIMIT: usize = 20;
const PAYLOAD_LIMIT: usize = 1000;
const MAX_QUICK_REPLIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickReplyContentType {
    Text,
    Location,
}

impl FromStr for QuickReplyContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "text" => Ok(Self::Text),
            "location" => Ok(Self::Location),
            _ => Err(Error::InvalidValue {
                field: "content_type",
                value: s.to_string(),
            }),
        }
    }
}

/// A single suggested-reply chip.
///
/// Text chips require a title and a payload; location chips carry neither.
/// The payload limit is hard, the title limit only warns (the platform
/// truncates long titles server-side).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    content_type: QuickReplyContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl QuickReply {
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Result<Self, Error> {
        let title = title.into();
        let payload = payload.into();
        validate::soft_max_len(&title, TITLE_LIMIT, "title");
        validate::hard_max_len(&payload, PAYLOAD_LIMIT, "payload")?;
        Ok(Self {
            content_type: QuickReplyContentType::Text,
            title: Some(title),
            payload: Some(payload),
            image_url: None,
        })
    }

    /// A chip asking the user to share their location.
    pub fn location() -> Self {
        Self {
            content_type: QuickReplyContentType::Location,
            title: None,
            payload: None,
            image_url: None,
        }
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// An ordered collection of up to ten quick replies.
///
/// Serializes to the bare list of chips; the caller (message or template)
/// places it under its own `quick_replies` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuickReplies {
    items: Vec<QuickReply>,
}

impl QuickReplies {
    pub fn new(items: Vec<QuickReply>) -> Result<Self, Error> {
        validate::max_items(items.len(), MAX_QUICK_REPLIES, "quick replies")?;
        Ok(Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_quick_reply_wire_shape() {
        let qr = QuickReply::text("QR", "QR payload")
            .unwrap()
            .image_url("http://facebook.com/image.jpg");
        assert_eq!(
            serde_json::to_value(&qr).unwrap(),
            json!({
                "content_type": "text",
                "title": "QR",
                "payload": "QR payload",
                "image_url": "http://facebook.com/image.jpg"
            })
        );
    }

    #[test]
    fn location_quick_reply_omits_title_and_payload() {
        assert_eq!(
            serde_json::to_value(QuickReply::location()).unwrap(),
            json!({ "content_type": "location" })
        );
    }

    #[test]
    fn long_title_is_tolerated() {
        let qr = QuickReply::text("this title is over the 20 character limit", "payload");
        assert!(qr.is_ok());
    }

    #[test]
    fn payload_over_limit_fails() {
        let err = QuickReply::text("QR", "x".repeat(1001)).unwrap_err();
        assert_eq!(err, Error::TooLong { field: "payload", max: 1000 });
        assert_eq!(err.to_string(), "payload cannot be longer than 1000 characters");
    }

    #[test]
    fn payload_at_limit_succeeds_regardless_of_title() {
        let qr = QuickReply::text("a title well over the limit of twenty", "x".repeat(1000));
        assert!(qr.is_ok());
    }

    #[test]
    fn content_type_parsing_rejects_unknown_values() {
        assert_eq!("text".parse::<QuickReplyContentType>().unwrap(), QuickReplyContentType::Text);
        let err = "wrong".parse::<QuickReplyContentType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid content_type provided: wrong");
    }

    #[test]
    fn quick_replies_serialize_as_bare_list() {
        let qr = QuickReply::text("QR", "QR payload").unwrap();
        let qrs = QuickReplies::new(vec![qr.clone(), qr]).unwrap();
        assert_eq!(
            serde_json::to_value(&qrs).unwrap(),
            json!([
                { "content_type": "text", "title": "QR", "payload": "QR payload" },
                { "content_type": "text", "title": "QR", "payload": "QR payload" }
            ])
        );
    }

    #[test]
    fn ten_quick_replies_is_the_ceiling() {
        let qr = QuickReply::text("QR", "QR payload").unwrap();
        assert!(QuickReplies::new(vec![qr.clone(); 10]).is_ok());
        let err = QuickReplies::new(vec![qr; 11]).unwrap_err();
        assert_eq!(err.to_string(), "you cannot have more than 10 quick replies");
    }
}
