//! Media attachments: references to an image, audio, video or file, either
//! by URL or by a previously uploaded attachment id.

use crate::error::Error;
use crate::send::quick_reply::QuickReplies;
use serde::{Serialize, Serializer};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Image,
    Audio,
    Video,
    File,
}

impl FromStr for AttachmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            "file" => Ok(Self::File),
            _ => Err(Error::InvalidValue {
                field: "attachment type",
                value: s.to_string(),
            }),
        }
    }
}

/// A media reference sent as a standalone message or wrapped by a media
/// template.
///
/// Exactly one source is expected for a send: a public `url` or a reusable
/// `attachment_id` obtained from a prior upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    kind: AttachmentType,
    url: Option<String>,
    attachment_id: Option<String>,
    is_reusable: bool,
    quick_replies: Option<QuickReplies>,
}

impl Attachment {
    pub fn from_url(kind: AttachmentType, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: Some(url.into()),
            attachment_id: None,
            is_reusable: false,
            quick_replies: None,
        }
    }

    pub fn from_attachment_id(kind: AttachmentType, attachment_id: impl Into<String>) -> Self {
        Self {
            kind,
            url: None,
            attachment_id: Some(attachment_id.into()),
            is_reusable: false,
            quick_replies: None,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::from_url(AttachmentType::Image, url)
    }

    pub fn audio(url: impl Into<String>) -> Self {
        Self::from_url(AttachmentType::Audio, url)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::from_url(AttachmentType::Video, url)
    }

    pub fn file(url: impl Into<String>) -> Self {
        Self::from_url(AttachmentType::File, url)
    }

    /// Marks the attachment for server-side reuse; the upload response then
    /// carries an `attachment_id`.
    pub fn reusable(mut self) -> Self {
        self.is_reusable = true;
        self
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }

    pub fn kind(&self) -> AttachmentType {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn attachment_id(&self) -> Option<&str> {
        self.attachment_id.as_deref()
    }

    pub(crate) fn has_quick_replies(&self) -> bool {
        self.quick_replies.is_some()
    }
}

#[derive(Serialize)]
struct Wire<'a> {
    attachment: WireAttachment<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_replies: Option<&'a QuickReplies>,
}

#[derive(Serialize)]
struct WireAttachment<'a> {
    #[serde(rename = "type")]
    kind: AttachmentType,
    payload: WirePayload<'a>,
}

#[derive(Serialize)]
struct WirePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_reusable: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_id: Option<&'a str>,
}

impl Serialize for Attachment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Wire {
            attachment: WireAttachment {
                kind: self.kind,
                payload: WirePayload {
                    url: self.url.as_deref(),
                    is_reusable: self.is_reusable.then_some("true"),
                    attachment_id: self.attachment_id.as_deref(),
                },
            },
            quick_replies: self.quick_replies.as_ref(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::send::quick_reply::QuickReply;
    use serde_json::json;

    #[test]
    fn url_attachments_wire_shape() {
        for (attachment, kind, url) in [
            (Attachment::image("http://facebook.com/image.jpg"), "image", "http://facebook.com/image.jpg"),
            (Attachment::audio("http://facebook.com/audio.mp3"), "audio", "http://facebook.com/audio.mp3"),
            (Attachment::video("http://facebook.com/video.mp4"), "video", "http://facebook.com/video.mp4"),
            (Attachment::file("http://facebook.com/file.txt"), "file", "http://facebook.com/file.txt"),
        ] {
            assert_eq!(
                serde_json::to_value(&attachment).unwrap(),
                json!({
                    "attachment": {
                        "type": kind,
                        "payload": { "url": url }
                    }
                })
            );
        }
    }

    #[test]
    fn reusable_flag_serializes_as_true_string() {
        let attachment = Attachment::image("http://facebook.com/image.jpg").reusable();
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "attachment": {
                    "type": "image",
                    "payload": {
                        "url": "http://facebook.com/image.jpg",
                        "is_reusable": "true"
                    }
                }
            })
        );
    }

    #[test]
    fn attachment_id_replaces_url() {
        let attachment = Attachment::from_attachment_id(AttachmentType::Image, "12345");
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "attachment": {
                    "type": "image",
                    "payload": { "attachment_id": "12345" }
                }
            })
        );
    }

    #[test]
    fn quick_replies_sit_next_to_the_envelope() {
        let replies =
            QuickReplies::new(vec![QuickReply::text("QR", "QR payload").unwrap()]).unwrap();
        let attachment = Attachment::image("http://facebook.com/image.jpg").quick_replies(replies);
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "attachment": {
                    "type": "image",
                    "payload": { "url": "http://facebook.com/image.jpg" }
                },
                "quick_replies": [
                    { "content_type": "text", "title": "QR", "payload": "QR payload" }
                ]
            })
        );
    }

    #[test]
    fn attachment_type_parse_rejects_unknown_values() {
        assert!("image".parse::<AttachmentType>().is_ok());
        assert!("document".parse::<AttachmentType>().is_err());
    }
}
