//! Structured message templates: generic carousel, button, list, media and
//! receipt payloads.
//!
//! Every template serializes to the same envelope,
//! `{"attachment": {"type": "template", "payload": {…}}}`, with quick
//! replies appended at the top level next to the envelope.

use crate::send::attachment::{Attachment, AttachmentType};
use crate::send::element::{Address, Adjustment, Button, Element, Summary};
use crate::send::quick_reply::QuickReplies;
use crate::{error::Error, validate};
use serde::{Serialize, Serializer};
use std::str::FromStr;

const MAX_GENERIC_ELEMENTS: usize = 10;
const MAX_TEMPLATE_BUTTONS: usize = 3;
const MIN_LIST_ELEMENTS: usize = 2;
const MAX_LIST_ELEMENTS: usize = 4;
const MAX_LIST_BUTTONS: usize = 1;
const MAX_RECEIPT_ELEMENTS: usize = 100;

#[derive(Serialize)]
struct TemplateWire<'a, P: Serialize> {
    attachment: TemplateAttachment<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_replies: Option<&'a QuickReplies>,
}

#[derive(Serialize)]
struct TemplateAttachment<P: Serialize> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: P,
}

fn template_wire<P: Serialize>(payload: P, quick_replies: Option<&QuickReplies>) -> TemplateWire<'_, P> {
    TemplateWire {
        attachment: TemplateAttachment { kind: "template", payload },
        quick_replies,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageAspectRatio {
    Horizontal,
    Square,
}

impl FromStr for ImageAspectRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "square" => Ok(Self::Square),
            _ => Err(Error::InvalidValue {
                field: "image_aspect_ratio",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopElementStyle {
    Large,
    Compact,
}

impl FromStr for TopElementStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "large" => Ok(Self::Large),
            "compact" => Ok(Self::Compact),
            _ => Err(Error::InvalidValue {
                field: "top_element_style",
                value: s.to_string(),
            }),
        }
    }
}

/// A horizontally scrollable carousel of up to ten cards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericTemplate {
    elements: Vec<Element>,
    image_aspect_ratio: Option<ImageAspectRatio>,
    sharable: bool,
    quick_replies: Option<QuickReplies>,
}

impl GenericTemplate {
    pub fn new(elements: Vec<Element>) -> Result<Self, Error> {
        validate::min_items(elements.len(), 1, "elements")?;
        validate::max_items(elements.len(), MAX_GENERIC_ELEMENTS, "elements in the template")?;
        Ok(Self {
            elements,
            image_aspect_ratio: None,
            sharable: false,
            quick_replies: None,
        })
    }

    pub fn image_aspect_ratio(mut self, ratio: ImageAspectRatio) -> Self {
        self.image_aspect_ratio = Some(ratio);
        self
    }

    pub fn sharable(mut self, sharable: bool) -> Self {
        self.sharable = sharable;
        self
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

impl Serialize for GenericTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            template_type: &'static str,
            sharable: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_aspect_ratio: Option<ImageAspectRatio>,
            elements: &'a [Element],
        }
        template_wire(
            Payload {
                template_type: "generic",
                sharable: self.sharable,
                image_aspect_ratio: self.image_aspect_ratio,
                elements: &self.elements,
            },
            self.quick_replies.as_ref(),
        )
        .serialize(serializer)
    }
}

/// A short text with up to three call-to-action buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonTemplate {
    text: String,
    buttons: Vec<Button>,
    quick_replies: Option<QuickReplies>,
}

impl ButtonTemplate {
    pub fn new(text: impl Into<String>, buttons: Vec<Button>) -> Result<Self, Error> {
        validate::min_items(buttons.len(), 1, "buttons")?;
        validate::max_items(buttons.len(), MAX_TEMPLATE_BUTTONS, "buttons in the template")?;
        Ok(Self { text: text.into(), buttons, quick_replies: None })
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

impl Serialize for ButtonTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            template_type: &'static str,
            text: &'a str,
            buttons: &'a [Button],
        }
        template_wire(
            Payload {
                template_type: "button",
                text: &self.text,
                buttons: &self.buttons,
            },
            self.quick_replies.as_ref(),
        )
        .serialize(serializer)
    }
}

/// A vertical list of two to four items with at most one footer button.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTemplate {
    elements: Vec<Element>,
    buttons: Vec<Button>,
    top_element_style: Option<TopElementStyle>,
    quick_replies: Option<QuickReplies>,
}

impl ListTemplate {
    pub fn new(elements: Vec<Element>) -> Result<Self, Error> {
        validate::min_items(elements.len(), MIN_LIST_ELEMENTS, "elements")?;
        validate::max_items(elements.len(), MAX_LIST_ELEMENTS, "elements in the template")?;
        Ok(Self {
            elements,
            buttons: Vec::new(),
            top_element_style: None,
            quick_replies: None,
        })
    }

    pub fn buttons(mut self, buttons: Vec<Button>) -> Result<Self, Error> {
        validate::max_items(buttons.len(), MAX_LIST_BUTTONS, "buttons in the template")?;
        self.buttons = buttons;
        Ok(self)
    }

    pub fn top_element_style(mut self, style: TopElementStyle) -> Self {
        self.top_element_style = Some(style);
        self
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

impl Serialize for ListTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            template_type: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            top_element_style: Option<TopElementStyle>,
            elements: &'a [Element],
            #[serde(skip_serializing_if = "Option::is_none")]
            buttons: Option<&'a [Button]>,
        }
        template_wire(
            Payload {
                template_type: "list",
                top_element_style: self.top_element_style,
                elements: &self.elements,
                buttons: (!self.buttons.is_empty()).then_some(self.buttons.as_slice()),
            },
            self.quick_replies.as_ref(),
        )
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum MediaType {
    Image,
    Video,
}

/// A single image or video with optional buttons. The media reference is
/// flattened out of the wrapped [`Attachment`] into the template's one
/// element entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTemplate {
    media_type: MediaType,
    url: Option<String>,
    attachment_id: Option<String>,
    buttons: Vec<Button>,
    quick_replies: Option<QuickReplies>,
}

impl MediaTemplate {
    pub fn new(attachment: Attachment) -> Result<Self, Error> {
        let media_type = match attachment.kind() {
            AttachmentType::Image => MediaType::Image,
            AttachmentType::Video => MediaType::Video,
            AttachmentType::Audio | AttachmentType::File => return Err(Error::InvalidMediaType),
        };
        Ok(Self {
            media_type,
            url: attachment.url().map(str::to_string),
            attachment_id: attachment.attachment_id().map(str::to_string),
            buttons: Vec::new(),
            quick_replies: None,
        })
    }

    pub fn buttons(mut self, buttons: Vec<Button>) -> Result<Self, Error> {
        validate::max_items(buttons.len(), MAX_TEMPLATE_BUTTONS, "buttons in the template")?;
        self.buttons = buttons;
        Ok(self)
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

impl Serialize for MediaTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            template_type: &'static str,
            elements: [MediaElement<'a>; 1],
        }
        #[derive(Serialize)]
        struct MediaElement<'a> {
            media_type: MediaType,
            #[serde(skip_serializing_if = "Option::is_none")]
            url: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            attachment_id: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            buttons: Option<&'a [Button]>,
        }
        template_wire(
            Payload {
                template_type: "media",
                elements: [MediaElement {
                    media_type: self.media_type,
                    url: self.url.as_deref(),
                    attachment_id: self.attachment_id.as_deref(),
                    buttons: (!self.buttons.is_empty()).then_some(self.buttons.as_slice()),
                }],
            },
            self.quick_replies.as_ref(),
        )
        .serialize(serializer)
    }
}

/// An order confirmation with line items, totals, and optional address and
/// adjustment blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptTemplate {
    recipient_name: String,
    order_number: String,
    currency: String,
    payment_method: String,
    summary: Summary,
    elements: Vec<Element>,
    order_url: Option<String>,
    timestamp: Option<String>,
    address: Option<Address>,
    adjustments: Vec<Adjustment>,
    sharable: bool,
    quick_replies: Option<QuickReplies>,
}

impl ReceiptTemplate {
    pub fn new(
        recipient_name: impl Into<String>,
        order_number: impl Into<String>,
        currency: impl Into<String>,
        payment_method: impl Into<String>,
        summary: Summary,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            order_number: order_number.into(),
            currency: currency.into(),
            payment_method: payment_method.into(),
            summary,
            elements: Vec::new(),
            order_url: None,
            timestamp: None,
            address: None,
            adjustments: Vec::new(),
            sharable: false,
            quick_replies: None,
        }
    }

    pub fn elements(mut self, elements: Vec<Element>) -> Result<Self, Error> {
        validate::max_items(elements.len(), MAX_RECEIPT_ELEMENTS, "elements in the template")?;
        self.elements = elements;
        Ok(self)
    }

    pub fn order_url(mut self, order_url: impl Into<String>) -> Self {
        self.order_url = Some(order_url.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn adjustments(mut self, adjustments: Vec<Adjustment>) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn sharable(mut self, sharable: bool) -> Self {
        self.sharable = sharable;
        self
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

impl Serialize for ReceiptTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            template_type: &'static str,
            sharable: bool,
            recipient_name: &'a str,
            order_number: &'a str,
            currency: &'a str,
            payment_method: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            order_url: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            timestamp: Option<&'a str>,
            elements: &'a [Element],
            #[serde(skip_serializing_if = "Option::is_none")]
            address: Option<&'a Address>,
            summary: &'a Summary,
            #[serde(skip_serializing_if = "Option::is_none")]
            adjustments: Option<&'a [Adjustment]>,
        }
        template_wire(
            Payload {
                template_type: "receipt",
                sharable: self.sharable,
                recipient_name: &self.recipient_name,
                order_number: &self.order_number,
                currency: &self.currency,
                payment_method: &self.payment_method,
                order_url: self.order_url.as_deref(),
                timestamp: self.timestamp.as_deref(),
                elements: &self.elements,
                address: self.address.as_ref(),
                summary: &self.summary,
                adjustments: (!self.adjustments.is_empty()).then_some(self.adjustments.as_slice()),
            },
            self.quick_replies.as_ref(),
        )
        .serialize(serializer)
    }
}
