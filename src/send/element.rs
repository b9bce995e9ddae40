//! Building blocks for rich messages: text bodies, buttons, carousel
//! elements and the flat receipt records.

use crate::send::quick_reply::QuickReplies;
use crate::send::template::GenericTemplate;
use crate::util::{is_false, ser_bool_as_str};
use crate::{error::Error, validate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

const BUTTON_TITLE_LIMIT: usize = 20;
const ELEMENT_TITLE_LIMIT: usize = 80;
const MAX_ELEMENT_BUTTONS: usize = 3;

/// A plain text message, optionally carrying quick replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_replies: Option<QuickReplies>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), quick_replies: None }
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

/// A text message with `{{…}}` personalization placeholders and a fallback
/// used when substitution is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicText {
    dynamic_text: DynamicTextBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_replies: Option<QuickReplies>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DynamicTextBody {
    text: String,
    fallback_text: String,
}

impl DynamicText {
    pub fn new(text: impl Into<String>, fallback_text: impl Into<String>) -> Self {
        Self {
            dynamic_text: DynamicTextBody {
                text: text.into(),
                fallback_text: fallback_text.into(),
            },
            quick_replies: None,
        }
    }

    pub fn quick_replies(mut self, quick_replies: QuickReplies) -> Self {
        self.quick_replies = Some(quick_replies);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebviewHeightRatio {
    Compact,
    Tall,
    Full,
}

impl FromStr for WebviewHeightRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "compact" => Ok(Self::Compact),
            "tall" => Ok(Self::Tall),
            "full" => Ok(Self::Full),
            _ => Err(Error::InvalidValue {
                field: "webview_height_ratio",
                value: s.to_string(),
            }),
        }
    }
}

/// A call-to-action button.
///
/// Each variant carries only the fields the platform accepts for that
/// button type, so options like `webview_height_ratio` cannot be attached
/// to a postback button in the first place. The wire tag field is `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    WebUrl {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        webview_height_ratio: Option<WebviewHeightRatio>,
        #[serde(skip_serializing_if = "is_false", serialize_with = "ser_bool_as_str")]
        messenger_extensions: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_url: Option<String>,
    },
    Postback {
        title: String,
        payload: String,
    },
    PhoneNumber {
        title: String,
        payload: String,
    },
    AccountLink {
        url: String,
    },
    AccountUnlink,
    ElementShare {
        #[serde(skip_serializing_if = "Option::is_none")]
        share_contents: Option<Box<GenericTemplate>>,
    },
}

impl Button {
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        validate::soft_max_len(&title, BUTTON_TITLE_LIMIT, "title");
        Button::WebUrl {
            title: Some(title),
            url: url.into(),
            webview_height_ratio: None,
            messenger_extensions: false,
            fallback_url: None,
        }
    }

    /// A title-less web_url button, the only shape accepted as an element's
    /// default action.
    pub fn default_action(url: impl Into<String>) -> Self {
        Button::WebUrl {
            title: None,
            url: url.into(),
            webview_height_ratio: None,
            messenger_extensions: false,
            fallback_url: None,
        }
    }

    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        let title = title.into();
        validate::soft_max_len(&title, BUTTON_TITLE_LIMIT, "title");
        Button::Postback { title, payload: payload.into() }
    }

    pub fn phone_number(title: impl Into<String>, payload: impl Into<String>) -> Self {
        let title = title.into();
        validate::soft_max_len(&title, BUTTON_TITLE_LIMIT, "title");
        Button::PhoneNumber { title, payload: payload.into() }
    }

    pub fn account_link(url: impl Into<String>) -> Self {
        Button::AccountLink { url: url.into() }
    }

    pub fn account_unlink() -> Self {
        Button::AccountUnlink
    }

    pub fn element_share() -> Self {
        Button::ElementShare { share_contents: None }
    }

    /// A share button that forwards a custom generic template instead of
    /// the message it is attached to.
    pub fn element_share_with(contents: GenericTemplate) -> Self {
        Button::ElementShare { share_contents: Some(Box::new(contents)) }
    }

    /// Sets the webview height; ignored on anything but a web_url button.
    pub fn webview_height_ratio(mut self, ratio: WebviewHeightRatio) -> Self {
        if let Button::WebUrl { webview_height_ratio, .. } = &mut self {
            *webview_height_ratio = Some(ratio);
        }
        self
    }

    /// Enables messenger extensions; ignored on anything but a web_url
    /// button.
    pub fn messenger_extensions(mut self, fallback_url: impl Into<String>) -> Self {
        if let Button::WebUrl { messenger_extensions, fallback_url: fallback, .. } = &mut self {
            *messenger_extensions = true;
            *fallback = Some(fallback_url.into());
        }
        self
    }
}

/// One card of a carousel (generic or list template) or one line item of a
/// receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_action: Option<Button>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

impl Element {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        validate::soft_max_len(&title, ELEMENT_TITLE_LIMIT, "title");
        Self {
            title,
            item_url: None,
            image_url: None,
            subtitle: None,
            default_action: None,
            buttons: Vec::new(),
            quantity: None,
            price: None,
            currency: None,
        }
    }

    pub fn item_url(mut self, url: impl Into<String>) -> Self {
        self.item_url = Some(url.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        let subtitle = subtitle.into();
        validate::soft_max_len(&subtitle, ELEMENT_TITLE_LIMIT, "subtitle");
        self.subtitle = Some(subtitle);
        self
    }

    /// Attaches the tap action for the card body. Must be a web_url button
    /// without a title.
    pub fn default_action(mut self, button: Button) -> Result<Self, Error> {
        match &button {
            Button::WebUrl { title: None, .. } => {
                self.default_action = Some(button);
                Ok(self)
            }
            Button::WebUrl { title: Some(_), .. } => Err(Error::DefaultActionWithTitle),
            _ => Err(Error::DefaultActionNotWebUrl),
        }
    }

    pub fn buttons(mut self, buttons: Vec<Button>) -> Result<Self, Error> {
        validate::max_items(buttons.len(), MAX_ELEMENT_BUTTONS, "buttons in an element")?;
        self.buttons = buttons;
        Ok(self)
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// A discount or coupon line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Decimal>,
}

impl Adjustment {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self { name: Some(name.into()), amount: Some(amount) }
    }
}

/// Shipping address block of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    street_1: String,
    street_2: String,
    city: String,
    postal_code: String,
    state: String,
    country: String,
}

impl Address {
    pub fn new(
        street_1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street_1: street_1.into(),
            street_2: String::new(),
            city: city.into(),
            postal_code: postal_code.into(),
            state: state.into(),
            country: country.into(),
        }
    }

    pub fn street_2(mut self, street_2: impl Into<String>) -> Self {
        self.street_2 = street_2.into();
        self
    }
}

/// Totals block of a receipt; only the grand total is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    subtotal: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_tax: Option<Decimal>,
    total_cost: Decimal,
}

impl Summary {
    pub fn new(total_cost: Decimal) -> Self {
        Self { subtotal: None, shipping_cost: None, total_tax: None, total_cost }
    }

    pub fn subtotal(mut self, subtotal: Decimal) -> Self {
        self.subtotal = Some(subtotal);
        self
    }

    pub fn shipping_cost(mut self, shipping_cost: Decimal) -> Self {
        self.shipping_cost = Some(shipping_cost);
        self
    }

    pub fn total_tax(mut self, total_tax: Decimal) -> Self {
        self.total_tax = Some(total_tax);
        self
    }
}
