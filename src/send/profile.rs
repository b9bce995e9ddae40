//! Messenger profile configuration: greeting texts, the get-started
//! button and persistent menus.

use crate::consts::DEFAULT_LOCALE;
use crate::send::element::WebviewHeightRatio;
use crate::util::{is_false, ser_bool_as_str};
use crate::{error::Error, validate};
use serde::Serialize;
use std::str::FromStr;

const GREETING_LIMIT: usize = 160;
const MENU_TITLE_LIMIT: usize = 30;
const MENU_PAYLOAD_LIMIT: usize = 1000;
const MAX_NESTED_ITEMS: usize = 5;
const MAX_TOP_LEVEL_ITEMS: usize = 3;

/// Greeting shown above the conversation before the first message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreetingText {
    locale: String,
    text: String,
}

impl GreetingText {
    pub fn new(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        validate::hard_max_len(&text, GREETING_LIMIT, "greeting text")?;
        Ok(Self { locale: DEFAULT_LOCALE.to_string(), text })
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Payload posted back when the user taps the get-started button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetStartedButton {
    payload: String,
}

impl GetStartedButton {
    pub fn new(payload: impl Into<String>) -> Self {
        Self { payload: payload.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebviewShareButton {
    Show,
    Hide,
}

impl FromStr for WebviewShareButton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            _ => Err(Error::InvalidValue {
                field: "webview_share_button",
                value: s.to_string(),
            }),
        }
    }
}

/// One entry of a persistent menu.
///
/// Nested entries recurse up to the platform's depth, each level holding at
/// most five children; webview options exist only on the web_url variant.
/// The wire tag field is `type`, nested children serialize under
/// `call_to_actions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersistentMenuItem {
    Nested {
        title: String,
        #[serde(rename = "call_to_actions")]
        nested_items: Vec<PersistentMenuItem>,
    },
    WebUrl {
        title: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        webview_height_ratio: Option<WebviewHeightRatio>,
        #[serde(skip_serializing_if = "is_false", serialize_with = "ser_bool_as_str")]
        messenger_extensions: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        webview_share_button: Option<WebviewShareButton>,
    },
    Postback {
        title: String,
        payload: String,
    },
}

impl PersistentMenuItem {
    pub fn nested(
        title: impl Into<String>,
        nested_items: Vec<PersistentMenuItem>,
    ) -> Result<Self, Error> {
        let title = title.into();
        validate::hard_max_len(&title, MENU_TITLE_LIMIT, "title")?;
        validate::min_items(nested_items.len(), 1, "nested items")?;
        validate::max_items(nested_items.len(), MAX_NESTED_ITEMS, "nested items")?;
        Ok(Self::Nested { title, nested_items })
    }

    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Result<Self, Error> {
        let title = title.into();
        validate::hard_max_len(&title, MENU_TITLE_LIMIT, "title")?;
        Ok(Self::WebUrl {
            title,
            url: url.into(),
            webview_height_ratio: None,
            messenger_extensions: false,
            fallback_url: None,
            webview_share_button: None,
        })
    }

    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Result<Self, Error> {
        let title = title.into();
        let payload = payload.into();
        validate::hard_max_len(&title, MENU_TITLE_LIMIT, "title")?;
        validate::hard_max_len(&payload, MENU_PAYLOAD_LIMIT, "payload")?;
        Ok(Self::Postback { title, payload })
    }

    /// Sets the webview height; ignored on anything but a web_url item.
    pub fn webview_height_ratio(mut self, ratio: WebviewHeightRatio) -> Self {
        if let Self::WebUrl { webview_height_ratio, .. } = &mut self {
            *webview_height_ratio = Some(ratio);
        }
        self
    }

    /// Enables messenger extensions; ignored on anything but a web_url item.
    pub fn messenger_extensions(mut self, fallback_url: impl Into<String>) -> Self {
        if let Self::WebUrl { messenger_extensions, fallback_url: fallback, .. } = &mut self {
            *messenger_extensions = true;
            *fallback = Some(fallback_url.into());
        }
        self
    }

    /// Controls the share button inside the webview; ignored on anything
    /// but a web_url item.
    pub fn webview_share_button(mut self, share: WebviewShareButton) -> Self {
        if let Self::WebUrl { webview_share_button, .. } = &mut self {
            *webview_share_button = Some(share);
        }
        self
    }
}

/// A per-locale persistent menu with one to three top-level entries.
///
/// An empty menu is only valid when the composer input is explicitly
/// disabled, in which case the user can interact through the menu alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistentMenu {
    locale: String,
    #[serde(rename = "call_to_actions", skip_serializing_if = "Vec::is_empty")]
    menu_items: Vec<PersistentMenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    composer_input_disabled: Option<bool>,
}

impl PersistentMenu {
    pub fn new(menu_items: Vec<PersistentMenuItem>) -> Result<Self, Error> {
        validate::min_items(menu_items.len(), 1, "menu items")?;
        validate::max_items(menu_items.len(), MAX_TOP_LEVEL_ITEMS, "menu items in the top level")?;
        Ok(Self {
            locale: DEFAULT_LOCALE.to_string(),
            menu_items,
            composer_input_disabled: None,
        })
    }

    /// A menu that also locks the text composer; the item list may be
    /// empty here.
    pub fn with_input_disabled(menu_items: Vec<PersistentMenuItem>) -> Result<Self, Error> {
        validate::max_items(menu_items.len(), MAX_TOP_LEVEL_ITEMS, "menu items in the top level")?;
        Ok(Self {
            locale: DEFAULT_LOCALE.to_string(),
            menu_items,
            composer_input_disabled: Some(true),
        })
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Aggregated profile document posted to the profile-configuration
/// endpoint; only the sections provided are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessengerProfile {
    #[serde(rename = "greeting", skip_serializing_if = "Vec::is_empty")]
    greetings: Vec<GreetingText>,
    #[serde(rename = "get_started", skip_serializing_if = "Option::is_none")]
    get_started: Option<GetStartedButton>,
    #[serde(rename = "persistent_menu", skip_serializing_if = "Vec::is_empty")]
    persistent_menus: Vec<PersistentMenu>,
}

impl MessengerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greetings(mut self, greetings: Vec<GreetingText>) -> Self {
        self.greetings = greetings;
        self
    }

    pub fn get_started(mut self, button: GetStartedButton) -> Self {
        self.get_started = Some(button);
        self
    }

    pub fn persistent_menus(mut self, menus: Vec<PersistentMenu>) -> Self {
        self.persistent_menus = menus;
        self
    }
}
