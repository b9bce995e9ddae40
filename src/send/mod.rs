//! Outbound payload construction.
//!
//! Every type here is an immutable value object: it validates its
//! structural constraints when built and serializes to the exact mapping
//! the Send API expects, omitting absent optional fields.

pub mod attachment;
pub mod element;
pub mod profile;
pub mod quick_reply;
pub mod sender_action;
pub mod template;

pub use attachment::{Attachment, AttachmentType};
pub use element::{
    Address, Adjustment, Button, DynamicText, Element, Summary, Text, WebviewHeightRatio,
};
pub use profile::{
    GetStartedButton, GreetingText, MessengerProfile, PersistentMenu, PersistentMenuItem,
    WebviewShareButton,
};
pub use quick_reply::{QuickReplies, QuickReply, QuickReplyContentType};
pub use sender_action::SenderAction;
pub use template::{
    ButtonTemplate, GenericTemplate, ImageAspectRatio, ListTemplate, MediaTemplate,
    ReceiptTemplate, TopElementStyle,
};
