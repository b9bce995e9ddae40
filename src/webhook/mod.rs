//! Inbound webhook handling: payload schemas, event classification and
//! dispatch, plus the subscription verification handshake.

pub mod dispatch;
pub mod event;

pub use dispatch::{EventHandler, VerifyQuery, dispatch, verify};
pub use event::{
    AccountLinking, Delivery, Entry, EventKind, Message, MessageAttachment, MessageQuickReply,
    MessagingEvent, Optin, Postback, Principal, Read, WebhookPayload,
};
