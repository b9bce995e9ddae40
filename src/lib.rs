//! # Messenger Platform client
//!
//! Client library for the Messenger Platform webhook and Send API.
//!
//! Outbound: [`send`] holds the composable payload value objects — text,
//! attachments, templates, quick replies, sender actions and profile
//! settings. Each validates the platform's structural constraints when it
//! is built and serializes to the exact JSON the Send API expects;
//! [`MessengerClient`] performs the HTTP calls.
//!
//! Inbound: [`webhook`] parses deliveries, classifies each messaging event
//! into exactly one category and routes it to an [`webhook::EventHandler`]
//! implementation. Subscription verification lives there too.
//!
//! ```no_run
//! use messenger_platform::send::Text;
//! use messenger_platform::{MessagingType, MessengerClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = MessengerClient::new("page-access-token");
//! let message = Text::new("hello, world!");
//! client.send(&message, "page-scoped-user-id", MessagingType::Response).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod consts;
pub mod error;
pub mod send;
pub mod webhook;

mod util;
mod validate;

pub use client::{
    MessagingType, MessengerClient, NotificationType, SendResponse, UploadResponse,
    appsecret_proof,
};
pub use config::Config;
pub use error::Error;
