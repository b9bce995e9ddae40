//! Graph API client for the Send API and profile-configuration endpoints.
//!
//! The client is thin transport glue: payload construction and validation
//! live in [`crate::send`]; this module only authenticates requests,
//! performs the HTTP calls and surfaces error responses as-is.

use crate::config::Config;
use crate::consts::{DEFAULT_USER_FIELDS, GRAPH_API_BASE_URL, GRAPH_API_VERSION};
use crate::error::Error;
use crate::send::{Attachment, MessengerProfile, SenderAction};
use crate::util::{de_id, de_opt_id};
use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Delivery context of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingType {
    Response,
    Update,
    MessageTag,
}

impl FromStr for MessagingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "RESPONSE" => Ok(Self::Response),
            "UPDATE" => Ok(Self::Update),
            "MESSAGE_TAG" => Ok(Self::MessageTag),
            _ => Err(Error::InvalidValue {
                field: "messaging_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Push behavior requested for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Regular,
    SilentPush,
    NoPush,
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "REGULAR" => Ok(Self::Regular),
            "SILENT_PUSH" => Ok(Self::SilentPush),
            "NO_PUSH" => Ok(Self::NoPush),
            _ => Err(Error::InvalidValue {
                field: "notification_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Computes the `appsecret_proof` request parameter: the hex HMAC-SHA256
/// of the access token, keyed with the app secret.
pub fn appsecret_proof(app_secret: &str, access_token: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .context("failed to create HMAC instance")?;
    mac.update(access_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Response to a message or action send.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Response to a reusable attachment upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(deserialize_with = "de_id")]
    pub attachment_id: String,
}

#[derive(Serialize)]
struct Recipient<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a, M: Serialize> {
    messaging_type: MessagingType,
    recipient: Recipient<'a>,
    message: &'a M,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_type: Option<NotificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Serialize)]
struct ActionRequest<'a> {
    recipient: Recipient<'a>,
    sender_action: SenderAction,
}

#[derive(Serialize)]
struct FieldsRequest<'a> {
    fields: &'a [&'a str],
}

#[derive(Serialize)]
struct DomainsRequest<'a> {
    whitelisted_domains: &'a [&'a str],
}

#[derive(Serialize)]
struct UnlinkRequest<'a> {
    psid: &'a str,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    message: &'a Attachment,
}

/// Client bound to one page access token.
pub struct MessengerClient {
    http: reqwest::Client,
    base_url: String,
    version: String,
    access_token: String,
    app_secret: Option<String>,
}

impl MessengerClient {
    pub fn new(page_access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: GRAPH_API_BASE_URL.to_string(),
            version: GRAPH_API_VERSION.to_string(),
            access_token: page_access_token.into(),
            app_secret: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.graph_base_url.clone(),
            version: config.graph_version.clone(),
            access_token: config.page_access_token.clone(),
            app_secret: config.app_secret.clone(),
        }
    }

    /// Attaches the app secret; every request then also carries an
    /// `appsecret_proof` parameter.
    pub fn app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    /// Sends a message payload built by [`crate::send`] to one recipient.
    pub async fn send(
        &self,
        message: &impl Serialize,
        recipient_id: &str,
        messaging_type: MessagingType,
    ) -> Result<SendResponse> {
        let body = SendRequest {
            messaging_type,
            recipient: Recipient { id: recipient_id },
            message,
            notification_type: None,
            tag: None,
        };
        let value = self.post("me/messages", &body).await?;
        serde_json::from_value(value).context("failed to parse Graph API response")
    }

    /// Sends a message outside the standard messaging window under a
    /// message tag.
    pub async fn send_tagged(
        &self,
        message: &impl Serialize,
        recipient_id: &str,
        tag: &str,
        notification_type: Option<NotificationType>,
    ) -> Result<SendResponse> {
        let body = SendRequest {
            messaging_type: MessagingType::MessageTag,
            recipient: Recipient { id: recipient_id },
            message,
            notification_type,
            tag: Some(tag),
        };
        let value = self.post("me/messages", &body).await?;
        serde_json::from_value(value).context("failed to parse Graph API response")
    }

    /// Sends a typing indicator or read receipt.
    pub async fn send_action(&self, action: SenderAction, recipient_id: &str) -> Result<Value> {
        let body = ActionRequest {
            recipient: Recipient { id: recipient_id },
            sender_action: action,
        };
        self.post("me/messages", &body).await
    }

    /// Fetches profile data for a page-scoped user id.
    pub async fn get_user_data(&self, user_id: &str, fields: Option<&str>) -> Result<Value> {
        let mut params = self.auth_params()?;
        params.push(("fields", fields.unwrap_or(DEFAULT_USER_FIELDS).to_string()));
        let response = self
            .http
            .get(self.endpoint(user_id))
            .query(&params)
            .send()
            .await
            .context("failed to send request to the Graph API")?;
        parse_response(response).await
    }

    pub async fn subscribe_app_to_page(&self) -> Result<Value> {
        let response = self
            .http
            .post(self.endpoint("me/subscribed_apps"))
            .query(&self.auth_params()?)
            .send()
            .await
            .context("failed to send request to the Graph API")?;
        parse_response(response).await
    }

    /// Writes the greeting / get-started / persistent-menu configuration.
    pub async fn set_messenger_profile(&self, profile: &MessengerProfile) -> Result<Value> {
        self.post("me/messenger_profile", profile).await
    }

    /// Removes the named profile fields, e.g. `["get_started"]`.
    pub async fn delete_profile_fields(&self, fields: &[&str]) -> Result<Value> {
        self.delete("me/messenger_profile", &FieldsRequest { fields }).await
    }

    pub async fn update_whitelisted_domains(&self, domains: &[&str]) -> Result<Value> {
        self.post("me/messenger_profile", &DomainsRequest { whitelisted_domains: domains })
            .await
    }

    pub async fn remove_whitelisted_domains(&self) -> Result<Value> {
        self.delete("me/messenger_profile", &FieldsRequest { fields: &["whitelisted_domains"] })
            .await
    }

    /// Resolves the recipient behind an account linking token.
    pub async fn link_account(&self, account_linking_token: &str) -> Result<Value> {
        let mut params = self.auth_params()?;
        params.push(("fields", "recipient".to_string()));
        params.push(("account_linking_token", account_linking_token.to_string()));
        let response = self
            .http
            .post(self.endpoint("me"))
            .query(&params)
            .send()
            .await
            .context("failed to send request to the Graph API")?;
        parse_response(response).await
    }

    pub async fn unlink_account(&self, psid: &str) -> Result<Value> {
        self.post("me/unlink_accounts", &UnlinkRequest { psid }).await
    }

    /// Uploads an attachment for reuse and returns its id.
    ///
    /// The attachment must reference a URL and must not carry quick
    /// replies; both are rejected locally before any request is made.
    pub async fn upload_attachment(&self, attachment: &Attachment) -> Result<UploadResponse> {
        if attachment.url().is_none() || attachment.has_quick_replies() {
            return Err(Error::NotUploadable.into());
        }
        let value = self
            .post("me/message_attachments", &UploadRequest { message: attachment })
            .await?;
        serde_json::from_value(value).context("failed to parse Graph API response")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, path)
    }

    fn auth_params(&self) -> Result<Vec<(&'static str, String)>> {
        let mut params = vec![("access_token", self.access_token.clone())];
        if let Some(secret) = &self.app_secret {
            params.push(("appsecret_proof", appsecret_proof(secret, &self.access_token)?));
        }
        Ok(params)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self
            .http
            .post(self.endpoint(path))
            .query(&self.auth_params()?)
            .json(body)
            .send()
            .await
            .context("failed to send request to the Graph API")?;
        parse_response(response).await
    }

    async fn delete<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self
            .http
            .delete(self.endpoint(path))
            .query(&self.auth_params()?)
            .json(body)
            .send()
            .await
            .context("failed to send request to the Graph API")?;
        parse_response(response).await
    }
}

async fn parse_response(response: reqwest::Response) -> Result<Value> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read response body".to_string());
        anyhow::bail!("Graph API returned error status {status}: {body}");
    }
    response.json().await.context("failed to parse Graph API response")
}
