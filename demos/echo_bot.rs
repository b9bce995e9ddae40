//! Minimal echo bot.
//!
//! Feeds a canned webhook delivery through the dispatcher and prints the
//! Send API bodies the handler builds. With `FB_PAGE_ACCESS_TOKEN` and
//! `FB_VERIFY_TOKEN` set, the reply is sent for real.

use anyhow::Result;
use async_trait::async_trait;
use envconfig::Envconfig;
use log::{LevelFilter, info};
use messenger_platform::send::{QuickReplies, QuickReply, Text};
use messenger_platform::webhook::{EventHandler, MessagingEvent, WebhookPayload, dispatch};
use messenger_platform::{Config, MessagingType, MessengerClient};
use simplelog::{ConfigBuilder, SimpleLogger};

const SAMPLE_DELIVERY: &str = r#"{
    "object": "page",
    "entry": [
        {
            "id": 1234,
            "time": 1457764198246,
            "messaging": [
                {
                    "sender": { "id": 1234 },
                    "recipient": { "id": 1234 },
                    "timestamp": 1457764197627,
                    "message": {
                        "mid": "mid.1457764197618:41d102a3e1ae206a38",
                        "seq": 73,
                        "text": "hello, world!"
                    }
                }
            ]
        }
    ]
}"#;

struct EchoBot {
    client: Option<MessengerClient>,
}

impl EchoBot {
    async fn reply(&self, event: &MessagingEvent, message: &Text) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(message)?);
        if let Some(client) = &self.client {
            let response = client
                .send(message, event.sender_id(), MessagingType::Response)
                .await?;
            info!("sent message {:?}", response.message_id);
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for EchoBot {
    async fn message(&self, event: &MessagingEvent) -> Result<()> {
        let text = event
            .message
            .as_ref()
            .and_then(|message| message.text.as_deref())
            .unwrap_or("(no text)");
        let replies = QuickReplies::new(vec![
            QuickReply::text("Say it again", "ECHO_AGAIN")?,
            QuickReply::location(),
        ])?;
        let reply = Text::new(format!("you said: {text}")).quick_replies(replies);
        self.reply(event, &reply).await
    }

    async fn delivery(&self, event: &MessagingEvent) -> Result<()> {
        info!("delivery receipt from {}", event.sender_id());
        Ok(())
    }

    async fn postback(&self, event: &MessagingEvent) -> Result<()> {
        let payload = event.postback.as_ref().map(|p| p.payload.as_str()).unwrap_or_default();
        self.reply(event, &Text::new(format!("postback: {payload}"))).await
    }

    async fn optin(&self, event: &MessagingEvent) -> Result<()> {
        info!("opt-in from {}", event.sender_id());
        Ok(())
    }

    async fn read(&self, event: &MessagingEvent) -> Result<()> {
        info!("read receipt from {}", event.sender_id());
        Ok(())
    }

    async fn account_linking(&self, event: &MessagingEvent) -> Result<()> {
        info!("account linking update from {}", event.sender_id());
        Ok(())
    }
}

fn setup_simple_logger() -> Result<()> {
    let logger_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    Ok(SimpleLogger::init(LevelFilter::Info, logger_config)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_simple_logger()?;

    let client = Config::init_from_env()
        .ok()
        .map(|config| MessengerClient::from_config(&config));
    if client.is_none() {
        info!("no configuration in the environment; printing payloads without sending");
    }

    let payload: WebhookPayload = serde_json::from_str(SAMPLE_DELIVERY)?;
    let bot = EchoBot { client };
    let handled = dispatch(&payload, &bot).await?;
    info!("handled event: {handled:?}");
    Ok(())
}
