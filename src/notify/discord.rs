use crate::notify::MessageSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_BASE: &str = "https://discord.com/api/v10";

/// Bot account the token belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Minimal Discord REST client; no gateway connection is held
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
}

impl DiscordClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", token))
            .context("Discord token is not a valid header value")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                "DiscordBot (apt-scout, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn current_user(&self) -> Result<User> {
        self.client
            .get(format!("{}/users/@me", API_BASE))
            .send()
            .await
            .context("Failed to reach Discord")?
            .error_for_status()
            .context("Discord rejected the bot token")?
            .json()
            .await
            .context("Unexpected Discord user payload")
    }

    pub async fn fetch_channel(&self, channel_id: &str) -> Result<Channel> {
        self.client
            .get(format!("{}/channels/{}", API_BASE, channel_id))
            .send()
            .await
            .context("Failed to reach Discord")?
            .error_for_status()
            .with_context(|| format!("Cannot access channel {}", channel_id))?
            .json()
            .await
            .context("Unexpected Discord channel payload")
    }

    pub async fn send_message(&self, channel_id: &str, content: &str) -> Result<()> {
        self.client
            .post(format!("{}/channels/{}/messages", API_BASE, channel_id))
            .json(&CreateMessage { content })
            .send()
            .await
            .context("Failed to reach Discord")?
            .error_for_status()
            .with_context(|| format!("Failed to post to channel {}", channel_id))?;

        debug!("Posted {} chars to channel {}", content.len(), channel_id);
        Ok(())
    }
}

/// One Discord channel as an announcement destination
#[derive(Clone)]
pub struct DiscordChannel {
    client: DiscordClient,
    channel_id: String,
}

impl DiscordChannel {
    pub fn new(client: DiscordClient, channel_id: impl Into<String>) -> Self {
        Self {
            client,
            channel_id: channel_id.into(),
        }
    }
}

#[async_trait]
impl MessageSink for DiscordChannel {
    async fn send(&self, content: &str) -> Result<()> {
        self.client.send_message(&self.channel_id, content).await
    }

    fn destination(&self) -> String {
        format!("discord channel {}", self.channel_id)
    }
}
