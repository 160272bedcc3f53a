use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::chat::{ChannelInfo, ChatDelivery};
use crate::config::Config;
use crate::models::OutboundMessage;

const BASE_URL: &str = "https://discord.com/api/v10";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

/// Discord REST client. Auth is a static bot token; the gateway connection
/// lifecycle, delivery ordering and rate limiting are Discord's side of the
/// contract.
pub struct DiscordClient {
    client: Client,
    token: String,
    // Channels do not move between guilds mid-run, cache resolutions
    channel_cache: Mutex<HashMap<u64, ChannelInfo>>,
}

impl DiscordClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            token: cfg.discord_bot_token.clone(),
            channel_cache: Mutex::new(HashMap::new()),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }
}

#[async_trait]
impl ChatDelivery for DiscordClient {
    async fn resolve_channel(&self, channel_id: u64) -> Result<ChannelInfo> {
        if let Some(info) = self.channel_cache.lock().await.get(&channel_id) {
            return Ok(info.clone());
        }

        let resp = self
            .client
            .get(format!("{}/channels/{}", BASE_URL, channel_id))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .context("Failed to fetch channel")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Discord channel lookup error {}: {}", status, body);
        }

        let data: ChannelResponse = resp
            .json()
            .await
            .context("Failed to parse channel response")?;

        let info = ChannelInfo {
            id: data.id.parse().unwrap_or(channel_id),
            name: data.name,
        };

        self.channel_cache
            .lock()
            .await
            .insert(channel_id, info.clone());

        Ok(info)
    }

    async fn send(&self, channel_id: u64, message: &OutboundMessage) -> Result<()> {
        let resp = self
            .client
            .post(format!("{}/channels/{}/messages", BASE_URL, channel_id))
            .header("Authorization", self.auth_header())
            .json(message)
            .send()
            .await
            .context("Failed to send message")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Discord send error {}: {}", status, body);
        }

        Ok(())
    }
}
