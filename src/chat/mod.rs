pub mod discord;

pub use discord::DiscordClient;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::OutboundMessage;

/// A chat channel the relay can post to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: u64,
    pub name: Option<String>,
}

/// The two operations the relay needs from the chat platform.
#[async_trait]
pub trait ChatDelivery: Send + Sync {
    async fn resolve_channel(&self, channel_id: u64) -> Result<ChannelInfo>;
    async fn send(&self, channel_id: u64, message: &OutboundMessage) -> Result<()>;
}
