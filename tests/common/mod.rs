use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use ict_alert_relay::chat::{ChannelInfo, ChatDelivery};
use ict_alert_relay::models::OutboundMessage;

/// ChatDelivery stand-in that records every send instead of hitting
/// Discord.
pub struct RecordingDelivery {
    pub sent: Mutex<Vec<(u64, OutboundMessage)>>,
}

impl RecordingDelivery {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatDelivery for RecordingDelivery {
    async fn resolve_channel(&self, channel_id: u64) -> Result<ChannelInfo> {
        Ok(ChannelInfo {
            id: channel_id,
            name: Some("trade-alerts".to_string()),
        })
    }

    async fn send(&self, channel_id: u64, message: &OutboundMessage) -> Result<()> {
        self.sent.lock().await.push((channel_id, message.clone()));
        Ok(())
    }
}

/// A realistic entry alert as TradingView would post it.
pub fn entry_payload() -> Value {
    json!({
        "type": "entry",
        "direction": "LONG",
        "entry": 4500.25,
        "stop": 4490.0,
        "tp1": 4513.5,
        "tp2": 4520.75,
        "mode": "AM Session",
        "time": "10:15",
        "day": "Tuesday",
        "timeframe": "5m"
    })
}

pub fn tp1_payload() -> Value {
    json!({
        "type": "tp1",
        "direction": "LONG",
        "price": 4500.25,
        "profit": 12.5
    })
}

pub fn eod_payload() -> Value {
    json!({
        "type": "eod",
        "direction": "SHORT",
        "price": 4480.0,
        "pnl": -5.25
    })
}
