use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::alerts::format;
use crate::chat::ChatDelivery;
use crate::models::{
    AlertKind, EntryAlert, EodAlert, FieldError, OutboundMessage, StopLossAlert, TakeProfitAlert,
};

/// Why one alert was dropped. Nothing here is retried or escalated; the
/// webhook caller already got its 200.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("channel {0} not found")]
    ChannelNotFound(u64),
    #[error(transparent)]
    BadField(#[from] FieldError),
    #[error("delivery failed: {0:#}")]
    Delivery(anyhow::Error),
}

/// Routes inbound payloads to the per-type formatter and hands the result
/// to chat delivery. Holds no state across alerts.
pub struct AlertDispatcher {
    delivery: Arc<dyn ChatDelivery>,
    channel_id: u64,
}

impl AlertDispatcher {
    pub fn new(delivery: Arc<dyn ChatDelivery>, channel_id: u64) -> Self {
        Self {
            delivery,
            channel_id,
        }
    }

    /// Consume queued payloads until the webhook side shuts down. A bad
    /// alert is logged and dropped, never allowed to kill the loop.
    pub async fn run(self, mut rx: UnboundedReceiver<Value>) {
        info!("Alert dispatcher running, posting to channel {}", self.channel_id);

        while let Some(payload) = rx.recv().await {
            if let Err(e) = self.dispatch(&payload).await {
                match e {
                    DispatchError::ChannelNotFound(_) => error!("{e}, alert dropped"),
                    _ => warn!("Alert dropped: {e}"),
                }
            }
        }

        info!("Alert dispatcher stopped");
    }

    pub async fn dispatch(&self, payload: &Value) -> Result<(), DispatchError> {
        let channel = self
            .delivery
            .resolve_channel(self.channel_id)
            .await
            .map_err(|e| {
                debug!("Channel resolution failed: {e:#}");
                DispatchError::ChannelNotFound(self.channel_id)
            })?;

        let kind = AlertKind::of_payload(payload);
        let message = self.format_alert(kind, payload)?;

        debug!(
            "Dispatching {} alert to #{}",
            kind,
            channel.name.as_deref().unwrap_or("?")
        );

        self.delivery
            .send(self.channel_id, &message)
            .await
            .map_err(DispatchError::Delivery)
    }

    fn format_alert(
        &self,
        kind: AlertKind,
        payload: &Value,
    ) -> Result<OutboundMessage, FieldError> {
        let message = match kind {
            AlertKind::Entry => format::entry(&EntryAlert::from_payload(payload)?),
            AlertKind::Tp1 => format::tp1(&TakeProfitAlert::from_payload(payload)?),
            AlertKind::Tp2 => format::tp2(&TakeProfitAlert::from_payload(payload)?),
            AlertKind::Sl => format::sl(&StopLossAlert::from_payload(payload)?),
            AlertKind::Eod => format::eod(&EodAlert::from_payload(payload)?),
            AlertKind::Unknown => format::generic(payload),
        };
        Ok(message)
    }
}
