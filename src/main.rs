use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use ict_alert_relay::alerts::AlertDispatcher;
use ict_alert_relay::chat::{ChatDelivery, DiscordClient};
use ict_alert_relay::config::Config;
use ict_alert_relay::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!("{}", "=".repeat(60));
    info!("ICT alert relay starting up");
    info!("Alert channel: {}", cfg.discord_channel_id);
    info!("Webhook port: {}", cfg.port);
    info!("{}", "=".repeat(60));

    let delivery: Arc<dyn ChatDelivery> = Arc::new(DiscordClient::new(&cfg));
    let bot_ready = Arc::new(AtomicBool::new(false));

    // Startup probe: confirm the bot can see the alert channel. The relay
    // serves either way; per-dispatch resolution may recover later.
    {
        let delivery = delivery.clone();
        let bot_ready = bot_ready.clone();
        let channel_id = cfg.discord_channel_id;
        tokio::spawn(async move {
            match delivery.resolve_channel(channel_id).await {
                Ok(channel) => {
                    info!(
                        "Connected to Discord, ready to send alerts to #{} ({})",
                        channel.name.as_deref().unwrap_or("?"),
                        channel.id
                    );
                    bot_ready.store(true, Ordering::Relaxed);
                }
                Err(e) => {
                    warn!("Discord channel {} not reachable yet: {e:#}", channel_id);
                }
            }
        });
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = AlertDispatcher::new(delivery, cfg.discord_channel_id);
    tokio::spawn(dispatcher.run(rx));

    let app = server::router(AppState {
        tx,
        webhook_secret: cfg.webhook_secret.clone(),
        bot_ready,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    info!("Webhook receiver listening on http://0.0.0.0:{}", cfg.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
