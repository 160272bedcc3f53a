use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Discord
    pub discord_bot_token: String,
    pub discord_channel_id: u64,

    // Webhook receiver
    pub webhook_secret: String,
    pub port: u16,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            discord_bot_token: env("DISCORD_BOT_TOKEN", ""),
            discord_channel_id: env("DISCORD_CHANNEL_ID", "0").parse().unwrap_or(0),
            webhook_secret: env("WEBHOOK_SECRET", "your-secret-key"),
            port: env("PORT", "5000").parse().unwrap_or(5000),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}
