use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Shared handler state: the queue into the dispatch worker, the configured
/// secret, and the readiness flag maintained by the startup channel probe.
#[derive(Clone)]
pub struct AppState {
    pub tx: UnboundedSender<Value>,
    pub webhook_secret: String,
    pub bot_ready: Arc<AtomicBool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/health", get(health))
        .with_state(state)
}

/// Receive one alert from TradingView. The response never waits on chat
/// delivery; a queued payload that later fails to send is simply dropped.
async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let secret = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    if secret != Some(state.webhook_secret.as_str()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(payload) => {
            info!(
                "Received webhook: {}",
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
            );

            if state.tx.send(payload).is_err() {
                // Fire-and-forget contract: the caller still gets its 200
                error!("Dispatch worker is gone, alert dropped");
            }

            (StatusCode::OK, Json(json!({"status": "success"})))
        }
        Err(e) => {
            error!("Error processing webhook: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "bot_ready": state.bot_ready.load(Ordering::Relaxed),
        })),
    )
}
