//! Inbound webhook endpoint.
//!
//! `POST /webhook/{secret}` receives Telegram updates, `GET /health` answers
//! `ok`. Replies are sent before the HTTP response goes out; handling errors
//! are logged and still answered with 200 so Telegram does not redeliver.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::types::{Update, UpdateKind};
use tokio::net::TcpListener;

use crate::core::config::{webhook, WebhookConfig};
use crate::core::error::AppResult;
use crate::telegram::adapter::ReplySender;
use crate::telegram::handlers::{process_message, HandlerDeps};

type HmacSha256 = Hmac<Sha256>;

/// Shared state for the webhook server.
#[derive(Clone)]
pub struct WebhookState {
    sender: Arc<dyn ReplySender>,
    deps: HandlerDeps,
    config: Arc<WebhookConfig>,
}

impl WebhookState {
    pub fn new(sender: Arc<dyn ReplySender>, deps: HandlerDeps, config: Arc<WebhookConfig>) -> Self {
        Self { sender, deps, config }
    }
}

pub fn create_webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route(&format!("{}/{{secret}}", webhook::PATH_PREFIX), post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds the webhook port on all interfaces; port 0 picks a free one.
pub async fn bind_webhook(port: u16) -> AppResult<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Webhook server listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Serves the webhook router on `listener` until `shutdown` resolves.
pub async fn serve_webhook<F>(listener: TcpListener, state: WebhookState, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_webhook_router(state);

    log::info!("  {}/{{secret}}  - Telegram updates", webhook::PATH_PREFIX);
    log::info!("  /health            - Health check");

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    log::info!("Webhook server stopped");
    Ok(())
}

/// Checks the secret-token header against the configured secret.
///
/// Both values go through HMAC-SHA256 keyed with the secret and the tags are
/// compared in constant time, so response timing says nothing about the secret.
pub fn secret_token_matches(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    let Ok(mac) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };

    let mut expected_mac = mac.clone();
    expected_mac.update(expected.as_bytes());
    let expected_tag = expected_mac.finalize().into_bytes();

    let mut provided_mac = mac;
    provided_mac.update(provided.as_bytes());
    provided_mac.verify_slice(&expected_tag).is_ok()
}

/// POST /webhook/{secret}: one Telegram update per request.
async fn webhook_handler(
    State(state): State<WebhookState>,
    Path(secret): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let expected = state.config.secret.expose_secret();
    if secret != expected {
        return StatusCode::NOT_FOUND;
    }

    if state.config.verify_secret_header {
        let provided = headers.get(webhook::SECRET_HEADER).and_then(|v| v.to_str().ok());
        if !secret_token_matches(expected, provided) {
            log::warn!("Rejected webhook request with a missing or wrong secret token header");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("Rejected undecodable webhook body: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    match update.kind {
        UpdateKind::Message(msg) => {
            if let Err(e) = process_message(state.sender.as_ref(), &state.deps, &msg).await {
                log::error!(
                    "Failed to handle update {} in chat {}: {}",
                    update.id.0,
                    msg.chat.id.0,
                    e
                );
            }
        }
        _ => log::debug!("Ignoring non-message update {}", update.id.0),
    }

    StatusCode::OK
}

/// GET /health: simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
