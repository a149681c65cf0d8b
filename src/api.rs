//! HTTP API: the chat endpoints and a liveness check.
//!
//! `POST /chat` takes `{messages, profile}`; `POST /api/chat` keeps the
//! older `{message, userData, history}` body working. Both answer with the
//! same weekly-plan payload.

use crate::gateway::Gateway;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pulso_core::{
    config::ServerConfig, error::PulsoError, message::ChatMessage, plan::ChatResponsePayload,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

type ApiError = (StatusCode, Json<Value>);

/// `POST /chat` request body.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    profile: Value,
}

/// `POST /api/chat` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    user_data: Value,
    #[serde(default)]
    history: Vec<ChatMessage>,
}

impl LegacyChatRequest {
    fn into_messages(self) -> (Vec<ChatMessage>, Value) {
        let mut messages = self.history;
        messages.push(ChatMessage::user(self.message));
        (messages, self.user_data)
    }
}

/// Translate a pipeline error into a status code and JSON body.
fn error_response(err: PulsoError) -> ApiError {
    match err {
        PulsoError::InvalidRequest(msg) => {
            warn!("api: rejected request: {msg}");
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg})))
        }
        PulsoError::Upstream { status, body } => {
            error!("api: completion API failed ({status}): {body}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "upstream error", "details": body})),
            )
        }
        other => {
            error!("api: chat failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal error"})),
            )
        }
    }
}

fn rejection_response(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": format!("invalid request: {}", rejection.body_text())})),
    )
}

/// `GET /`: liveness check.
async fn root(State(gateway): State<Arc<Gateway>>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": format!("{} está en línea", gateway.coach_name()),
    }))
}

/// `POST /chat`
async fn chat(
    State(gateway): State<Arc<Gateway>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponsePayload>, ApiError> {
    let Json(request) = body.map_err(rejection_response)?;
    gateway
        .handle_chat(&request.messages, &request.profile)
        .await
        .map(Json)
        .map_err(error_response)
}

/// `POST /api/chat`
async fn legacy_chat(
    State(gateway): State<Arc<Gateway>>,
    body: Result<Json<LegacyChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponsePayload>, ApiError> {
    let Json(request) = body.map_err(rejection_response)?;
    let (messages, profile) = request.into_messages();
    gateway
        .handle_chat(&messages, &profile)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Build the axum router with shared state.
pub fn build_router(gateway: Arc<Gateway>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/api/chat", post(legacy_chat))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(gateway)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, gateway: Arc<Gateway>) -> Result<(), PulsoError> {
    let app = build_router(gateway, config.body_limit_bytes);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
