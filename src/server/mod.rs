//! HTTP backend for the widget: one guided conversation per session, kept in
//! memory for the lifetime of the process.

pub mod content;
pub mod conversation;

use crate::types::{ChatRequest, SessionPayload};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use conversation::Conversation;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct AppState {
    sessions: Arc<Mutex<HashMap<String, Conversation>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions().map(|sessions| sessions.len()).unwrap_or(0)
    }

    fn sessions(&self) -> anyhow::Result<MutexGuard<'_, HashMap<String, Conversation>>> {
        self.sessions
            .lock()
            .map_err(|_| anyhow::anyhow!("session store poisoned"))
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/session", post(start_session))
        .route("/api/session/{session_id}/reset", post(reset_session))
        .route("/api/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn start_session(State(state): State<AppState>) -> Result<Json<SessionPayload>, AppError> {
    let session_id = Uuid::new_v4().simple().to_string();
    let conversation = Conversation::new(session_id.clone());
    let payload = conversation.initial_response();
    state.sessions()?.insert(session_id.clone(), conversation);
    info!(%session_id, "session created");
    Ok(Json(payload))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionPayload>, AppError> {
    let mut sessions = state.sessions()?;
    let conversation = sessions.get_mut(&session_id).ok_or_else(session_not_found)?;
    info!(%session_id, "session reset");
    Ok(Json(conversation.reset()))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<SessionPayload>, AppError> {
    let mut sessions = state.sessions()?;
    let conversation = sessions
        .get_mut(&request.session_id)
        .ok_or_else(session_not_found)?;
    let payload = conversation.handle_message(&request.message);
    debug!(
        session_id = %request.session_id,
        stage = conversation.stage().as_str(),
        "message handled"
    );
    Ok(Json(payload))
}

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".to_string())
}

// ============================================
// Error Types
// ============================================

#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
