use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post, put};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::DomainError;

use super::container::Container;
use super::controller::{
    ChatController, ExportController, MessageRequest, PageController, SessionController,
    SettingsRequest,
};

/// Shared handle every handler receives.
pub type AppState = Arc<Container>;

/// Build the application router.
pub fn build_router(container: AppState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health_check))
        // Browser pages
        .route("/", get(open_page))
        .route("/sessions/{id}", get(session_page))
        // JSON API
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/settings", put(update_settings))
        .route("/api/sessions/{id}/messages", post(send_message))
        .route("/api/sessions/{id}/reset", post(reset_conversation))
        .route("/api/sessions/{id}/export", get(export_conversation))
        .with_state(container)
}

fn ok<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": data
    }))
}

// ============ Health Check ============

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "travelchat",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============ Pages ============

async fn open_page(State(container): State<AppState>) -> Result<Redirect, DomainError> {
    let location = PageController::new(&container).open().await?;
    Ok(Redirect::to(&location))
}

async fn session_page(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, DomainError> {
    let page = PageController::new(&container).page(id).await?;
    Ok(Html(page))
}

// ============ Sessions ============

async fn create_session(
    State(container): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, DomainError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(
            serde_json::from_slice::<SettingsRequest>(&body)
                .map_err(|e| DomainError::invalid_input(format!("Invalid settings: {e}")))?,
        )
    };

    let view = SessionController::new(&container).create(request).await?;
    Ok((StatusCode::CREATED, ok(view)))
}

async fn get_session(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, DomainError> {
    let view = SessionController::new(&container).get(id).await?;
    Ok(ok(view))
}

async fn update_settings(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SettingsRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let view = SessionController::new(&container)
        .update_settings(id, request)
        .await?;
    Ok(ok(view))
}

async fn reset_conversation(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, DomainError> {
    let view = SessionController::new(&container).reset(id).await?;
    Ok(ok(view))
}

// ============ Chat ============

async fn send_message(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let turn = ChatController::new(&container).send(id, request).await?;
    Ok(ok(turn))
}

// ============ Export ============

async fn export_conversation(
    State(container): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, DomainError> {
    let document = ExportController::new(&container).export(id).await?;
    let disposition = ExportController::content_disposition(&document);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", document.mime_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.body().to_string(),
    ))
}
