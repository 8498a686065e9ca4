//! REST API and SSE routes

use crate::manager;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{Stream, StreamExt as FuturesStreamExt};
use pitwall_core::model::FieldMask;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::CorsLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/sources", get(list_sources))
        .route("/api/telemetry/latest", get(latest_frame))
        .route("/api/telemetry/stream", get(telemetry_stream))
        .route("/api/session/reset", post(reset_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    // 0 until the first tick of a session
    let tick = state
        .latest
        .read()
        .await
        .as_ref()
        .map(|frame| frame.tick)
        .unwrap_or(0);
    Json(serde_json::json!({ "status": "ok", "tick": tick }))
}

// === Source Endpoints ===

#[derive(Serialize)]
struct SourceInfo {
    name: String,
    active: bool,
}

async fn list_sources(State(state): State<AppState>) -> Json<Vec<SourceInfo>> {
    let sources = state.sources.read().await;
    let active_name = state.active_source.read().await;

    let info: Vec<SourceInfo> = sources
        .iter()
        .map(|source| SourceInfo {
            name: source.name().to_string(),
            active: source.is_active()
                || active_name
                    .as_ref()
                    .map(|n| n == source.name())
                    .unwrap_or(false),
        })
        .collect();

    Json(info)
}

// === Telemetry Endpoints ===

#[derive(Deserialize)]
struct FieldsQuery {
    fields: Option<String>,
}

/// Latest frame, or 204 before the first tick so the view can keep showing
/// its loading state
async fn latest_frame(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response, (StatusCode, String)> {
    let Some(frame) = state.latest_frame().await else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let mask = query.fields.map(|f| FieldMask::parse(&f));
    let json = frame.to_json_filtered(mask.as_ref()).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize frame: {}", e),
        )
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

async fn telemetry_stream(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let field_mask = query.fields.map(|f| FieldMask::parse(&f));
    let shutdown = state.shutdown.clone().cancelled_owned();

    let stream = BroadcastStream::new(rx)
        .filter_map(move |result| {
            let mask = field_mask.clone();
            async move {
                match result {
                    Ok(frame) => match frame.to_json_filtered(mask.as_ref()) {
                        Ok(json) => Some(Ok(Event::default().data(json))),
                        Err(e) => {
                            tracing::error!("Failed to serialize frame: {}", e);
                            None
                        }
                    },
                    Err(e) => {
                        // Slow subscriber; later frames still arrive in order
                        tracing::warn!("Broadcast stream error: {}", e);
                        None
                    }
                }
            }
        })
        .take_until(shutdown);

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// === Session Endpoints ===

/// Throw away the running session and start a fresh engine
async fn reset_session(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match manager::reset_active(&state).await {
        Ok(Some(source)) => Ok(Json(serde_json::json!({
            "status": "reset",
            "source": source
        }))),
        Ok(None) => Err((StatusCode::NOT_FOUND, "No active source".to_string())),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to reset source: {}", e),
        )),
    }
}
