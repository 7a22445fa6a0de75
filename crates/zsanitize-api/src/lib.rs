//! HTTP front end for zsanitize
//!
//! All requests share one immutable [`Whitelist`] behind an `Arc`.

#![forbid(unsafe_code)]

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;
use zsanitize::{Disposition, Whitelist};

#[derive(Clone, Debug)]
pub struct AppState {
    pub whitelist: Arc<Whitelist>,
}

impl AppState {
    pub fn new(whitelist: Whitelist) -> Self {
        Self {
            whitelist: Arc::new(whitelist),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SanitizeRequest {
    content: String,
    #[serde(default)]
    mode: ApiMode,
    /// Parse `content` as body content rather than a full document
    #[serde(default)]
    fragment: bool,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum ApiMode {
    #[default]
    Remove,
    Unwrap,
}

impl From<ApiMode> for Disposition {
    fn from(value: ApiMode) -> Self {
        match value {
            ApiMode::Remove => Disposition::Remove,
            ApiMode::Unwrap => Disposition::Unwrap,
        }
    }
}

#[derive(Debug, Serialize)]
struct SanitizeResponse {
    status: &'static str,
    content: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/whitelist", get(whitelist))
        .route("/api/sanitize", post(sanitize))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn whitelist(State(state): State<AppState>) -> Json<Whitelist> {
    Json(Whitelist::clone(&state.whitelist))
}

async fn sanitize(
    State(state): State<AppState>,
    Json(payload): Json<SanitizeRequest>,
) -> Json<SanitizeResponse> {
    let disposition = Disposition::from(payload.mode);
    debug!(%disposition, fragment = payload.fragment, "sanitize request");

    let result = if payload.fragment {
        zsanitize::sanitize_fragment_str(&payload.content, &state.whitelist, disposition)
    } else {
        zsanitize::sanitize_str(&payload.content, &state.whitelist, disposition)
    };
    match result {
        Ok(content) => Json(SanitizeResponse {
            status: "ok",
            content,
        }),
        Err(err) => Json(SanitizeResponse {
            status: "error",
            content: err.to_string(),
        }),
    }
}
