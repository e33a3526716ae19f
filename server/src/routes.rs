//! HTTP routing and extraction.
//!
//! The handlers here only pull raw parts out of the HTTP request and build
//! an [`InboundRequest`] for the adapter; no validation logic lives at this
//! layer.

use crate::adapter::{self, InboundRequest};
use crate::response::OutboundResponse;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use bytes::Bytes;
use phpgate_core::Validator;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared application state: the immutable validator.
#[derive(Clone)]
pub struct AppState {
    validator: Arc<Validator>,
}

impl AppState {
    /// Wrap a validator for sharing across requests.
    #[must_use]
    pub fn new(validator: Validator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/validate", post(validate))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn healthz() -> axum::Json<serde_json::Value> {
    axum::Json(json!({"status": "ok"}))
}

async fn validate(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> OutboundResponse {
    let request = inbound_from_parts(&headers, &params, body);
    tracing::info!(
        version = request.version.as_deref().unwrap_or("<missing>"),
        bytes = request.body.len(),
        "validation request"
    );
    adapter::handle(Arc::clone(&state.validator), request).await
}

/// Map raw HTTP parts onto the adapter's transport-agnostic request.
fn inbound_from_parts(
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    body: Bytes,
) -> InboundRequest {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let base64_encoded = headers
        .get("content-transfer-encoding")
        .is_some_and(|value| value.as_bytes().eq_ignore_ascii_case(b"base64"));

    InboundRequest {
        version: params.get("version").cloned(),
        content_type,
        base64_encoded,
        body,
    }
}
