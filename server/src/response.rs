//! JSON response framing.
//!
//! Two shapes only: a report body `{"errors": [...]}` on success, and
//! `{"message": "..."}` for request-level failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phpgate_core::ValidationReport;
use serde_json::json;

/// A framed response ready for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// JSON body.
    pub body: serde_json::Value,
}

impl OutboundResponse {
    /// A successful validation report.
    #[must_use]
    pub fn ok(report: &ValidationReport) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "errors": report.errors }),
        }
    }

    /// A request-level failure attributable to the caller.
    #[must_use]
    pub fn client_error(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": message.into() }),
        }
    }

    /// An internal failure; the body stays deliberately vague.
    #[must_use]
    pub fn server_error(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "message": message.into() }),
        }
    }
}

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
