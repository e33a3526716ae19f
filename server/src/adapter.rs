//! Transport request adaptation.
//!
//! This module turns a decoded transport request (body bytes plus the few
//! headers that matter) into a call on the core [`Validator`] and frames the
//! result as a JSON response. It is deliberately transport-shaped rather
//! than axum-shaped: the HTTP layer in [`crate::routes`] only extracts raw
//! parts, so everything interesting here is testable without a socket.
//!
//! Framing rules, in order:
//!
//! 1. A body flagged as base64 is decoded first; failure is fatal.
//! 2. The `version` parameter must be present and bound to a checker,
//!    checked before the form is parsed so an unknown version can never
//!    stage a file or start a process.
//! 3. The body must be `multipart/form-data` with a boundary, holding a
//!    single field named `file` with the archive bytes.
//! 4. The pipeline runs on a blocking worker so checker processes never
//!    stall the async runtime.

use crate::response::OutboundResponse;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use phpgate_core::{ValidationError, Validator};
use std::convert::Infallible;
use std::sync::Arc;

/// The transport-agnostic view of one inbound validation request.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// The `version` query parameter, when present.
    pub version: Option<String>,
    /// The `Content-Type` header value, when present.
    pub content_type: Option<String>,
    /// True when the body is base64-encoded (`Content-Transfer-Encoding`).
    pub base64_encoded: bool,
    /// The raw request body.
    pub body: Bytes,
}

/// Handle one validation request end to end.
pub async fn handle(validator: Arc<Validator>, request: InboundRequest) -> OutboundResponse {
    let body = if request.base64_encoded {
        match BASE64.decode(&request.body) {
            Ok(decoded) => Bytes::from(decoded),
            Err(e) => {
                tracing::debug!("base64 decode failed: {e}");
                return OutboundResponse::client_error("Invalid request data");
            }
        }
    } else {
        request.body
    };

    let Some(version) = request.version else {
        return OutboundResponse::client_error("Missing version parameter");
    };

    // Fail the request before touching the form: an unbound version must
    // never reach staging or process spawn.
    if !validator.bindings().contains(&version) {
        let err = ValidationError::UnknownVersion {
            version: version.clone(),
        };
        return OutboundResponse::client_error(err.to_string());
    }

    let archive = match extract_file_field(request.content_type.as_deref(), body).await {
        Ok(archive) => archive,
        Err(response) => return *response,
    };

    run_validation(validator, version, archive).await
}

/// Parse the multipart body and return the bytes of the `file` field.
///
/// Mirrors the upload contract: exactly one field, named `file`; anything
/// else is a framing failure with a message naming what was wrong.
async fn extract_file_field(
    content_type: Option<&str>,
    body: Bytes,
) -> Result<Bytes, Box<OutboundResponse>> {
    let boundary = multer::parse_boundary(content_type.unwrap_or_default()).map_err(|e| {
        Box::new(OutboundResponse::client_error(format!(
            "Invalid Content-Type header: {e}"
        )))
    })?;

    let stream = futures_util::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    // The upload contract is a single field; whatever arrives first
    // decides the request.
    let field = multipart.next_field().await.map_err(|e| {
        Box::new(OutboundResponse::client_error(format!(
            "Invalid request data: {e}"
        )))
    })?;
    let Some(field) = field else {
        return Err(Box::new(OutboundResponse::client_error(
            "Invalid request body sent",
        )));
    };

    let name = field.name().unwrap_or_default().to_owned();
    if name != "file" {
        return Err(Box::new(OutboundResponse::client_error(format!(
            "Invalid form field: {name}"
        ))));
    }

    field.bytes().await.map_err(|e| {
        Box::new(OutboundResponse::client_error(format!(
            "Cannot read file: {e}"
        )))
    })
}

/// Run the blocking pipeline off the async runtime and frame the result.
async fn run_validation(
    validator: Arc<Validator>,
    version: String,
    archive: Bytes,
) -> OutboundResponse {
    let outcome =
        tokio::task::spawn_blocking(move || validator.validate(&version, archive.to_vec())).await;

    match outcome {
        Ok(Ok(report)) => OutboundResponse::ok(&report),
        Ok(Err(e)) => OutboundResponse::client_error(e.to_string()),
        Err(e) => {
            tracing::error!("validation worker failed: {e}");
            OutboundResponse::server_error("validation failed internally")
        }
    }
}
