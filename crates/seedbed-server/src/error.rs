//! Error-to-HTTP response conversion.
//!
//! Every failure renders the CMS error envelope:
//! `{ "data": null, "error": { "status", "name", "message", "details": {} } }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use seedbed_core::errors::{ExError, ExErrorKind};
use seedbed_core_types::{RequestContext, RequestId, TraceId};
use serde_json::json;

/// An HTTP error with its envelope fields
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    name: &'static str,
    message: String,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
}

impl ApiError {
    /// 400 `BadRequestError`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequestError", message)
    }

    /// 404 `NotFoundError`
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFoundError", message)
    }

    /// 500 `ApplicationError`; the message shown to clients is generic
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ApplicationError",
            "Internal Server Error",
        )
    }

    fn new(status: StatusCode, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            name,
            message: message.into(),
            request_id: None,
            trace_id: None,
        }
    }

    pub fn with_context(mut self, context: &RequestContext) -> Self {
        self.request_id = Some(context.request_id.clone());
        self.trace_id = context.trace_id.clone();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

impl From<ExError> for ApiError {
    fn from(err: ExError) -> Self {
        let mut api = match err.kind() {
            ExErrorKind::NotFound => ApiError::not_found(err.message()),
            ExErrorKind::InvalidInput => ApiError::bad_request(err.message()),
            _ => ApiError::internal(),
        };
        api.request_id = err.request_id().cloned();
        api.trace_id = err.trace_id().cloned();
        api
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                request_id = self.request_id.as_ref().map_or("-", RequestId::as_str),
                trace_id = self.trace_id.as_ref().map_or("-", TraceId::as_str),
                "Server error in API handler"
            );
        }

        let body = json!({
            "data": null,
            "error": {
                "status": self.status.as_u16(),
                "name": self.name,
                "message": self.message,
                "details": {},
            },
        });

        (self.status, Json(body)).into_response()
    }
}
