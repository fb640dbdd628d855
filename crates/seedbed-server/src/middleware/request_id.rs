//! Request ID middleware.
//!
//! Reuses a usable incoming `x-request-id` header or generates a UUIDv7 id, picks
//! up an optional `x-trace-id`, stores both in the request extensions and
//! echoes the request id on the response.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use seedbed_core_types::RequestContext;

/// Header name used for the request identifier.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Header name used for the trace identifier.
pub static X_TRACE_ID: HeaderName = HeaderName::from_static("x-trace-id");

fn header_str<'r>(request: &'r Request, name: &HeaderName) -> Option<&'r str> {
    request.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Middleware that generates or extracts a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_headers(
        header_str(&request, &X_REQUEST_ID),
        header_str(&request, &X_TRACE_ID),
    );
    let request_id = context.request_id.clone();

    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(val) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), val);
    }

    response
}
