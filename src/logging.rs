//! Middleware for logging requests and responses.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// The maximum number of body bytes logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and logged in full at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    log_payload(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &body_bytes,
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    log_payload(
        &format!("Sending response: {}", parts.status),
        &body_bytes,
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_payload(head: &str, body: &[u8]) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "{head}\nbody: {}...",
            String::from_utf8_lossy(&body[..LOG_BODY_LENGTH_LIMIT])
        );
        tracing::debug!("Full body: {:?}", String::from_utf8_lossy(body));
    } else {
        tracing::info!("{head}\nbody: {:?}", String::from_utf8_lossy(body));
    }
}
