use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Gates every mutating request behind the configured key.
///
/// Reads always pass, and so does everything when no key is configured.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if is_read_only_method(request.method()) {
        return Ok(next.run(request).await);
    }
    match state.api_key.as_deref() {
        None => Ok(next.run(request).await),
        Some(expected) => verify_request(request, next, expected).await,
    }
}

pub fn is_read_only_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

async fn verify_request(
    request: Request,
    next: Next,
    expected: &str,
) -> Result<Response, StatusCode> {
    let authorized = provided_key(&request)
        .map(|provided| timing_safe_eq(provided.as_bytes(), expected.as_bytes()))
        .unwrap_or(false);

    if !authorized {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected management request without a valid API key"
        );
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn provided_key(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
}

pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
