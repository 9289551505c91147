//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, header::CONTENT_TYPE, request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error_page::ServerErrorPage;

/// The number of bytes of a request or response body to include in the
/// `debug` level log line.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Form fields whose values must never appear in the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Log the request and response for each request.
///
/// The method, URI and status are logged at the `debug` level with the first
/// [LOG_BODY_LENGTH_LIMIT] bytes of each body. Full bodies are logged at the
/// `trace` level. Password fields in submitted forms are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return ServerErrorPage::default().into_response();
        }
    };

    let body_text = String::from_utf8_lossy(&body);
    if is_form_submission(&parts) {
        log_request(&parts, &redact_passwords(&body_text));
    } else {
        log_request(&parts, &body_text);
    }

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            Bytes::new()
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, Body::from(body))
}

fn is_form_submission(parts: &request::Parts) -> bool {
    let is_write = matches!(parts.method, Method::POST | Method::PUT | Method::PATCH);
    let is_form = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    is_write && is_form
}

/// Replace the values of the password fields in URL-encoded `form_text`.
fn redact_passwords(form_text: &str) -> String {
    form_text
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if REDACTED_FIELDS.contains(&name) => format!("{name}=********"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// The longest prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(text: &str) -> &str {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return text;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::trace!("Full request body: {body:?}");
    } else {
        tracing::debug!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body)
        );
        tracing::trace!("Full response body: {body:?}");
    } else {
        tracing::debug!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}
