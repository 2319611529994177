//! HTTP handlers for the server.

pub mod preview;
pub mod print;
pub mod system;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// ISO 8601 local time for response bodies.
pub(crate) fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

/// `{"success": false, "error": ...}` with the given status.
pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error.into(),
            "timestamp": timestamp(),
        })),
    )
        .into_response()
}

/// Map a body that failed to parse as JSON to a 400.
pub(crate) fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection, "rejected request body");
    error_response(
        StatusCode::BAD_REQUEST,
        format!("No JSON data provided: {}", rejection.body_text()),
    )
}

/// Require a non-blank `html` field.
pub(crate) fn require_html(html: Option<String>) -> Result<String, Response> {
    match html {
        None => Err(error_response(
            StatusCode::BAD_REQUEST,
            "HTML content is required",
        )),
        Some(html) if html.trim().is_empty() => Err(error_response(
            StatusCode::BAD_REQUEST,
            "HTML content must be a non-empty string",
        )),
        Some(html) => Ok(html),
    }
}

/// Absolute URL of a stored print document, built from the request's
/// `Host` header. Falls back to a root-relative path.
pub(crate) fn document_url(headers: &HeaderMap, name: &str) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}/print_file/{}", host, name),
        None => format!("/print_file/{}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_require_html() {
        assert_eq!(require_html(Some("<p>x</p>".into())).ok(), Some("<p>x</p>".to_string()));
        assert_eq!(
            require_html(None).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            require_html(Some("  \n".into())).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_document_url() {
        let mut headers = HeaderMap::new();
        assert_eq!(document_url(&headers, "a.html"), "/print_file/a.html");

        headers.insert(header::HOST, HeaderValue::from_static("localhost:5000"));
        assert_eq!(
            document_url(&headers, "a.html"),
            "http://localhost:5000/print_file/a.html"
        );
    }
}
