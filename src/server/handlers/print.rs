//! Print and conversion handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{preview::DocumentKind, protocol::commands, transport::SpoolTransport};

use super::super::state::AppState;
use super::{document_url, error_response, rejection_response, require_html, timestamp};

/// Request body for POST /api/print.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    /// Receipt markup (required)
    pub html: Option<String>,
    /// Target queue, server default when omitted
    pub printer: Option<String>,
    /// "browser" (default) or "direct"
    pub method: Option<String>,
    /// Frame direct jobs with ESC/POS commands and send them unfiltered
    #[serde(default)]
    pub raw: bool,
}

/// Request body for POST /api/convert.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub html: Option<String>,
}

/// Handle POST /api/print.
pub async fn print(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<PrintRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let html = match require_html(req.html) {
        Ok(html) => html,
        Err(response) => return response,
    };
    let printer = req
        .printer
        .unwrap_or_else(|| state.config.default_printer.clone());
    let method = req.method.as_deref().unwrap_or("browser");

    tracing::info!(method, printer = %printer, html_len = html.len(), "print request");

    match method {
        "browser" => {
            let name = state.store_document(&html, DocumentKind::Print).await;
            Json(json!({
                "success": true,
                "message": "Print job prepared for browser printing",
                "print_url": document_url(&headers, &name),
                "method": "browser",
                "timestamp": timestamp(),
            }))
            .into_response()
        }
        "direct" => print_direct(&state, &html, printer, req.raw).await,
        _ => error_response(
            StatusCode::BAD_REQUEST,
            "Invalid print method specified. Use \"browser\" or \"direct\".",
        ),
    }
}

/// Convert and submit to the spooler (blocking, run in separate thread).
async fn print_direct(state: &AppState, html: &str, printer: String, raw: bool) -> Response {
    let text = state.converter.convert(html);
    let transport = SpoolTransport::new(&printer);

    let print_result = tokio::task::spawn_blocking(move || {
        if raw {
            transport.submit(&commands::frame_text(&text), true)
        } else {
            transport.submit(text.as_bytes(), false)
        }
    })
    .await;

    match print_result {
        Ok(Ok(())) => Json(json!({
            "success": true,
            "message": "Direct print job sent successfully",
            "printer": printer,
            "method": "direct",
            "timestamp": timestamp(),
        }))
        .into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, printer = %printer, "direct print failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Print failed: {}", e),
            )
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {}", e),
        ),
    }
}

/// Handle POST /api/convert - return the printer text without printing.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConvertRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let html = match require_html(req.html) {
        Ok(html) => html,
        Err(response) => return response,
    };

    Json(json!({
        "success": true,
        "text": state.converter.convert(&html),
        "width": state.converter.paper_width_chars(),
    }))
    .into_response()
}
