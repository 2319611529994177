//! Preview, sample receipt and print document handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::preview::DocumentKind;

use super::super::state::AppState;
use super::super::static_files::SAMPLE_RECEIPT;
use super::{document_url, error_response, rejection_response, require_html, timestamp};

/// Request body for POST /api/preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub html: Option<String>,
}

/// Handle POST /api/preview - store a preview page and return its URL.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let html = match require_html(req.html) {
        Ok(html) => html,
        Err(response) => return response,
    };

    let name = state.store_document(&html, DocumentKind::Preview).await;
    let preview_url = document_url(&headers, &name);
    tracing::info!(url = %preview_url, "preview generated");

    Json(json!({
        "success": true,
        "message": "Preview generated successfully",
        "preview_url": preview_url,
        "timestamp": timestamp(),
    }))
    .into_response()
}

/// Handle GET /sample-receipt - redirect to a print page of the bundled sample.
pub async fn sample_receipt(State(state): State<Arc<AppState>>) -> Redirect {
    let name = state.store_document(SAMPLE_RECEIPT, DocumentKind::Print).await;
    Redirect::to(&format!("/print_file/{}", name))
}

/// Handle GET /print_file/:name - serve a stored print document.
pub async fn print_file(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    if name.contains("..") {
        tracing::warn!(name = %name, "rejected print file path");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "success": false, "error": "Invalid file path" })),
        )
            .into_response();
    }

    match state.fetch_document(&name).await {
        Some(document) => {
            tracing::debug!(name = %name, kind = document.kind.as_str(), "serving print file");
            Html(document.html).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Print file not found"),
    }
}
