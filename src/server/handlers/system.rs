//! Health, printer discovery and fallback handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::transport::list_printers;

use super::super::state::AppState;
use super::{error_response, timestamp};

/// Routes advertised in the 404 body.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/",
    "/sample-receipt",
    "/api/health",
    "/api/printers",
    "/api/print",
    "/api/preview",
    "/api/convert",
];

/// Handle GET /api/health.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Thermal print service is running",
        "timestamp": timestamp(),
        "system": std::env::consts::OS,
        "paper_width_chars": state.converter.paper_width_chars(),
        "default_printer": state.config.default_printer,
        "features": [
            "Browser print (with dialog)",
            "Direct print through the system spooler",
            "Raw ESC/POS jobs",
            "Print preview (no dialog)",
            "Plain text conversion",
            "Sample receipt page",
        ],
    }))
}

/// Handle GET /api/printers.
pub async fn printers() -> Response {
    match tokio::task::spawn_blocking(list_printers).await {
        Ok(printers) => {
            tracing::info!(count = printers.len(), "listed printers");
            Json(json!({
                "success": true,
                "count": printers.len(),
                "printers": printers,
                "timestamp": timestamp(),
            }))
            .into_response()
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {}", e),
        ),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
        .into_response()
}
