//! # HTTP Print Service
//!
//! JSON API over the converter, the spooler transport and browser print
//! documents. All origins are allowed so point-of-sale front ends served
//! elsewhere can call it.
//!
//! ## Usage
//!
//! ```bash
//! thermaltext serve --listen 0.0.0.0:5000
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Test page |
//! | GET | `/sample-receipt` | Redirect to a print page of the bundled sample |
//! | GET | `/api/health` | Status and paper width |
//! | GET | `/api/printers` | Spooler queues |
//! | POST | `/api/print` | Browser print document or direct spool job |
//! | POST | `/api/preview` | Preview document |
//! | POST | `/api/convert` | Printer text only |
//! | GET | `/print_file/:name` | Stored print document |

mod handlers;
mod state;
mod static_files;

pub use handlers::system::AVAILABLE_ENDPOINTS;
pub use state::{AppState, SESSION_EXPIRATION_SECS, ServerConfig, StoredDocument};
pub use static_files::SAMPLE_RECEIPT;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::convert::Converter;
use crate::error::ThermaltextError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/sample-receipt", get(handlers::preview::sample_receipt))
        // JSON API
        .route("/api/health", get(handlers::system::health))
        .route("/api/printers", get(handlers::system::printers))
        .route("/api/print", post(handlers::print::print))
        .route("/api/preview", post(handlers::preview::preview))
        .route("/api/convert", post(handlers::print::convert))
        // Print documents
        .route("/print_file/:name", get(handlers::preview::print_file))
        .fallback(handlers::system::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use thermaltext::{Converter, server::{serve, ServerConfig}};
///
/// # async fn example() -> Result<(), thermaltext::ThermaltextError> {
/// serve(ServerConfig::default(), Converter::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, converter: Converter) -> Result<(), ThermaltextError> {
    let app_state = Arc::new(AppState::new(config.clone(), converter));

    // Spawn background document expiry task
    tokio::spawn(cleanup_documents(app_state.clone()));

    let app = router(app_state.clone());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            ThermaltextError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(
        listen = %config.listen_addr,
        paper_width_chars = app_state.converter.paper_width_chars(),
        default_printer = %config.default_printer,
        "thermal print service started"
    );
    tracing::info!("open http://{}/ in your browser", config.listen_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ThermaltextError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}

/// Background task dropping print documents nobody has opened recently.
async fn cleanup_documents(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let removed = state.expire_documents(expiration).await;
        if removed > 0 {
            tracing::debug!(removed, "expired print documents");
        }
    }
}
