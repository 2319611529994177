//! Embedded pages and assets.

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use include_dir::{Dir, include_dir};

use crate::preview::{CURRENT_TIME_PLACEHOLDER, TIMESTAMP_FORMAT};

/// Embedded `assets/` directory.
static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Bundled sample receipt markup.
pub const SAMPLE_RECEIPT: &str = include_str!("../../assets/sample_receipt.html");

/// Serve the test page with the current time filled in.
pub async fn index_handler() -> impl IntoResponse {
    match ASSETS.get_file("index.html") {
        Some(file) => {
            let contents = String::from_utf8_lossy(file.contents());
            let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            Html(contents.replace(CURRENT_TIME_PLACEHOLDER, &now)).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Test page not bundled").into_response(),
    }
}

/// Serve files from the assets directory.
pub async fn asset_handler(Path(path): Path<String>) -> impl IntoResponse {
    let clean_path = path.split('?').next().unwrap_or(&path);

    match ASSETS.get_file(clean_path) {
        Some(file) => {
            let mime = mime_guess::from_path(clean_path)
                .first_or_octet_stream()
                .to_string();
            (
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                file.contents().to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
