//! Server state and configuration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::convert::Converter;
use crate::preview::{DocumentKind, render_document};
use crate::transport::spool::DEFAULT_PRINTER;

/// Print documents not fetched for this long are dropped.
pub const SESSION_EXPIRATION_SECS: u64 = 3600;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5000")
    pub listen_addr: String,
    /// Queue used when a print request names no printer
    pub default_printer: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            default_printer: DEFAULT_PRINTER.to_string(),
        }
    }
}

/// A rendered print or preview page waiting to be opened by a browser.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub html: String,
    pub kind: DocumentKind,
    pub last_accessed: Instant,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub converter: Converter,
    /// Print documents keyed by file name.
    pub documents: RwLock<HashMap<String, StoredDocument>>,
}

impl AppState {
    pub fn new(config: ServerConfig, converter: Converter) -> Self {
        Self {
            config,
            converter,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Render `markup` into a print document and keep it. Returns the file
    /// name it is served under.
    pub async fn store_document(&self, markup: &str, kind: DocumentKind) -> String {
        let name = format!("{}_{}.html", kind.as_str(), Uuid::new_v4().simple());
        let document = StoredDocument {
            html: render_document(markup, kind),
            kind,
            last_accessed: Instant::now(),
        };
        self.documents.write().await.insert(name.clone(), document);
        name
    }

    /// Fetch a stored document, refreshing its expiry.
    pub async fn fetch_document(&self, name: &str) -> Option<StoredDocument> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(name)?;
        document.last_accessed = Instant::now();
        Some(document.clone())
    }

    /// Drop documents idle longer than `expiration`. Returns how many were
    /// removed.
    pub async fn expire_documents(&self, expiration: Duration) -> usize {
        let now = Instant::now();
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, d| now.duration_since(d.last_accessed) < expiration);
        before - documents.len()
    }
}
