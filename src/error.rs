//! # Error Types
//!
//! This module defines error types used throughout the thermaltext library.
//!
//! Converting markup never fails; these errors come from configuration,
//! the printer transport and the I/O around them.

use thiserror::Error;

/// Main error type for thermaltext operations
#[derive(Debug, Error)]
pub enum ThermaltextError {
    /// Table columns do not fit on the configured paper
    #[error("Layout error: {0}")]
    Layout(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Transport-level errors (spooler missing, job rejected)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
