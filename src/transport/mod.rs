//! # Printer Transport Layer
//!
//! This module provides the backend for sending jobs to printers.
//!
//! ## Available Transports
//!
//! - [`spool`]: CUPS print queues via `lpstat` / `lpr` (Linux, macOS)

pub mod spool;

pub use spool::{SpoolTransport, list_printers};
