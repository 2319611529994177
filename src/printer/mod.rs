//! # Printer Module
//!
//! Paper and font metrics for the target printer.
//!
//! ## Modules
//!
//! - [`config`]: Paper profile and derived character width

pub mod config;

pub use config::{PaperMetrics, PaperProfile};
