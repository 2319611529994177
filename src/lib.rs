//! # Thermaltext - Receipt Markup to Thermal Printer Text
//!
//! Thermaltext turns receipt markup (a small HTML subset) into plain
//! monospace text laid out for a fixed-width thermal printer. It provides:
//!
//! - **Layout engine**: word wrapping with hanging indents, fixed-column
//!   tables, justified totals and phrase centering
//! - **Paper profiles**: characters per line derived from paper and font metrics
//! - **Transport**: CUPS print queues, optionally as raw ESC/POS jobs
//! - **HTTP service**: JSON API for print, preview and conversion
//!
//! ## Quick Start
//!
//! ```
//! use thermaltext::Converter;
//!
//! let markup = r#"
//!     <h2>Test Store</h2>
//!     <table><tr><td>Coffee</td><td>2</td><td>3.50</td><td>7.00</td></tr></table>
//!     <div class="totals"><p><span>Total</span><span>7.00</span></p></div>
//! "#;
//!
//! let text = Converter::default().convert(markup);
//! let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
//!
//! assert_eq!(lines[0].trim(), "Test Store");
//! assert_eq!(lines[1], "Coffee                      2     3.50     7.00 ");
//! assert_eq!(lines[2], format!("Total:{:>42}", "7.00"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`convert`] | The conversion pipeline |
//! | [`markup`] | Markup parsing into a node tree |
//! | [`layout`] | Wrapping, tables, totals and centering |
//! | [`printer`] | Paper profiles |
//! | [`protocol`] | ESC/POS framing for raw jobs |
//! | [`transport`] | Print queue backends |
//! | [`preview`] | Browser print documents |
//! | [`server`] | HTTP service |
//! | [`error`] | Error types |

pub mod convert;
pub mod error;
pub mod layout;
pub mod markup;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use convert::{Converter, ConverterConfig};
pub use error::ThermaltextError;
pub use printer::PaperProfile;
pub use transport::SpoolTransport;
