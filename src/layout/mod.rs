//! # Text Layout
//!
//! Character-grid layout primitives for receipt text.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`wrap`] | Greedy word wrap with hanging indent, padding helpers |
//! | [`table`] | Fixed-column table rows |
//! | [`totals`] | Label/value lines with truncation |
//! | [`classify`] | Centered vs. wrapped lines |

pub mod classify;
pub mod table;
pub mod totals;
pub mod wrap;

pub use classify::{CenterPhrases, LineKind};
pub use table::{Align, Column, TableLayout};
pub use wrap::wrap_and_indent;
