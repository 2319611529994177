//! # ESC/POS Protocol
//!
//! Command builders for framing converted text as a raw ESC/POS job.
//!
//! ## Module Structure
//!
//! - [`commands`]: init, alignment, cut and job framing
//!
//! ## Usage Example
//!
//! ```
//! use thermaltext::{Converter, protocol::commands};
//!
//! let text = Converter::default().convert("<p>Order #42</p>");
//! let job = commands::frame_text(&text);
//! assert_eq!(&job[..2], &commands::init()[..]);
//! ```

pub mod commands;
