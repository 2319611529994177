//! # ESC/POS Commands
//!
//! The few ESC/POS commands needed to frame a plain-text receipt for a raw
//! print queue: reset, left alignment and a full cut.
//!
//! ## Escape Sequence Structure
//!
//! - Two bytes: `ESC @`
//! - With parameters: `ESC a n`, `GS V m`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on state: clears the print buffer,
/// disables text styles and resets alignment and character size.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use thermaltext::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Left Alignment (ESC a 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a 0  |
/// | Hex     | 1B 61 00 |
///
/// Converted text is already laid out to the paper width, so the printer
/// must not realign it.
#[inline]
pub fn align_left() -> Vec<u8> {
    vec![ESC, b'a', 0]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Full Cut (GS V 0)
///
/// Cuts the paper at the current position. Feed lines must already have
/// moved the last printed line past the cutter.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Frame Text as a Raw Job
///
/// `init`, `align_left`, the text bytes, then `cut_full`. A missing final
/// line feed is added so the last line is printed before the cut.
///
/// ## Example
///
/// ```
/// use thermaltext::protocol::commands;
///
/// let job = commands::frame_text("HELLO\n");
/// assert_eq!(&job[..5], &[0x1B, 0x40, 0x1B, 0x61, 0x00]);
/// assert!(job.ends_with(&[0x0A, 0x1D, 0x56, 0x00]));
/// ```
pub fn frame_text(text: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(text.len() + 9);
    data.extend(init());
    data.extend(align_left());
    data.extend_from_slice(text.as_bytes());
    if !text.ends_with('\n') {
        data.push(LF);
    }
    data.extend(cut_full());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_align_left() {
        assert_eq!(align_left(), vec![0x1B, 0x61, 0x00]);
    }

    #[test]
    fn test_cut_full() {
        assert_eq!(cut_full(), vec![0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_frame_text_layout() {
        let job = frame_text("AB\n");
        assert_eq!(job, vec![0x1B, 0x40, 0x1B, 0x61, 0x00, b'A', b'B', 0x0A, 0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_frame_text_adds_line_feed() {
        let job = frame_text("AB");
        assert_eq!(&job[5..], &[b'A', b'B', 0x0A, 0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_frame_text_keeps_utf8() {
        let job = frame_text("Café\n");
        assert_eq!(&job[5..10], "Café".as_bytes());
    }
}
