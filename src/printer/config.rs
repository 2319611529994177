//! # Paper Profile
//!
//! Physical paper and font metrics for a thermal printer, and the character
//! grid they produce.
//!
//! ## Usage
//!
//! ```
//! use thermaltext::printer::PaperProfile;
//!
//! let profile = PaperProfile::default();
//! assert_eq!(profile.paper_width_chars(), 48);
//! ```

use serde::{Deserialize, Serialize};

/// Characters per line used when the metrics do not produce a usable width.
pub const FALLBACK_WIDTH_CHARS: usize = 48;

/// # Paper Profile
///
/// Immutable description of the paper roll and the printer font.
///
/// The default is an 80mm roll, described by its 72mm printable width.
///
/// ## Calculations
///
/// ```text
/// paper_width_dots  = paper_width_mm * dots_per_mm
/// paper_width_chars = floor(paper_width_dots / font_width_chars)
///
/// For a typical 80mm roll:
///   printable width = 72mm
///   72mm * 8 dots/mm = 576 dots
///   576 dots / 12 dots per char = 48 chars
/// ```
///
/// The character width is derived once, when the profile is built, and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaperMetrics", into = "PaperMetrics")]
pub struct PaperProfile {
    metrics: PaperMetrics,
    paper_width_chars: usize,
}

/// Raw metrics as they appear in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperMetrics {
    /// Printable paper width in millimeters
    pub paper_width_mm: f64,
    /// Print head resolution
    pub dots_per_mm: f64,
    /// Width of one character cell in dots
    pub font_width_chars: u32,
    /// Height of one character cell in dots
    pub font_height_dots: u32,
}

impl Default for PaperMetrics {
    fn default() -> Self {
        Self {
            paper_width_mm: 72.0,
            dots_per_mm: 8.0,
            font_width_chars: 12,
            font_height_dots: 24,
        }
    }
}

impl PaperProfile {
    /// # 80mm Roll
    ///
    /// 72mm printable at 8 dots/mm with the 12x24 font: 48 characters.
    pub const ROLL_80MM: PaperMetrics = PaperMetrics {
        paper_width_mm: 72.0,
        dots_per_mm: 8.0,
        font_width_chars: 12,
        font_height_dots: 24,
    };

    /// # 58mm Roll
    ///
    /// 48mm printable at 8 dots/mm with the 12x24 font: 32 characters.
    pub const ROLL_58MM: PaperMetrics = PaperMetrics {
        paper_width_mm: 48.0,
        dots_per_mm: 8.0,
        font_width_chars: 12,
        font_height_dots: 24,
    };

    /// Build a profile from raw metrics.
    pub fn new(
        paper_width_mm: f64,
        dots_per_mm: f64,
        font_width_chars: u32,
        font_height_dots: u32,
    ) -> Self {
        Self::from(PaperMetrics {
            paper_width_mm,
            dots_per_mm,
            font_width_chars,
            font_height_dots,
        })
    }

    /// Printable characters per line.
    #[inline]
    pub fn paper_width_chars(&self) -> usize {
        self.paper_width_chars
    }

    /// Printable width in dots.
    #[inline]
    pub fn paper_width_dots(&self) -> f64 {
        self.metrics.paper_width_mm * self.metrics.dots_per_mm
    }

    /// The metrics this profile was built from.
    #[inline]
    pub fn metrics(&self) -> &PaperMetrics {
        &self.metrics
    }
}

impl From<PaperMetrics> for PaperProfile {
    fn from(metrics: PaperMetrics) -> Self {
        let chars = metrics.paper_width_mm * metrics.dots_per_mm / metrics.font_width_chars as f64;
        let paper_width_chars = if chars.is_finite() && chars.floor() > 0.0 {
            chars.floor() as usize
        } else {
            FALLBACK_WIDTH_CHARS
        };
        Self {
            metrics,
            paper_width_chars,
        }
    }
}

impl From<PaperProfile> for PaperMetrics {
    fn from(profile: PaperProfile) -> Self {
        profile.metrics
    }
}

impl Default for PaperProfile {
    fn default() -> Self {
        Self::from(PaperMetrics::default())
    }
}
