//! # Browser Print Documents
//!
//! Wraps receipt markup in a standalone HTML page styled for 79mm thermal
//! paper, for printing through a browser's print dialog or just viewing.
//!
//! ## Document Kinds
//!
//! | Kind | Auto print | Use |
//! |------|------------|-----|
//! | [`DocumentKind::Print`] | yes, 500ms after load | `/api/print` browser method |
//! | [`DocumentKind::Preview`] | no | `/api/preview` |
//!
//! Any `{{ current_time }}` placeholder in the markup is replaced with the
//! local time formatted as [`TIMESTAMP_FORMAT`].
//!
//! ## Example
//!
//! ```
//! use thermaltext::preview::{DocumentKind, render_document};
//!
//! let page = render_document("<p>Printed {{ current_time }}</p>", DocumentKind::Preview);
//! assert!(page.starts_with("<!DOCTYPE html>"));
//! assert!(!page.contains("{{ current_time }}"));
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Template placeholder substituted with the render time.
pub const CURRENT_TIME_PLACEHOLDER: &str = "{{ current_time }}";

/// `strftime` format for the substituted time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stylesheet sizing the page to 79mm roll paper.
const THERMAL_CSS: &str = r#"<style>
    @page { size: 79mm auto; margin: 0; }
    body {
        width: 79mm;
        max-width: 79mm;
        margin: 0;
        padding: 2mm;
        font-family: "Courier New", monospace;
        font-size: 9pt;
        line-height: 1.2;
        color: #000;
        background: white;
    }
    * { max-width: 75mm; word-wrap: break-word; }
    h1, h2, h3 { font-size: 10pt; margin: 2px 0; padding: 2px 0; font-weight: bold; }
    p { margin: 1px 0; padding: 1px 0; }
    hr { border: none; border-top: 1px dashed #000; margin: 3px 0; }
    table { width: 100%; border-collapse: collapse; font-size: 8pt; margin: 2px 0; }
    th, td { padding: 1px; text-align: left; border-bottom: 1px dotted #000; word-break: break-word; }
    th { font-weight: bold; background: #f0f0f0; }
    .totals { margin-top: 5px; font-size: 9pt; }
    .totals p { display: flex; justify-content: space-between; margin: 1px 0; }
    .total { font-weight: bold; font-size: 10pt; border-top: 1px solid #000; padding-top: 2px; }
    .footer { margin-top: 8px; text-align: center; font-size: 7pt; }
    .center { text-align: center; }
    @media print {
        body { width: 79mm !important; max-width: 79mm !important; }
    }
</style>"#;

/// Opens the print dialog once the page has laid out.
const AUTO_PRINT_SCRIPT: &str = r#"<script>
    window.onload = function () {
        setTimeout(function () { window.print(); }, 500);
    };
</script>"#;

/// Which flavor of page to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Opens the browser print dialog on load.
    Print,
    /// Display only.
    Preview,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Print => "print",
            DocumentKind::Preview => "preview",
        }
    }
}

/// Build a print document stamped with the current local time.
pub fn render_document(markup: &str, kind: DocumentKind) -> String {
    render_document_at(markup, kind, Local::now())
}

/// Build a print document stamped with `now`.
pub fn render_document_at(markup: &str, kind: DocumentKind, now: DateTime<Local>) -> String {
    let script = match kind {
        DocumentKind::Print => AUTO_PRINT_SCRIPT,
        DocumentKind::Preview => "",
    };
    let page = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">{}</head><body>{}{}</body></html>",
        THERMAL_CSS, markup, script
    );
    page.replace(
        CURRENT_TIME_PLACEHOLDER,
        &now.format(TIMESTAMP_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_print_document_has_auto_print() {
        let page = render_document_at("<p>Hi</p>", DocumentKind::Print, fixed_time());
        assert!(page.contains("window.print()"));
        assert!(page.contains("<body><p>Hi</p><script>"));
    }

    #[test]
    fn test_preview_document_has_no_script() {
        let page = render_document_at("<p>Hi</p>", DocumentKind::Preview, fixed_time());
        assert!(!page.contains("<script>"));
        assert!(page.ends_with("<body><p>Hi</p></body></html>"));
    }

    #[test]
    fn test_thermal_css_included() {
        let page = render_document_at("", DocumentKind::Preview, fixed_time());
        assert!(page.contains("size: 79mm auto"));
        assert!(page.contains("\"Courier New\", monospace"));
    }

    #[test]
    fn test_current_time_substituted() {
        let page = render_document_at(
            "<p>At {{ current_time }}</p><p>{{ current_time }}</p>",
            DocumentKind::Print,
            fixed_time(),
        );
        assert!(page.contains("<p>At 2024-03-09 14:05:07</p><p>2024-03-09 14:05:07</p>"));
        assert!(!page.contains(CURRENT_TIME_PLACEHOLDER));
    }

    #[test]
    fn test_document_kind_names() {
        assert_eq!(DocumentKind::Print.as_str(), "print");
        assert_eq!(
            serde_json::to_string(&DocumentKind::Preview).unwrap(),
            "\"preview\""
        );
    }
}
