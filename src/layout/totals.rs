//! Key/value lines for the totals section of a receipt.
//!
//! ```text
//! Subtotal:                                  12.25
//! Tax (8%):                                   0.98
//! Total:                                     13.23
//! ```

use super::wrap::{char_len, justify_right};
use crate::markup::{Node, decode_entities};

/// Class marking a totals container.
pub const TOTALS_CLASS: &str = "totals";

/// Whether `node` is a totals container (`div` with class `totals`).
pub fn is_totals(node: &Node) -> bool {
    node.is("div") && node.has_class(TOTALS_CLASS)
}

/// Format a label/value pair to exactly `width` characters.
///
/// The label gets a trailing colon and the value is pushed to the right
/// edge. When both do not fit, the label is cut short; when not even one
/// label character fits, only the value is printed.
pub fn format_pair(label: &str, value: &str, width: usize) -> String {
    let label_str = format!("{}:", label);
    let value_len = char_len(value);
    let used = char_len(&label_str) + value_len;

    if used <= width {
        return format!("{}{}{}", label_str, " ".repeat(width - used), value);
    }

    match width.checked_sub(value_len + 1) {
        Some(keep) if keep > 0 => {
            let label_str: String = label.chars().take(keep).chain(std::iter::once(':')).collect();
            let remaining = width - char_len(&label_str);
            format!("{}{}", label_str, justify_right(value, remaining))
        }
        _ => justify_right(value, width),
    }
}

/// Format a totals container into pre-formatted lines.
///
/// Each `p` holding exactly two `span`s becomes a label/value line; any
/// other paragraph is kept as its trimmed text. Content outside paragraphs
/// is dropped.
pub fn format_totals(totals: &Node, width: usize) -> Vec<String> {
    totals
        .find_all("p", &[])
        .into_iter()
        .map(|p| {
            let spans = p.find_all("span", &[]);
            match spans.as_slice() {
                [label, value] => format_pair(
                    decode_entities(&label.text_content()).trim(),
                    decode_entities(&value.text_content()).trim(),
                    width,
                ),
                _ => collapse_whitespace(&decode_entities(&p.text_content())),
            }
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pair_fits() {
        let line = format_pair("Total", "13.23", 48);
        assert_eq!(line, format!("Total:{}13.23", " ".repeat(37)));
        assert_eq!(line.len(), 48);
    }

    #[test]
    fn test_pair_exact_fit() {
        assert_eq!(format_pair("abc", "12", 6), "abc:12");
    }

    #[test]
    fn test_long_label_is_truncated() {
        let label = "L".repeat(50);
        let line = format_pair(&label, "100.00", 48);
        assert_eq!(line.len(), 48);
        assert_eq!(line, format!("{}:100.00", "L".repeat(41)));
    }

    #[test]
    fn test_one_over_truncates_label() {
        // "abcd:" + "12" needs 7, only 6 available
        assert_eq!(format_pair("abcd", "12", 6), "abc:12");
    }

    #[test]
    fn test_value_alone_when_no_room_for_label() {
        assert_eq!(format_pair("Total", "12345", 6), " 12345");
        assert_eq!(format_pair("Total", "123456", 6), "123456");
    }

    #[test]
    fn test_value_wider_than_paper_is_kept() {
        assert_eq!(format_pair("Total", "1234567", 6), "1234567");
    }

    #[test]
    fn test_format_totals_block() {
        let root = markup::parse(
            r#"<div class="totals">
                <p><span>Subtotal</span><span>12.25</span></p>
                <p><span> Tax (8%) </span> <span> 0.98 </span></p>
                <p>Paid by   card</p>
                <p><span>only one</span></p>
            </div>"#,
        );
        let lines = format_totals(&root.children()[0], 20);
        assert_eq!(
            lines,
            vec![
                "Subtotal:      12.25",
                "Tax (8%):       0.98",
                "Paid by card",
                "only one",
            ]
        );
    }

    #[test]
    fn test_is_totals() {
        let root = markup::parse(r#"<div class="receipt totals"></div><div class="total"></div>"#);
        assert!(is_totals(&root.children()[0]));
        assert!(!is_totals(&root.children()[1]));
    }
}
