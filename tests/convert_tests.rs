//! # Conversion Tests
//!
//! End-to-end checks of markup to printer text through the public API.

use pretty_assertions::assert_eq;
use thermaltext::{Converter, ConverterConfig, server::SAMPLE_RECEIPT};

fn lines(text: &str) -> Vec<&str> {
    text.trim_end_matches('\n').lines().collect()
}

#[test]
fn test_coffee_row() {
    let text = Converter::default()
        .convert("<table><tr><td>Coffee</td><td>2</td><td>3.50</td><td>7.00</td></tr></table>");

    let row = ["Coffee                  ", "   2", "    3.50", "    7.00"].join(" ");
    assert_eq!(row.len(), 47);
    assert_eq!(lines(&text), vec![format!("{} ", row)]);
}

#[test]
fn test_output_always_ends_with_feed() {
    for markup in ["", "plain", "<p>x</p>\n\n\n", "<table></table>", "<hr>", "<div><br><br></div>"] {
        let text = Converter::default().convert(markup);
        assert!(text.ends_with("\n\n\n\n"), "{:?}", markup);
        assert!(!text.ends_with("\n\n\n\n\n"), "{:?}", markup);
    }
}

#[test]
fn test_empty_markup() {
    assert_eq!(Converter::default().convert(""), "\n\n\n\n");
}

#[test]
fn test_sample_receipt_line_widths() {
    let text = Converter::default().convert(SAMPLE_RECEIPT);
    for line in lines(&text) {
        if !line.trim().is_empty() {
            assert_eq!(line.chars().count(), 48, "{:?}", line);
        }
    }
}

#[test]
fn test_sample_receipt_layout() {
    let text = Converter::default().convert(SAMPLE_RECEIPT);
    let lines = lines(&text);

    assert_eq!(lines[0], format!("{}SAMPLE STORE{}", " ".repeat(18), " ".repeat(18)));
    assert!(lines.contains(&format!("Subtotal:{}19.50", " ".repeat(34)).as_str()));
    assert!(lines.contains(&format!("Tax (8%):{}1.56", " ".repeat(35)).as_str()));
    assert!(lines.contains(&format!("Total:{}21.06", " ".repeat(37)).as_str()));
    assert!(lines.contains(&"-".repeat(48).as_str()));

    let thanks = "THANK YOU FOR YOUR BUSINESS";
    let centered = lines.iter().find(|l| l.trim() == thanks).unwrap();
    assert_eq!(centered.find(thanks), Some(10));
}

#[test]
fn test_sample_receipt_wraps_long_item() {
    let text = Converter::default().convert(SAMPLE_RECEIPT);
    let lines = lines(&text);

    let first = lines
        .iter()
        .position(|l| l.starts_with("Large Iced Caramel "))
        .unwrap();
    assert!(lines[first].ends_with("   1     5.75     5.75 "));
    assert_eq!(lines[first + 1].trim_end(), "  Macchiato with Oat");
    assert_eq!(lines[first + 2].trim_end(), "  Milk");
}

#[test]
fn test_entities_decoded() {
    let text = Converter::default().convert("<p>Tea&nbsp;&amp;&nbsp;Cake &lt;hot&gt;</p>");
    assert_eq!(lines(&text)[0].trim_end(), "Tea & Cake <hot>");
}

#[test]
fn test_overlong_totals_label_truncated() {
    let markup = format!(
        r#"<div class="totals"><p><span>{}</span><span>100.00</span></p></div>"#,
        "L".repeat(50)
    );
    let text = Converter::default().convert(&markup);
    assert_eq!(lines(&text), vec![format!("{}:100.00", "L".repeat(41))]);
}

#[test]
fn test_long_word_hard_broken() {
    let word = "X".repeat(100);
    let text = Converter::default().convert(&format!("<p>{}</p>", word));
    let lines = lines(&text);

    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.chars().count() == 48));
    let joined: String = lines.iter().map(|l| l.trim_end()).collect();
    assert_eq!(joined, word);
}

#[test]
fn test_custom_phrases_from_config() {
    let config: ConverterConfig =
        serde_json::from_str(r#"{"center_phrases": ["Churra Mart"]}"#).unwrap();
    let converter = Converter::new(config).unwrap();

    let text = converter.convert("<p>Churra Mart</p><p>Test Store</p>");
    let lines = lines(&text);
    assert_eq!(lines[0], format!("{}Churra Mart{}", " ".repeat(18), " ".repeat(19)));
    assert_eq!(lines[1], format!("Test Store{}", " ".repeat(38)));
}

#[test]
fn test_deeply_nested_markup() {
    let levels = 20_000;
    let markup = format!("{}<p>Deep</p>{}", "<div>".repeat(levels), "</div>".repeat(levels));
    let text = Converter::default().convert(&markup);

    assert!(text.ends_with("\n\n\n\n"));
    assert_eq!(lines(&text), vec![format!("Deep{}", " ".repeat(44))]);
}
