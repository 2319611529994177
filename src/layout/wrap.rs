//! Greedy word wrapping with hanging indents.
//!
//! All widths are counted in characters (Unicode scalar values), which is
//! what a monospace printer font advances by.

/// Number of character cells `s` occupies.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Pad `s` with trailing spaces, or cut it, to exactly `width` characters.
pub fn fit_width(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let len = char_len(&out);
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Right-justify `s` in `width` characters. Longer input is returned as is.
pub fn justify_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(char_len(s));
    let mut out = " ".repeat(pad);
    out.push_str(s);
    out
}

/// Left-justify `s` in `width` characters. Longer input is returned as is.
pub fn justify_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(char_len(s));
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Center `s` in `width` characters, or `None` if it does not fit.
///
/// When the spare space is odd the extra space goes on the right, except
/// when `width` is odd too, in which case it goes on the left.
pub fn center(s: &str, width: usize) -> Option<String> {
    let len = char_len(s);
    if len > width {
        return None;
    }
    let spare = width - len;
    let left = spare / 2 + (spare & width & 1);
    let mut out = " ".repeat(left);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', spare - left));
    Some(out)
}

/// Split `s` after `n` characters.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Wrap one logical line of words into lines of exactly `target_width`.
///
/// Words are separated by single spaces; runs of spaces survive as empty
/// words. The first line uses the full width. Later lines are prefixed with
/// `indent` and only get `target_width - indent` characters of content (at
/// least one, so wrapping always makes progress). A word that cannot fit on
/// a line of its own is hard-broken into chunks.
///
/// ```
/// use thermaltext::layout::wrap_and_indent;
///
/// let lines = wrap_and_indent("Large Iced Caramel Macchiato", 16, "  ");
/// assert_eq!(lines, vec!["Large Iced      ", "  Caramel       ", "  Macchiato     "]);
/// ```
pub fn wrap_and_indent(content: &str, target_width: usize, indent: &str) -> Vec<String> {
    let first_width = target_width.max(1);
    let rest_width = target_width.saturating_sub(char_len(indent)).max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut buffer_len = 0;

    for word in content.split(' ') {
        let mut word = word;
        loop {
            let width = if lines.is_empty() { first_width } else { rest_width };
            let needed = if buffer.is_empty() {
                char_len(word)
            } else {
                buffer_len + 1 + char_len(word)
            };

            if needed <= width {
                buffer.push(word);
                buffer_len = needed;
                break;
            }

            if !buffer.is_empty() {
                lines.push(buffer.join(" "));
                buffer.clear();
                buffer_len = 0;
                continue;
            }

            // Alone on its line and still too long: hard break
            let (chunk, remainder) = split_at_char(word, width);
            lines.push(chunk.to_string());
            word = remainder;
        }
    }

    if !buffer.is_empty() {
        lines.push(buffer.join(" "));
    }

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                fit_width(line, target_width)
            } else {
                fit_width(&format!("{}{}", indent, line), target_width)
            }
        })
        .collect()
}
