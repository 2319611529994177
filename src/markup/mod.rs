//! # Markup Tree
//!
//! Receipt markup is parsed with an HTML5 parser and lowered into a small
//! owned tree. The tree never shares nodes, so layout passes can replace a
//! table or totals element with its formatted text by plain assignment.
//!
//! Parsing is tolerant: the HTML5 algorithm recovers from any input, so
//! malformed markup always yields a tree (possibly just text).
//!
//! ## Cleanup
//!
//! - `style` attributes are dropped
//! - `script` and `style` elements are removed with their content
//! - comments, doctypes and processing instructions are dropped
//! - elements nested deeper than [`MAX_DEPTH`] are flattened to their text

use std::collections::BTreeMap;

use ego_tree::NodeRef;
use scraper::Html;

/// Elements removed together with everything inside them.
const STRIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Deepest element nesting kept in the tree. Content below it is kept as
/// plain text of the element at this depth, so walks over the tree (and its
/// drop) stay shallow whatever the input.
pub const MAX_DEPTH: usize = 256;

/// A node of the receipt markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Character data, with character references already decoded
    Text(String),
    /// An element with its attributes and children
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    },
    /// Pre-formatted lines substituted for a table or totals block
    Block(Vec<String>),
}

impl Node {
    /// Shorthand for a bare element (used by tests and builders).
    pub fn element(tag: &str, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            children,
        }
    }

    /// Shorthand for a text node.
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Tag name if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Whether this is an element with the given tag.
    pub fn is(&self, name: &str) -> bool {
        self.tag() == Some(name)
    }

    /// Attribute value if this is an element carrying it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Whether the element's class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Child nodes (empty for text and blocks).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this subtree, tags stripped.
    ///
    /// Pre-formatted blocks contribute their lines joined by newlines.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Node::Block(lines) => out.push_str(&lines.join("\n")),
        }
    }

    /// Descendant elements named `name`, in document order.
    ///
    /// Does not look inside matches, and never enters elements named in
    /// `barrier` (used to keep nested tables out of the outer table's rows).
    pub fn find_all<'a>(&'a self, name: &str, barrier: &[&str]) -> Vec<&'a Node> {
        let mut found = Vec::new();
        for child in self.children() {
            child.find_into(name, barrier, &mut found);
        }
        found
    }

    fn find_into<'a>(&'a self, name: &str, barrier: &[&str], found: &mut Vec<&'a Node>) {
        let Some(tag) = self.tag() else {
            return;
        };
        if tag == name {
            found.push(self);
            return;
        }
        if barrier.contains(&tag) {
            return;
        }
        for child in self.children() {
            child.find_into(name, barrier, found);
        }
    }
}

/// Decode the character references that survive parsing as literal text.
///
/// The parser already decodes references once; this handles the common
/// double-escaped ones (`&amp;amp;`) and turns no-break spaces into plain
/// spaces, which the printer font may not have.
pub fn decode_entities(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}

/// Parse receipt markup into a cleaned tree.
///
/// The returned root is a synthetic `#root` element holding the top-level
/// nodes of the fragment.
pub fn parse(markup: &str) -> Node {
    let html = Html::parse_fragment(markup);
    let mut children = Vec::new();
    for child in html.tree.root().children() {
        lower(child, 0, &mut children);
    }
    tracing::trace!(nodes = children.len(), "parsed markup");
    Node::Element {
        tag: "#root".to_string(),
        attributes: BTreeMap::new(),
        children,
    }
}

/// Lower one parser node into `out`, flattening the implicit `html` wrapper.
///
/// `depth` counts element levels above `node`.
fn lower(node: NodeRef<'_, scraper::Node>, depth: usize, out: &mut Vec<Node>) {
    match node.value() {
        scraper::Node::Text(text) => out.push(Node::Text(text.to_string())),
        scraper::Node::Element(element) => {
            let tag = element.name().to_ascii_lowercase();
            if STRIPPED_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            if depth >= MAX_DEPTH {
                let mut text = String::new();
                collect_text_iter(node, &mut text);
                tracing::debug!(depth, "markup nested too deep, keeping text only");
                out.push(Node::Text(text));
                return;
            }
            let mut children = Vec::new();
            for child in node.children() {
                lower(child, depth + 1, &mut children);
            }
            // Fragment parsing wraps everything in a context <html> element
            if tag == "html" {
                out.extend(children);
                return;
            }
            let attributes = element
                .attrs()
                .filter(|(name, _)| !name.eq_ignore_ascii_case("style"))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            out.push(Node::Element {
                tag,
                attributes,
                children,
            });
        }
        scraper::Node::Document | scraper::Node::Fragment => {
            for child in node.children() {
                lower(child, depth, out);
            }
        }
        _ => {}
    }
}

/// Text of a parser subtree, without recursion.
fn collect_text_iter(node: NodeRef<'_, scraper::Node>, out: &mut String) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match current.value() {
            scraper::Node::Text(text) => out.push_str(text),
            scraper::Node::Element(element)
                if STRIPPED_ELEMENTS.contains(&element.name().to_ascii_lowercase().as_str()) => {}
            _ => stack.extend(current.children().rev()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let root = parse("hello world");
        assert_eq!(root.children(), &[Node::text("hello world")]);
    }

    #[test]
    fn test_parse_empty() {
        let root = parse("");
        assert!(root.children().is_empty());
        assert_eq!(root.text_content(), "");
    }

    #[test]
    fn test_strips_script_and_style() {
        let root = parse("<style>p { color: red }</style><p>A</p><script>alert(1)</script>");
        assert_eq!(root.text_content(), "A");
    }

    #[test]
    fn test_drops_style_attribute() {
        let root = parse(r#"<p style="font-weight: bold" class="note">A</p>"#);
        let p = &root.children()[0];
        assert!(p.is("p"));
        assert_eq!(p.attr("style"), None);
        assert_eq!(p.attr("class"), Some("note"));
    }

    #[test]
    fn test_decodes_character_references() {
        let root = parse("<p>Fish &amp; Chips &lt;3</p>");
        assert_eq!(root.text_content(), "Fish & Chips <3");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a&nbsp;b &amp;amp; &lt;x&gt; &quot;q&quot;"), "a b &amp; <x> \"q\"");
        assert_eq!(decode_entities("tab\u{a0}stop"), "tab stop");
    }

    #[test]
    fn test_malformed_markup_keeps_text() {
        let root = parse("<p>unclosed <b>bold <div>text</p></i>");
        let text = root.text_content();
        assert!(text.contains("unclosed"));
        assert!(text.contains("bold"));
        assert!(text.contains("text"));
    }

    #[test]
    fn test_unknown_tags_keep_text() {
        let root = parse("<receipt-line>kept</receipt-line>");
        assert_eq!(root.text_content(), "kept");
    }

    #[test]
    fn test_has_class() {
        let root = parse(r#"<div class="summary totals">x</div>"#);
        assert!(root.children()[0].has_class("totals"));
        assert!(!root.children()[0].has_class("total"));
    }

    fn depth(node: &Node) -> usize {
        1 + node.children().iter().map(depth).max().unwrap_or(0)
    }

    #[test]
    fn test_deeply_nested_markup() {
        let levels = 20_000;
        let markup = format!("{}x<script>y</script>{}", "<div>".repeat(levels), "</div>".repeat(levels));
        let root = parse(&markup);
        assert_eq!(root.text_content(), "x");
        assert!(depth(&root) <= MAX_DEPTH + 2);
    }

    #[test]
    fn test_nesting_below_limit_is_kept() {
        let root = parse("<div><p><b>deep</b></p></div>");
        assert_eq!(depth(&root), 5);
        assert!(root.children()[0].children()[0].is("p"));
    }

    #[test]
    fn test_find_all_respects_barrier() {
        let root = parse(
            "<table><tr><td>a<table><tr><td>inner</td></tr></table></td></tr><tr><td>b</td></tr></table>",
        );
        let table = &root.children()[0];
        assert_eq!(table.find_all("tr", &["table"]).len(), 2);
    }
}
