//! HTML serialization of the document tree.

use crate::document::{Document, NodeId, NodeKind};

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize the whole document to compact HTML.
///
/// Attributes are emitted in insertion order.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    write_node(doc, doc.root(), &mut out);
    out
}

impl Document {
    /// Method form of [`to_html`].
    pub fn to_html(&self) -> String {
        to_html(self)
    }
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Text(content) => out.push_str(&escape_text(content)),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            if VOID_TAGS.contains(&tag.as_str()) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_nested_tree() {
        let doc = Document::from_jsonml(&json!(
            ["div", {"class": "card"}, ["span", "hi"], "tail"]
        ))
        .unwrap();
        assert_eq!(
            to_html(&doc),
            r#"<div class="card"><span>hi</span>tail</div>"#
        );
    }

    #[test]
    fn void_elements_self_close() {
        let doc = Document::from_jsonml(&json!(["img", {"src": "a.png"}])).unwrap();
        assert_eq!(to_html(&doc), r#"<img src="a.png" />"#);
    }

    #[test]
    fn empty_element_keeps_closing_tag() {
        let doc = Document::from_jsonml(&json!(["div"])).unwrap();
        assert_eq!(to_html(&doc), "<div></div>");
    }

    #[test]
    fn escapes_text_and_attrs() {
        let mut doc = Document::from_jsonml(&json!(["p", {"title": "a\"b&c"}])).unwrap();
        doc.set_text(doc.root(), "1 < 2 & 3 > 2");
        assert_eq!(
            to_html(&doc),
            r#"<p title="a&quot;b&amp;c">1 &lt; 2 &amp; 3 &gt; 2</p>"#
        );
    }

    #[test]
    fn attrs_keep_insertion_order() {
        let mut doc = Document::new("div");
        doc.set_attr(doc.root(), "z", "1");
        doc.set_attr(doc.root(), "a", "2");
        assert_eq!(to_html(&doc), r#"<div z="1" a="2"></div>"#);
    }
}
