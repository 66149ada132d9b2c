use core::fmt;

use crate::document::Document;
use crate::error::DomError;
use crate::node::{DomNode, NodeKind};
use indextree::NodeId;

use serde_json::{Map, Value, json};

/// Elements serialized without an end tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// -----------------------
// Module-scope helpers
// -----------------------

/// Escapes `&`, `<` and `>` for use as HTML text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes `&` and `"` for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_debug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_html(doc: &Document, id: NodeId, out: &mut String) -> Result<(), DomError> {
    let DomNode { kind, attrs } = doc.node(id)?;
    match kind {
        NodeKind::Document => {
            for child in id.children(&doc.arena) {
                write_html(doc, child, out)?;
            }
        }
        NodeKind::Element { tag } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs.iter() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return Ok(());
            }
            for child in id.children(&doc.arena) {
                write_html(doc, child, out)?;
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeKind::Text { text } => out.push_str(&escape_text(text)),
        NodeKind::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
    Ok(())
}

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn coalesce_children(doc: &Document, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in id.children(&doc.arena) {
        if let Ok(NodeKind::Text { text }) = doc.kind(child) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        let value = node_to_json(doc, child);
        if !value.is_null() {
            children.push(value);
        }
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    let Ok(DomNode { kind, attrs }) = doc.node(id) else {
        return Value::Null;
    };
    match kind {
        NodeKind::Document => json!({ "type": "document", "children": coalesce_children(doc, id) }),
        NodeKind::Element { tag } => {
            // Sorted by key for determinism
            let mut pairs: Vec<&(String, String)> = attrs.iter().collect();
            pairs.sort_by(|left, right| left.0.cmp(&right.0));
            let mut attrs_obj = Map::new();
            for (key, value) in pairs {
                attrs_obj.insert(key.clone(), Value::String(value.clone()));
            }
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(doc, id),
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
        NodeKind::Comment { .. } => Value::Null,
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            Ok(())
        }

        fn fmt_node(
            doc: &Document,
            id: NodeId,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            let Ok(DomNode { kind, attrs }) = doc.node(id) else {
                return Ok(());
            };
            match kind {
                NodeKind::Document => {
                    write_indent(f, depth)?;
                    writeln!(f, "#document")?;
                }
                NodeKind::Element { tag } => {
                    write_indent(f, depth)?;
                    write!(f, "<{tag}")?;
                    for (key, value) in attrs.iter() {
                        write!(f, " {key}=\"{}\"", escape_debug(value))?;
                    }
                    writeln!(f, ">")?;
                }
                NodeKind::Text { text } => {
                    // Skip pure-whitespace text nodes for cleaner output
                    if text.chars().all(char::is_whitespace) {
                        return Ok(());
                    }
                    write_indent(f, depth)?;
                    writeln!(f, "\"{}\"", escape_debug(text))?;
                }
                NodeKind::Comment { text } => {
                    write_indent(f, depth)?;
                    writeln!(f, "<!-- {} -->", escape_debug(text))?;
                }
            }
            for child in id.children(&doc.arena) {
                fmt_node(doc, child, f, depth + 1)?;
            }
            Ok(())
        }

        fmt_node(self, self.root, f, 0)
    }
}

impl Document {
    /// Serialized markup of `node` including its own tag.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn outer_html(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        write_html(self, node, &mut out)?;
        Ok(out)
    }

    /// Serialized markup of the children of `node`.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn inner_html(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        for child in self.children(node)? {
            write_html(self, child, &mut out)?;
        }
        Ok(out)
    }

    /// Build a deterministic JSON representation of the document.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_helpers_cover_their_context() {
        assert_eq!(escape_text("a < b & \"c\""), "a &lt; b &amp; \"c\"");
        assert_eq!(escape_attr("say \"<hi>\" & go"), "say &quot;<hi>&quot; &amp; go");
    }

    #[test]
    fn outer_html_escapes_and_skips_void_end_tags() -> Result<(), DomError> {
        let mut doc = Document::new();
        let para = doc.create_element("p");
        let input = doc.create_element("input");
        let text = doc.create_text("a < b & c");
        let body = doc.body();
        doc.append_child(body, para)?;
        doc.append_child(para, text)?;
        doc.append_child(para, input)?;
        doc.set_attribute(input, "value", "say \"hi\"")?;
        assert_eq!(
            doc.outer_html(para)?,
            "<p>a &lt; b &amp; c<input value=\"say &quot;hi&quot;\"></p>"
        );
        assert_eq!(doc.inner_html(para)?, "a &lt; b &amp; c<input value=\"say &quot;hi&quot;\">");
        Ok(())
    }

    #[test]
    fn json_snapshot_sorts_attributes() -> Result<(), DomError> {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let body = doc.body();
        doc.append_child(body, div)?;
        doc.set_attribute(div, "z", "1")?;
        doc.set_attribute(div, "a", "2")?;
        let snapshot = doc.to_json_string();
        let a_pos = snapshot.find("\"a\"").unwrap_or(usize::MAX);
        let z_pos = snapshot.find("\"z\"").unwrap_or(0);
        assert!(a_pos < z_pos, "attributes should be sorted: {snapshot}");
        Ok(())
    }
}
