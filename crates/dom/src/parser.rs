//! HTML5 parsing using html5ever.

use crate::document::Document;
use crate::error::DomError;
use crate::node::{DomNode, NodeKind};
use html5ever::tendril::TendrilSink as _;
use html5ever::{LocalName, Namespace, ParseOpts, QualName, parse_document, parse_fragment};
use indextree::NodeId;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

impl Document {
    /// Parse a full HTML document.
    ///
    /// Whitespace-only text between elements is dropped; `html` and `body`
    /// are always present afterwards since html5ever synthesizes them.
    ///
    /// # Errors
    /// Returns an error if the markup cannot be read.
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let rc_dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;

        let mut document = Self::bare();
        let root = document.root();
        for child in rc_dom.document.children.borrow().iter() {
            convert_node(&mut document, child, root, false)?;
        }

        let html = match first_child_element(&document, root, "html") {
            Some(html) => html,
            None => {
                let html = document.create_element("html");
                document.append_child(root, html)?
            }
        };
        let body = match first_child_element(&document, html, "body") {
            Some(body) => body,
            None => {
                let body = document.create_element("body");
                document.append_child(html, body)?
            }
        };
        document.document_element = html;
        document.body = body;
        // Parsing is not a mutation anyone observes.
        document.take_updates();
        debug!(target: "dom", "parsed document with {} elements", document.elements().len());
        Ok(document)
    }
}

/// Parse `markup` in a `<body>` context and append the resulting nodes to
/// `parent`. Whitespace is preserved, as `innerHTML` would.
pub(crate) fn parse_fragment_into(
    document: &mut Document,
    parent: NodeId,
    markup: &str,
) -> Result<(), DomError> {
    let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("body"));
    let rc_dom: RcDom =
        parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false)
            .one(markup);

    // The fragment parser wraps its output in a synthetic <html> element.
    for wrapper in rc_dom.document.children.borrow().iter() {
        for child in wrapper.children.borrow().iter() {
            convert_node(document, child, parent, true)?;
        }
    }
    Ok(())
}

fn first_child_element(document: &Document, parent: NodeId, tag: &str) -> Option<NodeId> {
    document
        .child_elements(parent)
        .ok()?
        .into_iter()
        .find(|child| document.tag_name(*child) == Some(tag))
}

/// Convert an html5ever node into our arena under `parent`.
fn convert_node(
    document: &mut Document,
    rc_node: &Handle,
    parent: NodeId,
    keep_whitespace: bool,
) -> Result<(), DomError> {
    match &rc_node.data {
        RcNodeData::Document => {
            for child in rc_node.children.borrow().iter() {
                convert_node(document, child, parent, keep_whitespace)?;
            }
        }
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !keep_whitespace && text.trim().is_empty() {
                return Ok(());
            }
            let node = document.create_text(&text);
            document.append_child(parent, node)?;
        }
        RcNodeData::Comment { contents } => {
            let node = document.create_node(DomNode {
                kind: NodeKind::Comment {
                    text: contents.to_string(),
                },
                ..DomNode::default()
            });
            document.append_child(parent, node)?;
        }
        RcNodeData::Element { name, attrs, .. } => {
            let mut data = DomNode::element(&name.local);
            for attr in attrs.borrow().iter() {
                data.set_attr(&attr.name.local, &attr.value);
            }
            let node = document.create_node(data);
            document.append_child(parent, node)?;
            for child in rc_node.children.borrow().iter() {
                convert_node(document, child, node, keep_whitespace)?;
            }
        }
    }
    Ok(())
}
