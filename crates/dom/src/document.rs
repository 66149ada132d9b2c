use crate::error::DomError;
use crate::node::{DomNode, NodeKind};
use crate::parser;
use crate::style;
use crate::updates::DomUpdate;
use indextree::{Arena, Node, NodeId};
use core::mem;
use log::trace;

/// Tags that can take focus without an explicit `tabindex`.
const FOCUSABLE_TAGS: [&str; 4] = ["input", "button", "select", "textarea"];

/// A live document: `#document > html > (head, body)` plus whatever the
/// host page and the overlay attach to it.
#[derive(Clone)]
pub struct Document {
    pub(crate) arena: Arena<DomNode>,
    pub(crate) root: NodeId,
    pub(crate) document_element: NodeId,
    pub(crate) body: NodeId,
    active: Option<NodeId>,
    journal: Vec<DomUpdate>,
}

impl Document {
    /// An empty `html > (head, body)` document.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        let html = arena.new_node(DomNode::element("html"));
        let head = arena.new_node(DomNode::element("head"));
        let body = arena.new_node(DomNode::element("body"));
        root.append(html, &mut arena);
        html.append(head, &mut arena);
        html.append(body, &mut arena);
        Self {
            arena,
            root,
            document_element: html,
            body,
            active: None,
            journal: Vec::new(),
        }
    }

    /// A document holding only the `#document` node. Used by the parser,
    /// which fills in `html` and `body` afterwards.
    pub(crate) fn bare() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        Self {
            arena,
            root,
            document_element: root,
            body: root,
            active: None,
            journal: Vec::new(),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub const fn document_element(&self) -> NodeId {
        self.document_element
    }

    pub const fn body(&self) -> NodeId {
        self.body
    }

    pub(crate) fn node(&self, node: NodeId) -> Result<&DomNode, DomError> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get)
            .ok_or(DomError::UnknownNode(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut DomNode, DomError> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get_mut)
            .ok_or(DomError::UnknownNode(node))
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut DomNode, DomError> {
        let data = self.node_mut(node)?;
        if data.is_element() {
            Ok(data)
        } else {
            Err(DomError::NotAnElement(node))
        }
    }

    pub fn kind(&self, node: NodeId) -> Result<&NodeKind, DomError> {
        Ok(&self.node(node)?.kind)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().and_then(DomNode::tag)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.node(node).is_ok_and(DomNode::is_element)
    }

    /// Creates a detached element. It stays invisible to tree walks until
    /// appended somewhere under the document.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DomNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode::text(text))
    }

    pub(crate) fn create_node(&mut self, data: DomNode) -> NodeId {
        self.arena.new_node(data)
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Errors
    /// Returns an error if either node is unknown or if `child` is an
    /// ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.node(parent)?;
        let data = self.node(child)?.clone();
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|_| DomError::InvalidInsertion { parent, child })?;
        let pos = parent.children(&self.arena).count().saturating_sub(1);
        let update = match data.kind {
            NodeKind::Element { tag } => Some(DomUpdate::InsertElement {
                parent,
                node: child,
                tag,
                pos,
            }),
            NodeKind::Text { text } => Some(DomUpdate::InsertText {
                parent,
                node: child,
                text,
                pos,
            }),
            NodeKind::Document | NodeKind::Comment { .. } => None,
        };
        if let Some(update) = update {
            self.journal.push(update);
        }
        Ok(child)
    }

    /// Removes `node` and its subtree. Focus inside the removed subtree is
    /// dropped, the way a browser falls back to the body.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.node(node)?;
        if let Some(active) = self.active
            && active.ancestors(&self.arena).any(|ancestor| ancestor == node)
        {
            self.active = None;
        }
        node.remove_subtree(&mut self.arena);
        self.journal.push(DomUpdate::RemoveNode { node });
        Ok(())
    }

    /// Removes every child of `node`.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn clear_children(&mut self, node: NodeId) -> Result<(), DomError> {
        let children: Vec<NodeId> = self.children(node)?;
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn children(&self, node: NodeId) -> Result<Vec<NodeId>, DomError> {
        self.node(node)?;
        Ok(node.children(&self.arena).collect())
    }

    /// Element children only.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn child_elements(&self, node: NodeId) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .children(node)?
            .into_iter()
            .filter(|child| self.is_element(*child))
            .collect())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(Node::parent)
    }

    /// Whether `node` is attached under the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).is_ok() && node.ancestors(&self.arena).any(|ancestor| ancestor == self.root)
    }

    /// All connected elements in tree order, the equivalent of
    /// `getElementsByTagName("*")`.
    pub fn elements(&self) -> Vec<NodeId> {
        self.root
            .descendants(&self.arena)
            .filter(|node| self.is_element(*node))
            .collect()
    }

    /// Descendant elements of `node` (excluding `node`) whose tag is one of
    /// `tags`, in tree order.
    ///
    /// # Errors
    /// Returns an error if the node is unknown.
    pub fn descendants_by_tag(&self, node: NodeId, tags: &[&str]) -> Result<Vec<NodeId>, DomError> {
        self.node(node)?;
        Ok(node
            .descendants(&self.arena)
            .skip(1)
            .filter(|candidate| {
                self.tag_name(*candidate)
                    .is_some_and(|tag| tags.contains(&tag))
            })
            .collect())
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.root.descendants(&self.arena).find(|node| {
            self.node(*node)
                .ok()
                .filter(|data| data.is_element())
                .and_then(|data| data.attr("id"))
                == Some(id)
        })
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).ok().and_then(|data| data.attr(name))
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node)?.set_attr(name, value);
        self.journal.push(DomUpdate::SetAttr {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        if self.element_mut(node)?.remove_attr(name) {
            self.journal.push(DomUpdate::RemoveAttr {
                node,
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|value| value.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    fn write_classes(&mut self, node: NodeId, classes: &[String]) -> Result<(), DomError> {
        self.set_attribute(node, "class", &classes.join(" "))
    }

    fn owned_classes(&self, node: NodeId) -> Vec<String> {
        self.classes(node).into_iter().map(str::to_owned).collect()
    }

    /// Adds each whitespace-separated token of `class` not already present.
    ///
    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let mut classes = self.owned_classes(node);
        let mut changed = false;
        for token in class.split_ascii_whitespace() {
            if !classes.iter().any(|existing| existing == token) {
                classes.push(token.to_owned());
                changed = true;
            }
        }
        if changed {
            self.write_classes(node, &classes)?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let mut classes = self.owned_classes(node);
        let before = classes.len();
        classes.retain(|existing| existing != class);
        if classes.len() != before {
            self.write_classes(node, &classes)?;
        }
        Ok(())
    }

    /// Flips `class` on `node` and reports whether it is now present.
    ///
    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> Result<bool, DomError> {
        if self.has_class(node, class) {
            self.remove_class(node, class)?;
            Ok(false)
        } else {
            self.add_class(node, class)?;
            Ok(true)
        }
    }

    /// Concatenated text of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        if self.node(node).is_err() {
            return String::new();
        }
        node.descendants(&self.arena)
            .filter_map(|descendant| match &self.arena.get(descendant)?.get().kind {
                NodeKind::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces the children of `node` with the parsed `markup`.
    ///
    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> Result<(), DomError> {
        self.element_mut(node)?;
        self.clear_children(node)?;
        if markup.is_empty() {
            return Ok(());
        }
        parser::parse_fragment_into(self, node, markup)
    }

    /// Value of `property` declared in the inline style of `node`.
    pub fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        self.attribute(node, "style")
            .and_then(|value| style::declared_value(value, property))
    }

    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let current = self.attribute(node, "style").unwrap_or_default();
        let updated = style::with_declaration(current, property, value);
        self.set_attribute(node, "style", &updated)
    }

    /// Computed value of `property` after the cascade of `<style>` sheets
    /// and the inline `style` attribute, or the property's initial value.
    ///
    /// Re-parses every sheet on each call; use [`Document::cascade`] when
    /// querying many elements.
    ///
    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn computed_style(&self, node: NodeId, property: &str) -> Result<String, DomError> {
        self.cascade().computed_style(self, node, property)
    }

    pub fn is_focusable(&self, node: NodeId) -> bool {
        let Ok(data) = self.node(node) else {
            return false;
        };
        let Some(tag) = data.tag() else {
            return false;
        };
        data.attr("tabindex").is_some()
            || FOCUSABLE_TAGS.contains(&tag)
            || (tag == "a" && data.attr("href").is_some())
    }

    /// Moves focus to `node` if it is connected and focusable. Returns
    /// whether focus moved.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) || !self.is_focusable(node) {
            trace!(target: "dom", "focus ignored for {node:?}");
            return false;
        }
        self.active = Some(node);
        true
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The focused element, or the body when nothing is focused.
    pub fn active_element(&self) -> NodeId {
        self.active
            .filter(|node| self.is_connected(*node))
            .unwrap_or(self.body)
    }

    pub fn updates(&self) -> &[DomUpdate] {
        &self.journal
    }

    /// Drains the mutation journal.
    pub fn take_updates(&mut self) -> Vec<DomUpdate> {
        mem::take(&mut self.journal)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
