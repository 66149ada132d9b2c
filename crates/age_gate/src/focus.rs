//! Focus save-and-restore around the overlay.

use dom::{Document, NodeId};
use log::debug;

/// Remembers which element had focus before the overlay opened.
///
/// The record is a plain node id: it does not keep the element alive, and
/// an element that left the document in the meantime is treated as if
/// nothing had been focused.
#[derive(Debug, Default, Clone)]
pub struct FocusController {
    record: Option<NodeId>,
}

impl FocusController {
    pub const fn new() -> Self {
        Self { record: None }
    }

    pub const fn record(&self) -> Option<NodeId> {
        self.record
    }

    /// Store the currently focused element.
    pub fn capture(&mut self, document: &Document) {
        let active = document.active_element();
        debug!(target: "age_gate", "captured focus on {active:?}");
        self.record = Some(active);
    }

    /// Give focus back to the captured element and clear the record.
    ///
    /// Blurs instead when the record is the body, the overlay's own
    /// `content` element, missing, or no longer connected.
    pub fn restore(&mut self, document: &mut Document, content: NodeId) {
        match self.record.take() {
            Some(node)
                if node != document.body() && node != content && document.is_connected(node) =>
            {
                if !document.focus(node) {
                    document.blur();
                }
            }
            _ => document.blur(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DomError;

    fn doc_with_button() -> Result<(Document, NodeId), DomError> {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        let body = doc.body();
        doc.append_child(body, button)?;
        Ok((doc, button))
    }

    #[test]
    fn restores_previous_focus() -> Result<(), DomError> {
        let (mut doc, button) = doc_with_button()?;
        let content = doc.create_element("div");
        assert!(doc.focus(button));

        let mut focus = FocusController::new();
        focus.capture(&doc);
        doc.blur();
        focus.restore(&mut doc, content);

        assert_eq!(doc.active_element(), button);
        assert_eq!(focus.record(), None);
        Ok(())
    }

    #[test]
    fn nothing_focused_stays_unfocused() -> Result<(), DomError> {
        let (mut doc, button) = doc_with_button()?;
        let content = doc.create_element("div");
        let mut focus = FocusController::new();
        focus.capture(&doc);
        assert!(doc.focus(button));
        focus.restore(&mut doc, content);
        assert_eq!(doc.active_element(), doc.body());
        Ok(())
    }

    #[test]
    fn removed_element_is_not_refocused() -> Result<(), DomError> {
        let (mut doc, button) = doc_with_button()?;
        let content = doc.create_element("div");
        assert!(doc.focus(button));
        let mut focus = FocusController::new();
        focus.capture(&doc);
        doc.remove(button)?;
        focus.restore(&mut doc, content);
        assert_eq!(doc.active_element(), doc.body());
        Ok(())
    }
}
