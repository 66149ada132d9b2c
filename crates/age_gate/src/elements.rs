//! Curtain, dialog and content: the three structural nodes of the overlay.

use crate::error::ModalError;
use crate::styles::{StyleMap, names};
use crate::zindex;
use core::str::FromStr;
use dom::{Document, DomError, NodeId};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainElementName {
    Curtain,
    Dialog,
    Content,
}

impl MainElementName {
    /// Creation order, which is also stacking order.
    pub const ALL: [Self; 3] = [Self::Curtain, Self::Dialog, Self::Content];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Curtain => "curtain",
            Self::Dialog => "dialog",
            Self::Content => "content",
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Curtain => "ag-modal-curtain",
            Self::Dialog => "ag-modal-dialog",
            Self::Content => "ag-modal-content",
        }
    }

    pub const fn style_name(self) -> &'static str {
        match self {
            Self::Curtain => names::CURTAIN,
            Self::Dialog => names::DIALOG,
            Self::Content => names::CONTENT,
        }
    }

    /// Content is the only main element reachable by keyboard.
    pub const fn tab_index(self) -> i32 {
        match self {
            Self::Curtain | Self::Dialog => -1,
            Self::Content => 0,
        }
    }

    pub const fn role(self) -> Option<&'static str> {
        match self {
            Self::Curtain => None,
            Self::Dialog => Some("dialog"),
            Self::Content => Some("document"),
        }
    }

    /// Offset above the page baseline.
    pub const fn stacking_offset(self) -> i32 {
        match self {
            Self::Curtain => 1,
            Self::Dialog => 2,
            Self::Content => 3,
        }
    }
}

impl FromStr for MainElementName {
    type Err = ModalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "curtain" => Ok(Self::Curtain),
            "dialog" => Ok(Self::Dialog),
            "content" => Ok(Self::Content),
            other => Err(ModalError::DisallowedElement(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainElements {
    pub curtain: NodeId,
    pub dialog: NodeId,
    pub content: NodeId,
}

impl MainElements {
    pub const fn get(&self, name: MainElementName) -> NodeId {
        match name {
            MainElementName::Curtain => self.curtain,
            MainElementName::Dialog => self.dialog,
            MainElementName::Content => self.content,
        }
    }

    pub const fn all(&self) -> [NodeId; 3] {
        [self.curtain, self.dialog, self.content]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum FactoryState {
    #[default]
    Uninitialized,
    Created(MainElements),
}

/// Builds the main elements once and refuses every later attempt.
#[derive(Debug, Default)]
pub struct MainElementFactory {
    state: FactoryState,
}

impl MainElementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn elements(&self) -> Option<MainElements> {
        match self.state {
            FactoryState::Uninitialized => None,
            FactoryState::Created(elements) => Some(elements),
        }
    }

    fn ensure_uninitialized(&self) -> Result<(), ModalError> {
        if matches!(self.state, FactoryState::Created(_)) {
            warn!(target: "age_gate", "refusing to recreate modal elements");
            return Err(ModalError::AlreadyCreated);
        }
        Ok(())
    }

    /// Create curtain, dialog and content and attach them: curtain and
    /// dialog under `wrapper` (or the body), content inside dialog.
    ///
    /// The page baseline is read once, before anything is inserted, so the
    /// overlay never stacks against itself. A baseline too close to
    /// `i32::MAX` is lowered (see [`stacking_baseline`]).
    ///
    /// # Errors
    /// Returns [`ModalError::AlreadyCreated`] on a second call, leaving the
    /// document untouched, or a DOM error if `wrapper` is not usable.
    pub fn create_all(
        &mut self,
        document: &mut Document,
        wrapper: Option<NodeId>,
        styles: &StyleMap,
    ) -> Result<MainElements, ModalError> {
        self.ensure_uninitialized()?;
        let parent = wrapper.unwrap_or_else(|| document.body());
        if !document.is_element(parent) {
            return Err(DomError::NotAnElement(parent).into());
        }

        let baseline = stacking_baseline(zindex::resolve(document));
        let curtain = build(document, MainElementName::Curtain, baseline, styles)?;
        let dialog = build(document, MainElementName::Dialog, baseline, styles)?;
        let content = build(document, MainElementName::Content, baseline, styles)?;

        document.append_child(parent, curtain)?;
        document.append_child(parent, dialog)?;
        document.append_child(dialog, content)?;

        let elements = MainElements {
            curtain,
            dialog,
            content,
        };
        self.state = FactoryState::Created(elements);
        debug!(target: "age_gate", "created modal elements above z-index {baseline}");
        Ok(elements)
    }

    /// Build one detached main element by name.
    ///
    /// # Errors
    /// Returns [`ModalError::DisallowedElement`] for names other than
    /// `curtain`, `dialog` and `content`, and [`ModalError::AlreadyCreated`]
    /// once the set exists.
    pub fn create_element(
        &self,
        document: &mut Document,
        name: &str,
        baseline: i32,
        styles: &StyleMap,
    ) -> Result<NodeId, ModalError> {
        let parsed = name.parse::<MainElementName>().inspect_err(|_| {
            warn!(target: "age_gate", "refusing to create modal element `{name}`");
        })?;
        self.ensure_uninitialized()?;
        build(document, parsed, stacking_baseline(baseline), styles)
    }
}

/// Highest baseline that still leaves room for every stacking offset.
const MAX_BASELINE: i32 = i32::MAX - MainElementName::Content.stacking_offset();

/// Clamp the page baseline so curtain, dialog and content keep strictly
/// increasing z-indices.
///
/// When the page already uses a z-index above [`MAX_BASELINE`] the overlay
/// can no longer sit above all of it; a warning is logged and the three
/// elements take the top three values instead.
fn stacking_baseline(page: i32) -> i32 {
    if page > MAX_BASELINE {
        warn!(
            target: "age_gate",
            "page z-index {page} leaves no room above it; stacking the overlay from {MAX_BASELINE}"
        );
        return MAX_BASELINE;
    }
    page
}

fn build(
    document: &mut Document,
    name: MainElementName,
    baseline: i32,
    styles: &StyleMap,
) -> Result<NodeId, ModalError> {
    let node = document.create_element("div");
    document.set_attribute(node, "id", name.id())?;
    document.add_class(node, &styles.class(name.style_name()))?;
    document.set_attribute(node, "aria-hidden", "true")?;
    document.set_attribute(node, "tabindex", &name.tab_index().to_string())?;
    if let Some(role) = name.role() {
        document.set_attribute(node, "role", role)?;
    }
    let z_index = baseline.saturating_add(name.stacking_offset());
    document.set_style_property(node, "z-index", &z_index.to_string())?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_known_names() {
        assert_eq!("dialog".parse::<MainElementName>().ok(), Some(MainElementName::Dialog));
        assert!(matches!(
            "footer".parse::<MainElementName>(),
            Err(ModalError::DisallowedElement(name)) if name == "footer"
        ));
        assert!("Curtain".parse::<MainElementName>().is_err());
    }

    #[test]
    fn attributes_follow_element_name() -> Result<(), ModalError> {
        let mut doc = Document::new();
        let styles = StyleMap::new();
        let mut factory = MainElementFactory::new();
        let elements = factory.create_all(&mut doc, None, &styles)?;

        assert_eq!(doc.attribute(elements.curtain, "role"), None);
        assert_eq!(doc.attribute(elements.dialog, "role"), Some("dialog"));
        assert_eq!(doc.attribute(elements.content, "role"), Some("document"));
        assert_eq!(doc.attribute(elements.curtain, "tabindex"), Some("-1"));
        assert_eq!(doc.attribute(elements.dialog, "tabindex"), Some("-1"));
        assert_eq!(doc.attribute(elements.content, "tabindex"), Some("0"));
        assert!(doc.has_class(elements.curtain, "ag-modal-curtain"));
        for node in elements.all() {
            assert_eq!(doc.attribute(node, "aria-hidden"), Some("true"));
        }
        assert_eq!(doc.parent(elements.curtain), Some(doc.body()));
        assert_eq!(doc.parent(elements.content), Some(elements.dialog));
        Ok(())
    }

    #[test]
    fn create_element_refuses_after_creation() -> Result<(), ModalError> {
        let mut doc = Document::new();
        let styles = StyleMap::new();
        let mut factory = MainElementFactory::new();

        let single = factory.create_element(&mut doc, "content", 5, &styles)?;
        assert!(!doc.is_connected(single));
        assert_eq!(doc.style_property(single, "z-index").as_deref(), Some("8"));

        factory.create_all(&mut doc, None, &styles)?;
        assert!(matches!(
            factory.create_element(&mut doc, "dialog", 0, &styles),
            Err(ModalError::AlreadyCreated)
        ));
        assert!(matches!(
            factory.create_element(&mut doc, "banner", 0, &styles),
            Err(ModalError::DisallowedElement(_))
        ));
        Ok(())
    }

    #[test]
    fn saturated_page_keeps_strict_stacking_order() -> Result<(), ModalError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut doc = Document::new();
        let widget = doc.create_element("div");
        doc.append_child(doc.body(), widget)?;
        doc.set_style_property(widget, "z-index", "2147483647")?;

        let mut factory = MainElementFactory::new();
        let elements = factory.create_all(&mut doc, None, &StyleMap::new())?;
        let stack: Vec<_> = elements
            .all()
            .into_iter()
            .map(|node| doc.style_property(node, "z-index"))
            .collect();
        assert_eq!(
            stack,
            vec![
                Some("2147483645".to_owned()),
                Some("2147483646".to_owned()),
                Some("2147483647".to_owned()),
            ]
        );
        assert_eq!(stacking_baseline(i32::MAX - 3), i32::MAX - 3);
        assert_eq!(stacking_baseline(i32::MAX - 2), i32::MAX - 3);
        Ok(())
    }
}
