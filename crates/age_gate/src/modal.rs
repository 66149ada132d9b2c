//! The overlay modal: main elements, generated content and the show/hide
//! state machine that toggles visibility classes and moves focus.

use crate::config::ContentConfig;
use crate::content::{ContentAssembler, ContentRow, RowRenderer, tabindex};
use crate::elements::{MainElementFactory, MainElements};
use crate::error::ModalError;
use crate::focus::FocusController;
use crate::styles::{StyleMap, names};
use dom::{Document, NodeId};
use log::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ModalState {
    shown: bool,
}

/// The overlay: main elements, generated content and the hidden/shown
/// state machine with focus save-and-restore.
#[derive(Debug)]
pub struct Modal<R = ContentRow> {
    state: ModalState,
    factory: MainElementFactory,
    elements: MainElements,
    focus: FocusController,
    styles: StyleMap,
    assembler: ContentAssembler<R>,
}

impl Modal<ContentRow> {
    /// Create and attach curtain, dialog and content under `wrapper` (or
    /// the body). The modal starts hidden.
    ///
    /// # Errors
    /// Returns an error if `wrapper` is not an element of `document`.
    pub fn new(
        document: &mut Document,
        wrapper: Option<NodeId>,
        styles: StyleMap,
    ) -> Result<Self, ModalError> {
        Self::with_renderer(document, wrapper, styles, ContentRow)
    }
}

impl<R: RowRenderer> Modal<R> {
    /// Like [`Modal::new`], rendering rows with `renderer`.
    ///
    /// # Errors
    /// See [`Modal::new`].
    pub fn with_renderer(
        document: &mut Document,
        wrapper: Option<NodeId>,
        styles: StyleMap,
        renderer: R,
    ) -> Result<Self, ModalError> {
        let mut factory = MainElementFactory::new();
        let elements = factory.create_all(document, wrapper, &styles)?;
        Ok(Self {
            state: ModalState::default(),
            factory,
            elements,
            focus: FocusController::new(),
            styles,
            assembler: ContentAssembler::new(renderer),
        })
    }

    pub const fn is_shown(&self) -> bool {
        self.state.shown
    }

    pub const fn elements(&self) -> MainElements {
        self.elements
    }

    pub const fn factory(&self) -> &MainElementFactory {
        &self.factory
    }

    pub const fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub const fn focus(&self) -> &FocusController {
        &self.focus
    }

    /// Rebuild the rows under `content` and number its controls.
    ///
    /// # Errors
    /// Returns an error if the renderer or the document fails.
    pub fn generate_contents(
        &self,
        document: &mut Document,
        config: &ContentConfig,
    ) -> Result<NodeId, ModalError> {
        let content = self.assembler.assemble(
            document,
            &self.styles,
            self.elements.content,
            config,
        )?;
        Ok(tabindex::assign(document, content)?)
    }

    /// # Errors
    /// Returns [`ModalError::AlreadyShown`] without side effects when the
    /// modal is already shown.
    pub fn show(&mut self, document: &mut Document) -> Result<(), ModalError> {
        if self.state.shown {
            warn!(target: "age_gate", "show() called on a shown modal");
            return Err(ModalError::AlreadyShown);
        }
        self.toggle_visibility(document, false)?;
        self.state.shown = true;
        self.focus.capture(document);
        document.focus(self.elements.content);
        debug!(target: "age_gate", "modal shown");
        Ok(())
    }

    /// # Errors
    /// Returns [`ModalError::AlreadyHidden`] without side effects when the
    /// modal is already hidden.
    pub fn hide(&mut self, document: &mut Document) -> Result<(), ModalError> {
        if !self.state.shown {
            warn!(target: "age_gate", "hide() called on a hidden modal");
            return Err(ModalError::AlreadyHidden);
        }
        self.toggle_visibility(document, true)?;
        self.state.shown = false;
        self.focus.restore(document, self.elements.content);
        debug!(target: "age_gate", "modal hidden");
        Ok(())
    }

    fn toggle_visibility(&self, document: &mut Document, aria_hidden: bool) -> Result<(), ModalError> {
        let body = document.body();
        document.toggle_class(body, &self.styles.class(names::BODY_LOCKED))?;
        let MainElements {
            curtain,
            dialog,
            content,
        } = self.elements;
        let shown_classes = [
            (curtain, names::CURTAIN_SHOWN),
            (dialog, names::DIALOG_SHOWN),
            (content, names::CONTENT_SHOWN),
        ];
        let hidden = if aria_hidden { "true" } else { "false" };
        for (node, logical) in shown_classes {
            document.toggle_class(node, &self.styles.class(logical))?;
            document.set_attribute(node, "aria-hidden", hidden)?;
        }
        Ok(())
    }
}
