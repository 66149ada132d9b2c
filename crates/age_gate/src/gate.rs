//! Mount point tying configuration, styles and the modal to a host page.

use crate::config::GateConfig;
use crate::error::ModalError;
use crate::modal::Modal;
use dom::{Document, NodeId};
use log::info;

/// Id of the wrapper the gate mounts into.
pub const ROOT_ID: &str = "ag-root";

/// A [`Modal`] mounted into its own wrapper at the end of the body.
#[derive(Debug)]
pub struct AgeGate {
    root: NodeId,
    modal: Modal,
}

impl AgeGate {
    /// Append `div#ag-root` to the body, build the modal inside it, fill it
    /// from `config.content` and show it when `config.show_on_load` is set.
    ///
    /// # Errors
    /// Returns an error if any DOM mutation fails.
    pub fn mount(document: &mut Document, config: &GateConfig) -> Result<Self, ModalError> {
        let root = document.create_element("div");
        document.set_attribute(root, "id", ROOT_ID)?;
        let body = document.body();
        document.append_child(body, root)?;

        let mut modal = Modal::new(document, Some(root), config.styles.clone())?;
        modal.generate_contents(document, &config.content)?;
        if config.show_on_load {
            modal.show(document)?;
        }
        info!(target: "age_gate", "age gate mounted (shown: {})", modal.is_shown());
        Ok(Self { root, modal })
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub const fn modal(&self) -> &Modal {
        &self.modal
    }

    pub const fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }
}
