//! Sequential keyboard order for the generated controls.

use dom::{Document, DomError, NodeId};
use log::debug;

/// Tags that take part in the numbered tab order.
pub const FOCUSABLE_TAGS: [&str; 2] = ["input", "button"];

/// Number every `input` and `button` below `content` 1, 2, 3, … in tree
/// order. Running it again renumbers from 1.
///
/// # Errors
/// Returns an error if `content` is not in the document.
pub fn assign(document: &mut Document, content: NodeId) -> Result<NodeId, DomError> {
    let controls = document.descendants_by_tag(content, &FOCUSABLE_TAGS)?;
    for (position, control) in (1_usize..).zip(&controls) {
        document.set_attribute(*control, "tabindex", &position.to_string())?;
    }
    debug!(target: "age_gate", "assigned tab order to {} controls", controls.len());
    Ok(content)
}
