//! Logical style names and their runtime class strings.
//!
//! The overlay never decides what a class looks like; it only asks the
//! [`StyleMap`] which class string stands for a logical name such as
//! `agModalCurtain`. A CSS-modules build exports exactly such a table as
//! JSON, which [`StyleMap::from_json_str`] accepts.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Logical names the overlay looks up.
pub mod names {
    pub const CURTAIN: &str = "agModalCurtain";
    pub const DIALOG: &str = "agModalDialog";
    pub const CONTENT: &str = "agModalContent";
    pub const CONTENT_ROW: &str = "agModalContentRow";
    pub const CONTENT_COLUMN: &str = "agModalContentColumn";
    pub const ERROR: &str = "agError";
    pub const BODY_LOCKED: &str = "sAgBodyIsLocked";
    pub const CURTAIN_SHOWN: &str = "sAgModalCurtainIsShown";
    pub const DIALOG_SHOWN: &str = "sAgModalDialogIsShown";
    pub const CONTENT_SHOWN: &str = "sAgModalContentIsShown";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    classes: HashMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `{ "logicalName": "runtime-class" }` table.
    ///
    /// # Errors
    /// Returns an error if the input is not a JSON object of strings.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn insert(&mut self, logical: &str, class: &str) {
        self.classes.insert(logical.to_owned(), class.to_owned());
    }

    /// Runtime class for `logical`. Names without an entry map to their
    /// kebab-case form, so `agModalContentRow` becomes `ag-modal-content-row`.
    pub fn class(&self, logical: &str) -> Cow<'_, str> {
        self.classes
            .get(logical)
            .map_or_else(|| Cow::Owned(kebab_case(logical)), |class| Cow::Borrowed(class.as_str()))
    }
}

pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, character) in name.chars().enumerate() {
        if character.is_ascii_uppercase() {
            if index > 0 {
                out.push('-');
            }
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    out
}

/// Logical style name for an element id: `ag-checkbox-0-label` becomes
/// `agCheckbox0Label`. A leading `ag` word is not repeated.
pub fn class_name_from_id(id: &str) -> String {
    let mut words = id.split('-').filter(|word| !word.is_empty()).peekable();
    if words.peek() == Some(&"ag") {
        words.next();
    }
    let mut out = String::from("ag");
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_names_fall_back_to_kebab_case() {
        let styles = StyleMap::new();
        assert_eq!(styles.class(names::CONTENT_ROW), "ag-modal-content-row");
        assert_eq!(styles.class(names::BODY_LOCKED), "s-ag-body-is-locked");
    }

    #[test]
    fn json_table_overrides_fallback() -> Result<(), ConfigError> {
        let styles = StyleMap::from_json_str(r#"{ "agModalCurtain": "_curtain_x1f" }"#)?;
        assert_eq!(styles.class(names::CURTAIN), "_curtain_x1f");
        assert_eq!(styles.class(names::DIALOG), "ag-modal-dialog");
        Ok(())
    }

    #[test]
    fn class_names_from_ids() {
        assert_eq!(class_name_from_id("ag-title"), "agTitle");
        assert_eq!(class_name_from_id("ag-checkbox-0-label"), "agCheckbox0Label");
        assert_eq!(class_name_from_id("testId"), "agTestId");
    }
}
