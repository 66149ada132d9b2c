//! Declarative description of what the overlay shows.
//!
//! Every field is optional in JSON; anything left out falls back to the
//! defaults in [`crate::content`]. Keys outside the known field set are
//! dropped with a warning when loading.

use crate::content::Field;
use crate::error::ConfigError;
use crate::styles::StyleMap;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One rendered element: which tag, which id, extra classes and
/// attributes, and inner HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub id: Option<String>,
    pub tag_name: Option<String>,
    pub content: Option<String>,
    pub classes: Vec<String>,
    pub attributes: IndexMap<String, String>,
}

impl FieldConfig {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Some(content.to_owned()),
            ..Self::default()
        }
    }
}

pub type TitleConfig = FieldConfig;
pub type ImageConfig = FieldConfig;
pub type IntroConfig = FieldConfig;
pub type ButtonConfig = FieldConfig;
pub type DisclaimerConfig = FieldConfig;

/// An input and the label that describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelledInput {
    pub input: FieldConfig,
    pub label: FieldConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    pub yes: LabelledInput,
    pub no: LabelledInput,
    /// Rendered below the choices only when configured.
    pub error: Option<FieldConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOfBirthConfig {
    pub day: LabelledInput,
    pub month: LabelledInput,
    pub year: LabelledInput,
    pub error: Option<FieldConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxConfig {
    pub error: FieldConfig,
    pub input: FieldConfig,
    pub label: FieldConfig,
}

/// Country or language selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    pub select: FieldConfig,
    pub error: FieldConfig,
    /// Replaces the built-in option list when present.
    pub options: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentConfig {
    pub title: Option<TitleConfig>,
    pub image: Option<ImageConfig>,
    pub intro: Option<IntroConfig>,
    pub radio: Option<RadioConfig>,
    pub date_of_birth: Option<DateOfBirthConfig>,
    pub checkboxes: Vec<CheckboxConfig>,
    pub country: Option<SelectConfig>,
    pub language: Option<SelectConfig>,
    pub button: Option<ButtonConfig>,
    pub disclaimer: Option<DisclaimerConfig>,
}

impl ContentConfig {
    /// Build from arbitrary JSON, dropping keys that name no [`Field`].
    ///
    /// # Errors
    /// Returns an error if `value` is not an object or a known key has the
    /// wrong shape.
    pub fn from_value(mut value: Value) -> Result<Self, ConfigError> {
        let object = value.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        object.retain(|key, _| {
            let known = Field::CANONICAL_ORDER.iter().any(|field| field.key() == key.as_str());
            if !known {
                warn!(target: "age_gate", "dropping unknown content key `{key}`");
            }
            known
        });
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    /// See [`ContentConfig::from_value`].
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(input)?)
    }
}

/// Everything needed to mount the gate on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GateConfig {
    pub content: ContentConfig,
    pub styles: StyleMap,
    pub show_on_load: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            styles: StyleMap::default(),
            show_on_load: true,
        }
    }
}

impl GateConfig {
    /// # Errors
    /// Returns an error if the input is not a JSON object or any member has
    /// the wrong shape.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let mut value: Value = serde_json::from_str(input)?;
        let object = value.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        let content = object
            .remove("content")
            .map(ContentConfig::from_value)
            .transpose()?
            .unwrap_or_default();
        let mut config: Self = serde_json::from_value(value)?;
        config.content = content;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_dropped() -> Result<(), ConfigError> {
        let config = ContentConfig::from_json_str(
            r#"{ "title": { "content": "Hi" }, "newsletter": { "content": "x" } }"#,
        )?;
        assert_eq!(config.title, Some(FieldConfig::with_content("Hi")));
        assert_eq!(config.intro, None);
        Ok(())
    }

    #[test]
    fn field_config_uses_camel_case_and_keeps_attribute_order() -> Result<(), ConfigError> {
        let config = ContentConfig::from_json_str(
            r#"{ "button": { "tagName": "a", "attributes": { "z": "1", "a": "2" } } }"#,
        )?;
        let button = config.button.unwrap_or_default();
        assert_eq!(button.tag_name.as_deref(), Some("a"));
        let keys: Vec<&str> = button.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        Ok(())
    }

    #[test]
    fn gate_config_defaults_to_showing() -> Result<(), ConfigError> {
        let config = GateConfig::from_json_str(
            r#"{ "content": { "dateOfBirth": {}, "extra": 1 }, "styles": { "agModalDialog": "d" } }"#,
        )?;
        assert!(config.show_on_load);
        assert!(config.content.date_of_birth.is_some());
        assert_eq!(config.styles.class("agModalDialog"), "d");
        Ok(())
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            ContentConfig::from_json_str("[1, 2]"),
            Err(ConfigError::NotAnObject)
        ));
    }
}
