//! Rendering of a single content row from a fully resolved [`RowSpec`].

use crate::config::FieldConfig;
use crate::styles::{StyleMap, class_name_from_id, names};
use dom::{Document, DomError, NodeId};
use indexmap::IndexMap;
use log::debug;

/// Everything needed to render one element, defaults already applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSpec {
    pub id: String,
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
    pub classes: Vec<String>,
    /// Inner HTML.
    pub content: String,
}

impl RowSpec {
    pub fn new(id: &str, tag_name: &str) -> Self {
        Self {
            id: id.to_owned(),
            tag_name: tag_name.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        content.clone_into(&mut self.content);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    /// Layer user configuration over these defaults. Tag and content are
    /// replaced, classes are appended, attributes are overridden per key.
    /// The id stays fixed so labels keep pointing at their inputs.
    #[must_use]
    pub fn merge(mut self, config: Option<&FieldConfig>) -> Self {
        let Some(config) = config else {
            return self;
        };
        if let Some(tag_name) = &config.tag_name {
            tag_name.clone_into(&mut self.tag_name);
        }
        if let Some(content) = &config.content {
            content.clone_into(&mut self.content);
        }
        self.classes.extend(config.classes.iter().cloned());
        for (name, value) in &config.attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        self
    }

    /// Like [`RowSpec::merge`], but a configured id replaces the default.
    #[must_use]
    pub fn merge_with_id(self, config: Option<&FieldConfig>) -> Self {
        let id = config.and_then(|field| field.id.clone());
        let mut merged = self.merge(config);
        if let Some(id) = id {
            merged.id = id;
        }
        merged
    }
}

/// Renders one [`RowSpec`] into a detached container node.
pub trait RowRenderer {
    /// Returns `Ok(None)` without touching the document when `spec.id` is
    /// empty.
    ///
    /// # Errors
    /// Returns an error if the document rejects a mutation.
    fn render(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        spec: &RowSpec,
    ) -> Result<Option<NodeId>, DomError>;
}

/// The stock renderer: a `div` carrying the content-row class with the
/// element inside it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentRow;

impl RowRenderer for ContentRow {
    fn render(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        spec: &RowSpec,
    ) -> Result<Option<NodeId>, DomError> {
        if spec.id.is_empty() {
            debug!(target: "age_gate", "skipping row without an id");
            return Ok(None);
        }
        let container = document.create_element("div");
        document.add_class(container, &styles.class(names::CONTENT_ROW))?;

        let tag = if spec.tag_name.is_empty() {
            "div"
        } else {
            spec.tag_name.as_str()
        };
        let element = document.create_element(tag);
        document.set_attribute(element, "id", &spec.id)?;
        document.add_class(element, &styles.class(&class_name_from_id(&spec.id)))?;
        for (name, value) in &spec.attributes {
            document.set_attribute(element, name, value)?;
        }
        for class in &spec.classes {
            document.add_class(element, class)?;
        }
        document.set_inner_html(element, &spec.content)?;

        document.append_child(container, element)?;
        Ok(Some(container))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(spec: &RowSpec) -> Result<(Document, Option<NodeId>), DomError> {
        let mut doc = Document::new();
        let row = ContentRow.render(&mut doc, &StyleMap::new(), spec)?;
        Ok((doc, row))
    }

    #[test]
    fn missing_id_produces_nothing() -> Result<(), DomError> {
        let (doc, row) = render(&RowSpec::new("", "p").with_content("x"))?;
        assert_eq!(row, None);
        assert!(doc.updates().is_empty());
        Ok(())
    }

    #[test]
    fn wraps_element_in_content_row() -> Result<(), DomError> {
        let spec = RowSpec::new("testId", "p")
            .with_attribute("data-one", "1")
            .with_attribute("data-two", "2")
            .with_class("extra")
            .with_content("This is <em>italic</em> and <a href=\"#\">a link</a>");
        let (doc, row) = render(&spec)?;
        let Some(row) = row else {
            return Err(DomError::UnknownNode(doc.root()));
        };
        assert_eq!(doc.tag_name(row), Some("div"));
        assert!(doc.has_class(row, "ag-modal-content-row"));

        let children = doc.child_elements(row)?;
        assert_eq!(children.len(), 1);
        let element = children[0];
        assert_eq!(doc.tag_name(element), Some("p"));
        assert_eq!(doc.attribute(element, "id"), Some("testId"));
        assert_eq!(doc.classes(element), vec!["ag-test-id", "extra"]);
        assert_eq!(doc.attribute(element, "data-two"), Some("2"));
        assert_eq!(doc.descendants_by_tag(element, &["em", "a"])?.len(), 2);
        assert_eq!(
            doc.inner_html(element)?,
            "This is <em>italic</em> and <a href=\"#\">a link</a>"
        );
        Ok(())
    }

    #[test]
    fn merge_layers_configuration() {
        let mut config = FieldConfig::with_content("Custom");
        config.id = Some("ignored".to_owned());
        config.classes = vec!["mine".to_owned()];
        config.attributes.insert("type".to_owned(), "submit".to_owned());

        let base = RowSpec::new("ag-button", "button")
            .with_attribute("type", "button")
            .with_class("base")
            .with_content("Let me in");
        let merged = base.clone().merge(Some(&config));
        assert_eq!(merged.id, "ag-button");
        assert_eq!(merged.content, "Custom");
        assert_eq!(merged.classes, vec!["base", "mine"]);
        assert_eq!(merged.attributes.get("type").map(String::as_str), Some("submit"));

        assert_eq!(base.merge_with_id(Some(&config)).id, "ignored");
    }
}
