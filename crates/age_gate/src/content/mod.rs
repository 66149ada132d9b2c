//! Turns a [`ContentConfig`] into rows under the modal's `content` node.

pub mod defaults;
mod row;
pub mod tabindex;

pub use row::{ContentRow, RowRenderer, RowSpec};

use crate::config::{
    CheckboxConfig, ContentConfig, DateOfBirthConfig, FieldConfig, LabelledInput, RadioConfig,
    SelectConfig,
};
use crate::error::ModalError;
use crate::reference;
use crate::styles::{StyleMap, names};
use dom::{Document, NodeId, escape_attr, escape_text};
use indexmap::IndexMap;
use log::{debug, warn};

/// The closed set of fields the overlay knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Image,
    Intro,
    Radio,
    DateOfBirth,
    Checkboxes,
    Country,
    Language,
    Button,
    Disclaimer,
}

impl Field {
    /// Rendering order. Radio and date of birth share a slot; radio wins.
    pub const CANONICAL_ORDER: [Self; 10] = [
        Self::Title,
        Self::Image,
        Self::Intro,
        Self::Radio,
        Self::DateOfBirth,
        Self::Checkboxes,
        Self::Country,
        Self::Language,
        Self::Button,
        Self::Disclaimer,
    ];

    /// Key of this field in a content configuration.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Image => "image",
            Self::Intro => "intro",
            Self::Radio => "radio",
            Self::DateOfBirth => "dateOfBirth",
            Self::Checkboxes => "checkboxes",
            Self::Country => "country",
            Self::Language => "language",
            Self::Button => "button",
            Self::Disclaimer => "disclaimer",
        }
    }

    /// Rendered even when the configuration omits it.
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Self::Intro | Self::Button)
    }
}

/// `<option value="KEY">LABEL</option>` for each entry, in order.
pub fn select_options<'entry, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'entry str, &'entry str)>,
{
    let mut out = String::new();
    for (value, label) in entries {
        out.push_str("<option value=\"");
        out.push_str(&escape_attr(value));
        out.push_str("\">");
        out.push_str(&escape_text(label));
        out.push_str("</option>");
    }
    out
}

/// Options for a selector: the configured list if any, else `fallback`.
fn options_html(config: &SelectConfig, fallback: IndexMap<&'static str, &'static str>) -> String {
    config.options.as_ref().map_or_else(
        || select_options(fallback),
        |custom| select_options(custom.iter().map(|(value, label)| (value.as_str(), label.as_str()))),
    )
}

/// Labelled input defaults shared by the radio and date-of-birth columns.
struct InputDefaults<'text> {
    id: String,
    input_type: &'text str,
    name: &'text str,
    value: Option<&'text str>,
    placeholder: Option<&'text str>,
    label: &'text str,
}

/// Builds content rows with a pluggable [`RowRenderer`].
#[derive(Debug, Default, Clone)]
pub struct ContentAssembler<R = ContentRow> {
    renderer: R,
}

impl<R: RowRenderer> ContentAssembler<R> {
    pub const fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Replace everything under `content` with rows for `config`.
    ///
    /// # Errors
    /// Returns an error if `content` is unknown or the renderer fails.
    pub fn assemble(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        content: NodeId,
        config: &ContentConfig,
    ) -> Result<NodeId, ModalError> {
        document.clear_children(content)?;
        let mut count = 0_usize;
        for field in Field::CANONICAL_ORDER {
            let rows = self.field_rows(document, styles, field, config)?;
            count += rows.len();
            for row in rows {
                document.append_child(content, row)?;
            }
        }
        debug!(target: "age_gate", "assembled {count} content rows");
        Ok(content)
    }

    fn field_rows(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        field: Field,
        config: &ContentConfig,
    ) -> Result<Vec<NodeId>, ModalError> {
        match field {
            Field::Title => self.simple(
                document,
                styles,
                field,
                config.title.as_ref(),
                RowSpec::new("ag-title", "h1").with_content(defaults::TITLE),
            ),
            Field::Image => self.simple(
                document,
                styles,
                field,
                config.image.as_ref(),
                RowSpec::new("ag-image", "img"),
            ),
            Field::Intro => self.simple(
                document,
                styles,
                field,
                config.intro.as_ref(),
                RowSpec::new("ag-intro", "p").with_content(defaults::INTRO),
            ),
            Field::Radio => config.radio.as_ref().map_or_else(
                || Ok(Vec::new()),
                |radio| self.radio(document, styles, radio),
            ),
            Field::DateOfBirth => match (&config.radio, &config.date_of_birth) {
                (Some(_), Some(_)) => {
                    warn!(target: "age_gate", "radio and dateOfBirth both configured; rendering radio only");
                    Ok(Vec::new())
                }
                (None, Some(dob)) => self.date_of_birth(document, styles, dob),
                (_, None) => Ok(Vec::new()),
            },
            Field::Checkboxes => {
                let mut rows = Vec::with_capacity(config.checkboxes.len());
                for (index, checkbox) in config.checkboxes.iter().enumerate() {
                    rows.push(self.checkbox(document, styles, index, checkbox)?);
                }
                Ok(rows)
            }
            Field::Country => config.country.as_ref().map_or_else(
                || Ok(Vec::new()),
                |country| {
                    let options = options_html(country, reference::countries());
                    self.select(document, styles, "country", &options, defaults::COUNTRY_ERROR, country)
                },
            ),
            Field::Language => config.language.as_ref().map_or_else(
                || Ok(Vec::new()),
                |language| {
                    let options = options_html(language, reference::languages());
                    self.select(document, styles, "language", &options, defaults::LANGUAGE_ERROR, language)
                },
            ),
            Field::Button => self.simple(
                document,
                styles,
                field,
                config.button.as_ref(),
                RowSpec::new("ag-button", "button")
                    .with_attribute("type", "button")
                    .with_content(defaults::BUTTON),
            ),
            Field::Disclaimer => self.simple(
                document,
                styles,
                field,
                config.disclaimer.as_ref(),
                RowSpec::new("ag-disclaimer", "p").with_content(defaults::DISCLAIMER),
            ),
        }
    }

    fn simple(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        field: Field,
        config: Option<&FieldConfig>,
        fallback: RowSpec,
    ) -> Result<Vec<NodeId>, ModalError> {
        if config.is_none() && !field.is_mandatory() {
            return Ok(Vec::new());
        }
        let spec = fallback.merge_with_id(config);
        let row = self.renderer.render(document, styles, &spec)?;
        Ok(row.into_iter().collect())
    }

    /// Render `spec` and move its element(s) into `parent`.
    fn render_into(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        parent: NodeId,
        spec: &RowSpec,
    ) -> Result<(), ModalError> {
        if let Some(row) = self.renderer.render(document, styles, spec)? {
            document.append_child(parent, row)?;
        }
        Ok(())
    }

    fn labelled_input(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        column: NodeId,
        base: &InputDefaults<'_>,
        config: &LabelledInput,
        label_first: bool,
    ) -> Result<(), ModalError> {
        let mut input = RowSpec::new(&base.id, "input")
            .with_attribute("type", base.input_type)
            .with_attribute("name", base.name);
        if let Some(value) = base.value {
            input = input.with_attribute("value", value);
        }
        if let Some(placeholder) = base.placeholder {
            input = input.with_attribute("placeholder", placeholder);
        }
        let input = input.merge(Some(&config.input));
        let label = RowSpec::new(&format!("{}-label", base.id), "label")
            .with_attribute("for", &base.id)
            .with_content(base.label)
            .merge(Some(&config.label));

        if label_first {
            self.render_into(document, styles, column, &label)?;
            self.render_into(document, styles, column, &input)?;
        } else {
            self.render_into(document, styles, column, &input)?;
            self.render_into(document, styles, column, &label)?;
        }
        Ok(())
    }

    fn radio(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        radio: &RadioConfig,
    ) -> Result<Vec<NodeId>, ModalError> {
        let row = container(document, styles, names::CONTENT_ROW)?;
        let choices = [
            ("yes", defaults::RADIO_YES, &radio.yes),
            ("no", defaults::RADIO_NO, &radio.no),
        ];
        for (value, label, config) in choices {
            let column = container(document, styles, names::CONTENT_COLUMN)?;
            let input = InputDefaults {
                id: format!("ag-radio-{value}"),
                input_type: "radio",
                name: "ag-radio",
                value: Some(value),
                placeholder: None,
                label,
            };
            self.labelled_input(document, styles, column, &input, config, false)?;
            document.append_child(row, column)?;
        }
        if let Some(error) = &radio.error {
            self.render_into(document, styles, row, &error_spec("ag-radio-error", "", styles).merge(Some(error)))?;
        }
        Ok(vec![row])
    }

    fn date_of_birth(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        dob: &DateOfBirthConfig,
    ) -> Result<Vec<NodeId>, ModalError> {
        let row = container(document, styles, names::CONTENT_ROW)?;
        let parts = [
            ("day", defaults::DOB_DAY_LABEL, defaults::DOB_DAY_PLACEHOLDER, &dob.day),
            ("month", defaults::DOB_MONTH_LABEL, defaults::DOB_MONTH_PLACEHOLDER, &dob.month),
            ("year", defaults::DOB_YEAR_LABEL, defaults::DOB_YEAR_PLACEHOLDER, &dob.year),
        ];
        for (part, label, placeholder, config) in parts {
            let column = container(document, styles, names::CONTENT_COLUMN)?;
            let input = InputDefaults {
                id: format!("ag-dob-{part}"),
                input_type: "number",
                name: part,
                value: None,
                placeholder: Some(placeholder),
                label,
            };
            self.labelled_input(document, styles, column, &input, config, true)?;
            document.append_child(row, column)?;
        }
        if let Some(error) = &dob.error {
            self.render_into(document, styles, row, &error_spec("ag-dob-error", "", styles).merge(Some(error)))?;
        }
        Ok(vec![row])
    }

    fn checkbox(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        index: usize,
        checkbox: &CheckboxConfig,
    ) -> Result<NodeId, ModalError> {
        let row = container(document, styles, names::CONTENT_ROW)?;
        let id = format!("ag-checkbox-{index}");
        let input = RowSpec::new(&id, "input")
            .with_attribute("type", "checkbox")
            .with_attribute("name", &id)
            .merge(Some(&checkbox.input));
        let label = RowSpec::new(&format!("{id}-label"), "label")
            .with_attribute("for", &id)
            .with_content(defaults::CHECKBOX_LABEL)
            .merge(Some(&checkbox.label));
        let error = error_spec(&format!("{id}-error"), defaults::CHECKBOX_ERROR, styles)
            .merge(Some(&checkbox.error));

        self.render_into(document, styles, row, &input)?;
        self.render_into(document, styles, row, &label)?;
        self.render_into(document, styles, row, &error)?;
        Ok(row)
    }

    fn select(
        &self,
        document: &mut Document,
        styles: &StyleMap,
        name: &str,
        options: &str,
        default_error: &str,
        config: &SelectConfig,
    ) -> Result<Vec<NodeId>, ModalError> {
        let row = container(document, styles, names::CONTENT_ROW)?;
        let id = format!("ag-{name}");
        let select = RowSpec::new(&id, "select")
            .with_attribute("name", name)
            .with_content(options)
            .merge(Some(&config.select));
        let error = error_spec(&format!("{id}-error"), default_error, styles)
            .merge(Some(&config.error));

        self.render_into(document, styles, row, &select)?;
        self.render_into(document, styles, row, &error)?;
        Ok(vec![row])
    }
}

fn container(document: &mut Document, styles: &StyleMap, logical: &str) -> Result<NodeId, ModalError> {
    let node = document.create_element("div");
    document.add_class(node, &styles.class(logical))?;
    Ok(node)
}

fn error_spec(id: &str, content: &str, styles: &StyleMap) -> RowSpec {
    RowSpec::new(id, "p")
        .with_attribute("role", "alert")
        .with_class(&styles.class(names::ERROR))
        .with_content(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(config: &ContentConfig) -> Result<(Document, NodeId), ModalError> {
        let mut doc = Document::new();
        let content = doc.create_element("div");
        let body = doc.body();
        doc.append_child(body, content)?;
        ContentAssembler::<ContentRow>::default().assemble(&mut doc, &StyleMap::new(), content, config)?;
        Ok((doc, content))
    }

    fn ids(doc: &Document, content: NodeId) -> Vec<String> {
        doc.descendants_by_tag(content, &["h1", "img", "p", "input", "label", "select", "button"])
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| doc.attribute(node, "id").map(str::to_owned))
            .collect()
    }

    #[test]
    fn mandatory_fields_only() -> Result<(), ModalError> {
        let (doc, content) = assemble(&ContentConfig::default())?;
        assert_eq!(doc.child_elements(content)?.len(), 2);
        assert_eq!(ids(&doc, content), vec!["ag-intro", "ag-button"]);
        let button = doc.element_by_id("ag-button");
        assert_eq!(button.and_then(|node| doc.attribute(node, "type")), Some("button"));
        assert_eq!(button.map(|node| doc.text_content(node)).as_deref(), Some(defaults::BUTTON));
        Ok(())
    }

    #[test]
    fn radio_wins_over_date_of_birth() -> Result<(), ModalError> {
        let config = ContentConfig {
            radio: Some(RadioConfig::default()),
            date_of_birth: Some(DateOfBirthConfig::default()),
            ..ContentConfig::default()
        };
        let (doc, content) = assemble(&config)?;
        assert!(doc.element_by_id("ag-radio-yes").is_some());
        assert!(doc.element_by_id("ag-dob-day").is_none());
        assert_eq!(doc.child_elements(content)?.len(), 3);
        Ok(())
    }

    #[test]
    fn date_of_birth_has_three_labelled_columns() -> Result<(), ModalError> {
        let config = ContentConfig {
            date_of_birth: Some(DateOfBirthConfig::default()),
            ..ContentConfig::default()
        };
        let (doc, content) = assemble(&config)?;
        let row = doc.child_elements(content)?[1];
        assert!(doc.has_class(row, "ag-modal-content-row"));
        let columns = doc.child_elements(row)?;
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|column| doc.has_class(*column, "ag-modal-content-column")));
        let month = doc.element_by_id("ag-dob-month");
        assert_eq!(month.and_then(|node| doc.attribute(node, "placeholder")), Some("Month"));
        let label = doc.element_by_id("ag-dob-month-label");
        assert_eq!(label.map(|node| doc.text_content(node)).as_deref(), Some("Month:"));
        assert_eq!(label.and_then(|node| doc.attribute(node, "for")), Some("ag-dob-month"));
        Ok(())
    }

    #[test]
    fn checkboxes_get_indexed_ids_and_defaults() -> Result<(), ModalError> {
        let config = ContentConfig {
            checkboxes: vec![CheckboxConfig::default(), CheckboxConfig::default()],
            ..ContentConfig::default()
        };
        let (doc, _) = assemble(&config)?;
        let error = doc.element_by_id("ag-checkbox-1-error");
        assert_eq!(error.map(|node| doc.text_content(node)).as_deref(), Some(defaults::CHECKBOX_ERROR));
        assert!(error.is_some_and(|node| doc.has_class(node, "ag-error")));
        let label = doc.element_by_id("ag-checkbox-0-label");
        assert_eq!(label.map(|node| doc.text_content(node)).as_deref(), Some(defaults::CHECKBOX_LABEL));
        Ok(())
    }

    #[test]
    fn select_options_escape_and_keep_order() {
        let html = select_options([("b", "Bee & co"), ("a\"x", "<A>")]);
        assert_eq!(
            html,
            "<option value=\"b\">Bee &amp; co</option><option value=\"a&quot;x\">&lt;A&gt;</option>"
        );
    }

    #[test]
    fn country_select_lists_reference_data() -> Result<(), ModalError> {
        let config = ContentConfig {
            country: Some(SelectConfig::default()),
            ..ContentConfig::default()
        };
        let (doc, _) = assemble(&config)?;
        let select = doc.element_by_id("ag-country");
        assert!(select.is_some(), "country select missing");
        let options = select.map(|node| doc.child_elements(node)).transpose()?.unwrap_or_default();
        assert_eq!(options.len(), reference::countries().len());
        assert_eq!(doc.attribute(options[0], "value"), Some("AF"));
        let error = doc.element_by_id("ag-country-error");
        assert_eq!(error.map(|node| doc.text_content(node)).as_deref(), Some(defaults::COUNTRY_ERROR));
        Ok(())
    }

    #[test]
    fn user_id_overrides_simple_field() -> Result<(), ModalError> {
        let mut title = FieldConfig::with_content("Welcome");
        title.id = Some("custom-title".to_owned());
        let config = ContentConfig {
            title: Some(title),
            ..ContentConfig::default()
        };
        let (doc, _) = assemble(&config)?;
        assert!(doc.element_by_id("ag-title").is_none());
        let node = doc.element_by_id("custom-title");
        assert_eq!(node.map(|node| doc.text_content(node)).as_deref(), Some("Welcome"));
        Ok(())
    }
}
