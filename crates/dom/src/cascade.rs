//! Author-level cascade over the document's `<style>` sheets and inline
//! `style` attributes.
//!
//! Precedence, highest first: `!important`, then inline over sheet, then
//! selector specificity, then source order. There is no inheritance and no
//! user-agent sheet; a property nobody declares gets its initial value.

use crate::document::Document;
use crate::error::DomError;
use crate::style;
use css_selectors::{
    ComplexSelector, ElementAdapter, SelectorList, Specificity, matches_complex,
    parse_selector_list,
};
use css_syntax::{Declaration, parse_declaration_list, parse_stylesheet};
use indextree::NodeId;
use log::trace;

impl ElementAdapter for Document {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        Self::parent(self, element).filter(|parent| self.is_element(*parent))
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        element
            .preceding_siblings(&self.arena)
            .skip(1)
            .find(|sibling| self.is_element(*sibling))
    }

    fn tag_name(&self, element: NodeId) -> &str {
        Self::tag_name(self, element).unwrap_or_default()
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.attribute(element, "id")
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        Self::has_class(self, element, class)
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.attribute(element, name)
    }
}

#[derive(Clone, Debug)]
struct SheetRule {
    selectors: SelectorList,
    declarations: Vec<Declaration>,
}

/// Sort key of a candidate declaration; the greatest wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Precedence {
    important: bool,
    inline: bool,
    specificity: Specificity,
    /// `(rule index, declaration index)`
    order: (usize, usize),
}

/// Style rules collected from a document at one point in time.
///
/// Build it once with [`Document::cascade`] when querying many elements;
/// it does not track later mutations of `<style>` elements.
#[derive(Clone, Debug, Default)]
pub struct StyleCascade {
    rules: Vec<SheetRule>,
}

impl StyleCascade {
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The winning declared value of `property` for `node`, if any.
    pub fn declared_value(&self, document: &Document, node: NodeId, property: &str) -> Option<String> {
        let name = property.to_ascii_lowercase();
        let applies = |declaration: &&Declaration| declaration.name == name && !declaration.value.is_empty();

        let sheet = self
            .rules
            .iter()
            .enumerate()
            .filter_map(|(rule_index, rule)| {
                let specificity = rule
                    .selectors
                    .selectors
                    .iter()
                    .filter(|selector| matches_complex(document, node, selector))
                    .map(ComplexSelector::specificity)
                    .max()?;
                Some((rule_index, rule, specificity))
            })
            .flat_map(|(rule_index, rule, specificity)| {
                rule.declarations
                    .iter()
                    .enumerate()
                    .filter(move |(_, declaration)| applies(declaration))
                    .map(move |(index, declaration)| {
                        let precedence = Precedence {
                            important: declaration.important,
                            inline: false,
                            specificity,
                            order: (rule_index, index),
                        };
                        (precedence, declaration)
                    })
            });

        let inline_declarations = document
            .attribute(node, "style")
            .map(parse_declaration_list)
            .unwrap_or_default();
        let inline = inline_declarations
            .iter()
            .enumerate()
            .filter(|(_, declaration)| applies(declaration))
            .map(|(index, declaration)| {
                let precedence = Precedence {
                    important: declaration.important,
                    inline: true,
                    specificity: Specificity::default(),
                    order: (0, index),
                };
                (precedence, declaration)
            });

        sheet
            .chain(inline)
            .max_by_key(|(precedence, _)| *precedence)
            .map(|(_, declaration)| declaration.value.clone())
    }

    /// Declared value of `property`, or its initial value.
    ///
    /// # Errors
    /// Returns an error if the node is unknown or not an element.
    pub fn computed_style(&self, document: &Document, node: NodeId, property: &str) -> Result<String, DomError> {
        if !document.node(node)?.is_element() {
            return Err(DomError::NotAnElement(node));
        }
        Ok(self
            .declared_value(document, node, property)
            .unwrap_or_else(|| style::initial_value(&property.to_ascii_lowercase()).to_owned()))
    }
}

/// `<style>` without `type`, or with `type="text/css"`.
fn is_css_sheet(document: &Document, node: NodeId) -> bool {
    document
        .attribute(node, "type")
        .is_none_or(|kind| kind.trim().is_empty() || kind.trim().eq_ignore_ascii_case("text/css"))
}

impl Document {
    /// Parses every connected `<style>` element, in tree order.
    ///
    /// Rules whose selector list contains unsupported syntax (pseudo-classes,
    /// pseudo-elements) are dropped. At-rule blocks such as `@media` are
    /// skipped entirely.
    pub fn cascade(&self) -> StyleCascade {
        let sheets = self
            .descendants_by_tag(self.root(), &["style"])
            .unwrap_or_default();
        let mut rules = Vec::new();
        for sheet in sheets.into_iter().filter(|sheet| is_css_sheet(self, *sheet)) {
            for rule in parse_stylesheet(&self.text_content(sheet)).rules {
                if let Some(selectors) = parse_selector_list(&rule.prelude) {
                    rules.push(SheetRule {
                        selectors,
                        declarations: rule.declarations,
                    });
                } else {
                    trace!(target: "dom", "skipping unsupported selector `{}`", rule.prelude);
                }
            }
        }
        trace!(target: "dom", "cascade built with {} rules", rules.len());
        StyleCascade { rules }
    }
}
