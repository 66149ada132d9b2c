//! Selector parsing, matching and specificity over an abstract element tree.
//!
//! Covers the static subset a stylesheet cascade needs: type, universal,
//! class, id and attribute (`[attr]`, `[attr=value]`) selectors joined by the
//! four combinators. Selectors using anything else (pseudo-classes,
//! pseudo-elements, namespaces) are rejected at parse time so they never match.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod matcher;
mod parser;
mod specificity;

pub use matcher::{matches_complex, matches_compound, matches_selector_list};
pub use parser::{parse_complex_selector, parse_selector_list};
pub use specificity::Specificity;

/// Read access to an element tree for matching.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element, `None` at the root element.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Closest preceding sibling that is an element.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// ASCII-lowercased tag name.
    fn tag_name(&self, element: Self::Handle) -> &str;

    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Lowercased tag name.
    Type(String),
    Class(String),
    Id(String),
    /// `[name]`
    AttrExists(String),
    /// `[name=value]`
    AttrEquals { name: String, value: String },
    Universal,
}

/// Simple selectors that all apply to the same element.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    AdjacentSibling,
    /// `~`
    GeneralSibling,
}

/// `first (combinator compound)*`, read left to right.
///
/// The subject of the selector is the last compound in `rest`, or `first`
/// when `rest` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    pub fn specificity(&self) -> Specificity {
        self.rest
            .iter()
            .map(|(_, compound)| compound)
            .fold(Specificity::of_compound(&self.first), |total, compound| {
                total.add(Specificity::of_compound(compound))
            })
    }
}

/// Comma-separated group of complex selectors.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}
