use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, SelectorList, SimpleSelector,
};
use core::iter::successors;

fn matches_simple<A: ElementAdapter>(adapter: &A, element: A::Handle, simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => adapter.tag_name(element) == name,
        SimpleSelector::Class(class) => adapter.has_class(element, class),
        SimpleSelector::Id(id) => adapter.element_id(element) == Some(id.as_str()),
        SimpleSelector::AttrExists(name) => adapter.attr(element, name).is_some(),
        SimpleSelector::AttrEquals { name, value } => {
            adapter.attr(element, name) == Some(value.as_str())
        }
    }
}

pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound
        .simples
        .iter()
        .all(|simple| matches_simple(adapter, element, simple))
}

/// Compound at `index`, where 0 is `first` and `index` n is `rest[n - 1]`.
fn compound_at(selector: &ComplexSelector, index: usize) -> Option<&CompoundSelector> {
    match index.checked_sub(1) {
        None => Some(&selector.first),
        Some(rest_index) => selector.rest.get(rest_index).map(|(_, compound)| compound),
    }
}

/// Does `element` match the prefix of `selector` ending at compound `index`?
///
/// Walks right to left. Descendant and general-sibling steps try every
/// candidate, so a failed deeper match falls back to the next ancestor or
/// sibling.
fn matches_from<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    selector: &ComplexSelector,
    index: usize,
) -> bool {
    let Some(compound) = compound_at(selector, index) else {
        return false;
    };
    if !matches_compound(adapter, element, compound) {
        return false;
    }
    let Some(previous) = index.checked_sub(1) else {
        return true;
    };
    let Some((combinator, _)) = selector.rest.get(previous) else {
        return false;
    };
    match combinator {
        Combinator::Child => adapter
            .parent(element)
            .is_some_and(|parent| matches_from(adapter, parent, selector, previous)),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(element)
            .is_some_and(|sibling| matches_from(adapter, sibling, selector, previous)),
        Combinator::Descendant => successors(adapter.parent(element), |&ancestor| {
            adapter.parent(ancestor)
        })
        .any(|ancestor| matches_from(adapter, ancestor, selector, previous)),
        Combinator::GeneralSibling => successors(
            adapter.previous_sibling_element(element),
            |&sibling| adapter.previous_sibling_element(sibling),
        )
        .any(|sibling| matches_from(adapter, sibling, selector, previous)),
    }
}

pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    selector: &ComplexSelector,
) -> bool {
    matches_from(adapter, element, selector, selector.rest.len())
}

pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_complex(adapter, element, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_complex_selector, parse_selector_list};

    struct Entry {
        tag: &'static str,
        id: Option<&'static str>,
        classes: &'static [&'static str],
        parent: Option<usize>,
        previous: Option<usize>,
    }

    struct Tree(Vec<Entry>);

    impl ElementAdapter for Tree {
        type Handle = usize;

        fn parent(&self, element: usize) -> Option<usize> {
            self.0.get(element).and_then(|entry| entry.parent)
        }

        fn previous_sibling_element(&self, element: usize) -> Option<usize> {
            self.0.get(element).and_then(|entry| entry.previous)
        }

        fn tag_name(&self, element: usize) -> &str {
            self.0.get(element).map_or("", |entry| entry.tag)
        }

        fn element_id(&self, element: usize) -> Option<&str> {
            self.0.get(element).and_then(|entry| entry.id)
        }

        fn has_class(&self, element: usize, class: &str) -> bool {
            self.0
                .get(element)
                .is_some_and(|entry| entry.classes.iter().any(|token| *token == class))
        }

        fn attr(&self, element: usize, name: &str) -> Option<&str> {
            match name {
                "id" => self.element_id(element),
                _ => None,
            }
        }
    }

    const fn entry(
        tag: &'static str,
        id: Option<&'static str>,
        classes: &'static [&'static str],
        parent: Option<usize>,
        previous: Option<usize>,
    ) -> Entry {
        Entry { tag, id, classes, parent, previous }
    }

    /// ```text
    /// 0 body
    /// ├─ 1 div.outer
    /// │  └─ 2 div
    /// │     └─ 3 span#deep
    /// ├─ 4 p
    /// └─ 5 aside#chat.widget
    /// ```
    fn tree() -> Tree {
        Tree(vec![
            entry("body", None, &[], None, None),
            entry("div", None, &["outer"], Some(0), None),
            entry("div", None, &[], Some(1), None),
            entry("span", Some("deep"), &[], Some(2), None),
            entry("p", None, &[], Some(0), Some(1)),
            entry("aside", Some("chat"), &["widget"], Some(0), Some(4)),
        ])
    }

    fn matches(selector: &str, element: usize) -> bool {
        parse_complex_selector(selector)
            .is_some_and(|complex| matches_complex(&tree(), element, &complex))
    }

    #[test]
    fn descendant_backtracks_past_nearest_match() {
        assert!(matches(".outer div > span", 3));
        assert!(matches("div span", 3));
        assert!(!matches(".outer > span", 3));
        assert!(matches("body > .outer div #deep", 3));
    }

    #[test]
    fn sibling_combinators() {
        assert!(matches("p + aside", 5));
        assert!(!matches("div + aside", 5));
        assert!(matches("div.outer ~ #chat.widget", 5));
        assert!(!matches("aside ~ p", 4));
    }

    #[test]
    fn attribute_and_universal() {
        assert!(matches("*[id=chat]", 5));
        assert!(matches("[id]", 3));
        assert!(!matches("[id]", 4));
    }

    #[test]
    fn list_matches_when_any_member_does() {
        let list = parse_selector_list("p, #deep").unwrap_or_default();
        assert!(matches_selector_list(&tree(), 3, &list));
        assert!(matches_selector_list(&tree(), 4, &list));
        assert!(!matches_selector_list(&tree(), 5, &list));
    }
}
