//! Inline `style="..."` attribute handling.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

/// A single CSS declaration parsed from a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase.
    pub property: String,
    /// Value trimmed of surrounding ASCII whitespace. May contain spaces.
    pub value: String,
}

/// Parse the value of a `style` attribute into a list of declarations.
///
/// Splits on `;`, then on the first `:` of each item. Items without a
/// colon, or with an empty property or value, are skipped.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_ascii_whitespace);
        if item.is_empty() {
            continue;
        }
        let Some((raw_prop, raw_value)) = item.split_once(':') else {
            continue;
        };
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let value_text = raw_value.trim_matches(is_ascii_whitespace);
        if property_text.is_empty() || value_text.is_empty() {
            continue;
        }
        out.push(Declaration {
            property: property_text.to_ascii_lowercase(),
            value: value_text.to_owned(),
        });
    }
    out
}

/// Value of `property` in a style attribute. The last declaration wins.
pub fn declared_value(input: &str, property: &str) -> Option<String> {
    parse_style_attribute(input)
        .into_iter()
        .rev()
        .find(|decl| decl.property.eq_ignore_ascii_case(property))
        .map(|decl| decl.value)
}

/// Rewrite a style attribute so `property` is declared exactly once with
/// `value`, keeping the position of its first occurrence.
pub fn with_declaration(input: &str, property: &str, value: &str) -> String {
    let property = property.to_ascii_lowercase();
    let mut declarations = parse_style_attribute(input);
    let mut seen = false;
    declarations.retain_mut(|decl| {
        if decl.property != property {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        value.clone_into(&mut decl.value);
        true
    });
    if !seen {
        declarations.push(Declaration {
            property,
            value: value.to_owned(),
        });
    }
    serialize(&declarations)
}

pub fn serialize(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|decl| format!("{}: {};", decl.property, decl.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Initial value of the properties the overlay reads back.
pub fn initial_value(property: &str) -> &'static str {
    match property {
        "z-index" => "auto",
        "position" => "static",
        _ => "",
    }
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_malformed_items() {
        let decls = parse_style_attribute(" Z-Index : 10 ; color; :red; width: ;");
        assert_eq!(
            decls,
            vec![Declaration {
                property: "z-index".to_owned(),
                value: "10".to_owned(),
            }]
        );
    }

    #[test]
    fn last_declaration_wins() {
        assert_eq!(
            declared_value("z-index: 1; color: red; z-index: 7", "z-index"),
            Some("7".to_owned())
        );
        assert_eq!(declared_value("color: red", "z-index"), None);
    }

    #[test]
    fn with_declaration_replaces_first_and_drops_duplicates() {
        let out = with_declaration("z-index: 1; color: red; z-index: 2", "z-index", "12");
        assert_eq!(out, "z-index: 12; color: red;");
        let appended = with_declaration("color: red", "z-index", "3");
        assert_eq!(appended, "color: red; z-index: 3;");
    }
}
