//! Stylesheet and declaration-list parsing on top of `cssparser`.
//!
//! Only what a page-level cascade needs: top-level style rules with their
//! raw selector prelude, and `name: value [!important]` declarations.
//! At-rules (`@media`, `@supports`, ...) are skipped.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, Parser,
    ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
    StyleSheetParser,
};

/// One `name: value` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// ASCII-lowercased property name.
    pub name: String,
    /// Value text with `!important` removed and whitespace trimmed.
    pub value: String,
    pub important: bool,
}

/// A qualified rule: the raw selector text and its declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    pub prelude: String,
    pub declarations: Vec<Declaration>,
}

/// Top-level style rules in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<StyleRule>,
}

/// Split a trailing `!important` (any case, optional space after `!`).
fn split_important(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if let Some(head) = lowered.strip_suffix("important")
        && let Some(bang) = head.trim_end().strip_suffix('!')
        && let Some(value) = trimmed.get(..bang.len())
    {
        return (value.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// Collects declarations inside a block or a `style` attribute.
struct DeclarationCollector;

impl<'input> DeclarationParser<'input> for DeclarationCollector {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'token>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'token>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let (value, important) = split_important(input.slice_from(start));
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'input> AtRuleParser<'input> for DeclarationCollector {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'input> QualifiedRuleParser<'input> for DeclarationCollector {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl RuleBodyItemParser<'_, Declaration, ()> for DeclarationCollector {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Builds [`StyleRule`]s at the top level of a sheet.
struct RuleCollector;

impl<'input> AtRuleParser<'input> for RuleCollector {
    type Prelude = ();
    type AtRule = StyleRule;
    type Error = ();

    fn parse_prelude<'token>(
        &mut self,
        _name: CowRcStr<'input>,
        _input: &mut Parser<'input, 'token>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(())
    }

    fn parse_block<'token>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Err(())
    }
}

impl<'input> QualifiedRuleParser<'input> for RuleCollector {
    type Prelude = String;
    type QualifiedRule = StyleRule;
    type Error = ();

    fn parse_prelude<'token>(
        &mut self,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(input.slice_from(start).trim().to_owned())
    }

    fn parse_block<'token>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(StyleRule {
            prelude,
            declarations: collect_declarations(input),
        })
    }
}

fn collect_declarations(input: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut collector = DeclarationCollector;
    RuleBodyParser::new(input, &mut collector).flatten().collect()
}

/// Parse a whole stylesheet. Invalid rules and all at-rules are dropped.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = RuleCollector;
    Stylesheet {
        rules: StyleSheetParser::new(&mut parser, &mut collector)
            .flatten()
            .collect(),
    }
}

/// Parse a declaration list such as the value of a `style` attribute.
pub fn parse_declaration_list(css: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    collect_declarations(&mut parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_keep_prelude_and_order() {
        let sheet = parse_stylesheet(
            "#chat, .widget > span { Z-INDEX: 9000; position: fixed }\n@media print { p { z-index: 1 } }\nfooter{z-index:3 !important}",
        );
        assert_eq!(sheet.rules.len(), 2);
        let first = &sheet.rules[0];
        assert_eq!(first.prelude, "#chat, .widget > span");
        assert_eq!(first.declarations[0].name, "z-index");
        assert_eq!(first.declarations[0].value, "9000");
        let footer = &sheet.rules[1].declarations[0];
        assert_eq!((footer.value.as_str(), footer.important), ("3", true));
    }

    #[test]
    fn declaration_list_handles_important_and_garbage() {
        let declarations = parse_declaration_list("z-index: 4 ! IMPORTANT; ;; color red; width: 1px");
        let pairs: Vec<_> = declarations
            .iter()
            .map(|declaration| (declaration.name.as_str(), declaration.value.as_str(), declaration.important))
            .collect();
        assert_eq!(pairs, vec![("z-index", "4", true), ("width", "1px", false)]);
    }
}
