use crate::{Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector};

fn is_ident_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || matches!(character, '-' | '_') || !character.is_ascii()
}

struct Cursor<'src> {
    rest: &'src str,
}

impl<'src> Cursor<'src> {
    const fn new(source: &'src str) -> Self {
        Self { rest: source }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) {
        if let Some(character) = self.peek() {
            self.rest = self.rest.get(character.len_utf8()..).unwrap_or_default();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        let found = self.peek() == Some(expected);
        if found {
            self.bump();
        }
        found
    }

    /// Returns whether any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let trimmed = self.rest.trim_start();
        let skipped = trimmed.len() != self.rest.len();
        self.rest = trimmed;
        skipped
    }

    fn ident(&mut self) -> Option<&'src str> {
        let end = self
            .rest
            .find(|character: char| !is_ident_char(character))
            .unwrap_or(self.rest.len());
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        (!ident.is_empty()).then_some(ident)
    }

    fn quoted(&mut self, quote: char) -> Option<&'src str> {
        let end = self.rest.find(quote)?;
        let (value, rest) = self.rest.split_at(end);
        self.rest = rest;
        self.bump();
        Some(value)
    }

    /// `[name]` or `[name=value]`, after the opening bracket.
    fn attribute(&mut self) -> Option<SimpleSelector> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        if self.eat(']') {
            return Some(SimpleSelector::AttrExists(name));
        }
        if !self.eat('=') {
            return None;
        }
        self.skip_whitespace();
        let value = match self.peek()? {
            quote @ ('"' | '\'') => {
                self.bump();
                self.quoted(quote)?
            }
            _ => self.ident()?,
        };
        self.skip_whitespace();
        self.eat(']').then(|| SimpleSelector::AttrEquals {
            name,
            value: value.to_owned(),
        })
    }

    fn compound(&mut self) -> Option<CompoundSelector> {
        let mut simples = Vec::new();
        while let Some(next) = self.peek() {
            let simple = match next {
                '*' if simples.is_empty() => {
                    self.bump();
                    SimpleSelector::Universal
                }
                '.' => {
                    self.bump();
                    SimpleSelector::Class(self.ident()?.to_owned())
                }
                '#' => {
                    self.bump();
                    SimpleSelector::Id(self.ident()?.to_owned())
                }
                '[' => {
                    self.bump();
                    self.attribute()?
                }
                '>' | '+' | '~' => break,
                character if character.is_whitespace() => break,
                character if is_ident_char(character) && simples.is_empty() => {
                    SimpleSelector::Type(self.ident()?.to_ascii_lowercase())
                }
                _ => return None,
            };
            simples.push(simple);
        }
        (!simples.is_empty()).then_some(CompoundSelector { simples })
    }
}

/// Parse one complex selector. `None` for empty input or unsupported syntax.
pub fn parse_complex_selector(text: &str) -> Option<ComplexSelector> {
    let mut cursor = Cursor::new(text.trim());
    let first = cursor.compound()?;
    let mut rest = Vec::new();
    loop {
        let spaced = cursor.skip_whitespace();
        let combinator = match cursor.peek() {
            None => break,
            Some('>') => Combinator::Child,
            Some('+') => Combinator::AdjacentSibling,
            Some('~') => Combinator::GeneralSibling,
            Some(_) if spaced => Combinator::Descendant,
            Some(_) => return None,
        };
        if combinator != Combinator::Descendant {
            cursor.bump();
            cursor.skip_whitespace();
        }
        rest.push((combinator, cursor.compound()?));
    }
    Some(ComplexSelector { first, rest })
}

/// Split on top-level commas, ignoring commas inside quotes.
fn split_list(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (index, character) in text.char_indices() {
        match (quote, character) {
            (None, '"' | '\'') => quote = Some(character),
            (Some(open), _) if open == character => quote = None,
            (None, ',') => {
                parts.push(text.get(start..index).unwrap_or_default());
                start = index.saturating_add(1);
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    parts
}

/// Parse a selector group.
///
/// Returns `None` when any member is invalid, which drops the whole rule.
pub fn parse_selector_list(text: &str) -> Option<SelectorList> {
    let selectors = split_list(text)
        .into_iter()
        .map(parse_complex_selector)
        .collect::<Option<Vec<_>>>()?;
    Some(SelectorList { selectors })
}
