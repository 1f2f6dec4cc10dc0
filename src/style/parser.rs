//! Stylesheet parser: rule sets of compound selectors and declarations.
//!
//! Works on the spanned tokens from [`tokenize`]. Parsing never fails:
//! selectors this scope cannot match (combinators, pseudo-classes) are
//! dropped with a debug log, malformed declarations are skipped up to the
//! next `;`, and input ending inside a block closes it.

use super::tokenizer::{tokenize, Lexeme, Token};

/// One part of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Simple {
    Universal,
    Type(String),
    Class(String),
    Id(String),
}

/// Cascade order of a rule. Field order makes the derived `Ord` the cascade
/// order: ids, then classes, then types, then source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) struct Specificity {
    pub id_count: u16,
    pub class_count: u16,
    pub type_count: u16,
    pub source_order: u32,
}

impl Specificity {
    pub fn from_selector(selector: &[Simple], source_order: u32) -> Self {
        let mut counts = Self {
            source_order,
            ..Self::default()
        };
        for simple in selector {
            match simple {
                Simple::Id(_) => counts.id_count += 1,
                Simple::Class(_) => counts.class_count += 1,
                Simple::Type(_) => counts.type_count += 1,
                Simple::Universal => {}
            }
        }
        counts
    }
}

/// One selector of a rule set with the rule set's declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rule {
    pub selector: Vec<Simple>,
    pub specificity: Specificity,
    pub declarations: Vec<(String, String)>,
}

/// Parse `source` and append its rules. Source order continues from the
/// rules already in `rules`.
pub(crate) fn parse_rules(source: &str, rules: &mut Vec<Rule>) {
    let mut parser = Parser {
        source,
        tokens: tokenize(source),
        cursor: 0,
    };
    while !parser.is_eof() {
        parser.parse_rule(rules);
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Lexeme>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// `None` at end of input; `Some(None)` for an unknown character.
    fn peek(&self) -> Option<Option<Token>> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<Option<Token>> {
        self.tokens.get(self.cursor + offset).map(|l| l.token)
    }

    fn text(&self, lexemes: &[Lexeme]) -> &'a str {
        match (lexemes.first(), lexemes.last()) {
            (Some(first), Some(last)) => &self.source[first.span.start..last.span.end],
            _ => "",
        }
    }

    /// Selector list, `{`, declarations, `}`.
    fn parse_rule(&mut self, rules: &mut Vec<Rule>) {
        let prelude_start = self.cursor;
        loop {
            match self.peek() {
                None => {
                    log::debug!("stylesheet ends inside a selector");
                    return;
                }
                Some(Some(Token::BraceOpen)) => break,
                Some(Some(Token::BraceClose)) => {
                    log::debug!("skipping unmatched `}}` in stylesheet");
                    self.cursor += 1;
                    return;
                }
                Some(_) => self.cursor += 1,
            }
        }
        let prelude_end = self.cursor;
        self.cursor += 1;
        let declarations = self.parse_declarations();

        let prelude = &self.tokens[prelude_start..prelude_end];
        for selector in prelude.split(|l| l.token == Some(Token::Comma)) {
            match parse_compound(self.source, selector) {
                Some(simple) => {
                    let order = u32::try_from(rules.len()).unwrap_or(u32::MAX);
                    rules.push(Rule {
                        specificity: Specificity::from_selector(&simple, order),
                        selector: simple,
                        declarations: declarations.clone(),
                    });
                }
                None => log::debug!("skipping unsupported selector `{}`", self.text(selector)),
            }
        }
    }

    /// Declarations up to and including the closing `}`.
    fn parse_declarations(&mut self) -> Vec<(String, String)> {
        let mut declarations = Vec::new();
        loop {
            match self.peek() {
                None => return declarations,
                Some(Some(Token::BraceClose)) => {
                    self.cursor += 1;
                    return declarations;
                }
                Some(Some(Token::Semicolon)) => self.cursor += 1,
                Some(_) => {
                    if let Some(declaration) = self.parse_declaration() {
                        declarations.push(declaration);
                    }
                }
            }
        }
    }

    /// `property: value`. The value is the source text between the colon and
    /// the next top-level `;` or `}`.
    fn parse_declaration(&mut self) -> Option<(String, String)> {
        let is_property = self.peek() == Some(Some(Token::Ident))
            && self.peek_at(1) == Some(Some(Token::Colon));
        if !is_property {
            let start = self.cursor;
            self.skip_value();
            log::debug!(
                "skipping malformed declaration `{}`",
                self.text(&self.tokens[start..self.cursor])
            );
            return None;
        }

        let property = self.text(&self.tokens[self.cursor..=self.cursor]);
        self.cursor += 2;
        let start = self.cursor;
        self.skip_value();
        let value = self.text(&self.tokens[start..self.cursor]);
        if value.is_empty() {
            return None;
        }
        Some((property.to_owned(), value.to_owned()))
    }

    fn skip_value(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token {
                Some(Token::ParenOpen) => depth += 1,
                Some(Token::ParenClose) => depth = depth.saturating_sub(1),
                Some(Token::Semicolon | Token::BraceClose) if depth == 0 => return,
                _ => {}
            }
            self.cursor += 1;
        }
    }
}

/// A compound selector: optional type or `*`, then `.class` and `#id`
/// parts, all without whitespace between tokens. Anything else (a
/// combinator, a pseudo-class) yields `None`.
fn parse_compound(source: &str, lexemes: &[Lexeme]) -> Option<Vec<Simple>> {
    if lexemes.is_empty() {
        return None;
    }
    if lexemes.windows(2).any(|w| w[0].span.end != w[1].span.start) {
        return None;
    }

    let mut parts = Vec::new();
    let mut i = 0;
    while i < lexemes.len() {
        let text = &source[lexemes[i].span.clone()];
        match lexemes[i].token {
            Some(Token::Ident) if i == 0 => parts.push(Simple::Type(text.to_owned())),
            Some(Token::Star) if i == 0 => parts.push(Simple::Universal),
            Some(marker @ (Token::Dot | Token::Hash)) => {
                let name = lexemes
                    .get(i + 1)
                    .filter(|l| l.token == Some(Token::Ident))?;
                let name = source[name.span.clone()].to_owned();
                parts.push(if marker == Token::Dot {
                    Simple::Class(name)
                } else {
                    Simple::Id(name)
                });
                i += 1;
            }
            _ => return None,
        }
        i += 1;
    }
    Some(parts)
}
