//! logos-based stylesheet tokenizer.
//!
//! Tokens keep their byte spans so the parser can slice declaration values
//! out of the source verbatim and tell `Label.title` (adjacent tokens) from
//! `Label .title` (descendant combinator). Characters no variant covers come
//! out as `None` tokens with a span; they are only valid inside values.

use std::ops::Range;

use logos::{Lexer, Logos, Skip};

/// Stylesheet token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub(crate) enum Token {
    /// `/* ... */`, consumed by the callback and never emitted.
    #[token("/*", block_comment)]
    Comment,

    /// Quoted string, double or single.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    /// Number with an optional unit: `20`, `-1.5`, `12px`, `50%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?[a-zA-Z%]*")]
    Number,

    /// Type names, class and id names, property names, keyword values.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("*")]
    Star,

    /// `>`, `+` or `~`.
    #[token(">")]
    #[token("+")]
    #[token("~")]
    Combinator,
}

/// Skip to the end of a block comment; an unterminated one runs to the end
/// of the input.
fn block_comment(lex: &mut Lexer<Token>) -> Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    Skip
}

/// A token and where it sits in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme {
    /// `None` for input no token matches.
    pub token: Option<Token>,
    pub span: Range<usize>,
}

/// Tokenize stylesheet text, keeping spans.
pub(crate) fn tokenize(input: &str) -> Vec<Lexeme> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| Lexeme {
            token: result.ok(),
            span,
        })
        .collect()
}
