//! Token definitions for the SCSS lexer

use crate::common::Span;
use logos::Logos;

/// A token with its kind, span, and text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Token kinds recognized by the lexer
///
/// Anything that is not punctuation, an at-keyword, a variable, or a string
/// lexes as a `Word`. Selectors and declaration values are reassembled from
/// the raw source between token spans, so words do not need to model CSS
/// value grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
// SCSS line comments
#[logos(skip r"//[^\n]*")]
// Block comments
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum TokenKind {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("/")]
    Slash,

    /// `@import`, `@use`, `@media`, ...
    #[regex(r"@[a-zA-Z-][a-zA-Z0-9-]*")]
    AtKeyword,

    /// `$primary`, `$gap-large`, ...
    #[regex(r"\$[a-zA-Z0-9_-]+")]
    Variable,

    /// Single- or double-quoted string literal
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Str,

    /// `#{...}` interpolation, kept atomic so the brace does not open a block
    #[regex(r"#\{[^}\n]*\}")]
    Interpolation,

    /// Any other run of value/selector characters
    #[regex(r#"[^ \t\r\n\f{}:;,@$'"/]+"#)]
    Word,

    /// End of input (appended by `lex`, never produced by logos)
    Eof,
}
