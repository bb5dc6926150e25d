//! Lexer for SCSS source text
//!
//! Tokenizes stylesheet text into a stream of tokens using the Logos library.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::SassmodError;
use logos::Logos;
use miette::NamedSource;

/// Lex source text into tokens
pub fn lex(source: &str, name: &str) -> Result<Vec<Token>, SassmodError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => {
                return Err(SassmodError::Lex {
                    pos: span.start,
                    span: Span::new(span.start, span.end).into(),
                    src: NamedSource::new(name, source.to_string()),
                });
            }
        };

        tokens.push(Token {
            kind,
            span: Span::new(span.start, span.end),
            text: source[span].to_string(),
        });
    }

    // Add EOF token
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(source.len(), source.len()),
        text: String::new(),
    });

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, "test.scss")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_declaration() {
        let tokens = lex("color: $primary;", "test.scss").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "color");
        assert_eq!(tokens[1].kind, TokenKind::Colon);
        assert_eq!(tokens[2].kind, TokenKind::Variable);
        assert_eq!(tokens[2].text, "$primary");
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_lex_at_rule() {
        let tokens = lex("@import \"colors\";", "test.scss").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::AtKeyword);
        assert_eq!(tokens[0].text, "@import");
        assert_eq!(tokens[1].kind, TokenKind::Str);
        assert_eq!(tokens[1].text, "\"colors\"");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_lex_qualified_variable() {
        // "colors." lexes as a word, the variable follows
        let tokens = lex("colors.$primary", "test.scss").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "colors.");
        assert_eq!(tokens[1].kind, TokenKind::Variable);
        assert_eq!(tokens[1].text, "$primary");
    }

    #[test]
    fn test_lex_skips_comments() {
        assert_eq!(
            kinds("// line\ncolor: red; /* block */"),
            vec![
                TokenKind::Word,
                TokenKind::Colon,
                TokenKind::Word,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_selector_punctuation() {
        assert_eq!(
            kinds(".btn:hover, #main > a { }"),
            vec![
                TokenKind::Word,
                TokenKind::Colon,
                TokenKind::Word,
                TokenKind::Comma,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_shorthand_slash() {
        assert_eq!(
            kinds("font: 12px/1.5 sans-serif;"),
            vec![
                TokenKind::Word,
                TokenKind::Colon,
                TokenKind::Word,
                TokenKind::Slash,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_interpolation_is_atomic() {
        let tokens = lex("width: #{$w}px;", "test.scss").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Interpolation);
        assert_eq!(tokens[2].text, "#{$w}");
    }

    #[test]
    fn test_lex_spans_are_byte_offsets() {
        let source = "margin: $gap;";
        let tokens = lex(source, "test.scss").unwrap();
        let var = &tokens[2];
        assert_eq!(&source[var.span.start..var.span.end], "$gap");
    }
}
