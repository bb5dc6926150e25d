//! Parser for SCSS source text
//!
//! A recursive descent parser over the token stream. Declarations and rules
//! share a prefix, so the parser scans ahead to the first `;`, `{`, or `}`:
//! a `{` first means a rule, anything else is a declaration split at its
//! first `:`. This mirrors how CSS tooling disambiguates the two.

#[cfg(test)]
mod tests;

use crate::ast::{AtRule, Declaration, Node, Rule, Stylesheet};
use crate::common::Span;
use crate::diagnostics::SassmodError;
use crate::lexer::{self, Token, TokenKind};
use miette::NamedSource;

/// Parse source text into a stylesheet tree
pub fn parse(source: &str, name: &str) -> Result<Stylesheet, SassmodError> {
    let tokens = lexer::lex(source, name)?;
    let mut parser = Parser::new(&tokens, source, name);
    parser.parse_stylesheet()
}

/// Parser state
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
    name: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str, name: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            name,
        }
    }

    pub fn parse_stylesheet(&mut self) -> Result<Stylesheet, SassmodError> {
        let nodes = self.parse_nodes(false)?;
        Ok(Stylesheet { nodes })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let token = &self.tokens[self.pos];
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn error(&self, message: impl Into<String>, span: Span) -> SassmodError {
        SassmodError::Parse {
            message: message.into(),
            span: span.into(),
            src: NamedSource::new(self.name, self.source.to_string()),
        }
    }

    /// Raw source text covered by tokens `[start, end)`, with its span.
    /// An empty range yields an empty string anchored at `fallback`.
    fn slice(&self, start: usize, end: usize, fallback: usize) -> (String, Span) {
        if start >= end {
            return (String::new(), Span::new(fallback, fallback));
        }
        let span = Span::new(self.tokens[start].span.start, self.tokens[end - 1].span.end);
        (self.source[span.start..span.end].to_string(), span)
    }

    fn parse_nodes(&mut self, in_block: bool) -> Result<Vec<Node>, SassmodError> {
        let mut nodes = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof => {
                    if in_block {
                        return Err(self.error("unclosed block", self.peek().span));
                    }
                    break;
                }
                TokenKind::RBrace => {
                    if in_block {
                        self.bump();
                        break;
                    }
                    return Err(self.error("unmatched `}`", self.peek().span));
                }
                // Stray semicolons are allowed between statements
                TokenKind::Semicolon => {
                    self.bump();
                }
                TokenKind::AtKeyword => nodes.push(self.parse_at_rule()?),
                _ => nodes.push(self.parse_decl_or_rule()?),
            }
        }
        Ok(nodes)
    }

    fn parse_at_rule(&mut self) -> Result<Node, SassmodError> {
        let at_token = self.bump().clone();
        let name = at_token.text[1..].to_string();
        let name_span = Span::new(at_token.span.start + 1, at_token.span.end);

        let params_start = self.pos;
        while !matches!(
            self.peek().kind,
            TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.bump();
        }
        let (params, params_span) = self.slice(params_start, self.pos, at_token.span.end);

        let (nodes, end) = match self.peek().kind {
            TokenKind::LBrace => {
                self.bump();
                let children = self.parse_nodes(true)?;
                (Some(children), self.prev_span().end)
            }
            TokenKind::Semicolon => (None, self.bump().span.end),
            // `}` or EOF terminate the directive without consuming
            _ => (None, params_span.end.max(at_token.span.end)),
        };

        Ok(Node::AtRule(AtRule {
            name,
            name_span,
            params,
            params_span,
            nodes,
            span: Span::new(at_token.span.start, end),
        }))
    }

    fn parse_decl_or_rule(&mut self) -> Result<Node, SassmodError> {
        let start_idx = self.pos;

        // Scan ahead to whichever of `;` `{` `}` EOF comes first
        let mut boundary = self.pos;
        while !matches!(
            self.tokens[boundary].kind,
            TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof
        ) {
            boundary += 1;
        }

        if self.tokens[boundary].kind == TokenKind::LBrace {
            return self.parse_rule(start_idx, boundary);
        }
        self.parse_declaration(start_idx, boundary)
    }

    fn parse_rule(&mut self, start_idx: usize, lbrace_idx: usize) -> Result<Node, SassmodError> {
        let (selector, selector_span) =
            self.slice(start_idx, lbrace_idx, self.tokens[start_idx].span.start);
        self.pos = lbrace_idx;
        self.bump(); // `{`
        let nodes = self.parse_nodes(true)?;
        let end = self.prev_span().end;
        Ok(Node::Rule(Rule {
            selector,
            selector_span,
            nodes,
            span: Span::new(selector_span.start, end),
        }))
    }

    fn parse_declaration(
        &mut self,
        start_idx: usize,
        boundary: usize,
    ) -> Result<Node, SassmodError> {
        let colon_idx = (start_idx..boundary)
            .find(|&i| self.tokens[i].kind == TokenKind::Colon)
            .ok_or_else(|| {
                self.error("expected `:` in declaration", self.tokens[start_idx].span)
            })?;
        if colon_idx == start_idx {
            return Err(self.error("expected property before `:`", self.tokens[colon_idx].span));
        }

        let (prop, prop_span) = self.slice(start_idx, colon_idx, self.tokens[start_idx].span.start);
        let colon_end = self.tokens[colon_idx].span.end;
        let (value, value_span) = self.slice(colon_idx + 1, boundary, colon_end);

        self.pos = boundary;
        let end = if self.tokens[boundary].kind == TokenKind::Semicolon {
            self.bump().span.end
        } else {
            // `}` or EOF belong to the enclosing block
            value_span.end
        };

        Ok(Node::Decl(Declaration {
            prop,
            prop_span,
            value,
            value_span,
            span: Span::new(prop_span.start, end),
        }))
    }
}
