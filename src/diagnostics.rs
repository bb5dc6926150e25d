//! Error types and reporting helpers
//!
//! Rich error messages with source locations using miette.

use crate::common::Span;
use crate::lint::config::ConfigError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Linter error
#[derive(Error, Debug, Diagnostic)]
pub enum SassmodError {
    #[error("Unexpected character at position {pos}")]
    #[diagnostic(code(lex::unexpected_char))]
    Lex {
        pos: usize,
        #[label("unrecognized token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Syntax error: {message}")]
    #[diagnostic(code(parse::syntax_error))]
    Parse {
        message: String,
        #[label("{message}")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Invalid configuration: {source}")]
    #[diagnostic(
        code(config::invalid),
        help("recognized options: `ignore = [\"local\", \"global\"]` and `[levels]`")
    )]
    Config {
        #[from]
        source: ConfigError,
    },
}

/// Compute the 1-based line and column of a byte offset
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for ch in source[..offset].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
