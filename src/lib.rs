//! sassmod — SCSS module-namespace migration linter
//!
//! Enforces the module-system convention on codebases migrating away from
//! global `@import` inclusion:
//! - variable references are qualified with the namespace of the file that
//!   defines them (`$primary` → `colors.$primary`);
//! - legacy `@import "x"` directives become `@use "x"`.
//!
//! # Architecture
//!
//! ```text
//! project tree → scan → NamespaceIndex (once per session)
//! file → lex → parse → Stylesheet → Linter → diagnostics | fixes
//! ```
//!
//! The index is built eagerly from one recursive scan of the project root
//! and is read-only for the rest of the session; every per-file lint pass
//! borrows it and is otherwise independent.
//!
//! # Example
//!
//! ```
//! use sassmod::{lint_source, NamespaceIndex};
//! use sassmod::lint::LintConfig;
//!
//! let index = NamespaceIndex::from_entries([("primary", "colors")]);
//! let diagnostics = lint_source(
//!     "a { color: $primary; }",
//!     "page.scss",
//!     &index,
//!     &LintConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod fix;
pub mod index;
pub mod lexer;
pub mod lint;
pub mod parser;

pub use ast::{AtRule, Declaration, Node, ParentKind, Rule, Stylesheet};
pub use diagnostics::SassmodError;
pub use fix::{fix_source, FixOutcome};
pub use index::{IndexError, NamespaceIndex};
pub use lint::{LintConfig, LintDiagnostic, Linter};

/// Linter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and lint one file's source against a prebuilt index
pub fn lint_source(
    source: &str,
    file: &str,
    index: &NamespaceIndex,
    config: &LintConfig,
) -> Result<Vec<LintDiagnostic>, SassmodError> {
    let stylesheet = parser::parse(source, file)?;
    let linter = Linter::with_config(config.clone());
    Ok(linter.lint(&stylesheet, file, source, index))
}
