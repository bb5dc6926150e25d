//! Fix application
//!
//! Turns machine-applicable suggestions into rewritten source text. Edits
//! are applied in span order over the original text; overlapping edits are
//! dropped rather than guessed at. The rewrites are closed over their own
//! output: fixed text re-lints clean, so a second pass changes nothing.

use crate::ast::Stylesheet;
use crate::diagnostics::SassmodError;
use crate::index::NamespaceIndex;
use crate::lint::{Applicability, Edit, LintConfig, LintDiagnostic, Linter};
use crate::parser;

/// Result of one fix pass over a file
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The rewritten source text
    pub output: String,
    /// Number of edits applied
    pub applied: usize,
}

/// Apply the machine-applicable fixes carried by `diagnostics` to `source`
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> FixOutcome {
    let mut edits: Vec<&Edit> = diagnostics
        .iter()
        .flat_map(|diag| diag.suggestions.iter())
        .filter(|s| s.applicability == Applicability::MachineApplicable)
        .flat_map(|s| s.edits.iter())
        .collect();
    edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut applied = 0;

    for edit in edits {
        // Overlapping or out-of-bounds edits are skipped, never merged
        if edit.span.start < cursor || edit.span.end > source.len() {
            tracing::debug!("skipping overlapping edit at {}", edit.span);
            continue;
        }
        output.push_str(&source[cursor..edit.span.start]);
        output.push_str(&edit.replacement);
        cursor = edit.span.end;
        applied += 1;
    }
    output.push_str(&source[cursor..]);

    FixOutcome { output, applied }
}

/// Parse, lint, and fix one file's source in a single pass
pub fn fix_source(
    source: &str,
    file: &str,
    index: &NamespaceIndex,
    config: &LintConfig,
) -> Result<FixOutcome, SassmodError> {
    let stylesheet = parser::parse(source, file)?;
    fix_stylesheet(&stylesheet, source, file, index, config)
}

/// Fix an already-parsed stylesheet
pub fn fix_stylesheet(
    stylesheet: &Stylesheet,
    source: &str,
    file: &str,
    index: &NamespaceIndex,
    config: &LintConfig,
) -> Result<FixOutcome, SassmodError> {
    let linter = Linter::with_config(config.clone());
    let diagnostics = linter.lint(stylesheet, file, source, index);
    Ok(apply_fixes(source, &diagnostics))
}
