//! Lint framework for SCSS module migration
//!
//! Provides the rule trait, diagnostics with machine-applicable fix
//! suggestions, the per-file lint context, and the engine that walks a
//! stylesheet tree against the project's variable index.

pub mod config;
pub mod rules;

pub use config::{IgnoreScope, LintConfig};

use std::collections::{HashMap, HashSet};

use crate::ast::{AtRule, Declaration, ParentKind, Stylesheet};
use crate::common::Span;
use crate::index::NamespaceIndex;

/// Lint level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LintLevel {
    /// Lint is disabled
    Allow,

    /// Lint produces a warning
    #[default]
    Warn,

    /// Lint produces an error
    Deny,
}

impl std::fmt::Display for LintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintLevel::Allow => write!(f, "allow"),
            LintLevel::Warn => write!(f, "warn"),
            LintLevel::Deny => write!(f, "deny"),
        }
    }
}

/// A lint rule
///
/// Rules see exactly two node kinds: declarations and at-rules. The parent
/// tag tells a rule whether the node sits at the file's top level.
pub trait Lint {
    /// Unique identifier for this lint
    fn id(&self) -> &'static str;

    /// Description
    fn description(&self) -> &'static str;

    /// Default level
    fn default_level(&self) -> LintLevel;

    /// Check a declaration
    fn check_decl(&self, _decl: &Declaration, _parent: ParentKind, _ctx: &mut LintContext) {}

    /// Check an at-rule
    fn check_at_rule(&self, _at_rule: &AtRule, _parent: ParentKind, _ctx: &mut LintContext) {}
}

/// Lint diagnostic
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Lint ID
    pub lint_id: String,

    /// Level
    pub level: LintLevel,

    /// Message
    pub message: String,

    /// Primary span
    pub span: Span,

    /// Suggested fixes
    pub suggestions: Vec<Suggestion>,
}

/// A suggested fix
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Description
    pub message: String,

    /// Edits to apply
    pub edits: Vec<Edit>,

    /// Applicability
    pub applicability: Applicability,
}

/// Edit applicability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Can be applied automatically
    MachineApplicable,

    /// May change semantics, never auto-applied
    MaybeIncorrect,
}

/// A text edit
#[derive(Debug, Clone)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

/// Context for one file's lint pass
///
/// Holds a shared reference to the session's read-only variable index;
/// everything else is per-file and discarded after the pass.
pub struct LintContext<'a> {
    /// Current file path
    pub file: &'a str,

    /// Source text
    pub source: &'a str,

    /// Project-wide variable index, built once per session
    pub index: &'a NamespaceIndex,

    /// Diagnostics collected
    pub diagnostics: Vec<LintDiagnostic>,

    /// Level overrides by lint ID
    levels: HashMap<String, LintLevel>,

    /// Scopes suppressed by the `ignore` option
    ignore: Vec<IgnoreScope>,

    /// Namespaces brought in by this file's `@import`/`@use` directives.
    /// Tracked for future enforcement; the qualification check does not
    /// consult it.
    namespaces: HashSet<String>,
}

impl<'a> LintContext<'a> {
    /// Create a new context
    pub fn new(file: &'a str, source: &'a str, index: &'a NamespaceIndex) -> Self {
        LintContext {
            file,
            source,
            index,
            diagnostics: Vec::new(),
            levels: HashMap::new(),
            ignore: Vec::new(),
            namespaces: HashSet::new(),
        }
    }

    /// Record a namespace made visible by an `@import`/`@use` directive
    pub fn add_namespace(&mut self, namespace: impl Into<String>) {
        self.namespaces.insert(namespace.into());
    }

    /// Whether this file has imported or used `namespace`
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    fn level_for(&self, lint: &dyn Lint) -> LintLevel {
        self.levels
            .get(lint.id())
            .copied()
            .unwrap_or_else(|| lint.default_level())
    }

    fn is_suppressed(&self, parent: ParentKind) -> bool {
        if parent.is_root() {
            self.ignore.contains(&IgnoreScope::Global)
        } else {
            self.ignore.contains(&IgnoreScope::Local)
        }
    }

    /// Report a lint diagnostic
    pub fn report(
        &mut self,
        lint: &dyn Lint,
        parent: ParentKind,
        message: impl Into<String>,
        span: Span,
    ) {
        self.report_with_suggestions(lint, parent, message, span, Vec::new());
    }

    /// Report a lint diagnostic carrying fix suggestions
    pub fn report_with_suggestions(
        &mut self,
        lint: &dyn Lint,
        parent: ParentKind,
        message: impl Into<String>,
        span: Span,
        suggestions: Vec<Suggestion>,
    ) {
        let level = self.level_for(lint);
        if level == LintLevel::Allow || self.is_suppressed(parent) {
            return;
        }

        self.diagnostics.push(LintDiagnostic {
            lint_id: lint.id().to_string(),
            level,
            message: message.into(),
            span,
            suggestions,
        });
    }
}

/// Linter engine
pub struct Linter {
    /// Registered lints
    lints: Vec<Box<dyn Lint>>,

    /// Lint configuration
    config: LintConfig,
}

impl Linter {
    /// Create a new linter with the built-in rules
    pub fn new() -> Self {
        Self::with_config(LintConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: LintConfig) -> Self {
        let mut linter = Linter {
            lints: Vec::new(),
            config,
        };
        linter.register(Box::new(rules::UseModuleNamespace));
        linter
    }

    /// Register a lint rule
    pub fn register(&mut self, lint: Box<dyn Lint>) {
        self.lints.push(lint);
    }

    /// Get all registered lints
    pub fn lints(&self) -> &[Box<dyn Lint>] {
        &self.lints
    }

    /// Get lint by ID
    pub fn get_lint(&self, id: &str) -> Option<&dyn Lint> {
        self.lints.iter().find(|l| l.id() == id).map(|l| l.as_ref())
    }

    /// Run all rules over one file's tree
    ///
    /// At-rules are walked before declarations so a file's namespace set is
    /// complete by the time declarations are classified. No state survives
    /// the call; every file pass is independent apart from the shared
    /// read-only index.
    pub fn lint(
        &self,
        stylesheet: &Stylesheet,
        file: &str,
        source: &str,
        index: &NamespaceIndex,
    ) -> Vec<LintDiagnostic> {
        let mut ctx = LintContext::new(file, source, index);
        ctx.levels = self.config.levels.clone();
        ctx.ignore = self.config.ignore.clone();

        stylesheet.walk_at_rules(&mut |at_rule, parent| {
            for lint in &self.lints {
                lint.check_at_rule(at_rule, parent, &mut ctx);
            }
        });

        stylesheet.walk_decls(&mut |decl, parent| {
            for lint in &self.lints {
                lint.check_decl(decl, parent, &mut ctx);
            }
        });

        ctx.diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linter_registers_builtin_rule() {
        let linter = Linter::new();
        assert!(!linter.lints().is_empty());
        assert!(linter.get_lint(rules::RULE_ID).is_some());
    }

    #[test]
    fn test_context_tracks_namespaces() {
        let index = NamespaceIndex::default();
        let mut ctx = LintContext::new("test.scss", "", &index);
        assert!(!ctx.has_namespace("colors"));
        ctx.add_namespace("colors");
        assert!(ctx.has_namespace("colors"));
    }

    #[test]
    fn test_allow_level_suppresses_report() {
        let index = NamespaceIndex::default();
        let mut ctx = LintContext::new("test.scss", "", &index);
        ctx.levels
            .insert(rules::RULE_ID.to_string(), LintLevel::Allow);
        ctx.report(
            &rules::UseModuleNamespace,
            ParentKind::Root,
            "suppressed",
            Span::dummy(),
        );
        assert!(ctx.diagnostics.is_empty());
    }
}
