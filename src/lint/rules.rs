//! Built-in lint rules

use super::{Applicability, Edit, Lint, LintContext, LintLevel, Suggestion};
use crate::ast::{AtRule, Declaration, ParentKind};

/// Stable identifier of the module-namespace rule
pub const RULE_ID: &str = "use_module_namespace";

/// The module-namespace migration rule
///
/// Classifies two node kinds:
/// - at-rules: a legacy `@import "x"` should be the module directive
///   `@use "x"`, parameters untouched;
/// - declarations: a bare variable value `$name` whose defining file is
///   known should be qualified as `namespace.$name`.
///
/// Already-qualified references and directives already named `use` never
/// match, so the fixes are closed over their own output.
pub struct UseModuleNamespace;

impl Lint for UseModuleNamespace {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Requires namespace-qualified variable references and `@use` module directives"
    }

    fn default_level(&self) -> LintLevel {
        LintLevel::Warn
    }

    fn check_at_rule(&self, at_rule: &AtRule, parent: ParentKind, ctx: &mut LintContext) {
        if at_rule.name != "import" && at_rule.name != "use" {
            return;
        }

        if let Some(namespace) = namespace_of_param(&at_rule.params) {
            ctx.add_namespace(namespace);
        }

        if at_rule.name == "import" {
            let suggestion = Suggestion {
                message: "replace `@import` with `@use`".to_string(),
                edits: vec![Edit {
                    span: at_rule.name_span,
                    replacement: "use".to_string(),
                }],
                applicability: Applicability::MachineApplicable,
            };
            ctx.report_with_suggestions(
                self,
                parent,
                format!(
                    "expected `@import {}` to be `@use {}`",
                    at_rule.params, at_rule.params
                ),
                at_rule.span,
                vec![suggestion],
            );
        }
    }

    fn check_decl(&self, decl: &Declaration, parent: ParentKind, ctx: &mut LintContext) {
        let name = match bare_variable(&decl.value) {
            Some(name) => name,
            None => return,
        };
        // Names absent from the index are not an issue
        let namespace = match ctx.index.namespace_of_var(name) {
            Some(namespace) => namespace,
            None => return,
        };

        let qualified = format!("{}.{}", namespace, decl.value);
        let suggestion = Suggestion {
            message: format!("qualify as `{}`", qualified),
            edits: vec![Edit {
                span: decl.value_span,
                replacement: qualified.clone(),
            }],
            applicability: Applicability::MachineApplicable,
        };
        ctx.report_with_suggestions(
            self,
            parent,
            format!(
                "expected `{}: {}` to be `{}: {}`",
                decl.prop, decl.value, decl.prop, qualified
            ),
            decl.span,
            vec![suggestion],
        );
    }
}

/// The bare variable name of a value that is exactly `$name`, where `name`
/// is one or more ASCII alphanumerics. Qualified forms (`ns.$name`) and
/// compound values never match.
fn bare_variable(value: &str) -> Option<&str> {
    let name = value.strip_prefix('$')?;
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(name)
    } else {
        None
    }
}

/// Namespace named by a quoted at-rule parameter: strip the quotes, take
/// the base name after the last `/`, drop a partial `_` prefix, and cut at
/// the first `.`. Unquoted parameters are not module paths.
fn namespace_of_param(params: &str) -> Option<String> {
    let trimmed = params.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })?;
    let base = inner.rsplit('/').next().unwrap_or(inner);
    let base = base.strip_prefix('_').unwrap_or(base);
    let namespace = base.split('.').next().unwrap_or("");
    if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    }
}
