//! Stylesheet syntax tree
//!
//! A deliberately small model: rules, at-rules, and declarations, each
//! carrying byte spans for the pieces a fix may rewrite. Walks hand the
//! visitor a `ParentKind` tag so rules match on node position explicitly
//! instead of sniffing string prefixes.

use crate::common::Span;

/// A parsed stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// One node of the stylesheet tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Decl(Declaration),
}

/// A selector with a nested block, `a:hover { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub selector_span: Span,
    pub nodes: Vec<Node>,
    pub span: Span,
}

/// An at-rule directive, `@import "colors";` or `@media (...) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Directive name without the `@`
    pub name: String,
    /// Span of the name, excluding the `@`
    pub name_span: Span,
    pub params: String,
    pub params_span: Span,
    /// Nested block, if the directive has one
    pub nodes: Option<Vec<Node>>,
    pub span: Span,
}

/// A `property: value` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub prop: String,
    pub prop_span: Span,
    pub value: String,
    pub value_span: Span,
    pub span: Span,
}

impl Declaration {
    /// Replace the value in place. `value_span` keeps the old extent, so a
    /// caller holding the tree can splice the new value back over the
    /// original source text.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl AtRule {
    /// Rename the directive in place; `name_span` keeps the old extent
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Where a visited node sits in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    /// Directly at the stylesheet top level
    Root,
    /// Nested inside a rule block
    Rule,
    /// Nested inside an at-rule body
    AtRule,
}

impl ParentKind {
    pub fn is_root(self) -> bool {
        matches!(self, ParentKind::Root)
    }
}

impl Stylesheet {
    /// Visit every declaration, depth-first, in source order
    pub fn walk_decls<F>(&self, f: &mut F)
    where
        F: FnMut(&Declaration, ParentKind),
    {
        walk_decls_in(&self.nodes, ParentKind::Root, f);
    }

    /// Visit every at-rule, depth-first, in source order
    pub fn walk_at_rules<F>(&self, f: &mut F)
    where
        F: FnMut(&AtRule, ParentKind),
    {
        walk_at_rules_in(&self.nodes, ParentKind::Root, f);
    }
}

fn walk_decls_in<F>(nodes: &[Node], parent: ParentKind, f: &mut F)
where
    F: FnMut(&Declaration, ParentKind),
{
    for node in nodes {
        match node {
            Node::Decl(decl) => f(decl, parent),
            Node::Rule(rule) => walk_decls_in(&rule.nodes, ParentKind::Rule, f),
            Node::AtRule(at_rule) => {
                if let Some(children) = &at_rule.nodes {
                    walk_decls_in(children, ParentKind::AtRule, f);
                }
            }
        }
    }
}

fn walk_at_rules_in<F>(nodes: &[Node], parent: ParentKind, f: &mut F)
where
    F: FnMut(&AtRule, ParentKind),
{
    for node in nodes {
        match node {
            Node::AtRule(at_rule) => {
                f(at_rule, parent);
                if let Some(children) = &at_rule.nodes {
                    walk_at_rules_in(children, ParentKind::AtRule, f);
                }
            }
            Node::Rule(rule) => walk_at_rules_in(&rule.nodes, ParentKind::Rule, f),
            Node::Decl(_) => {}
        }
    }
}
