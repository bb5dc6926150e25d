//! Parser tests

use super::parse;
use crate::ast::{Node, ParentKind};

fn parse_ok(source: &str) -> crate::ast::Stylesheet {
    parse(source, "test.scss").expect("parse failed")
}

#[test]
fn test_top_level_declaration() {
    let sheet = parse_ok("color: red;");
    assert_eq!(sheet.nodes.len(), 1);
    match &sheet.nodes[0] {
        Node::Decl(decl) => {
            assert_eq!(decl.prop, "color");
            assert_eq!(decl.value, "red");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_variable_definition() {
    let sheet = parse_ok("$primary: #f00;");
    match &sheet.nodes[0] {
        Node::Decl(decl) => {
            assert_eq!(decl.prop, "$primary");
            assert_eq!(decl.value, "#f00");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_value_span_matches_source() {
    let source = "margin: $gap;";
    let sheet = parse_ok(source);
    match &sheet.nodes[0] {
        Node::Decl(decl) => {
            assert_eq!(&source[decl.value_span.start..decl.value_span.end], "$gap");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_rule_with_nested_declarations() {
    let sheet = parse_ok(".btn:hover {\n  color: $primary;\n  margin: 0 auto;\n}");
    match &sheet.nodes[0] {
        Node::Rule(rule) => {
            assert_eq!(rule.selector, ".btn:hover");
            assert_eq!(rule.nodes.len(), 2);
        }
        other => panic!("expected rule, got {:?}", other),
    }
}

#[test]
fn test_declaration_without_trailing_semicolon() {
    let sheet = parse_ok("a { color: red }");
    match &sheet.nodes[0] {
        Node::Rule(rule) => {
            assert_eq!(rule.nodes.len(), 1);
            match &rule.nodes[0] {
                Node::Decl(decl) => assert_eq!(decl.value, "red"),
                other => panic!("expected declaration, got {:?}", other),
            }
        }
        other => panic!("expected rule, got {:?}", other),
    }
}

#[test]
fn test_import_at_rule() {
    let source = "@import \"colors\";";
    let sheet = parse_ok(source);
    match &sheet.nodes[0] {
        Node::AtRule(at_rule) => {
            assert_eq!(at_rule.name, "import");
            assert_eq!(at_rule.params, "\"colors\"");
            assert!(at_rule.nodes.is_none());
            // name span excludes the `@`, so a fix can swap just the name
            assert_eq!(
                &source[at_rule.name_span.start..at_rule.name_span.end],
                "import"
            );
        }
        other => panic!("expected at-rule, got {:?}", other),
    }
}

#[test]
fn test_media_block_nests() {
    let sheet = parse_ok("@media (min-width: 600px) { a { color: red; } margin: 0; }");
    match &sheet.nodes[0] {
        Node::AtRule(at_rule) => {
            assert_eq!(at_rule.name, "media");
            assert_eq!(at_rule.params, "(min-width: 600px)");
            assert_eq!(at_rule.nodes.as_ref().unwrap().len(), 2);
        }
        other => panic!("expected at-rule, got {:?}", other),
    }
}

#[test]
fn test_walk_decls_reports_parent() {
    let sheet = parse_ok("$x: 1;\na { color: $x; @media screen { margin: 0; } }");
    let mut seen = Vec::new();
    sheet.walk_decls(&mut |decl, parent| seen.push((decl.prop.clone(), parent)));
    assert_eq!(
        seen,
        vec![
            ("$x".to_string(), ParentKind::Root),
            ("color".to_string(), ParentKind::Rule),
            ("margin".to_string(), ParentKind::AtRule),
        ]
    );
}

#[test]
fn test_walk_at_rules_reports_parent() {
    let sheet = parse_ok("@use \"a\";\ndiv { @import \"b\"; }");
    let mut seen = Vec::new();
    sheet.walk_at_rules(&mut |at_rule, parent| seen.push((at_rule.name.clone(), parent)));
    assert_eq!(
        seen,
        vec![
            ("use".to_string(), ParentKind::Root),
            ("import".to_string(), ParentKind::Rule),
        ]
    );
}

#[test]
fn test_stray_semicolons_ignored() {
    let sheet = parse_ok(";;color: red;;");
    assert_eq!(sheet.nodes.len(), 1);
}

#[test]
fn test_unclosed_block_is_error() {
    assert!(parse("a { color: red;", "test.scss").is_err());
}

#[test]
fn test_unmatched_close_is_error() {
    assert!(parse("}", "test.scss").is_err());
}

#[test]
fn test_selectorless_block_content_is_error() {
    assert!(parse("color red;", "test.scss").is_err());
}
