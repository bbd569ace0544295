#![cfg(feature = "json")]

use jsonlax::{CommentPos, ParseFlags, Parser, Value};
use serde_json::json;

const STORING: ParseFlags = ParseFlags::TOLERANT.union(ParseFlags::STORE_COMMENTS);

#[test]
fn inline_comment_binds_to_same_line_value() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("{ \"k\": 1 /* c */ }", &mut root), 0);
    let node = root.get("k").unwrap();
    assert_eq!(node.comments().len(), 1);
    assert_eq!(node.comments()[0].text, "/* c */");
    assert_eq!(node.comments()[0].pos, CommentPos::Inline);
}

#[test]
fn line_comment_text_keeps_its_marker() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("{ \"k\": 1 // note\n}", &mut root), 0);
    let node = root.get("k").unwrap();
    assert_eq!(node.comments()[0].text, "// note");
    assert_eq!(node.comments()[0].pos, CommentPos::Inline);
}

#[test]
fn leading_comment_binds_before_root() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("// header\n{}", &mut root), 0);
    assert_eq!(root.comments().len(), 1);
    assert_eq!(root.comments()[0].text, "// header");
    assert_eq!(root.comments()[0].pos, CommentPos::Before);
}

#[test]
fn comment_before_a_member_binds_to_its_value() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    let doc = "{\n  // note\n  \"k\": 1\n}";
    assert_eq!(parser.parse_str(doc, &mut root), 0);
    let node = root.get("k").unwrap();
    assert_eq!(node.comments().len(), 1);
    assert_eq!(node.comments()[0].text, "// note");
    assert_eq!(node.comments()[0].pos, CommentPos::Before);
}

#[test]
fn comment_after_previous_value_with_after_flag() {
    let mut parser = Parser::new(STORING | ParseFlags::COMMENTS_AFTER);
    let mut root = Value::new();
    let doc = "{\n  \"k\": 1,\n  // trailing note\n  \"j\": 2\n}";
    assert_eq!(parser.parse_str(doc, &mut root), 0);
    let node = root.get("k").unwrap();
    assert_eq!(node.comments().len(), 1);
    assert_eq!(node.comments()[0].text, "// trailing note");
    assert_eq!(node.comments()[0].pos, CommentPos::After);
    assert!(root.get("j").unwrap().comments().is_empty());
}

#[test]
fn comment_on_closing_line_binds_inline_to_container() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("[ [1] /* c */, 2 ]", &mut root), 0);
    assert_eq!(root.to_json(), json!([[1], 2]));
    let inner = root.at(0).unwrap();
    assert_eq!(inner.comments().len(), 1);
    assert_eq!(inner.comments()[0].pos, CommentPos::Inline);
}

#[test]
fn before_mode_comment_with_no_upcoming_value_errors() {
    let mut parser = Parser::new(STORING);
    let mut root = Value::new();
    let errors = parser.parse_str("[ [1]\n // dangling\n, 2 ]", &mut root);
    assert_eq!(errors, 1);
    assert!(parser.errors()[0].contains("(flag BEFORE)"));
    assert_eq!(root.to_json(), json!([[1], 2]));
}

#[test]
fn pre_root_comment_in_after_mode_errors() {
    let mut parser = Parser::new(STORING | ParseFlags::COMMENTS_AFTER);
    let mut root = Value::new();
    let errors = parser.parse_str("// lead\n{}", &mut root);
    assert_eq!(errors, 1);
    assert!(parser.errors()[0].contains("(flag AFTER)"));
}

#[test]
fn comments_are_dropped_without_store_flag() {
    let mut parser = Parser::new(ParseFlags::TOLERANT);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("{ \"k\": 1 /* c */ }", &mut root), 0);
    assert_eq!(parser.warning_count(), 1);
    assert!(root.get("k").unwrap().comments().is_empty());
}

#[test]
fn strict_mode_upgrades_the_comment_warning() {
    let mut parser = Parser::new(ParseFlags::STORE_COMMENTS);
    let mut root = Value::new();
    let errors = parser.parse_str("{ \"k\": 1 /* c */ }", &mut root);
    assert_eq!(errors, 1);
    // the comment is still attached: storage is independent of tolerance
    assert_eq!(root.get("k").unwrap().comments().len(), 1);
}
