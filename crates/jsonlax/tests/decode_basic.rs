#![cfg(feature = "json")]

use jsonlax::{from_str, ParseFlags, Parser, Value};
use serde_json::json;

fn tolerant(text: &str) -> Value {
    from_str(text, ParseFlags::TOLERANT).expect("document should parse")
}

#[test]
fn object_with_nested_array() {
    let v = tolerant(r#"{"a":1,"b":[true,null]}"#);
    assert_eq!(v.to_json(), json!({"a": 1, "b": [true, null]}));
    assert!(v.get("a").unwrap().is_int());
}

#[test]
fn empty_containers() {
    let mut parser = Parser::new(ParseFlags::STRICT);

    let mut root = Value::new();
    assert_eq!(parser.parse_str("{}", &mut root), 0);
    assert!(root.is_object());
    assert_eq!(root.size(), 0);
    assert_eq!(parser.depth(), 1);

    let mut root = Value::new();
    assert_eq!(parser.parse_str("[]", &mut root), 0);
    assert!(root.is_array());
    assert_eq!(root.size(), 0);
    assert_eq!(parser.depth(), 1);
}

#[test]
fn prologue_and_epilogue_ignored() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("xx\n{}\nyy", &mut root), 0);
    assert_eq!(parser.warning_count(), 0);
    assert!(root.is_object());
    assert_eq!(root.size(), 0);
}

#[test]
fn invalid_root_without_start_character() {
    let mut parser = Parser::new(ParseFlags::TOLERANT);
    let mut root = Value::new();
    let errors = parser.parse_str("   \n  // only a comment\n", &mut root);
    assert_eq!(errors, 1);
    assert!(!root.is_valid());
    assert!(parser.errors()[0].contains("Cannot find a start object/array character"));
}

#[test]
fn trailing_comma_tolerated_silently() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    assert_eq!(parser.parse_str("[1, 2, 3,]", &mut root), 0);
    assert_eq!(parser.warning_count(), 0);
    assert_eq!(root.to_json(), json!([1, 2, 3]));
}

#[test]
fn plain_ascii_string_preserved() {
    let v = tolerant(r#"["hello, world: [fine] {ok}"]"#);
    assert_eq!(v.at(0).and_then(Value::as_str), Some("hello, world: [fine] {ok}"));
}

#[test]
fn escape_sequences_decode() {
    let v = tolerant(r#"["\u0041", "\n\t\b\r\f\/\"\\"]"#);
    assert_eq!(v.at(0).and_then(Value::as_str), Some("A"));
    assert_eq!(
        v.at(1).and_then(Value::as_str),
        Some("\n\t\u{8}\r\u{c}/\"\\")
    );
}

#[test]
fn number_ladder() {
    let v = tolerant("[42, +42, -42, 18446744073709551615, 18446744073709551616, 3.14]");
    assert!(v.at(0).unwrap().is_int());
    assert_eq!(v.at(0).and_then(Value::as_i64), Some(42));
    assert!(v.at(1).unwrap().is_uint());
    assert_eq!(v.at(1).and_then(Value::as_u64), Some(42));
    assert_eq!(v.at(2).and_then(Value::as_i64), Some(-42));
    assert_eq!(v.at(3).and_then(Value::as_u64), Some(u64::MAX));
    assert!(v.at(4).unwrap().is_double());
    assert_eq!(v.at(4).and_then(Value::as_f64), Some(18446744073709551616.0));
    assert_eq!(v.at(5).and_then(Value::as_f64), Some(3.14));
}

#[test]
fn huge_exponent_overflows_to_infinity() {
    let v = tolerant(r#"{"n": 1e400}"#);
    assert_eq!(v.get("n").and_then(Value::as_f64), Some(f64::INFINITY));
}

#[test]
fn lone_surrogate_fails_utf8_validation() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    let errors = parser.parse_str(r#"["\uD83D"]"#, &mut root);
    assert_eq!(errors, 1);
    assert!(parser.errors()[0].contains("the UTF-8 stream is invalid"));
    assert_eq!(
        root.at(0).and_then(Value::as_str),
        Some("<UTF-8 stream not valid>")
    );
}

#[test]
fn bmp_escapes_encode_to_utf8() {
    let v = tolerant(r#"["\u00E9\u4e2d"]"#);
    assert_eq!(v.at(0).and_then(Value::as_str), Some("é中"));
}

#[test]
fn parse_into_existing_array_appends() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    parser.parse_str("[1]", &mut root);
    parser.parse_str("[2]", &mut root);
    assert_eq!(root.to_json(), json!([1, 2]));
}

#[test]
fn parse_into_existing_value_of_other_kind_replaces() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    parser.parse_str("[1]", &mut root);
    parser.parse_str(r#"{"a": 2}"#, &mut root);
    assert_eq!(root.to_json(), json!({"a": 2}));
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let v = tolerant(r#"{"a": 1, "a": 2}"#);
    assert_eq!(v.size(), 1);
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(2));
}

#[test]
fn syntax_check_mode_reports_without_storing() {
    let mut parser = Parser::new(ParseFlags::STRICT);
    assert_eq!(parser.check(&b"{\"a\": 1}"[..]), 0);
    assert_eq!(parser.check(&b"{\"a\" }"[..]), 1);
}

#[test]
fn from_str_reports_first_error_with_position() {
    let err = from_str("{ \"a\" }", ParseFlags::STRICT).unwrap_err();
    match err {
        jsonlax::Error::Syntax { line, message, .. } => {
            assert_eq!(line, 1);
            assert!(message.contains("'key' is missing"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}
