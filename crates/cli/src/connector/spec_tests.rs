// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::panic)]
use super::*;
use yare::parameterized;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn burst() -> CommandSpec {
    CommandSpec::new("burst")
        .describe("Queue received messages")
        .param("count", ParamKind::Int)
        .param("text", ParamKind::Str)
}

#[test]
fn signature_lists_params() {
    assert_eq!(burst().signature(), "count: int, text: str");

    let details = CommandSpec::new("details").optional("n", ParamKind::Int, Some("1"));
    assert_eq!(details.signature(), "n: int=1");
    assert_eq!(CommandSpec::new("reset").signature(), "");
}

#[test]
fn usage_marks_optional_params() {
    assert_eq!(burst().usage(), "burst <count: int> <text: str>");

    let save = CommandSpec::new("save").optional("path", ParamKind::Str, None);
    assert_eq!(save.usage(), "save [path: str]");
}

#[test]
fn bind_converts_types() {
    let args = burst().bind(&words(&["3", "hello world"])).unwrap();

    assert_eq!(args.int("count").unwrap(), 3);
    assert_eq!(args.str("text").unwrap(), "hello world");
    assert_eq!(args.len(), 2);
}

#[test]
fn bind_reports_missing_argument() {
    let err = burst().bind(&words(&["3"])).unwrap_err();
    assert_eq!(
        err,
        UsageError::Missing {
            command: "burst".to_string(),
            param: "text".to_string()
        }
    );
}

#[test]
fn bind_reports_extra_arguments() {
    let err = burst().bind(&words(&["1", "a", "b"])).unwrap_err();
    assert!(matches!(err, UsageError::TooMany { expected: 2, got: 3, .. }));
}

#[test]
fn bind_reports_invalid_value() {
    let err = burst().bind(&words(&["many", "a"])).unwrap_err();
    assert_eq!(err.to_string(), "invalid value 'many' for count: expected int");
}

#[test]
fn bind_applies_default() {
    let spec = CommandSpec::new("details").optional("n", ParamKind::Int, Some("1"));

    assert_eq!(spec.bind(&[]).unwrap().int("n").unwrap(), 1);
    assert_eq!(spec.bind(&words(&["4"])).unwrap().int("n").unwrap(), 4);
}

#[test]
fn bind_omits_optional_without_default() {
    let spec = CommandSpec::new("save").optional("path", ParamKind::Str, None);

    let args = spec.bind(&[]).unwrap();
    assert!(args.is_empty());
    assert_eq!(args.opt_str("path"), None);
    assert!(matches!(args.str("path"), Err(UsageError::Undeclared(_))));
}

#[test]
fn getters_reject_wrong_type() {
    let args = burst().bind(&words(&["2", "x"])).unwrap();
    assert!(args.bool("count").is_err());
    assert!(args.int("text").is_err());
    assert_eq!(args.get("count"), Some(&Value::Int(2)));
}

#[parameterized(
    true_word = { "true", Some(true) },
    yes = { "YES", Some(true) },
    one = { "1", Some(true) },
    off = { "off", Some(false) },
    zero = { "0", Some(false) },
    garbage = { "maybe", None },
)]
fn bool_words(raw: &str, expected: Option<bool>) {
    let result = ParamKind::Bool.parse("flag", raw).ok();
    assert_eq!(result, expected.map(Value::Bool));
}

#[parameterized(
    int = { ParamKind::Int, "-12", Value::Int(-12) },
    float = { ParamKind::Float, "2.5", Value::Float(2.5) },
    text = { ParamKind::Str, "42", Value::Str("42".to_string()) },
)]
fn kinds_parse(kind: ParamKind, raw: &str, expected: Value) {
    assert_eq!(kind.parse("p", raw).unwrap(), expected);
}
