//! Parse error reporting: messages and positions.

mod common;
use common::*;

#[test]
fn select_from_reports_the_unexpected_token() {
    let err = parse_err("SELECT FROM");
    assert!(
        err.message.contains("FROM"),
        "message should name the token: {}",
        err.message
    );
    assert_eq!(err.line, 1);
    assert_eq!(err.col, 8);
    assert_eq!(err.pos, 7);
}

#[test]
fn error_display_format() {
    let err = parse_err("SELECT FROM");
    let text = err.to_string();
    assert!(
        text.starts_with("parse error at line 1 col 8: "),
        "unexpected format: {text}"
    );
}

#[test]
fn error_position_tracks_lines() {
    let err = parse_err("SELECT a,\n FROM t");
    assert_eq!(err.line, 2);
    assert_eq!(err.col, 2);
}

#[test]
fn unexpected_statement_start() {
    let err = parse_err("FROBNICATE the database");
    assert!(err.message.contains("FROBNICATE"));

    let err = parse_err("123");
    assert!(err.message.contains("start of statement"));
}

#[test]
fn unbalanced_parenthesis() {
    let err = parse_err("SELECT (1 + 2");
    assert!(err.message.contains("expected )"), "{}", err.message);
}

#[test]
fn case_requires_then() {
    let err = parse_err("SELECT CASE WHEN 1 END");
    assert!(err.message.contains("THEN"), "{}", err.message);
}

#[test]
fn with_requires_dml_follower() {
    let err = parse_err("WITH t AS (SELECT 1) DROP TABLE x");
    assert!(
        err.message.contains("WITH must be followed by"),
        "{}",
        err.message
    );
}

#[test]
fn on_conflict_requires_do() {
    let err = parse_err("INSERT INTO t (a) VALUES (1) ON CONFLICT (a) UPDATE SET a = 2");
    assert!(err.message.contains("expected DO"), "{}", err.message);
}

#[test]
fn illegal_byte_is_rejected_with_position() {
    let err = parse_err("SELECT \u{00A7}");
    assert_eq!(err.line, 1);
    assert_eq!(err.col, 8);
}

#[test]
fn missing_identifier() {
    let err = parse_err("USE");
    assert!(err.message.contains("expected identifier"), "{}", err.message);
}
