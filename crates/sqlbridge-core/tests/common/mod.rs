#![allow(dead_code)]

use sqlbridge_core::ast::{DeleteStmt, InsertStmt, SelectStmt, Statement, UpdateStmt};
use sqlbridge_core::{parse_all, parse_one, render_statements, Arena, Dialect, ParseError};

pub const ALL_DIALECTS: [Dialect; 3] = [Dialect::MySql, Dialect::Postgres, Dialect::Sqlite];

pub fn parse<'a>(arena: &'a Arena, sql: &'a str) -> Statement<'a> {
    parse_one(arena, sql)
        .unwrap_or_else(|e| panic!("failed to parse: {sql}\nerror: {e}"))
        .unwrap_or_else(|| panic!("no statement in: {sql}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    let arena = Arena::new();
    match parse_one(&arena, sql) {
        Err(err) => err,
        Ok(stmt) => panic!("expected parse error for: {sql}\ngot: {stmt:?}"),
    }
}

pub fn parse_select<'a>(arena: &'a Arena, sql: &'a str) -> &'a SelectStmt<'a> {
    match parse(arena, sql) {
        Statement::Select(s) => s,
        other => panic!("expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert<'a>(arena: &'a Arena, sql: &'a str) -> &'a InsertStmt<'a> {
    match parse(arena, sql) {
        Statement::Insert(s) => s,
        other => panic!("expected INSERT, got {other:?}"),
    }
}

pub fn parse_update<'a>(arena: &'a Arena, sql: &'a str) -> &'a UpdateStmt<'a> {
    match parse(arena, sql) {
        Statement::Update(s) => s,
        other => panic!("expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete<'a>(arena: &'a Arena, sql: &'a str) -> &'a DeleteStmt<'a> {
    match parse(arena, sql) {
        Statement::Delete(s) => s,
        other => panic!("expected DELETE, got {other:?}"),
    }
}

/// Parses and renders for `target`, non-strict.
pub fn render(sql: &str, target: Dialect) -> String {
    let arena = Arena::new();
    let statements =
        parse_all(&arena, sql).unwrap_or_else(|e| panic!("failed to parse: {sql}\nerror: {e}"));
    render_statements(&statements, target, false)
        .unwrap_or_else(|e| panic!("failed to render: {sql}\nerror: {e}"))
}

/// Verifies that rendering reaches a fixed point for `target`: the first
/// render must re-parse, and rendering the re-parsed tree must reproduce
/// the same text byte for byte.
pub fn round_trip(sql: &str, target: Dialect) {
    let first = render(sql, target);
    let arena = Arena::new();
    let reparsed = parse_all(&arena, &first)
        .unwrap_or_else(|e| panic!("render output failed to re-parse for {target}.\n  input:  {sql}\n  output: {first}\n  error:  {e}"));
    let second = render_statements(&reparsed, target, false).unwrap();
    assert_eq!(
        first, second,
        "render is not a fixed point for {target}.\n  input:  {sql}\n  first:  {first}\n  second: {second}"
    );
}

/// Fixed-point check against every dialect.
pub fn round_trip_all(sql: &str) {
    for dialect in ALL_DIALECTS {
        round_trip(sql, dialect);
    }
}
