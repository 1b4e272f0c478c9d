//! INSERT, REPLACE INTO, and both upsert tails.

mod common;
use common::*;

use sqlbridge_core::ast::Statement;
use sqlbridge_core::Arena;

#[test]
fn insert_values() {
    let arena = Arena::new();
    let insert = parse_insert(
        &arena,
        "INSERT INTO users (name, email) VALUES ('Alice', 'a@example.com')",
    );
    assert_eq!(insert.table.parts[0].text, "users");
    assert_eq!(insert.columns.len(), 2);
    assert_eq!(insert.rows.len(), 1);
    assert_eq!(insert.rows[0].len(), 2);
    assert!(insert.select.is_none());
    round_trip_all("INSERT INTO users (name, email) VALUES ('Alice', 'a@example.com')");
}

#[test]
fn insert_multiple_rows() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT INTO t (a) VALUES (1), (2), (3)");
    assert_eq!(insert.rows.len(), 3);
    round_trip_all("INSERT INTO t (a) VALUES (1), (2), (3)");
}

#[test]
fn insert_without_column_list() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT INTO t VALUES (1, 2)");
    assert!(insert.columns.is_empty());
}

#[test]
fn insert_from_select() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT INTO archive SELECT * FROM logs WHERE old = 1");
    assert!(insert.rows.is_empty());
    assert!(insert.select.is_some());
    round_trip_all("INSERT INTO archive SELECT * FROM logs WHERE old = 1");
}

#[test]
fn insert_ignore_flag() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT IGNORE INTO t (a) VALUES (1)");
    assert!(insert.ignore);
}

#[test]
fn replace_into_sets_replace_flag() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "REPLACE INTO t (a, b) VALUES (1, 2)");
    assert!(insert.replace);
    assert_eq!(insert.columns.len(), 2);
    round_trip_all("REPLACE INTO t (a, b) VALUES (1, 2)");
}

#[test]
fn on_duplicate_key_update() {
    let arena = Arena::new();
    let insert = parse_insert(
        &arena,
        "INSERT INTO t (a, b) VALUES (1, 2) ON DUPLICATE KEY UPDATE b = 3, c = 4",
    );
    assert_eq!(insert.on_dup_key.len(), 2);
    assert_eq!(insert.on_dup_key[0].column.text, "b");
    assert!(insert.on_conflict_update.is_empty());
    round_trip(
        "INSERT INTO t (a, b) VALUES (1, 2) ON DUPLICATE KEY UPDATE b = 3, c = 4",
        sqlbridge_core::Dialect::MySql,
    );
}

#[test]
fn on_conflict_do_nothing() {
    let arena = Arena::new();
    let insert = parse_insert(
        &arena,
        "INSERT INTO t (a) VALUES (1) ON CONFLICT (a) DO NOTHING",
    );
    assert!(insert.on_conflict_do_nothing);
    assert_eq!(insert.on_conflict_target.len(), 1);
    round_trip(
        "INSERT INTO t (a) VALUES (1) ON CONFLICT (a) DO NOTHING",
        sqlbridge_core::Dialect::Postgres,
    );
}

#[test]
fn on_conflict_do_update() {
    let arena = Arena::new();
    let insert = parse_insert(
        &arena,
        "INSERT INTO t (a, b) VALUES (1, 2) ON CONFLICT (a) DO UPDATE SET b = 3",
    );
    assert_eq!(insert.on_conflict_update.len(), 1);
    assert!(!insert.on_conflict_do_nothing);
    assert!(insert.on_dup_key.is_empty());
}

#[test]
fn on_conflict_without_target() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT INTO t (a) VALUES (1) ON CONFLICT DO NOTHING");
    assert!(insert.on_conflict_do_nothing);
    assert!(insert.on_conflict_target.is_empty());
}

#[test]
fn with_clause_routes_to_insert() {
    let arena = Arena::new();
    let stmt = parse(&arena, "WITH t AS (SELECT 1) INSERT INTO x SELECT * FROM t");
    match stmt {
        Statement::Insert(insert) => {
            assert!(insert.with.is_some(), "WITH clause must be attached");
            assert!(insert.select.is_some());
        }
        other => panic!("expected INSERT, got {other:?}"),
    }
}

#[test]
fn with_clause_routes_to_update_and_delete() {
    let arena = Arena::new();
    assert!(matches!(
        parse(&arena, "WITH t AS (SELECT 1) UPDATE x SET a = 1 WHERE a IN (SELECT * FROM t)"),
        Statement::Update(update) if update.with.is_some()
    ));
    assert!(matches!(
        parse(&arena, "WITH t AS (SELECT 1) DELETE FROM x WHERE a IN (SELECT * FROM t)"),
        Statement::Delete(delete) if delete.with.is_some()
    ));
}

#[test]
fn insert_with_qualified_table() {
    let arena = Arena::new();
    let insert = parse_insert(&arena, "INSERT INTO shop.orders (id) VALUES (1)");
    assert_eq!(insert.table.parts.len(), 2);
}
