//! UPDATE and DELETE parsing.

mod common;
use common::*;

use sqlbridge_core::Arena;

#[test]
fn update_basic() {
    let arena = Arena::new();
    let update = parse_update(&arena, "UPDATE users SET name = 'Bob', active = 1 WHERE id = 7");
    assert_eq!(update.set.len(), 2);
    assert_eq!(update.set[0].column.text, "name");
    assert!(update.where_clause.is_some());
    round_trip_all("UPDATE users SET name = 'Bob', active = 1 WHERE id = 7");
}

#[test]
fn update_without_where_parses() {
    let arena = Arena::new();
    let update = parse_update(&arena, "UPDATE users SET active = 0");
    assert!(update.where_clause.is_none());
}

#[test]
fn update_with_order_and_limit() {
    let arena = Arena::new();
    let update = parse_update(
        &arena,
        "UPDATE queue SET claimed = 1 WHERE claimed = 0 ORDER BY id LIMIT 10",
    );
    assert_eq!(update.order_by.len(), 1);
    assert!(update.limit.is_some());
    round_trip_all("UPDATE queue SET claimed = 1 WHERE claimed = 0 ORDER BY id LIMIT 10");
}

#[test]
fn update_with_alias() {
    let arena = Arena::new();
    let update = parse_update(&arena, "UPDATE users u SET name = 'x' WHERE u.id = 1");
    assert_eq!(update.tables.len(), 1);
}

#[test]
fn delete_basic() {
    let arena = Arena::new();
    let delete = parse_delete(&arena, "DELETE FROM logs WHERE ts < '2020-01-01'");
    assert!(delete.where_clause.is_some());
    round_trip_all("DELETE FROM logs WHERE ts < '2020-01-01'");
}

#[test]
fn delete_without_from_keyword() {
    let arena = Arena::new();
    let delete = parse_delete(&arena, "DELETE logs WHERE id = 1");
    assert_eq!(delete.from.len(), 1);
}

#[test]
fn delete_with_order_and_limit() {
    let arena = Arena::new();
    let delete = parse_delete(&arena, "DELETE FROM logs ORDER BY ts DESC LIMIT 100");
    assert!(delete.order_by[0].desc);
    assert!(delete.limit.is_some());
    round_trip_all("DELETE FROM logs ORDER BY ts DESC LIMIT 100");
}

#[test]
fn delete_without_where_parses() {
    let arena = Arena::new();
    let delete = parse_delete(&arena, "DELETE FROM logs");
    assert!(delete.where_clause.is_none());
}
