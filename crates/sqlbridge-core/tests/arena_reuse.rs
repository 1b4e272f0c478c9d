//! Arena lifecycle: reuse across resets and the reusable parser.

use sqlbridge_core::ast::Expr;
use sqlbridge_core::{parse_one, Arena, Parser, Statement};

#[test]
fn arena_reset_allows_reuse() {
    let mut arena = Arena::new();
    {
        let stmt = parse_one(&arena, "SELECT a FROM t").unwrap().unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
        // the tree must be dropped before the arena can be reset; keeping
        // it across the reset below would not compile
    }
    arena.reset();
    let stmt = parse_one(&arena, "SELECT b FROM u").unwrap().unwrap();
    match stmt {
        Statement::Select(select) => {
            assert!(matches!(select.columns[0].expr, Expr::Ident(i) if i.text == "b"));
        }
        other => panic!("expected SELECT, got {other:?}"),
    }
}

#[test]
fn arena_memory_is_retained_across_resets() {
    let mut arena = Arena::new();
    let _ = parse_one(&arena, "SELECT a, b, c, d FROM t WHERE a = 1 AND b = 2").unwrap();
    let after_first = arena.allocated_bytes();
    arena.reset();
    let _ = parse_one(&arena, "SELECT a, b, c, d FROM t WHERE a = 1 AND b = 2").unwrap();
    // the same parse fits into the retained chunk
    assert!(arena.allocated_bytes() <= after_first);
}

#[test]
fn reusable_parser_parses_statement_streams() {
    let arena = Arena::new();
    let mut parser = Parser::new(&arena, "SELECT 1; SELECT 2");
    let mut count = 0;
    while parser.next_statement().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 2);
    // sticky end of input
    assert!(parser.next_statement().unwrap().is_none());

    parser.reset("SELECT 3");
    assert!(parser.next_statement().unwrap().is_some());
    assert!(parser.next_statement().unwrap().is_none());
}
