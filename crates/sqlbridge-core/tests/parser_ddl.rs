//! DDL parsing: CREATE / ALTER / DROP / TRUNCATE, plus the misc statements
//! (USE, SHOW, EXPLAIN, CALL, transactions).

mod common;
use common::*;

use sqlbridge_core::ast::{
    AlterCmd, ConstraintKind, CreateTableStmt, RefAction, Statement, TxAction,
};
use sqlbridge_core::Arena;

fn parse_create_table<'a>(arena: &'a Arena, sql: &'a str) -> &'a CreateTableStmt<'a> {
    match parse(arena, sql) {
        Statement::CreateTable(stmt) => stmt,
        other => panic!("expected CREATE TABLE, got {other:?}"),
    }
}

#[test]
fn create_table_columns() {
    let arena = Arena::new();
    let stmt = parse_create_table(
        &arena,
        "CREATE TABLE users (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL DEFAULT 'anon',
            balance DECIMAL(10, 2) UNSIGNED,
            bio TEXT COMMENT 'profile text',
            active BOOLEAN NULL
        )",
    );
    assert_eq!(stmt.columns.len(), 5);
    let id = stmt.columns[0];
    assert!(id.not_null && id.auto_increment && id.primary_key);
    let name = stmt.columns[1];
    assert_eq!(name.data_type.precision, Some(255));
    assert!(name.default.is_some());
    assert!(stmt.columns[2].data_type.unsigned);
    assert_eq!(stmt.columns[3].comment.unwrap().raw, "'profile text'");
    assert!(!stmt.columns[4].not_null);
}

#[test]
fn create_table_if_not_exists_and_temporary() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TEMPORARY TABLE IF NOT EXISTS tmp (a INT)");
    assert!(stmt.temporary);
    assert!(stmt.if_not_exists);
    round_trip_all("CREATE TEMPORARY TABLE IF NOT EXISTS tmp (a INT)");
}

#[test]
fn create_table_like() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TABLE copy LIKE original");
    assert!(stmt.like.is_some());
    assert!(stmt.columns.is_empty());
    round_trip_all("CREATE TABLE copy LIKE original");
}

#[test]
fn create_table_as_select() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TABLE recent AS SELECT * FROM logs");
    assert!(stmt.select.is_some());
    round_trip_all("CREATE TABLE recent AS SELECT * FROM logs");
}

#[test]
fn create_table_options() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TABLE t (a INT) ENGINE=InnoDB");
    assert_eq!(stmt.options.len(), 1);
    assert_eq!(stmt.options[0].key, "ENGINE");
    assert_eq!(stmt.options[0].value, Some("InnoDB"));
    round_trip_all("CREATE TABLE t (a INT) ENGINE=InnoDB");
}

#[test]
fn column_references_with_actions() {
    let arena = Arena::new();
    let stmt = parse_create_table(
        &arena,
        "CREATE TABLE orders (
            user_id BIGINT REFERENCES users (id) ON DELETE CASCADE ON UPDATE SET NULL
        )",
    );
    let fk = stmt.columns[0].references.unwrap();
    assert_eq!(fk.table.parts[0].text, "users");
    assert_eq!(fk.on_delete, RefAction::Cascade);
    assert_eq!(fk.on_update, RefAction::SetNull);
}

#[test]
fn column_check_and_collate() {
    let arena = Arena::new();
    let stmt = parse_create_table(
        &arena,
        "CREATE TABLE t (age INT CHECK (age > 0), name TEXT COLLATE utf8_bin)",
    );
    assert!(stmt.columns[0].check.is_some());
    assert_eq!(stmt.columns[1].data_type.collation, Some("utf8_bin"));
}

#[test]
fn generated_column_and_on_update() {
    let arena = Arena::new();
    let stmt = parse_create_table(
        &arena,
        "CREATE TABLE t (
            total INT GENERATED ALWAYS AS (a + b) STORED,
            ts TIMESTAMP ON UPDATE current_timestamp
        )",
    );
    let generated = stmt.columns[0].generated.unwrap();
    assert!(generated.stored);
    assert!(stmt.columns[1].on_update.is_some());
    round_trip_all("CREATE TABLE t (total INT GENERATED ALWAYS AS (a + b) STORED)");
}

#[test]
fn enum_data_type_values() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TABLE t (state ENUM('on', 'off', 'idle'))");
    assert_eq!(stmt.columns[0].data_type.enum_values.len(), 3);
    round_trip_all("CREATE TABLE t (state ENUM('on', 'off', 'idle'))");
}

#[test]
fn table_constraints() {
    let arena = Arena::new();
    let stmt = parse_create_table(
        &arena,
        "CREATE TABLE t (
            a INT,
            b INT,
            PRIMARY KEY (a),
            UNIQUE KEY uq_b (b),
            KEY idx_ab (a, b(10) DESC) USING BTREE,
            CONSTRAINT fk_b FOREIGN KEY (b) REFERENCES other (id) ON DELETE RESTRICT,
            CHECK (a > 0)
        )",
    );
    assert_eq!(stmt.constraints.len(), 5);
    assert_eq!(stmt.constraints[0].kind, ConstraintKind::PrimaryKey);
    assert_eq!(stmt.constraints[1].kind, ConstraintKind::Unique);
    assert_eq!(stmt.constraints[1].name.unwrap().text, "uq_b");
    let index = stmt.constraints[2];
    assert_eq!(index.kind, ConstraintKind::Index);
    assert_eq!(index.columns[1].length, Some(10));
    assert!(index.columns[1].desc);
    assert_eq!(index.algorithm, Some("BTREE"));
    let fk = stmt.constraints[3];
    assert_eq!(fk.kind, ConstraintKind::ForeignKey);
    assert!(fk.ref_table.is_some());
    assert_eq!(fk.on_delete, RefAction::Restrict);
    assert_eq!(stmt.constraints[4].kind, ConstraintKind::Check);
}

#[test]
fn fulltext_constraint() {
    let arena = Arena::new();
    let stmt = parse_create_table(&arena, "CREATE TABLE t (body TEXT, FULLTEXT KEY ft (body))");
    assert_eq!(stmt.constraints[0].kind, ConstraintKind::Fulltext);
}

#[test]
fn alter_table_commands() {
    let arena = Arena::new();
    let stmt = parse(
        &arena,
        "ALTER TABLE t ADD COLUMN c INT NOT NULL AFTER b, DROP COLUMN old, \
         DROP INDEX idx, MODIFY COLUMN a BIGINT FIRST, RENAME TO t2",
    );
    let Statement::AlterTable(alter) = stmt else {
        panic!("expected ALTER TABLE, got {stmt:?}");
    };
    assert_eq!(alter.commands.len(), 5);
    assert!(matches!(alter.commands[0], AlterCmd::AddColumn(cmd) if cmd.after.is_some()));
    assert!(matches!(alter.commands[1], AlterCmd::DropColumn(name) if name.text == "old"));
    assert!(matches!(alter.commands[2], AlterCmd::DropIndex(_)));
    assert!(matches!(alter.commands[3], AlterCmd::ModifyColumn(cmd) if cmd.first));
    assert!(matches!(alter.commands[4], AlterCmd::RenameTable(_)));
}

#[test]
fn alter_table_add_constraint() {
    let arena = Arena::new();
    let stmt = parse(&arena, "ALTER TABLE t ADD UNIQUE KEY uq (a)");
    let Statement::AlterTable(alter) = stmt else {
        panic!("expected ALTER TABLE, got {stmt:?}");
    };
    assert!(matches!(alter.commands[0], AlterCmd::AddConstraint(_)));
}

#[test]
fn create_index() {
    let arena = Arena::new();
    let stmt = parse(&arena, "CREATE UNIQUE INDEX idx_name ON users (name DESC, email)");
    let Statement::CreateIndex(index) = stmt else {
        panic!("expected CREATE INDEX, got {stmt:?}");
    };
    assert!(index.unique);
    assert_eq!(index.columns.len(), 2);
    assert!(index.columns[0].desc);
    round_trip_all("CREATE UNIQUE INDEX idx_name ON users (name DESC, email)");
}

#[test]
fn create_view() {
    let arena = Arena::new();
    let stmt = parse(
        &arena,
        "CREATE OR REPLACE VIEW v (a, b) AS SELECT x, y FROM t",
    );
    let Statement::CreateView(view) = stmt else {
        panic!("expected CREATE VIEW, got {stmt:?}");
    };
    assert!(view.or_replace);
    assert_eq!(view.columns.len(), 2);
    round_trip_all("CREATE OR REPLACE VIEW v (a, b) AS SELECT x, y FROM t");
}

#[test]
fn create_and_drop_database() {
    let arena = Arena::new();
    let stmt = parse(&arena, "CREATE DATABASE IF NOT EXISTS shop owner=bob");
    let Statement::CreateDatabase(create) = stmt else {
        panic!("expected CREATE DATABASE, got {stmt:?}");
    };
    assert!(create.if_not_exists);
    assert_eq!(create.options.len(), 1);

    assert!(matches!(
        parse(&arena, "CREATE SCHEMA shop"),
        Statement::CreateDatabase(_)
    ));
    assert!(matches!(
        parse(&arena, "DROP DATABASE IF EXISTS shop"),
        Statement::DropDatabase(drop) if drop.if_exists
    ));
    assert!(matches!(
        parse(&arena, "ALTER DATABASE shop charset=utf8"),
        Statement::AlterDatabase(alter) if alter.options.len() == 1
    ));
}

#[test]
fn drop_table_forms() {
    let arena = Arena::new();
    let stmt = parse(&arena, "DROP TABLE IF EXISTS a, b CASCADE");
    let Statement::DropTable(drop) = stmt else {
        panic!("expected DROP TABLE, got {stmt:?}");
    };
    assert!(drop.if_exists);
    assert!(drop.cascade);
    assert!(!drop.view);
    assert_eq!(drop.tables.len(), 2);
    round_trip_all("DROP TABLE IF EXISTS a, b CASCADE");
}

#[test]
fn drop_view_keeps_object_kind() {
    let arena = Arena::new();
    let stmt = parse(&arena, "DROP VIEW IF EXISTS v");
    assert!(matches!(stmt, Statement::DropTable(drop) if drop.view && drop.if_exists));
    round_trip_all("DROP VIEW IF EXISTS v");
}

#[test]
fn drop_index_with_table() {
    let arena = Arena::new();
    let stmt = parse(&arena, "DROP INDEX idx ON t");
    let Statement::DropIndex(drop) = stmt else {
        panic!("expected DROP INDEX, got {stmt:?}");
    };
    assert!(drop.table.is_some());
    assert!(!drop.if_exists);
}

#[test]
fn generic_ddl_fallback() {
    let arena = Arena::new();
    let stmt = parse(
        &arena,
        "CREATE TRIGGER audit AFTER INSERT ON t FOR EACH ROW SET done = 1",
    );
    let Statement::GenericDdl(generic) = stmt else {
        panic!("expected generic DDL, got {stmt:?}");
    };
    assert_eq!(generic.verb, "create");
    assert_eq!(generic.object, "TRIGGER");
    assert_eq!(generic.name.unwrap().text, "audit");

    assert!(matches!(
        parse(&arena, "DROP PROCEDURE cleanup"),
        Statement::GenericDdl(g) if g.verb == "drop"
    ));
}

#[test]
fn truncate_and_use() {
    let arena = Arena::new();
    assert!(matches!(
        parse(&arena, "TRUNCATE TABLE logs"),
        Statement::Truncate(_)
    ));
    assert!(matches!(parse(&arena, "TRUNCATE logs"), Statement::Truncate(_)));
    assert!(matches!(
        parse(&arena, "USE shop"),
        Statement::Use(stmt) if stmt.database.text == "shop"
    ));
    round_trip_all("TRUNCATE TABLE logs");
    round_trip_all("USE shop");
}

#[test]
fn show_statements() {
    let arena = Arena::new();
    let stmt = parse(&arena, "SHOW TABLES LIKE 'user%'");
    let Statement::Show(show) = stmt else {
        panic!("expected SHOW, got {stmt:?}");
    };
    assert_eq!(show.what, "TABLES");
    assert!(show.like.is_some());

    assert!(matches!(
        parse(&arena, "SHOW databases WHERE name = 'x'"),
        Statement::Show(s) if s.where_clause.is_some()
    ));
    round_trip_all("SHOW TABLES LIKE 'user%'");
}

#[test]
fn explain_wraps_a_statement() {
    let arena = Arena::new();
    let stmt = parse(&arena, "EXPLAIN SELECT * FROM t");
    let Statement::Explain(explain) = stmt else {
        panic!("expected EXPLAIN, got {stmt:?}");
    };
    assert!(matches!(explain.stmt, Statement::Select(_)));
    round_trip_all("EXPLAIN SELECT * FROM t");
}

#[test]
fn call_statement() {
    let arena = Arena::new();
    let stmt = parse(&arena, "CALL cleanup(30, 'logs')");
    let Statement::Call(call) = stmt else {
        panic!("expected CALL, got {stmt:?}");
    };
    assert_eq!(call.args.len(), 2);
    round_trip_all("CALL cleanup(30, 'logs')");
}

#[test]
fn transaction_statements() {
    let arena = Arena::new();
    for (sql, action) in [
        ("BEGIN", TxAction::Begin),
        ("BEGIN TRANSACTION", TxAction::Begin),
        ("COMMIT", TxAction::Commit),
        ("COMMIT WORK", TxAction::Commit),
        ("ROLLBACK", TxAction::Rollback),
        ("START TRANSACTION READ ONLY", TxAction::StartTransaction),
        ("SAVEPOINT sp1", TxAction::Savepoint),
        ("RELEASE SAVEPOINT sp1", TxAction::ReleaseSavepoint),
        ("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE", TxAction::SetTransaction),
    ] {
        match parse(&arena, sql) {
            Statement::Transaction(tx) => assert_eq!(tx.action, action, "{sql}"),
            other => panic!("expected transaction for {sql}, got {other:?}"),
        }
    }
    round_trip_all("BEGIN");
    round_trip_all("START TRANSACTION READ ONLY");
}

#[test]
fn rollback_to_savepoint() {
    let arena = Arena::new();
    let stmt = parse(&arena, "ROLLBACK TO SAVEPOINT sp1");
    let Statement::Transaction(tx) = stmt else {
        panic!("expected transaction, got {stmt:?}");
    };
    assert_eq!(tx.action, TxAction::Rollback);
    assert_eq!(tx.savepoint.unwrap().text, "sp1");
    round_trip_all("ROLLBACK TO SAVEPOINT sp1");
}
