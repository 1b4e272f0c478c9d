//! Data types and DDL nodes.

use super::expression::{Expr, Ident, Literal, QualifiedName};
use super::statement::SelectStmt;

/// A SQL column type as written, plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataType<'a> {
    /// Type name bytes as they appeared in the source.
    pub name: &'a str,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub unsigned: bool,
    pub zerofill: bool,
    /// `CHARACTER SET …`.
    pub charset: Option<&'a str>,
    /// `COLLATE …`.
    pub collation: Option<&'a str>,
    /// Value list for `ENUM(…)` / `SET(…)`, raw strings with quotes.
    pub enum_values: &'a [&'a str],
    pub pos: u32,
}

/// A generated column clause:
/// `GENERATED ALWAYS AS (expr) [STORED | VIRTUAL]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratedColumn<'a> {
    pub expr: Expr<'a>,
    pub stored: bool,
}

/// One column definition inside CREATE TABLE or ALTER TABLE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDef<'a> {
    pub name: Ident<'a>,
    pub data_type: &'a DataType<'a>,
    pub not_null: bool,
    pub default: Option<Expr<'a>>,
    pub auto_increment: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub comment: Option<&'a Literal<'a>>,
    pub references: Option<&'a ForeignKeyRef<'a>>,
    pub check: Option<Expr<'a>>,
    pub generated: Option<&'a GeneratedColumn<'a>>,
    /// MySQL `ON UPDATE expr` column attribute.
    pub on_update: Option<Expr<'a>>,
    pub pos: u32,
}

/// Referential action on `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefAction {
    #[default]
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl RefAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A `REFERENCES` clause on a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForeignKeyRef<'a> {
    pub table: QualifiedName<'a>,
    pub columns: &'a [Ident<'a>],
    pub on_delete: RefAction,
    pub on_update: RefAction,
}

/// One column inside an index or constraint definition, with optional
/// prefix length and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexColumn<'a> {
    pub name: Ident<'a>,
    pub length: Option<u32>,
    pub desc: bool,
}

/// Constraint flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Index,
    ForeignKey,
    Check,
    Fulltext,
    Spatial,
}

/// A table-level constraint. A foreign-key constraint always has a
/// referenced table; other kinds never do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConstraint<'a> {
    pub name: Option<Ident<'a>>,
    pub kind: ConstraintKind,
    pub columns: &'a [IndexColumn<'a>],
    pub ref_table: Option<QualifiedName<'a>>,
    pub ref_columns: &'a [Ident<'a>],
    pub on_delete: RefAction,
    pub on_update: RefAction,
    pub check: Option<Expr<'a>>,
    /// `USING BTREE` / `USING HASH` hint.
    pub algorithm: Option<&'a str>,
    pub pos: u32,
}

/// A table-level option such as `ENGINE=InnoDB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOption<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// `CREATE [TEMPORARY] TABLE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateTableStmt<'a> {
    pub table: QualifiedName<'a>,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub columns: &'a [&'a ColumnDef<'a>],
    pub constraints: &'a [&'a TableConstraint<'a>],
    pub options: &'a [TableOption<'a>],
    /// `CREATE TABLE … AS SELECT`.
    pub select: Option<&'a SelectStmt<'a>>,
    /// `CREATE TABLE … LIKE other`.
    pub like: Option<QualifiedName<'a>>,
    pub pos: u32,
}

/// `CREATE [UNIQUE] INDEX name ON table (columns…)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateIndexStmt<'a> {
    pub name: Ident<'a>,
    pub table: QualifiedName<'a>,
    pub columns: &'a [IndexColumn<'a>],
    pub unique: bool,
    pub algorithm: Option<&'a str>,
    pub pos: u32,
}

/// `CREATE [OR REPLACE] VIEW name [(columns)] AS select`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateViewStmt<'a> {
    pub name: QualifiedName<'a>,
    pub columns: &'a [Ident<'a>],
    pub select: &'a SelectStmt<'a>,
    pub or_replace: bool,
    pub pos: u32,
}

/// `CREATE DATABASE | SCHEMA` with option tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateDatabaseStmt<'a> {
    pub name: Ident<'a>,
    pub if_not_exists: bool,
    pub options: &'a [TableOption<'a>],
    pub pos: u32,
}

/// `ALTER DATABASE | SCHEMA` with option tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlterDatabaseStmt<'a> {
    pub name: Ident<'a>,
    pub options: &'a [TableOption<'a>],
    pub pos: u32,
}

/// `DROP DATABASE | SCHEMA`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropDatabaseStmt<'a> {
    pub name: Ident<'a>,
    pub if_exists: bool,
    pub pos: u32,
}

/// `DROP TABLE` (or `DROP VIEW`), possibly listing several objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTableStmt<'a> {
    pub tables: &'a [QualifiedName<'a>],
    pub if_exists: bool,
    pub cascade: bool,
    /// True when written as `DROP VIEW`.
    pub view: bool,
    pub pos: u32,
}

/// `DROP INDEX name [ON table]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIndexStmt<'a> {
    pub name: Ident<'a>,
    pub table: Option<QualifiedName<'a>>,
    pub if_exists: bool,
    pub pos: u32,
}

/// `TRUNCATE [TABLE] name`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncateStmt<'a> {
    pub table: QualifiedName<'a>,
    pub pos: u32,
}

/// `ALTER TABLE name cmd [, cmd …]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlterTableStmt<'a> {
    pub table: QualifiedName<'a>,
    pub commands: &'a [AlterCmd<'a>],
    pub pos: u32,
}

/// One ALTER TABLE command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlterCmd<'a> {
    AddColumn(&'a AddColumnCmd<'a>),
    AddConstraint(&'a TableConstraint<'a>),
    DropColumn(&'a Ident<'a>),
    DropIndex(&'a Ident<'a>),
    ModifyColumn(&'a ModifyColumnCmd<'a>),
    RenameTable(&'a QualifiedName<'a>),
}

/// `ADD [COLUMN] def [FIRST | AFTER col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddColumnCmd<'a> {
    pub column: &'a ColumnDef<'a>,
    pub first: bool,
    pub after: Option<Ident<'a>>,
}

/// `MODIFY [COLUMN] def [FIRST | AFTER col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifyColumnCmd<'a> {
    pub column: &'a ColumnDef<'a>,
    pub first: bool,
    pub after: Option<Ident<'a>>,
}

/// Permissive fallback for DDL objects the grammar does not model
/// (`FUNCTION`, `PROCEDURE`, `TRIGGER`, …): verb, object word, optional
/// name; the rest of the statement is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericDdlStmt<'a> {
    pub verb: &'a str,
    pub object: &'a str,
    pub name: Option<Ident<'a>>,
    pub pos: u32,
}
