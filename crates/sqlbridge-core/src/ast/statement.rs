//! Statement, table reference, and clause nodes.

use super::expression::{Expr, Ident, Literal, QualifiedName};
use super::types::{
    AlterDatabaseStmt, AlterTableStmt, CreateDatabaseStmt, CreateIndexStmt, CreateTableStmt,
    CreateViewStmt, DropDatabaseStmt, DropIndexStmt, DropTableStmt, GenericDdlStmt, TruncateStmt,
};

/// A WITH clause prefixing a SELECT / INSERT / UPDATE / DELETE. It is stored
/// on the statement it prefixes, never as a statement of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithClause<'a> {
    pub recursive: bool,
    pub ctes: &'a [Cte<'a>],
}

/// One common table expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cte<'a> {
    pub name: Ident<'a>,
    pub columns: &'a [Ident<'a>],
    pub select: &'a SelectStmt<'a>,
}

/// A single column in a SELECT list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectColumn<'a> {
    pub expr: Expr<'a>,
    pub alias: Option<Ident<'a>>,
    /// True for a bare `*` column.
    pub star: bool,
}

/// One ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderByItem<'a> {
    pub expr: Expr<'a>,
    pub desc: bool,
    /// `NULLS FIRST` (true), `NULLS LAST` (false), or unspecified.
    pub nulls_first: Option<bool>,
}

/// `LIMIT count [OFFSET skip]`. `LIMIT skip, count` normalizes into the
/// same shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitClause<'a> {
    pub count: Expr<'a>,
    pub offset: Option<Expr<'a>>,
}

/// A set operation chaining another select to the right. Chains are
/// flattened left-leaning: the right select's own `set_op` continues the
/// chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetOperation<'a> {
    pub op: SetOp,
    pub all: bool,
    pub right: &'a SelectStmt<'a>,
}

/// `UNION`, `INTERSECT`, or `EXCEPT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
    Except,
}

impl SetOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectStmt<'a> {
    pub with: Option<&'a WithClause<'a>>,
    pub distinct: bool,
    pub columns: &'a [SelectColumn<'a>],
    /// Top-level FROM items; a comma-separated list keeps multiple entries
    /// (cross-join semantics).
    pub from: &'a [TableRef<'a>],
    pub where_clause: Option<Expr<'a>>,
    pub group_by: &'a [Expr<'a>],
    pub having: Option<Expr<'a>>,
    pub order_by: &'a [OrderByItem<'a>],
    pub limit: Option<&'a LimitClause<'a>>,
    pub set_op: Option<&'a SetOperation<'a>>,
    pub pos: u32,
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRef<'a> {
    /// A named table with optional alias.
    Table(&'a SimpleTable<'a>),
    /// `(SELECT …) [AS alias]`.
    Subquery(&'a SubqueryTable<'a>),
    /// A join of two references.
    Join(&'a JoinTable<'a>),
}

impl<'a> TableRef<'a> {
    /// Byte offset of the reference's first token.
    #[must_use]
    pub fn pos(&self) -> u32 {
        match self {
            Self::Table(t) => t.name.pos(),
            Self::Subquery(s) => s.pos,
            Self::Join(j) => j.pos,
        }
    }
}

/// A named table with optional alias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleTable<'a> {
    pub name: QualifiedName<'a>,
    pub alias: Option<Ident<'a>>,
}

/// A parenthesized subselect used as a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubqueryTable<'a> {
    pub subquery: &'a SelectStmt<'a>,
    pub alias: Option<Ident<'a>>,
    pub pos: u32,
}

/// A join between two table references, with either an ON condition or a
/// USING column list (never both).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinTable<'a> {
    pub left: TableRef<'a>,
    pub right: TableRef<'a>,
    pub kind: JoinKind,
    pub on: Option<Expr<'a>>,
    pub using: &'a [Ident<'a>],
    pub pos: u32,
}

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Natural,
}

/// `column = expr` in a SET list or upsert tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment<'a> {
    pub column: Ident<'a>,
    pub value: Expr<'a>,
}

/// An INSERT (or `REPLACE INTO`) statement.
///
/// Both upsert tails are modeled side by side: MySQL
/// `ON DUPLICATE KEY UPDATE` fills `on_dup_key`, the standard
/// `ON CONFLICT …` form fills the `on_conflict_*` fields. The dialect
/// renderer reshapes between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertStmt<'a> {
    pub with: Option<&'a WithClause<'a>>,
    pub table: QualifiedName<'a>,
    pub columns: &'a [Ident<'a>],
    /// VALUES rows; empty when inserting from `select`.
    pub rows: &'a [&'a [Expr<'a>]],
    pub select: Option<&'a SelectStmt<'a>>,
    pub on_dup_key: &'a [Assignment<'a>],
    pub on_conflict_target: &'a [Ident<'a>],
    pub on_conflict_do_nothing: bool,
    pub on_conflict_update: &'a [Assignment<'a>],
    /// `INSERT IGNORE`.
    pub ignore: bool,
    /// `REPLACE INTO`.
    pub replace: bool,
    pub pos: u32,
}

/// An UPDATE statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateStmt<'a> {
    pub with: Option<&'a WithClause<'a>>,
    pub tables: &'a [TableRef<'a>],
    pub set: &'a [Assignment<'a>],
    pub where_clause: Option<Expr<'a>>,
    pub order_by: &'a [OrderByItem<'a>],
    pub limit: Option<&'a LimitClause<'a>>,
    pub pos: u32,
}

/// A DELETE statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteStmt<'a> {
    pub with: Option<&'a WithClause<'a>>,
    pub from: &'a [TableRef<'a>],
    pub where_clause: Option<Expr<'a>>,
    pub order_by: &'a [OrderByItem<'a>],
    pub limit: Option<&'a LimitClause<'a>>,
    pub pos: u32,
}

/// `USE database`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UseStmt<'a> {
    pub database: Ident<'a>,
    pub pos: u32,
}

/// `SHOW what [LIKE 'pattern' | WHERE expr]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowStmt<'a> {
    /// The word after SHOW, as written (`TABLES`, `DATABASES`, …).
    pub what: &'a str,
    pub like: Option<&'a Literal<'a>>,
    pub where_clause: Option<Expr<'a>>,
    pub pos: u32,
}

/// `EXPLAIN <statement>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplainStmt<'a> {
    pub stmt: Statement<'a>,
    pub pos: u32,
}

/// `CALL name(args…)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallStmt<'a> {
    pub name: QualifiedName<'a>,
    pub args: &'a [Expr<'a>],
    pub pos: u32,
}

/// Transaction control verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAction {
    Begin,
    Commit,
    Rollback,
    StartTransaction,
    Savepoint,
    ReleaseSavepoint,
    SetTransaction,
}

/// A transaction-control statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionStmt<'a> {
    pub action: TxAction,
    pub savepoint: Option<Ident<'a>>,
    /// Trailing option words, kept as written (`ISOLATION LEVEL …`).
    pub options: &'a [&'a str],
    pub pos: u32,
}

/// A top-level SQL statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement<'a> {
    Select(&'a SelectStmt<'a>),
    Insert(&'a InsertStmt<'a>),
    Update(&'a UpdateStmt<'a>),
    Delete(&'a DeleteStmt<'a>),
    CreateTable(&'a CreateTableStmt<'a>),
    CreateIndex(&'a CreateIndexStmt<'a>),
    CreateView(&'a CreateViewStmt<'a>),
    CreateDatabase(&'a CreateDatabaseStmt<'a>),
    AlterTable(&'a AlterTableStmt<'a>),
    AlterDatabase(&'a AlterDatabaseStmt<'a>),
    DropTable(&'a DropTableStmt<'a>),
    DropIndex(&'a DropIndexStmt<'a>),
    DropDatabase(&'a DropDatabaseStmt<'a>),
    Truncate(&'a TruncateStmt<'a>),
    Use(&'a UseStmt<'a>),
    Show(&'a ShowStmt<'a>),
    Explain(&'a ExplainStmt<'a>),
    Call(&'a CallStmt<'a>),
    Transaction(&'a TransactionStmt<'a>),
    GenericDdl(&'a GenericDdlStmt<'a>),
}

impl<'a> Statement<'a> {
    /// Byte offset of the statement's first token.
    #[must_use]
    pub fn pos(&self) -> u32 {
        match self {
            Self::Select(s) => s.pos,
            Self::Insert(s) => s.pos,
            Self::Update(s) => s.pos,
            Self::Delete(s) => s.pos,
            Self::CreateTable(s) => s.pos,
            Self::CreateIndex(s) => s.pos,
            Self::CreateView(s) => s.pos,
            Self::CreateDatabase(s) => s.pos,
            Self::AlterTable(s) => s.pos,
            Self::AlterDatabase(s) => s.pos,
            Self::DropTable(s) => s.pos,
            Self::DropIndex(s) => s.pos,
            Self::DropDatabase(s) => s.pos,
            Self::Truncate(s) => s.pos,
            Self::Use(s) => s.pos,
            Self::Show(s) => s.pos,
            Self::Explain(s) => s.pos,
            Self::Call(s) => s.pos,
            Self::Transaction(s) => s.pos,
            Self::GenericDdl(s) => s.pos,
        }
    }
}
