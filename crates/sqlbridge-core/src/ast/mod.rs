//! The SQL syntax tree.
//!
//! Nodes are arena-allocated; child edges are `&'a` references, so the whole
//! tree is `Copy` and its lifetime is bounded by the shorter of the arena
//! and the source text it borrows from.

mod expression;
mod statement;
mod types;

pub use expression::{
    BetweenExpr, BinaryExpr, CaseExpr, CastExpr, ExistsExpr, Expr, FunctionCall, Ident, InExpr,
    IntervalExpr, IsNullExpr, LikeExpr, Literal, Param, QualifiedName, SubqueryExpr, UnaryExpr,
    WhenClause,
};
pub use statement::{
    Assignment, CallStmt, Cte, DeleteStmt, ExplainStmt, InsertStmt, JoinKind, JoinTable,
    LimitClause, OrderByItem, SelectColumn, SelectStmt, SetOp, SetOperation, ShowStmt,
    SimpleTable, Statement, SubqueryTable, TableRef, TransactionStmt, TxAction, UpdateStmt,
    UseStmt, WithClause,
};
pub use types::{
    AddColumnCmd, AlterCmd, AlterDatabaseStmt, AlterTableStmt, ColumnDef, ConstraintKind,
    CreateDatabaseStmt, CreateIndexStmt, CreateTableStmt, CreateViewStmt, DataType,
    DropDatabaseStmt, DropIndexStmt, DropTableStmt, ForeignKeyRef, GeneratedColumn,
    GenericDdlStmt, IndexColumn, ModifyColumnCmd, RefAction, TableConstraint, TableOption,
    TruncateStmt,
};
