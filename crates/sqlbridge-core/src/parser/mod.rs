//! SQL parser.
//!
//! A hand-written recursive descent statement parser combined with a Pratt
//! (top-down operator precedence) expression parser. Statements are
//! dispatched on their leading token; expressions are parsed by a single
//! precedence-driven loop with the SQL mixfix forms (`IS NULL`,
//! `[NOT] LIKE`, `[NOT] IN`, `[NOT] BETWEEN`) handled ahead of the generic
//! binary-operator path.
//!
//! # Supported statements
//!
//! | Group | Statements |
//! |-------|------------|
//! | DQL   | `SELECT` with joins, CTEs, set operations, `ORDER BY` / `LIMIT` |
//! | DML   | `INSERT` (incl. `REPLACE INTO` and both upsert tails), `UPDATE`, `DELETE` |
//! | DDL   | `CREATE`/`ALTER`/`DROP` for tables, views, indexes, databases; `TRUNCATE`; generic fallback for other objects |
//! | Misc  | transactions, `CALL`, `USE`, `SHOW`, `EXPLAIN` |
//!
//! The parser owns no tree memory: every node is allocated from the
//! caller's [`Arena`](crate::Arena), and one token of lookahead is buffered
//! internally. Errors carry the line, column, and byte offset of the first
//! offending token; no recovery is attempted.

mod core;
mod ddl;
mod error;
mod pratt;

pub use self::core::Parser;
pub use error::ParseError;
