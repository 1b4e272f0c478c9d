//! # sqlbridge-core
//!
//! A high-performance, multi-dialect SQL front-end: a zero-copy lexer, a
//! recursive-descent parser with Pratt expression parsing, an arena-backed
//! syntax tree, and a dialect-aware renderer that rewrites between MySQL,
//! PostgreSQL, and SQLite.
//!
//! ## Parsing
//!
//! ```
//! use sqlbridge_core::{parse_one, Arena, Statement};
//!
//! let arena = Arena::new();
//! let stmt = parse_one(&arena, "SELECT id, name FROM users WHERE id = 1")
//!     .unwrap()
//!     .unwrap();
//! assert!(matches!(stmt, Statement::Select(_)));
//! ```
//!
//! Every tree node lives in the [`Arena`]; the tree borrows from both the
//! arena and the source text, so it is valid for the shorter of the two.
//! Resetting the arena frees all trees wholesale — the borrow checker will
//! not let a tree outlive it.
//!
//! For repeated parses, construct a [`Parser`] once and feed it new source
//! with [`Parser::reset`], resetting the arena between generations to reuse
//! its memory.
//!
//! ## Dialect conversion
//!
//! ```
//! use sqlbridge_core::{convert_dialect, Dialect};
//!
//! let sql = "SELECT IFNULL(name, 'x') FROM users WHERE id = :id";
//! let pg = convert_dialect(sql, Dialect::Postgres).unwrap();
//! assert_eq!(pg, r#"SELECT COALESCE("name", 'x') FROM "users" WHERE ("id" = $1)"#);
//! ```
//!
//! ## Tokenizing
//!
//! ```
//! use sqlbridge_core::{tokenize, TokenKind};
//!
//! let mut buf = Vec::new();
//! tokenize("SELECT 1", &mut buf);
//! assert_eq!(buf.len(), 3); // SELECT, 1, EOF
//! assert_eq!(buf[2].kind, TokenKind::Eof);
//! ```

pub mod arena;
pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

use thiserror::Error;

pub use arena::Arena;
pub use ast::{Expr, Statement};
pub use dialect::{render_statements, Dialect, RenderError};
pub use lexer::{tokenize, Keyword, Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};

/// Any failure this crate can surface: a parse error or a strict-mode
/// render error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Parses the first statement of `source`. Returns `Ok(None)` when the
/// source holds nothing but whitespace, comments, and semicolons.
///
/// # Errors
///
/// Returns a [`ParseError`] with the position of the first offending token.
pub fn parse_one<'a>(
    arena: &'a Arena,
    source: &'a str,
) -> Result<Option<Statement<'a>>, ParseError> {
    Parser::new(arena, source).next_statement()
}

/// Parses all semicolon-separated statements of `source`.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse_all<'a>(
    arena: &'a Arena,
    source: &'a str,
) -> Result<Vec<Statement<'a>>, ParseError> {
    Parser::new(arena, source).parse_all()
}

/// Parses `source` and renders it for `target` in one step, non-strict.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the source does not parse. Non-strict
/// rendering itself cannot fail.
pub fn convert_dialect(source: &str, target: Dialect) -> Result<String, Error> {
    convert_dialect_strict(source, target, false)
}

/// Like [`convert_dialect`] with an explicit strict flag. In strict mode
/// rendering fails when an upsert cannot be reshaped for the target.
///
/// # Errors
///
/// Returns [`Error::Parse`] or, in strict mode, [`Error::Render`].
pub fn convert_dialect_strict(
    source: &str,
    target: Dialect,
    strict: bool,
) -> Result<String, Error> {
    let arena = Arena::new();
    let statements = parse_all(&arena, source)?;
    Ok(render_statements(&statements, target, strict)?)
}
