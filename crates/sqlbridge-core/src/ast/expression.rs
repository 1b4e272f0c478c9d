//! Expression nodes.
//!
//! All nodes live in the parse [`Arena`](crate::Arena); child edges are
//! plain references, so every expression value is `Copy` and pattern-matches
//! without indirection helpers. Leaf nodes borrow their raw bytes from the
//! source text.

use crate::lexer::TokenKind;

use super::statement::SelectStmt;
use super::types::DataType;

/// A (possibly quoted) identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ident<'a> {
    /// Original bytes, including any quotes.
    pub raw: &'a str,
    /// Resolved name: quote pair stripped (inner bytes untouched), or the
    /// unquoted spelling lowercased.
    pub text: &'a str,
    /// Byte offset of the first token.
    pub pos: u32,
}

/// A dotted name such as `schema.table.column`. Parts are non-empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifiedName<'a> {
    pub parts: &'a [Ident<'a>],
}

impl<'a> QualifiedName<'a> {
    /// Byte offset of the first part.
    #[must_use]
    pub fn pos(&self) -> u32 {
        self.parts.first().map_or(0, |p| p.pos)
    }
}

/// A numeric, string, boolean, hex, or bit literal. `raw` keeps the exact
/// source spelling, quotes included; `kind` is the producing token kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal<'a> {
    pub raw: &'a str,
    pub kind: TokenKind,
    pub pos: u32,
}

/// A query parameter: `?`, `?1`, `:name`, `@name`, or `$1` / `$name`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'a> {
    /// The parameter token as written, placeholder included.
    pub raw: &'a str,
    pub pos: u32,
}

/// `left op right`. `op` is the operator token kind, which keeps the full
/// operator surface (JSON extractors included) in one representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'a> {
    pub left: Expr<'a>,
    pub op: TokenKind,
    pub right: Expr<'a>,
    pub pos: u32,
}

/// A prefix unary operation: `-x`, `+x`, `~x`, `NOT x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'a> {
    pub op: TokenKind,
    pub expr: Expr<'a>,
    pub pos: u32,
}

/// A function invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionCall<'a> {
    pub name: QualifiedName<'a>,
    pub args: &'a [Expr<'a>],
    /// `f(DISTINCT …)`
    pub distinct: bool,
    /// `COUNT(*)`
    pub star: bool,
    pub pos: u32,
}

/// One `WHEN cond THEN result` arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhenClause<'a> {
    pub cond: Expr<'a>,
    pub result: Expr<'a>,
}

/// `CASE [operand] WHEN … THEN … [ELSE …] END`. `operand` is `None` for the
/// searched form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseExpr<'a> {
    pub operand: Option<Expr<'a>>,
    pub whens: &'a [WhenClause<'a>],
    pub else_expr: Option<Expr<'a>>,
    pub pos: u32,
}

/// `expr [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetweenExpr<'a> {
    pub expr: Expr<'a>,
    pub low: Expr<'a>,
    pub high: Expr<'a>,
    pub negated: bool,
    pub pos: u32,
}

/// `expr [NOT] IN (list)` or `expr [NOT] IN (subquery)`. Exactly one of
/// `list` / `subquery` is populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InExpr<'a> {
    pub expr: Expr<'a>,
    pub list: &'a [Expr<'a>],
    pub subquery: Option<&'a SelectStmt<'a>>,
    pub negated: bool,
    pub pos: u32,
}

/// `expr [NOT] LIKE pattern [ESCAPE esc]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikeExpr<'a> {
    pub expr: Expr<'a>,
    pub pattern: Expr<'a>,
    pub escape: Option<Expr<'a>>,
    pub negated: bool,
    pub pos: u32,
}

/// `expr IS [NOT] NULL`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsNullExpr<'a> {
    pub expr: Expr<'a>,
    pub negated: bool,
    pub pos: u32,
}

/// `[NOT] EXISTS (subquery)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistsExpr<'a> {
    pub subquery: &'a SelectStmt<'a>,
    pub negated: bool,
    pub pos: u32,
}

/// A scalar subquery in expression position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubqueryExpr<'a> {
    pub subquery: &'a SelectStmt<'a>,
    pub pos: u32,
}

/// `CAST(expr AS type)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'a> {
    pub expr: Expr<'a>,
    pub data_type: &'a DataType<'a>,
    pub pos: u32,
}

/// `INTERVAL expr unit` (MySQL form).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalExpr<'a> {
    pub expr: Expr<'a>,
    pub unit: &'a str,
    pub pos: u32,
}

/// A SQL expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'a> {
    /// A bare identifier.
    Ident(&'a Ident<'a>),
    /// A dotted identifier; the last part may be `*` (as in `t.*`).
    Qualified(&'a QualifiedName<'a>),
    /// A bare `*`; carries its byte offset.
    Star(u32),
    /// A literal value.
    Literal(&'a Literal<'a>),
    /// `NULL`; carries its byte offset.
    Null(u32),
    /// A parameter placeholder.
    Param(&'a Param<'a>),
    /// A binary operation.
    Binary(&'a BinaryExpr<'a>),
    /// A unary operation.
    Unary(&'a UnaryExpr<'a>),
    /// A function call.
    Function(&'a FunctionCall<'a>),
    /// A CASE expression.
    Case(&'a CaseExpr<'a>),
    /// A BETWEEN range test.
    Between(&'a BetweenExpr<'a>),
    /// An IN membership test.
    In(&'a InExpr<'a>),
    /// A LIKE pattern match.
    Like(&'a LikeExpr<'a>),
    /// An IS [NOT] NULL test.
    IsNull(&'a IsNullExpr<'a>),
    /// An EXISTS test.
    Exists(&'a ExistsExpr<'a>),
    /// A scalar subquery.
    Subquery(&'a SubqueryExpr<'a>),
    /// A CAST.
    Cast(&'a CastExpr<'a>),
    /// An INTERVAL expression.
    Interval(&'a IntervalExpr<'a>),
    /// A bare select in expression position.
    Select(&'a SelectStmt<'a>),
}

impl<'a> Expr<'a> {
    /// Byte offset of the expression's first token.
    #[must_use]
    pub fn pos(&self) -> u32 {
        match self {
            Self::Ident(n) => n.pos,
            Self::Qualified(q) => q.pos(),
            Self::Star(pos) | Self::Null(pos) => *pos,
            Self::Literal(l) => l.pos,
            Self::Param(p) => p.pos,
            Self::Binary(b) => b.pos,
            Self::Unary(u) => u.pos,
            Self::Function(f) => f.pos,
            Self::Case(c) => c.pos,
            Self::Between(b) => b.pos,
            Self::In(i) => i.pos,
            Self::Like(l) => l.pos,
            Self::IsNull(i) => i.pos,
            Self::Exists(e) => e.pos,
            Self::Subquery(s) => s.pos,
            Self::Cast(c) => c.pos,
            Self::Interval(i) => i.pos,
            Self::Select(s) => s.pos,
        }
    }
}
