//! The recursive-descent statement parser and Pratt expression parser.

use bumpalo::collections::Vec as BumpVec;

use crate::arena::Arena;
use crate::ast::{
    Assignment, BetweenExpr, BinaryExpr, CallStmt, CaseExpr, CastExpr, Cte, DeleteStmt,
    ExistsExpr, ExplainStmt, Expr, FunctionCall, Ident, InExpr, InsertStmt, IntervalExpr,
    IsNullExpr, JoinKind, JoinTable, LikeExpr, LimitClause, Literal, OrderByItem, Param,
    QualifiedName, SelectColumn, SelectStmt, SetOp, SetOperation, ShowStmt, SimpleTable,
    Statement, SubqueryExpr, SubqueryTable, TableRef, TransactionStmt, TxAction, UnaryExpr,
    UpdateStmt, UseStmt, WhenClause, WithClause,
};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

use super::error::ParseError;
use super::pratt::{infix_precedence, PREC_COMPARISON, PREC_LOWEST, PREC_SHIFT};

/// A reusable SQL parser.
///
/// The parser drives the lexer with a single-slot lookahead and allocates
/// every tree node from the caller-provided [`Arena`]. Trees returned by
/// [`Parser::next_statement`] stay valid until the arena is reset, which the
/// borrow checker enforces.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    tok: Token<'a>,
    peeked: Option<Token<'a>>,
    pub(super) arena: &'a Arena,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `src`, allocating nodes from `arena`.
    #[must_use]
    pub fn new(arena: &'a Arena, src: &'a str) -> Self {
        let mut lexer = Lexer::new(src);
        let tok = lexer.next_token();
        Self {
            lexer,
            tok,
            peeked: None,
            arena,
        }
    }

    /// Restarts the parser on new source text, keeping the same arena.
    /// Previously returned trees remain allocated until the arena itself is
    /// reset.
    pub fn reset(&mut self, src: &'a str) {
        self.lexer.reset(src);
        self.peeked = None;
        self.tok = self.lexer.next_token();
    }

    /// Parses the next statement, skipping separator semicolons. Returns
    /// `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] positioned at the first offending token.
    pub fn next_statement(&mut self) -> Result<Option<Statement<'a>>, ParseError> {
        self.skip_semicolons();
        if self.tok.is_eof() {
            return Ok(None);
        }
        let stmt = self.parse_statement()?;
        self.skip_semicolons();
        Ok(Some(stmt))
    }

    /// Parses all remaining statements.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_all(&mut self) -> Result<Vec<Statement<'a>>, ParseError> {
        let mut stmts = Vec::new();
        while let Some(stmt) = self.next_statement()? {
            stmts.push(stmt);
        }
        Ok(stmts)
    }

    // ---- token plumbing ----

    pub(super) fn advance(&mut self) -> Token<'a> {
        let next = match self.peeked.take() {
            Some(tok) => tok,
            None => self.lexer.next_token(),
        };
        std::mem::replace(&mut self.tok, next)
    }

    pub(super) fn peek_token(&mut self) -> Token<'a> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token());
        }
        self.peeked.unwrap()
    }

    fn skip_semicolons(&mut self) {
        while self.at(TokenKind::Semicolon) {
            self.advance();
        }
    }

    pub(super) fn current(&self) -> Token<'a> {
        self.tok
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.tok.kind == kind
    }

    pub(super) fn at_keyword(&self, kw: Keyword) -> bool {
        self.tok.kind == TokenKind::Keyword(kw)
    }

    /// True when the current token is an unquoted identifier spelled `word`
    /// (case-insensitive).
    pub(super) fn at_ident(&self, word: &str) -> bool {
        self.at(TokenKind::Ident) && self.tok.raw.eq_ignore_ascii_case(word)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "expected {}, got {} ({:?})",
                kind, self.tok.kind, self.tok.raw
            )))
        }
    }

    pub(super) fn eat_keyword(&mut self, kw: Keyword) -> Result<(), ParseError> {
        if self.at_keyword(kw) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected keyword {}, got {:?}",
                kw, self.tok.raw
            )))
        }
    }

    pub(super) fn eat_if(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_if_keyword(&mut self, kw: Keyword) -> bool {
        if self.at_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            pos: self.tok.pos,
            line: self.tok.line,
            col: self.tok.col,
        }
    }

    // ---- identifier resolution ----

    /// Lowercases ASCII into the arena, or borrows `raw` unchanged when it
    /// has no uppercase bytes.
    pub(super) fn lower_str(&self, raw: &'a str) -> &'a str {
        if raw.bytes().any(|b| b.is_ascii_uppercase()) {
            self.arena.alloc_str(&raw.to_ascii_lowercase())
        } else {
            raw
        }
    }

    /// Strips a backtick or double-quote pair and collapses doubled inner
    /// delimiters, or lowercases an unquoted spelling.
    fn unquote(&self, raw: &'a str) -> &'a str {
        let bytes = raw.as_bytes();
        if bytes.len() >= 2
            && (bytes[0] == b'`' || bytes[0] == b'"')
            && bytes[bytes.len() - 1] == bytes[0]
        {
            let inner = &raw[1..raw.len() - 1];
            let (doubled, single) = if bytes[0] == b'`' {
                ("``", "`")
            } else {
                ("\"\"", "\"")
            };
            if inner.contains(doubled) {
                self.arena.alloc_str(&inner.replace(doubled, single))
            } else {
                inner
            }
        } else {
            self.lower_str(raw)
        }
    }

    /// Parses an identifier. Quoted forms are accepted, and keywords may be
    /// used as identifiers at name positions.
    pub(super) fn parse_ident(&mut self) -> Result<Ident<'a>, ParseError> {
        let tok = self.tok;
        match tok.kind {
            TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted => {
                self.advance();
                Ok(Ident {
                    raw: tok.raw,
                    text: self.unquote(tok.raw),
                    pos: tok.pos,
                })
            }
            TokenKind::Keyword(_) => {
                self.advance();
                Ok(Ident {
                    raw: tok.raw,
                    text: self.lower_str(tok.raw),
                    pos: tok.pos,
                })
            }
            _ => Err(self.error(format!("expected identifier, got {:?}", tok.raw))),
        }
    }

    /// Parses a dotted name. A trailing `.*` becomes a final `*` part.
    pub(super) fn parse_qualified_name(&mut self) -> Result<QualifiedName<'a>, ParseError> {
        let mut parts = BumpVec::new_in(self.arena.bump());
        parts.push(self.parse_ident()?);
        while self.eat_if(TokenKind::Dot) {
            if self.at(TokenKind::Star) {
                let tok = self.advance();
                parts.push(Ident {
                    raw: tok.raw,
                    text: "*",
                    pos: tok.pos,
                });
                break;
            }
            parts.push(self.parse_ident()?);
        }
        Ok(QualifiedName {
            parts: parts.into_bump_slice(),
        })
    }

    pub(super) fn parse_ident_list(&mut self) -> Result<&'a [Ident<'a>], ParseError> {
        let mut idents = BumpVec::new_in(self.arena.bump());
        loop {
            idents.push(self.parse_ident()?);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(idents.into_bump_slice())
    }

    // ---- statement dispatch ----

    fn parse_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        match self.tok.kind {
            TokenKind::Keyword(Keyword::Select) => Ok(Statement::Select(self.parse_select()?)),
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(),
            TokenKind::Keyword(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Keyword::Replace) => Ok(Statement::Insert(self.parse_replace()?)),
            TokenKind::Keyword(Keyword::Update) => Ok(Statement::Update(self.parse_update()?)),
            TokenKind::Keyword(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Truncate) => {
                Ok(Statement::Truncate(self.parse_truncate()?))
            }
            TokenKind::Keyword(Keyword::Use) => Ok(Statement::Use(self.parse_use()?)),
            TokenKind::Keyword(Keyword::Rollback) => {
                Ok(Statement::Transaction(self.parse_rollback()?))
            }
            TokenKind::Keyword(Keyword::Set) => self.parse_set_stmt(),
            TokenKind::Keyword(Keyword::Show) => Ok(Statement::Show(self.parse_show()?)),
            TokenKind::Keyword(Keyword::Explain) => {
                Ok(Statement::Explain(self.parse_explain()?))
            }
            TokenKind::Ident => self.parse_ident_led_statement(),
            _ => Err(self.error(format!(
                "unexpected token {:?} at start of statement",
                self.tok.raw
            ))),
        }
    }

    /// A WITH prefix routes to the DML statement it decorates; the clause is
    /// attached to that statement rather than being a statement itself.
    fn parse_with_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        let pos = self.tok.pos;
        let with = self.parse_with()?;
        match self.tok.kind {
            TokenKind::Keyword(Keyword::Select) => {
                Ok(Statement::Select(self.parse_select_tail(pos, Some(with))?))
            }
            TokenKind::Keyword(Keyword::Insert) => {
                let mut stmt = self.parse_insert_stmt()?;
                stmt.with = Some(with);
                Ok(Statement::Insert(self.arena.alloc(stmt)))
            }
            TokenKind::Keyword(Keyword::Replace) => {
                let mut stmt = self.parse_replace_stmt()?;
                stmt.with = Some(with);
                Ok(Statement::Insert(self.arena.alloc(stmt)))
            }
            TokenKind::Keyword(Keyword::Update) => {
                let mut stmt = self.parse_update_stmt()?;
                stmt.with = Some(with);
                Ok(Statement::Update(self.arena.alloc(stmt)))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                let mut stmt = self.parse_delete_stmt()?;
                stmt.with = Some(with);
                Ok(Statement::Delete(self.arena.alloc(stmt)))
            }
            _ => Err(self.error(format!(
                "WITH must be followed by SELECT/INSERT/UPDATE/DELETE, got {:?}",
                self.tok.raw
            ))),
        }
    }

    /// Statements introduced by bare identifiers: `BEGIN`, `COMMIT`,
    /// `START`, `SAVEPOINT`, `RELEASE`, `CALL`.
    fn parse_ident_led_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        if self.at_ident("begin") {
            Ok(Statement::Transaction(self.parse_begin()?))
        } else if self.at_ident("commit") {
            Ok(Statement::Transaction(self.parse_commit()?))
        } else if self.at_ident("start") {
            Ok(Statement::Transaction(self.parse_start_transaction()?))
        } else if self.at_ident("savepoint") {
            Ok(Statement::Transaction(self.parse_savepoint()?))
        } else if self.at_ident("release") {
            Ok(Statement::Transaction(self.parse_release_savepoint()?))
        } else if self.at_ident("call") {
            Ok(Statement::Call(self.parse_call()?))
        } else {
            Err(self.error(format!(
                "unexpected token {:?} at start of statement",
                self.tok.raw
            )))
        }
    }

    // ---- SELECT ----

    pub(super) fn parse_select(&mut self) -> Result<&'a SelectStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        let with = if self.at_keyword(Keyword::With) {
            Some(self.parse_with()?)
        } else {
            None
        };
        self.parse_select_tail(pos, with)
    }

    fn parse_select_tail(
        &mut self,
        pos: u32,
        with: Option<&'a WithClause<'a>>,
    ) -> Result<&'a SelectStmt<'a>, ParseError> {
        let mut head = self.parse_select_core(pos)?;
        head.with = with;

        // UNION / INTERSECT / EXCEPT chain, flattened left-leaning.
        let mut chain = Vec::new();
        loop {
            let op = match self.tok.kind {
                TokenKind::Keyword(Keyword::Union) => SetOp::Union,
                TokenKind::Keyword(Keyword::Intersect) => SetOp::Intersect,
                TokenKind::Keyword(Keyword::Except) => SetOp::Except,
                _ => break,
            };
            self.advance();
            let all = self.eat_if_keyword(Keyword::All);
            let right_pos = self.tok.pos;
            chain.push((op, all, self.parse_select_core(right_pos)?));
        }
        let mut tail: Option<&'a SetOperation<'a>> = None;
        for (op, all, mut right) in chain.into_iter().rev() {
            right.set_op = tail;
            let right = &*self.arena.alloc(right);
            tail = Some(self.arena.alloc(SetOperation { op, all, right }));
        }
        head.set_op = tail;
        Ok(self.arena.alloc(head))
    }

    fn parse_select_core(&mut self, pos: u32) -> Result<SelectStmt<'a>, ParseError> {
        self.eat_keyword(Keyword::Select)?;
        let distinct = self.eat_if_keyword(Keyword::Distinct);
        let _ = self.eat_if_keyword(Keyword::All);

        let columns = self.parse_select_columns()?;

        let from = if self.eat_if_keyword(Keyword::From) {
            self.parse_table_refs()?
        } else {
            &[]
        };

        let where_clause = if self.eat_if_keyword(Keyword::Where) {
            Some(self.parse_expr(PREC_LOWEST)?)
        } else {
            None
        };

        let group_by = if self.at_keyword(Keyword::Group)
            && self.peek_token().kind == TokenKind::Keyword(Keyword::By)
        {
            self.advance();
            self.advance();
            self.parse_expr_list()?
        } else {
            &[]
        };

        let having = if self.eat_if_keyword(Keyword::Having) {
            Some(self.parse_expr(PREC_LOWEST)?)
        } else {
            None
        };

        let order_by = if self.at_keyword(Keyword::Order)
            && self.peek_token().kind == TokenKind::Keyword(Keyword::By)
        {
            self.advance();
            self.advance();
            self.parse_order_by()?
        } else {
            &[]
        };

        let limit = if self.eat_if_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };

        Ok(SelectStmt {
            with: None,
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            set_op: None,
            pos,
        })
    }

    fn parse_with(&mut self) -> Result<&'a WithClause<'a>, ParseError> {
        self.advance(); // WITH
        let recursive = self.eat_if_keyword(Keyword::Recursive);
        let mut ctes = BumpVec::new_in(self.arena.bump());
        loop {
            let name = self.parse_ident()?;
            let mut columns: &'a [Ident<'a>] = &[];
            if self.at(TokenKind::LParen)
                && matches!(
                    self.peek_token().kind,
                    TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
                )
            {
                self.advance();
                columns = self.parse_ident_list()?;
                self.eat(TokenKind::RParen)?;
            }
            self.eat_keyword(Keyword::As)?;
            self.eat(TokenKind::LParen)?;
            let select = self.parse_select()?;
            self.eat(TokenKind::RParen)?;
            ctes.push(Cte {
                name,
                columns,
                select,
            });
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(self.arena.alloc(WithClause {
            recursive,
            ctes: ctes.into_bump_slice(),
        }))
    }

    fn parse_select_columns(&mut self) -> Result<&'a [SelectColumn<'a>], ParseError> {
        let mut columns = BumpVec::new_in(self.arena.bump());
        loop {
            columns.push(self.parse_select_column()?);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(columns.into_bump_slice())
    }

    fn parse_select_column(&mut self) -> Result<SelectColumn<'a>, ParseError> {
        if self.at(TokenKind::Star) {
            let tok = self.advance();
            return Ok(SelectColumn {
                expr: Expr::Star(tok.pos),
                alias: None,
                star: true,
            });
        }
        let expr = self.parse_expr(PREC_LOWEST)?;
        let alias = if self.eat_if_keyword(Keyword::As)
            || matches!(
                self.tok.kind,
                TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
            ) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        Ok(SelectColumn {
            expr,
            alias,
            star: false,
        })
    }

    // ---- table references ----

    fn parse_table_refs(&mut self) -> Result<&'a [TableRef<'a>], ParseError> {
        let mut refs = BumpVec::new_in(self.arena.bump());
        refs.push(self.parse_table_ref()?);
        while self.eat_if(TokenKind::Comma) {
            refs.push(self.parse_table_ref()?);
        }
        Ok(refs.into_bump_slice())
    }

    fn parse_table_ref(&mut self) -> Result<TableRef<'a>, ParseError> {
        let mut left = if self.eat_if(TokenKind::LParen) {
            if self.at_keyword(Keyword::Select) || self.at_keyword(Keyword::With) {
                let subquery = self.parse_select()?;
                self.eat(TokenKind::RParen)?;
                let alias = self.parse_optional_alias()?;
                TableRef::Subquery(self.arena.alloc(SubqueryTable {
                    subquery,
                    alias,
                    pos: subquery.pos,
                }))
            } else {
                // parenthesized join
                let inner = self.parse_table_ref()?;
                self.eat(TokenKind::RParen)?;
                inner
            }
        } else {
            let name = self.parse_qualified_name()?;
            let alias = self.parse_optional_alias()?;
            TableRef::Table(self.arena.alloc(SimpleTable { name, alias }))
        };

        loop {
            match self.tok.kind {
                TokenKind::Keyword(
                    Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
                    | Keyword::Natural
                    | Keyword::Join,
                ) => {
                    left = self.parse_join(left)?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_join(&mut self, left: TableRef<'a>) -> Result<TableRef<'a>, ParseError> {
        let kind = match self.tok.kind {
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Inner
            }
            TokenKind::Keyword(Keyword::Left) => {
                self.advance();
                self.eat_if_keyword(Keyword::Outer);
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Left
            }
            TokenKind::Keyword(Keyword::Right) => {
                self.advance();
                self.eat_if_keyword(Keyword::Outer);
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Right
            }
            TokenKind::Keyword(Keyword::Full) => {
                self.advance();
                self.eat_if_keyword(Keyword::Outer);
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Full
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Cross
            }
            TokenKind::Keyword(Keyword::Natural) => {
                self.advance();
                self.eat_keyword(Keyword::Join)?;
                JoinKind::Natural
            }
            _ => {
                self.advance(); // JOIN
                JoinKind::Inner
            }
        };
        let pos = self.tok.pos;
        let right = self.parse_table_ref()?;

        let mut on = None;
        let mut using: &'a [Ident<'a>] = &[];
        if self.eat_if_keyword(Keyword::On) {
            on = Some(self.parse_expr(PREC_LOWEST)?);
        } else if self.eat_if_keyword(Keyword::Using) {
            self.eat(TokenKind::LParen)?;
            using = self.parse_ident_list()?;
            self.eat(TokenKind::RParen)?;
        }
        Ok(TableRef::Join(self.arena.alloc(JoinTable {
            left,
            right,
            kind,
            on,
            using,
            pos,
        })))
    }

    fn parse_optional_alias(&mut self) -> Result<Option<Ident<'a>>, ParseError> {
        self.eat_if_keyword(Keyword::As);
        if matches!(
            self.tok.kind,
            TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
        ) {
            Ok(Some(self.parse_ident()?))
        } else {
            Ok(None)
        }
    }

    // ---- expressions (Pratt) ----

    pub(super) fn parse_expr(&mut self, min_prec: u8) -> Result<Expr<'a>, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            match self.tok.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    let pos = self.tok.pos;
                    self.advance();
                    let negated = self.eat_if_keyword(Keyword::Not);
                    self.eat_keyword(Keyword::Null)?;
                    left = Expr::IsNull(self.arena.alloc(IsNullExpr {
                        expr: left,
                        negated,
                        pos,
                    }));
                    continue;
                }
                TokenKind::Keyword(Keyword::Not) => {
                    // NOT LIKE / NOT IN / NOT BETWEEN; a bare NOT here ends
                    // the expression (it only binds as a prefix).
                    let pos = self.tok.pos;
                    match self.peek_token().kind {
                        TokenKind::Keyword(Keyword::Like) => {
                            self.advance();
                            self.advance();
                            left = self.parse_like_tail(left, pos, true)?;
                            continue;
                        }
                        TokenKind::Keyword(Keyword::In) => {
                            self.advance();
                            self.advance();
                            left = self.parse_in_rhs(left, pos, true)?;
                            continue;
                        }
                        TokenKind::Keyword(Keyword::Between) => {
                            self.advance();
                            self.advance();
                            left = self.parse_between_tail(left, pos, true)?;
                            continue;
                        }
                        _ => {}
                    }
                }
                TokenKind::Keyword(Keyword::Like) => {
                    let pos = self.tok.pos;
                    self.advance();
                    left = self.parse_like_tail(left, pos, false)?;
                    continue;
                }
                TokenKind::Keyword(Keyword::In) => {
                    let pos = self.tok.pos;
                    self.advance();
                    left = self.parse_in_rhs(left, pos, false)?;
                    continue;
                }
                TokenKind::Keyword(Keyword::Between) => {
                    let pos = self.tok.pos;
                    self.advance();
                    left = self.parse_between_tail(left, pos, false)?;
                    continue;
                }
                _ => {}
            }

            let Some(prec) = infix_precedence(self.tok.kind) else {
                break;
            };
            if prec <= min_prec {
                break;
            }
            let op = self.tok.kind;
            let pos = self.tok.pos;
            self.advance();
            let right = self.parse_expr(prec)?;
            left = Expr::Binary(self.arena.alloc(BinaryExpr {
                left,
                op,
                right,
                pos,
            }));
        }
        Ok(left)
    }

    /// Pattern and escape bind above the shift level, so concatenation and
    /// arithmetic stay inside the pattern (`LIKE 'x' || 'y'`) while
    /// comparisons and logic end it.
    fn parse_like_tail(
        &mut self,
        expr: Expr<'a>,
        pos: u32,
        negated: bool,
    ) -> Result<Expr<'a>, ParseError> {
        let pattern = self.parse_expr(PREC_SHIFT)?;
        let escape = if self.eat_if_keyword(Keyword::Escape) {
            Some(self.parse_expr(PREC_SHIFT)?)
        } else {
            None
        };
        Ok(Expr::Like(self.arena.alloc(LikeExpr {
            expr,
            pattern,
            escape,
            negated,
            pos,
        })))
    }

    /// Both bounds parse just above comparison level; AND separates them.
    fn parse_between_tail(
        &mut self,
        expr: Expr<'a>,
        pos: u32,
        negated: bool,
    ) -> Result<Expr<'a>, ParseError> {
        let low = self.parse_expr(PREC_COMPARISON + 1)?;
        self.eat_keyword(Keyword::And)?;
        let high = self.parse_expr(PREC_COMPARISON + 1)?;
        Ok(Expr::Between(self.arena.alloc(BetweenExpr {
            expr,
            low,
            high,
            negated,
            pos,
        })))
    }

    fn parse_in_rhs(
        &mut self,
        expr: Expr<'a>,
        pos: u32,
        negated: bool,
    ) -> Result<Expr<'a>, ParseError> {
        self.eat(TokenKind::LParen)?;
        let (list, subquery) = if self.at_keyword(Keyword::Select) || self.at_keyword(Keyword::With)
        {
            (&[][..], Some(self.parse_select()?))
        } else {
            (self.parse_expr_list()?, None)
        };
        self.eat(TokenKind::RParen)?;
        Ok(Expr::In(self.arena.alloc(InExpr {
            expr,
            list,
            subquery,
            negated,
            pos,
        })))
    }

    fn parse_unary(&mut self) -> Result<Expr<'a>, ParseError> {
        match self.tok.kind {
            TokenKind::Minus | TokenKind::Plus | TokenKind::Tilde => {
                let op = self.tok.kind;
                let pos = self.tok.pos;
                self.advance();
                let expr = self.parse_unary()?;
                Ok(Expr::Unary(self.arena.alloc(UnaryExpr { op, expr, pos })))
            }
            TokenKind::Keyword(Keyword::Not) => {
                let pos = self.tok.pos;
                self.advance();
                let expr = self.parse_unary()?;
                Ok(Expr::Unary(self.arena.alloc(UnaryExpr {
                    op: TokenKind::Keyword(Keyword::Not),
                    expr,
                    pos,
                })))
            }
            TokenKind::Keyword(Keyword::Exists) => {
                let pos = self.tok.pos;
                self.advance();
                self.eat(TokenKind::LParen)?;
                let subquery = self.parse_select()?;
                self.eat(TokenKind::RParen)?;
                Ok(Expr::Exists(self.arena.alloc(ExistsExpr {
                    subquery,
                    negated: false,
                    pos,
                })))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr<'a>, ParseError> {
        match self.tok.kind {
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::HexLit
            | TokenKind::BitLit
            | TokenKind::Keyword(Keyword::True)
            | TokenKind::Keyword(Keyword::False) => {
                let tok = self.advance();
                Ok(Expr::Literal(self.arena.alloc(Literal {
                    raw: tok.raw,
                    kind: tok.kind,
                    pos: tok.pos,
                })))
            }
            TokenKind::Keyword(Keyword::Null) => {
                let tok = self.advance();
                Ok(Expr::Null(tok.pos))
            }
            TokenKind::NamedParam | TokenKind::Question => {
                let tok = self.advance();
                Ok(Expr::Param(self.arena.alloc(Param {
                    raw: tok.raw,
                    pos: tok.pos,
                })))
            }
            TokenKind::Star => {
                let tok = self.advance();
                Ok(Expr::Star(tok.pos))
            }
            TokenKind::LParen => {
                self.advance();
                if self.at_keyword(Keyword::Select) || self.at_keyword(Keyword::With) {
                    let subquery = self.parse_select()?;
                    self.eat(TokenKind::RParen)?;
                    Ok(Expr::Subquery(self.arena.alloc(SubqueryExpr {
                        subquery,
                        pos: subquery.pos,
                    })))
                } else {
                    let expr = self.parse_expr(PREC_LOWEST)?;
                    self.eat(TokenKind::RParen)?;
                    Ok(expr)
                }
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expr(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted => {
                if self.at_ident("interval")
                    && matches!(
                        self.peek_token().kind,
                        TokenKind::Int
                            | TokenKind::Float
                            | TokenKind::String
                            | TokenKind::NamedParam
                            | TokenKind::Question
                    )
                {
                    return self.parse_interval();
                }
                let name = self.parse_qualified_name()?;
                if self.at(TokenKind::LParen) {
                    return self.parse_func_call(name);
                }
                if name.parts.len() == 1 {
                    Ok(Expr::Ident(self.arena.alloc(name.parts[0])))
                } else {
                    Ok(Expr::Qualified(self.arena.alloc(name)))
                }
            }
            // Keywords that double as function names: REPLACE(), LEFT(),
            // RIGHT(), INSERT().
            TokenKind::Keyword(
                Keyword::Replace | Keyword::Left | Keyword::Right | Keyword::Insert,
            ) => {
                let tok = self.advance();
                let part = Ident {
                    raw: tok.raw,
                    text: self.lower_str(tok.raw),
                    pos: tok.pos,
                };
                if self.at(TokenKind::LParen) {
                    let mut parts = BumpVec::new_in(self.arena.bump());
                    parts.push(part);
                    let name = QualifiedName {
                        parts: parts.into_bump_slice(),
                    };
                    return self.parse_func_call(name);
                }
                Ok(Expr::Ident(self.arena.alloc(part)))
            }
            _ => Err(self.error(format!(
                "unexpected token {:?} in expression",
                self.tok.raw
            ))),
        }
    }

    fn parse_interval(&mut self) -> Result<Expr<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // INTERVAL
        let expr = self.parse_unary()?;
        let unit = match self.tok.kind {
            TokenKind::Ident | TokenKind::Keyword(_) => self.advance().raw,
            _ => return Err(self.error(format!("expected interval unit, got {:?}", self.tok.raw))),
        };
        Ok(Expr::Interval(self.arena.alloc(IntervalExpr {
            expr,
            unit,
            pos,
        })))
    }

    fn parse_case_expr(&mut self) -> Result<Expr<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // CASE
        let operand = if self.at_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expr(PREC_LOWEST)?)
        };
        let mut whens = BumpVec::new_in(self.arena.bump());
        while self.eat_if_keyword(Keyword::When) {
            let cond = self.parse_expr(PREC_LOWEST)?;
            self.eat_keyword(Keyword::Then)?;
            let result = self.parse_expr(PREC_LOWEST)?;
            whens.push(WhenClause { cond, result });
        }
        let else_expr = if self.eat_if_keyword(Keyword::Else) {
            Some(self.parse_expr(PREC_LOWEST)?)
        } else {
            None
        };
        self.eat_keyword(Keyword::End)?;
        Ok(Expr::Case(self.arena.alloc(CaseExpr {
            operand,
            whens: whens.into_bump_slice(),
            else_expr,
            pos,
        })))
    }

    fn parse_cast(&mut self) -> Result<Expr<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // CAST
        self.eat(TokenKind::LParen)?;
        let expr = self.parse_expr(PREC_LOWEST)?;
        self.eat_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.eat(TokenKind::RParen)?;
        Ok(Expr::Cast(self.arena.alloc(CastExpr {
            expr,
            data_type: self.arena.alloc(data_type),
            pos,
        })))
    }

    fn parse_func_call(&mut self, name: QualifiedName<'a>) -> Result<Expr<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // (
        let mut distinct = false;
        let mut star = false;
        let mut args: &'a [Expr<'a>] = &[];
        if self.at(TokenKind::RParen) {
            self.advance();
        } else if self.at(TokenKind::Star) {
            self.advance();
            star = true;
            self.eat(TokenKind::RParen)?;
        } else {
            distinct = self.eat_if_keyword(Keyword::Distinct);
            args = self.parse_expr_list()?;
            self.eat(TokenKind::RParen)?;
        }
        Ok(Expr::Function(self.arena.alloc(FunctionCall {
            name,
            args,
            distinct,
            star,
            pos,
        })))
    }

    pub(super) fn parse_expr_list(&mut self) -> Result<&'a [Expr<'a>], ParseError> {
        let mut exprs = BumpVec::new_in(self.arena.bump());
        loop {
            exprs.push(self.parse_expr(PREC_LOWEST)?);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs.into_bump_slice())
    }

    // ---- ORDER BY / LIMIT ----

    fn parse_order_by(&mut self) -> Result<&'a [OrderByItem<'a>], ParseError> {
        let mut items = BumpVec::new_in(self.arena.bump());
        loop {
            let expr = self.parse_expr(PREC_LOWEST)?;
            let desc = if self.eat_if_keyword(Keyword::Desc) {
                true
            } else {
                self.eat_if_keyword(Keyword::Asc);
                false
            };
            let mut nulls_first = None;
            if self.at_ident("nulls") {
                match self.peek_token().kind {
                    TokenKind::Keyword(Keyword::First) => {
                        self.advance();
                        self.advance();
                        nulls_first = Some(true);
                    }
                    TokenKind::Keyword(Keyword::Last) => {
                        self.advance();
                        self.advance();
                        nulls_first = Some(false);
                    }
                    _ => {}
                }
            }
            items.push(OrderByItem {
                expr,
                desc,
                nulls_first,
            });
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(items.into_bump_slice())
    }

    /// `LIMIT count [OFFSET skip]`, plus the MySQL `LIMIT skip, count`
    /// spelling normalized into the same shape.
    fn parse_limit(&mut self) -> Result<&'a LimitClause<'a>, ParseError> {
        let mut count = self.parse_expr(PREC_LOWEST)?;
        let mut offset = None;
        if self.eat_if_keyword(Keyword::Offset) {
            offset = Some(self.parse_expr(PREC_LOWEST)?);
        } else if self.eat_if(TokenKind::Comma) {
            let second = self.parse_expr(PREC_LOWEST)?;
            offset = Some(count);
            count = second;
        }
        Ok(self.arena.alloc(LimitClause { count, offset }))
    }

    // ---- INSERT / REPLACE ----

    fn parse_insert(&mut self) -> Result<&'a InsertStmt<'a>, ParseError> {
        let stmt = self.parse_insert_stmt()?;
        Ok(self.arena.alloc(stmt))
    }

    fn parse_insert_stmt(&mut self) -> Result<InsertStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // INSERT
        let ignore = self.eat_if_keyword(Keyword::Ignore);
        self.eat_if_keyword(Keyword::Into);
        let table = self.parse_qualified_name()?;

        let columns = if self.eat_if(TokenKind::LParen) {
            let cols = self.parse_ident_list()?;
            self.eat(TokenKind::RParen)?;
            cols
        } else {
            &[]
        };

        let mut select = None;
        let mut rows: &'a [&'a [Expr<'a>]] = &[];
        if self.at_keyword(Keyword::Select) || self.at_keyword(Keyword::With) {
            select = Some(self.parse_select()?);
        } else if self.eat_if_keyword(Keyword::Values) {
            rows = self.parse_value_rows()?;
        }

        let mut on_dup_key: &'a [Assignment<'a>] = &[];
        let mut on_conflict_target: &'a [Ident<'a>] = &[];
        let mut on_conflict_do_nothing = false;
        let mut on_conflict_update: &'a [Assignment<'a>] = &[];

        if self.at_keyword(Keyword::On) {
            let next = self.peek_token();
            if next.kind == TokenKind::Ident && next.raw.eq_ignore_ascii_case("duplicate") {
                // ON DUPLICATE KEY UPDATE; DUPLICATE arrives as an identifier
                self.advance(); // ON
                self.advance(); // DUPLICATE
                self.advance(); // KEY
                self.eat_keyword(Keyword::Update)?;
                on_dup_key = self.parse_assignments()?;
            } else if next.kind == TokenKind::Ident && next.raw.eq_ignore_ascii_case("conflict") {
                self.advance(); // ON
                self.advance(); // CONFLICT
                if self.eat_if(TokenKind::LParen) {
                    on_conflict_target = self.parse_ident_list()?;
                    self.eat(TokenKind::RParen)?;
                }
                if !self.at_ident("do") {
                    return Err(self.error(format!(
                        "expected DO in ON CONFLICT clause, got {:?}",
                        self.tok.raw
                    )));
                }
                self.advance(); // DO
                if self.at_ident("nothing") {
                    self.advance();
                    on_conflict_do_nothing = true;
                } else if self.eat_if_keyword(Keyword::Update) {
                    self.eat_keyword(Keyword::Set)?;
                    on_conflict_update = self.parse_assignments()?;
                } else {
                    return Err(self.error(format!(
                        "expected NOTHING or UPDATE in ON CONFLICT DO clause, got {:?}",
                        self.tok.raw
                    )));
                }
            }
        }

        Ok(InsertStmt {
            with: None,
            table,
            columns,
            rows,
            select,
            on_dup_key,
            on_conflict_target,
            on_conflict_do_nothing,
            on_conflict_update,
            ignore,
            replace: false,
            pos,
        })
    }

    fn parse_value_rows(&mut self) -> Result<&'a [&'a [Expr<'a>]], ParseError> {
        let mut rows = BumpVec::new_in(self.arena.bump());
        loop {
            self.eat(TokenKind::LParen)?;
            let row = self.parse_expr_list()?;
            self.eat(TokenKind::RParen)?;
            rows.push(row);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(rows.into_bump_slice())
    }

    fn parse_replace(&mut self) -> Result<&'a InsertStmt<'a>, ParseError> {
        let stmt = self.parse_replace_stmt()?;
        Ok(self.arena.alloc(stmt))
    }

    fn parse_replace_stmt(&mut self) -> Result<InsertStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // REPLACE
        self.eat_if_keyword(Keyword::Into);
        let table = self.parse_qualified_name()?;

        let columns = if self.eat_if(TokenKind::LParen) {
            let cols = self.parse_ident_list()?;
            self.eat(TokenKind::RParen)?;
            cols
        } else {
            &[]
        };

        let rows = if self.eat_if_keyword(Keyword::Values) {
            self.parse_value_rows()?
        } else {
            &[]
        };

        Ok(InsertStmt {
            with: None,
            table,
            columns,
            rows,
            select: None,
            on_dup_key: &[],
            on_conflict_target: &[],
            on_conflict_do_nothing: false,
            on_conflict_update: &[],
            ignore: false,
            replace: true,
            pos,
        })
    }

    // ---- UPDATE / DELETE ----

    fn parse_update(&mut self) -> Result<&'a UpdateStmt<'a>, ParseError> {
        let stmt = self.parse_update_stmt()?;
        Ok(self.arena.alloc(stmt))
    }

    fn parse_update_stmt(&mut self) -> Result<UpdateStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // UPDATE
        let tables = self.parse_table_refs()?;
        self.eat_keyword(Keyword::Set)?;
        let set = self.parse_assignments()?;
        let where_clause = if self.eat_if_keyword(Keyword::Where) {
            Some(self.parse_expr(PREC_LOWEST)?)
        } else {
            None
        };
        let order_by = self.parse_optional_order_by()?;
        let limit = if self.eat_if_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };
        Ok(UpdateStmt {
            with: None,
            tables,
            set,
            where_clause,
            order_by,
            limit,
            pos,
        })
    }

    fn parse_delete(&mut self) -> Result<&'a DeleteStmt<'a>, ParseError> {
        let stmt = self.parse_delete_stmt()?;
        Ok(self.arena.alloc(stmt))
    }

    fn parse_delete_stmt(&mut self) -> Result<DeleteStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // DELETE
        self.eat_if_keyword(Keyword::From);
        let from = self.parse_table_refs()?;
        let where_clause = if self.eat_if_keyword(Keyword::Where) {
            Some(self.parse_expr(PREC_LOWEST)?)
        } else {
            None
        };
        let order_by = self.parse_optional_order_by()?;
        let limit = if self.eat_if_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };
        Ok(DeleteStmt {
            with: None,
            from,
            where_clause,
            order_by,
            limit,
            pos,
        })
    }

    fn parse_optional_order_by(&mut self) -> Result<&'a [OrderByItem<'a>], ParseError> {
        if self.at_keyword(Keyword::Order)
            && self.peek_token().kind == TokenKind::Keyword(Keyword::By)
        {
            self.advance();
            self.advance();
            self.parse_order_by()
        } else {
            Ok(&[])
        }
    }

    pub(super) fn parse_assignments(&mut self) -> Result<&'a [Assignment<'a>], ParseError> {
        let mut assignments = BumpVec::new_in(self.arena.bump());
        loop {
            let column = self.parse_ident()?;
            self.eat(TokenKind::Eq)?;
            let value = self.parse_expr(PREC_LOWEST)?;
            assignments.push(Assignment { column, value });
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(assignments.into_bump_slice())
    }

    // ---- transactions and misc statements ----

    fn parse_begin(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // BEGIN
        if self.at_keyword(Keyword::Transaction) || self.at_ident("work") {
            self.advance();
        }
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::Begin,
            savepoint: None,
            options: &[],
            pos,
        }))
    }

    fn parse_commit(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // COMMIT
        if self.at_ident("work") {
            self.advance();
        }
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::Commit,
            savepoint: None,
            options: &[],
            pos,
        }))
    }

    fn parse_rollback(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // ROLLBACK
        if self.at_ident("work") {
            self.advance();
        }
        let mut savepoint = None;
        if self.eat_if_keyword(Keyword::To) {
            if self.at_ident("savepoint") {
                self.advance();
            }
            savepoint = Some(self.parse_ident()?);
        }
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::Rollback,
            savepoint,
            options: &[],
            pos,
        }))
    }

    fn parse_start_transaction(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // START
        if !(self.at_keyword(Keyword::Transaction) || self.at_ident("transaction")) {
            return Err(self.error(String::from("expected TRANSACTION after START")));
        }
        self.advance();
        let options = self.parse_statement_tail_words()?;
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::StartTransaction,
            savepoint: None,
            options,
            pos,
        }))
    }

    fn parse_savepoint(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // SAVEPOINT
        let savepoint = Some(self.parse_ident()?);
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::Savepoint,
            savepoint,
            options: &[],
            pos,
        }))
    }

    fn parse_release_savepoint(&mut self) -> Result<&'a TransactionStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // RELEASE
        if self.at_ident("savepoint") {
            self.advance();
        }
        let savepoint = Some(self.parse_ident()?);
        Ok(self.arena.alloc(TransactionStmt {
            action: TxAction::ReleaseSavepoint,
            savepoint,
            options: &[],
            pos,
        }))
    }

    /// Only `SET TRANSACTION …` is modeled; any other SET is unsupported.
    fn parse_set_stmt(&mut self) -> Result<Statement<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // SET
        if !(self.at_keyword(Keyword::Transaction) || self.at_ident("transaction")) {
            return Err(self.error(format!("unsupported SET statement {:?}", self.tok.raw)));
        }
        self.advance();
        let options = self.parse_statement_tail_words()?;
        Ok(Statement::Transaction(self.arena.alloc(TransactionStmt {
            action: TxAction::SetTransaction,
            savepoint: None,
            options,
            pos,
        })))
    }

    /// Collects the remaining tokens of a statement as raw words.
    fn parse_statement_tail_words(&mut self) -> Result<&'a [&'a str], ParseError> {
        let mut words = BumpVec::new_in(self.arena.bump());
        while !self.at(TokenKind::Semicolon) && !self.tok.is_eof() {
            words.push(self.advance().raw);
        }
        Ok(words.into_bump_slice())
    }

    fn parse_call(&mut self) -> Result<&'a CallStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // CALL
        let name = self.parse_qualified_name()?;
        let mut args: &'a [Expr<'a>] = &[];
        if self.eat_if(TokenKind::LParen) {
            if !self.at(TokenKind::RParen) {
                args = self.parse_expr_list()?;
            }
            self.eat(TokenKind::RParen)?;
        }
        Ok(self.arena.alloc(CallStmt { name, args, pos }))
    }

    fn parse_show(&mut self) -> Result<&'a ShowStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // SHOW
        let what = self.advance().raw;
        let mut like = None;
        let mut where_clause = None;
        if self.eat_if_keyword(Keyword::Like) {
            let tok = self.eat(TokenKind::String)?;
            like = Some(&*self.arena.alloc(Literal {
                raw: tok.raw,
                kind: tok.kind,
                pos: tok.pos,
            }));
        } else if self.eat_if_keyword(Keyword::Where) {
            where_clause = Some(self.parse_expr(PREC_LOWEST)?);
        }
        Ok(self.arena.alloc(ShowStmt {
            what,
            like,
            where_clause,
            pos,
        }))
    }

    fn parse_explain(&mut self) -> Result<&'a ExplainStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // EXPLAIN
        let stmt = self.parse_statement()?;
        Ok(self.arena.alloc(ExplainStmt { stmt, pos }))
    }

    fn parse_use(&mut self) -> Result<&'a UseStmt<'a>, ParseError> {
        let pos = self.tok.pos;
        self.advance(); // USE
        let database = self.parse_ident()?;
        Ok(self.arena.alloc(UseStmt { database, pos }))
    }
}
