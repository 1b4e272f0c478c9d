//! DDL statement parsing: CREATE / ALTER / DROP / TRUNCATE and the column,
//! data-type, and constraint grammar they share.

use bumpalo::collections::Vec as BumpVec;

use crate::ast::{
    AddColumnCmd, AlterCmd, AlterDatabaseStmt, AlterTableStmt, ColumnDef, ConstraintKind,
    CreateDatabaseStmt, CreateIndexStmt, CreateTableStmt, CreateViewStmt, DataType,
    DropDatabaseStmt, DropIndexStmt, DropTableStmt, ForeignKeyRef, GeneratedColumn,
    GenericDdlStmt, IndexColumn, Literal, ModifyColumnCmd, RefAction, Statement, TableConstraint,
    TableOption, TruncateStmt,
};
use crate::lexer::{Keyword, TokenKind};

use super::core::Parser;
use super::error::ParseError;
use super::pratt::PREC_LOWEST;

impl<'a> Parser<'a> {
    // ---- CREATE ----

    pub(super) fn parse_create(&mut self) -> Result<Statement<'a>, ParseError> {
        let pos = self.current().pos;
        self.advance(); // CREATE
        let mut or_replace = false;
        if self.at_keyword(Keyword::Or) {
            self.advance();
            self.eat_keyword(Keyword::Replace)?;
            or_replace = true;
        }
        let temporary = if self.at_ident("temporary") {
            self.advance();
            true
        } else {
            false
        };
        match self.current().kind {
            TokenKind::Keyword(Keyword::Database) => {
                Ok(Statement::CreateDatabase(self.parse_create_database(pos)?))
            }
            TokenKind::Keyword(Keyword::Table) => Ok(Statement::CreateTable(
                self.parse_create_table(pos, temporary)?,
            )),
            TokenKind::Keyword(Keyword::View) => Ok(Statement::CreateView(
                self.parse_create_view(pos, or_replace)?,
            )),
            TokenKind::Keyword(Keyword::Index | Keyword::Unique) => {
                Ok(Statement::CreateIndex(self.parse_create_index(pos)?))
            }
            TokenKind::Keyword(Keyword::Function | Keyword::Procedure | Keyword::Trigger) => Ok(
                Statement::GenericDdl(self.parse_generic_ddl(pos, "create")?),
            ),
            TokenKind::Ident if self.at_ident("schema") => {
                Ok(Statement::CreateDatabase(self.parse_create_database(pos)?))
            }
            _ => Ok(Statement::GenericDdl(
                self.parse_generic_ddl(pos, "create")?,
            )),
        }
    }

    fn parse_create_database(
        &mut self,
        pos: u32,
    ) -> Result<&'a CreateDatabaseStmt<'a>, ParseError> {
        self.advance(); // DATABASE | SCHEMA
        let mut if_not_exists = false;
        if self.at_keyword(Keyword::If) {
            self.advance();
            self.eat_keyword(Keyword::Not)?;
            self.eat_keyword(Keyword::Exists)?;
            if_not_exists = true;
        }
        let name = self.parse_ident()?;
        let options = self.parse_option_tail();
        Ok(self.arena.alloc(CreateDatabaseStmt {
            name,
            if_not_exists,
            options,
            pos,
        }))
    }

    /// Consumes `key [= value]` pairs until the statement ends.
    fn parse_option_tail(&mut self) -> &'a [TableOption<'a>] {
        let mut options = BumpVec::new_in(self.arena.bump());
        while !self.at(TokenKind::Semicolon) && !self.current().is_eof() {
            let key = self.advance().raw;
            if self.at(TokenKind::Semicolon) || self.current().is_eof() {
                options.push(TableOption { key, value: None });
                break;
            }
            self.eat_if(TokenKind::Eq);
            let value = self.advance().raw;
            options.push(TableOption {
                key,
                value: Some(value),
            });
        }
        options.into_bump_slice()
    }

    fn parse_create_table(
        &mut self,
        pos: u32,
        temporary: bool,
    ) -> Result<&'a CreateTableStmt<'a>, ParseError> {
        self.advance(); // TABLE
        let mut if_not_exists = false;
        if self.at_keyword(Keyword::If) {
            self.advance();
            self.eat_keyword(Keyword::Not)?;
            self.eat_keyword(Keyword::Exists)?;
            if_not_exists = true;
        }
        let table = self.parse_qualified_name()?;

        if self.eat_if_keyword(Keyword::Like) {
            let like = self.parse_qualified_name()?;
            return Ok(self.arena.alloc(CreateTableStmt {
                table,
                temporary,
                if_not_exists,
                columns: &[],
                constraints: &[],
                options: &[],
                select: None,
                like: Some(like),
                pos,
            }));
        }

        let mut columns: &'a [&'a ColumnDef<'a>] = &[];
        let mut constraints: &'a [&'a TableConstraint<'a>] = &[];
        if self.eat_if(TokenKind::LParen) {
            let (cols, cons) = self.parse_create_table_body()?;
            columns = cols;
            constraints = cons;
            self.eat(TokenKind::RParen)?;
        }

        // Trailing options: ENGINE=InnoDB, COMMENT='…', charset words, …
        let mut options = BumpVec::new_in(self.arena.bump());
        while matches!(
            self.current().kind,
            TokenKind::Ident | TokenKind::Keyword(Keyword::Engine | Keyword::Comment)
        ) {
            let key = self.advance().raw;
            self.eat_if(TokenKind::Eq);
            let value = self.advance().raw;
            options.push(TableOption {
                key,
                value: Some(value),
            });
        }

        let select = if self.eat_if_keyword(Keyword::As) {
            Some(self.parse_select()?)
        } else {
            None
        };

        Ok(self.arena.alloc(CreateTableStmt {
            table,
            temporary,
            if_not_exists,
            columns,
            constraints,
            options: options.into_bump_slice(),
            select,
            like: None,
            pos,
        }))
    }

    #[allow(clippy::type_complexity)]
    fn parse_create_table_body(
        &mut self,
    ) -> Result<(&'a [&'a ColumnDef<'a>], &'a [&'a TableConstraint<'a>]), ParseError> {
        let mut columns = BumpVec::new_in(self.arena.bump());
        let mut constraints = BumpVec::new_in(self.arena.bump());
        loop {
            if self.at(TokenKind::RParen) || self.current().is_eof() {
                break;
            }
            if self.is_constraint_start() {
                constraints.push(&*self.parse_table_constraint()?);
            } else {
                columns.push(&*self.parse_column_def()?);
            }
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok((columns.into_bump_slice(), constraints.into_bump_slice()))
    }

    pub(super) fn is_constraint_start(&self) -> bool {
        match self.current().kind {
            TokenKind::Keyword(
                Keyword::Primary
                | Keyword::Unique
                | Keyword::Index
                | Keyword::Key
                | Keyword::Foreign
                | Keyword::Check
                | Keyword::Constraint,
            ) => true,
            TokenKind::Ident => self.at_ident("fulltext") || self.at_ident("spatial"),
            _ => false,
        }
    }

    fn parse_column_def(&mut self) -> Result<&'a ColumnDef<'a>, ParseError> {
        let name = self.parse_ident()?;
        let pos = name.pos;
        let mut data_type = self.parse_data_type()?;

        let mut not_null = false;
        let mut default = None;
        let mut auto_increment = false;
        let mut primary_key = false;
        let mut unique = false;
        let mut comment = None;
        let mut references = None;
        let mut check = None;
        let mut generated = None;
        let mut on_update = None;

        loop {
            match self.current().kind {
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.eat_keyword(Keyword::Null)?;
                    not_null = true;
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    default = Some(self.parse_expr(PREC_LOWEST)?);
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.advance();
                    auto_increment = true;
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.eat_if_keyword(Keyword::Key);
                    primary_key = true;
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.advance();
                    self.eat_if_keyword(Keyword::Key);
                    unique = true;
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    let tok = self.eat(TokenKind::String)?;
                    comment = Some(&*self.arena.alloc(Literal {
                        raw: tok.raw,
                        kind: tok.kind,
                        pos: tok.pos,
                    }));
                }
                TokenKind::Keyword(Keyword::References) => {
                    let fk = self.parse_fk_ref()?;
                    references = Some(&*self.arena.alloc(fk));
                }
                TokenKind::Keyword(Keyword::Check) => {
                    self.advance();
                    self.eat(TokenKind::LParen)?;
                    check = Some(self.parse_expr(PREC_LOWEST)?);
                    self.eat(TokenKind::RParen)?;
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.advance();
                    data_type.collation = Some(self.advance().raw);
                }
                TokenKind::Keyword(Keyword::On)
                    if self.peek_token().kind == TokenKind::Keyword(Keyword::Update) =>
                {
                    self.advance();
                    self.advance();
                    on_update = Some(self.parse_expr(PREC_LOWEST)?);
                }
                TokenKind::Ident if self.at_ident("generated") => {
                    self.advance();
                    // GENERATED BY DEFAULT AS IDENTITY is the identity form
                    if self.at_keyword(Keyword::By) {
                        self.advance();
                        self.eat_keyword(Keyword::Default)?;
                        self.eat_keyword(Keyword::As)?;
                        if self.at_ident("identity") {
                            self.advance();
                        }
                        auto_increment = true;
                        continue;
                    }
                    if self.at_ident("always") {
                        self.advance();
                    }
                    self.eat_keyword(Keyword::As)?;
                    if self.at_ident("identity") {
                        self.advance();
                        auto_increment = true;
                        continue;
                    }
                    self.eat(TokenKind::LParen)?;
                    let expr = self.parse_expr(PREC_LOWEST)?;
                    self.eat(TokenKind::RParen)?;
                    let stored = if self.at_ident("stored") {
                        self.advance();
                        true
                    } else {
                        if self.at_ident("virtual") {
                            self.advance();
                        }
                        false
                    };
                    generated = Some(&*self.arena.alloc(GeneratedColumn { expr, stored }));
                }
                _ => break,
            }
        }

        Ok(self.arena.alloc(ColumnDef {
            name,
            data_type: self.arena.alloc(data_type),
            not_null,
            default,
            auto_increment,
            primary_key,
            unique,
            comment,
            references,
            check,
            generated,
            on_update,
            pos,
        }))
    }

    /// Parses a data type: name, optional `(precision[, scale])` or value
    /// list, then `UNSIGNED` / `ZEROFILL` / `CHARACTER SET` modifiers.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType<'a>, ParseError> {
        let tok = self.advance();
        let mut data_type = DataType {
            name: tok.raw,
            precision: None,
            scale: None,
            unsigned: false,
            zerofill: false,
            charset: None,
            collation: None,
            enum_values: &[],
            pos: tok.pos,
        };

        if self.eat_if(TokenKind::LParen) {
            if self.at(TokenKind::Int) {
                data_type.precision = self.advance().raw.parse().ok();
                if self.eat_if(TokenKind::Comma) && self.at(TokenKind::Int) {
                    data_type.scale = self.advance().raw.parse().ok();
                }
            }
            if self.at(TokenKind::String) {
                // ENUM('a','b') / SET('x','y')
                let mut values = BumpVec::new_in(self.arena.bump());
                while self.at(TokenKind::String) {
                    values.push(self.advance().raw);
                    if !self.eat_if(TokenKind::Comma) {
                        break;
                    }
                }
                data_type.enum_values = values.into_bump_slice();
            }
            self.eat(TokenKind::RParen)?;
        }

        loop {
            if self.at_ident("unsigned") {
                self.advance();
                data_type.unsigned = true;
            } else if self.at_ident("zerofill") {
                self.advance();
                data_type.zerofill = true;
            } else if self.at_keyword(Keyword::Character)
                && self.peek_token().kind == TokenKind::Keyword(Keyword::Set)
            {
                self.advance();
                self.advance();
                data_type.charset = Some(self.advance().raw);
            } else {
                break;
            }
        }
        Ok(data_type)
    }

    pub(super) fn parse_table_constraint(&mut self) -> Result<&'a TableConstraint<'a>, ParseError> {
        let pos = self.current().pos;
        let mut name = None;
        if self.eat_if_keyword(Keyword::Constraint) {
            if matches!(
                self.current().kind,
                TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
            ) {
                name = Some(self.parse_ident()?);
            }
        }

        let mut kind = ConstraintKind::Index;
        let mut columns: &'a [IndexColumn<'a>] = &[];
        let mut ref_table = None;
        let mut ref_columns = &[][..];
        let mut on_delete = RefAction::NoAction;
        let mut on_update = RefAction::NoAction;
        let mut check = None;

        match self.current().kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.eat_if_keyword(Keyword::Key);
                kind = ConstraintKind::PrimaryKey;
                columns = self.parse_index_columns()?;
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.eat_if_keyword(Keyword::Key);
                self.eat_if_keyword(Keyword::Index);
                kind = ConstraintKind::Unique;
                if matches!(
                    self.current().kind,
                    TokenKind::Ident | TokenKind::Backtick
                ) {
                    let index_name = self.parse_ident()?;
                    if name.is_none() {
                        name = Some(index_name);
                    }
                }
                columns = self.parse_index_columns()?;
            }
            TokenKind::Keyword(Keyword::Index | Keyword::Key) => {
                self.advance();
                if matches!(
                    self.current().kind,
                    TokenKind::Ident | TokenKind::Backtick
                ) {
                    name = Some(self.parse_ident()?);
                }
                columns = self.parse_index_columns()?;
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.eat_keyword(Keyword::Key)?;
                kind = ConstraintKind::ForeignKey;
                if matches!(
                    self.current().kind,
                    TokenKind::Ident | TokenKind::Backtick
                ) {
                    name = Some(self.parse_ident()?);
                }
                columns = self.parse_index_columns()?;
                let fk = self.parse_fk_ref()?;
                ref_table = Some(fk.table);
                ref_columns = fk.columns;
                on_delete = fk.on_delete;
                on_update = fk.on_update;
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                kind = ConstraintKind::Check;
                self.eat(TokenKind::LParen)?;
                check = Some(self.parse_expr(PREC_LOWEST)?);
                self.eat(TokenKind::RParen)?;
            }
            TokenKind::Ident if self.at_ident("fulltext") || self.at_ident("spatial") => {
                kind = if self.at_ident("fulltext") {
                    ConstraintKind::Fulltext
                } else {
                    ConstraintKind::Spatial
                };
                self.advance();
                self.eat_if_keyword(Keyword::Key);
                self.eat_if_keyword(Keyword::Index);
                if matches!(
                    self.current().kind,
                    TokenKind::Ident | TokenKind::Backtick
                ) {
                    name = Some(self.parse_ident()?);
                }
                columns = self.parse_index_columns()?;
            }
            _ => {
                return Err(self.error(format!(
                    "expected constraint type, got {:?}",
                    self.current().raw
                )));
            }
        }

        let algorithm = self.parse_index_algorithm();

        Ok(self.arena.alloc(TableConstraint {
            name,
            kind,
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
            check,
            algorithm,
            pos,
        }))
    }

    /// `USING BTREE` / `USING HASH` after an index column list.
    fn parse_index_algorithm(&mut self) -> Option<&'a str> {
        if self.at_keyword(Keyword::Using) && self.peek_token().kind == TokenKind::Ident {
            self.advance();
            Some(self.advance().raw)
        } else {
            None
        }
    }

    fn parse_index_columns(&mut self) -> Result<&'a [IndexColumn<'a>], ParseError> {
        self.eat(TokenKind::LParen)?;
        let mut columns = BumpVec::new_in(self.arena.bump());
        loop {
            let name = self.parse_ident()?;
            let mut length = None;
            if self.eat_if(TokenKind::LParen) {
                let tok = self.eat(TokenKind::Int)?;
                length = tok.raw.parse().ok();
                self.eat(TokenKind::RParen)?;
            }
            let desc = if self.eat_if_keyword(Keyword::Desc) {
                true
            } else {
                self.eat_if_keyword(Keyword::Asc);
                false
            };
            columns.push(IndexColumn { name, length, desc });
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        self.eat(TokenKind::RParen)?;
        Ok(columns.into_bump_slice())
    }

    fn parse_fk_ref(&mut self) -> Result<ForeignKeyRef<'a>, ParseError> {
        self.eat_keyword(Keyword::References)?;
        let table = self.parse_qualified_name()?;
        let mut columns = &[][..];
        if self.eat_if(TokenKind::LParen) {
            columns = self.parse_ident_list()?;
            self.eat(TokenKind::RParen)?;
        }
        let mut on_delete = RefAction::NoAction;
        let mut on_update = RefAction::NoAction;
        while self.at_keyword(Keyword::On) {
            self.advance();
            match self.current().kind {
                TokenKind::Keyword(Keyword::Delete) => {
                    self.advance();
                    on_delete = self.parse_ref_action();
                }
                TokenKind::Keyword(Keyword::Update) => {
                    self.advance();
                    on_update = self.parse_ref_action();
                }
                _ => break,
            }
        }
        Ok(ForeignKeyRef {
            table,
            columns,
            on_delete,
            on_update,
        })
    }

    fn parse_ref_action(&mut self) -> RefAction {
        match self.current().kind {
            TokenKind::Keyword(Keyword::Restrict) => {
                self.advance();
                RefAction::Restrict
            }
            TokenKind::Keyword(Keyword::Cascade) => {
                self.advance();
                RefAction::Cascade
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                RefAction::SetNull
            }
            TokenKind::Keyword(Keyword::Set) => {
                self.advance();
                if self.eat_if_keyword(Keyword::Null) {
                    RefAction::SetNull
                } else if self.at_keyword(Keyword::Default) {
                    self.advance();
                    RefAction::SetDefault
                } else {
                    RefAction::NoAction
                }
            }
            TokenKind::Keyword(Keyword::No) => {
                self.advance();
                self.advance(); // ACTION
                RefAction::NoAction
            }
            _ => RefAction::NoAction,
        }
    }

    fn parse_create_index(&mut self, pos: u32) -> Result<&'a CreateIndexStmt<'a>, ParseError> {
        let unique = self.eat_if_keyword(Keyword::Unique);
        self.eat_if_keyword(Keyword::Index);
        let name = self.parse_ident()?;
        self.eat_keyword(Keyword::On)?;
        let table = self.parse_qualified_name()?;
        let columns = self.parse_index_columns()?;
        let algorithm = self.parse_index_algorithm();
        Ok(self.arena.alloc(CreateIndexStmt {
            name,
            table,
            columns,
            unique,
            algorithm,
            pos,
        }))
    }

    fn parse_create_view(
        &mut self,
        pos: u32,
        or_replace: bool,
    ) -> Result<&'a CreateViewStmt<'a>, ParseError> {
        self.advance(); // VIEW
        let name = self.parse_qualified_name()?;
        let mut columns = &[][..];
        if self.eat_if(TokenKind::LParen) {
            columns = self.parse_ident_list()?;
            self.eat(TokenKind::RParen)?;
        }
        self.eat_keyword(Keyword::As)?;
        let select = self.parse_select()?;
        Ok(self.arena.alloc(CreateViewStmt {
            name,
            columns,
            select,
            or_replace,
            pos,
        }))
    }

    // ---- ALTER ----

    pub(super) fn parse_alter(&mut self) -> Result<Statement<'a>, ParseError> {
        let pos = self.current().pos;
        self.advance(); // ALTER
        if self.at_keyword(Keyword::Database) || self.at_ident("schema") {
            return Ok(Statement::AlterDatabase(self.parse_alter_database(pos)?));
        }
        if !self.eat_if_keyword(Keyword::Table) {
            return Ok(Statement::GenericDdl(self.parse_generic_ddl(pos, "alter")?));
        }
        let table = self.parse_qualified_name()?;
        let mut commands = BumpVec::new_in(self.arena.bump());
        loop {
            commands.push(self.parse_alter_cmd()?);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::AlterTable(self.arena.alloc(AlterTableStmt {
            table,
            commands: commands.into_bump_slice(),
            pos,
        })))
    }

    fn parse_alter_database(&mut self, pos: u32) -> Result<&'a AlterDatabaseStmt<'a>, ParseError> {
        self.advance(); // DATABASE | SCHEMA
        let name = self.parse_ident()?;
        let options = self.parse_option_tail();
        Ok(self.arena.alloc(AlterDatabaseStmt { name, options, pos }))
    }

    fn parse_alter_cmd(&mut self) -> Result<AlterCmd<'a>, ParseError> {
        match self.current().kind {
            TokenKind::Keyword(Keyword::Add) => {
                self.advance();
                self.eat_if_keyword(Keyword::Column);
                if self.is_constraint_start() {
                    let constraint = self.parse_table_constraint()?;
                    return Ok(AlterCmd::AddConstraint(constraint));
                }
                let column = self.parse_column_def()?;
                let (first, after) = self.parse_column_position()?;
                Ok(AlterCmd::AddColumn(self.arena.alloc(AddColumnCmd {
                    column,
                    first,
                    after,
                })))
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance();
                if self.eat_if_keyword(Keyword::Column)
                    || matches!(
                        self.current().kind,
                        TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
                    )
                {
                    let name = self.parse_ident()?;
                    return Ok(AlterCmd::DropColumn(self.arena.alloc(name)));
                }
                if self.eat_if_keyword(Keyword::Index) || self.eat_if_keyword(Keyword::Key) {
                    let name = self.parse_ident()?;
                    return Ok(AlterCmd::DropIndex(self.arena.alloc(name)));
                }
                Err(self.error(format!(
                    "unexpected ALTER TABLE command: {:?}",
                    self.current().raw
                )))
            }
            TokenKind::Ident if self.at_ident("modify") => {
                self.advance();
                self.eat_if_keyword(Keyword::Column);
                let column = self.parse_column_def()?;
                let (first, after) = self.parse_column_position()?;
                Ok(AlterCmd::ModifyColumn(self.arena.alloc(ModifyColumnCmd {
                    column,
                    first,
                    after,
                })))
            }
            TokenKind::Keyword(Keyword::Rename) => {
                self.advance();
                self.eat_if_keyword(Keyword::To);
                let new_name = self.parse_qualified_name()?;
                Ok(AlterCmd::RenameTable(self.arena.alloc(new_name)))
            }
            _ => Err(self.error(format!(
                "unexpected ALTER TABLE command: {:?}",
                self.current().raw
            ))),
        }
    }

    fn parse_column_position(
        &mut self,
    ) -> Result<(bool, Option<crate::ast::Ident<'a>>), ParseError> {
        if self.eat_if_keyword(Keyword::First) {
            Ok((true, None))
        } else if self.eat_if_keyword(Keyword::After) {
            Ok((false, Some(self.parse_ident()?)))
        } else {
            Ok((false, None))
        }
    }

    // ---- DROP ----

    pub(super) fn parse_drop(&mut self) -> Result<Statement<'a>, ParseError> {
        let pos = self.current().pos;
        self.advance(); // DROP
        match self.current().kind {
            TokenKind::Keyword(Keyword::Database) => {
                Ok(Statement::DropDatabase(self.parse_drop_database(pos)?))
            }
            TokenKind::Keyword(Keyword::Table) => {
                Ok(Statement::DropTable(self.parse_drop_table(pos, false)?))
            }
            TokenKind::Keyword(Keyword::View) => {
                Ok(Statement::DropTable(self.parse_drop_table(pos, true)?))
            }
            TokenKind::Keyword(Keyword::Index) => {
                Ok(Statement::DropIndex(self.parse_drop_index(pos)?))
            }
            TokenKind::Keyword(Keyword::Function | Keyword::Procedure | Keyword::Trigger) => {
                Ok(Statement::GenericDdl(self.parse_generic_ddl(pos, "drop")?))
            }
            TokenKind::Ident if self.at_ident("schema") => {
                Ok(Statement::DropDatabase(self.parse_drop_database(pos)?))
            }
            _ => Ok(Statement::GenericDdl(self.parse_generic_ddl(pos, "drop")?)),
        }
    }

    fn parse_drop_database(&mut self, pos: u32) -> Result<&'a DropDatabaseStmt<'a>, ParseError> {
        self.advance(); // DATABASE | SCHEMA
        let mut if_exists = false;
        if self.at_keyword(Keyword::If) {
            self.advance();
            self.eat_keyword(Keyword::Exists)?;
            if_exists = true;
        }
        let name = self.parse_ident()?;
        Ok(self.arena.alloc(DropDatabaseStmt {
            name,
            if_exists,
            pos,
        }))
    }

    fn parse_drop_table(
        &mut self,
        pos: u32,
        view: bool,
    ) -> Result<&'a DropTableStmt<'a>, ParseError> {
        self.advance(); // TABLE | VIEW
        let mut if_exists = false;
        if self.at_keyword(Keyword::If) {
            self.advance();
            self.eat_keyword(Keyword::Exists)?;
            if_exists = true;
        }
        let mut tables = BumpVec::new_in(self.arena.bump());
        loop {
            tables.push(self.parse_qualified_name()?);
            if !self.eat_if(TokenKind::Comma) {
                break;
            }
        }
        let cascade = self.eat_if_keyword(Keyword::Cascade);
        Ok(self.arena.alloc(DropTableStmt {
            tables: tables.into_bump_slice(),
            if_exists,
            cascade,
            view,
            pos,
        }))
    }

    fn parse_drop_index(&mut self, pos: u32) -> Result<&'a DropIndexStmt<'a>, ParseError> {
        self.advance(); // INDEX
        let mut if_exists = false;
        if self.at_keyword(Keyword::If) {
            self.advance();
            self.eat_keyword(Keyword::Exists)?;
            if_exists = true;
        }
        let name = self.parse_ident()?;
        let table = if self.eat_if_keyword(Keyword::On) {
            Some(self.parse_qualified_name()?)
        } else {
            None
        };
        Ok(self.arena.alloc(DropIndexStmt {
            name,
            table,
            if_exists,
            pos,
        }))
    }

    /// Fallback for DDL objects outside the modeled grammar: record the
    /// verb, the object word, and an optional name, then skip to the end of
    /// the statement.
    fn parse_generic_ddl(
        &mut self,
        pos: u32,
        verb: &'a str,
    ) -> Result<&'a GenericDdlStmt<'a>, ParseError> {
        let object = self.advance().raw;
        let mut name = None;
        if matches!(
            self.current().kind,
            TokenKind::Ident | TokenKind::Backtick | TokenKind::DoubleQuoted
        ) {
            name = Some(self.parse_ident()?);
        }
        while !self.at(TokenKind::Semicolon) && !self.current().is_eof() {
            self.advance();
        }
        Ok(self.arena.alloc(GenericDdlStmt {
            verb,
            object,
            name,
            pos,
        }))
    }

    // ---- TRUNCATE ----

    pub(super) fn parse_truncate(&mut self) -> Result<&'a TruncateStmt<'a>, ParseError> {
        let pos = self.current().pos;
        self.advance(); // TRUNCATE
        self.eat_if_keyword(Keyword::Table);
        let table = self.parse_qualified_name()?;
        Ok(self.arena.alloc(TruncateStmt { table, pos }))
    }
}
