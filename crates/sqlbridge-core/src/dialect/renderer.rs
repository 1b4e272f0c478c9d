//! The tree-directed SQL renderer.

use std::fmt::Write as _;

use crate::ast::{
    AlterCmd, AlterDatabaseStmt, AlterTableStmt, CallStmt, ColumnDef, ConstraintKind,
    CreateDatabaseStmt, CreateIndexStmt, CreateTableStmt, CreateViewStmt, DataType,
    DropDatabaseStmt, DropIndexStmt, DropTableStmt, Expr, GenericDdlStmt, Ident, IndexColumn,
    InsertStmt, JoinKind, OrderByItem, QualifiedName, RefAction, SelectStmt, ShowStmt, Statement,
    TableConstraint, TableRef, TransactionStmt, TruncateStmt, TxAction, UpdateStmt, UseStmt,
    WithClause,
};
use crate::lexer::{Keyword, TokenKind};

use super::{Dialect, RenderError};

/// Walks statements and emits dialect-shaped SQL. One renderer instance is
/// used per output so PostgreSQL parameter numbering runs across all
/// statements.
pub(super) struct Renderer {
    target: Dialect,
    strict: bool,
    param_index: usize,
}

impl Renderer {
    pub(super) fn new(target: Dialect, strict: bool) -> Self {
        Self {
            target,
            strict,
            param_index: 0,
        }
    }

    pub(super) fn render_statements(
        &mut self,
        statements: &[Statement<'_>],
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            out.push_str(&self.render_statement(*stmt)?);
        }
        Ok(out)
    }

    fn render_statement(&mut self, stmt: Statement<'_>) -> Result<String, RenderError> {
        match stmt {
            Statement::Select(s) => Ok(self.render_select(s)),
            Statement::Insert(s) => self.render_insert(s),
            Statement::Update(s) => Ok(self.render_update(s)),
            Statement::Delete(s) => Ok(self.render_delete(s)),
            Statement::CreateTable(s) => Ok(self.render_create_table(s)),
            Statement::CreateIndex(s) => Ok(self.render_create_index(s)),
            Statement::CreateView(s) => Ok(self.render_create_view(s)),
            Statement::CreateDatabase(s) => Ok(self.render_create_database(s)),
            Statement::AlterTable(s) => Ok(self.render_alter_table(s)),
            Statement::AlterDatabase(s) => Ok(self.render_alter_database(s)),
            Statement::DropTable(s) => Ok(self.render_drop_table(s)),
            Statement::DropIndex(s) => Ok(self.render_drop_index(s)),
            Statement::DropDatabase(s) => Ok(self.render_drop_database(s)),
            Statement::Truncate(s) => Ok(self.render_truncate(s)),
            Statement::Use(s) => Ok(self.render_use(s)),
            Statement::Show(s) => Ok(self.render_show(s)),
            Statement::Explain(s) => {
                let inner = self.render_statement(s.stmt)?;
                Ok(format!("EXPLAIN {inner}"))
            }
            Statement::Call(s) => Ok(self.render_call(s)),
            Statement::Transaction(s) => Ok(self.render_transaction(s)),
            Statement::GenericDdl(s) => Ok(self.render_generic_ddl(s)),
        }
    }

    // ---- DQL / DML ----

    fn render_with(&mut self, with: Option<&WithClause<'_>>) -> String {
        let Some(with) = with else {
            return String::new();
        };
        let mut out = String::from("WITH ");
        if with.recursive {
            out.push_str("RECURSIVE ");
        }
        for (i, cte) in with.ctes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_ident(&cte.name));
            if !cte.columns.is_empty() {
                out.push_str(" (");
                out.push_str(&self.render_ident_list(cte.columns));
                out.push(')');
            }
            out.push_str(" AS (");
            out.push_str(&self.render_select(cte.select));
            out.push(')');
        }
        out.push(' ');
        out
    }

    fn render_select(&mut self, select: &SelectStmt<'_>) -> String {
        let mut out = self.render_select_core(select);
        // Set-operation chains are flattened left-leaning; follow the chain
        // here rather than in the core so no link renders twice.
        let mut cur = select.set_op;
        while let Some(op) = cur {
            out.push(' ');
            out.push_str(op.op.as_str());
            if op.all {
                out.push_str(" ALL");
            }
            out.push(' ');
            out.push_str(&self.render_select_core(op.right));
            cur = op.right.set_op;
        }
        out
    }

    fn render_select_core(&mut self, select: &SelectStmt<'_>) -> String {
        let mut out = self.render_with(select.with);
        out.push_str("SELECT ");
        if select.distinct {
            out.push_str("DISTINCT ");
        }
        for (i, col) in select.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if col.star {
                out.push('*');
            } else {
                out.push_str(&self.render_expr(col.expr));
            }
            if let Some(alias) = &col.alias {
                out.push_str(" AS ");
                out.push_str(&self.render_ident(alias));
            }
        }
        if !select.from.is_empty() {
            out.push_str(" FROM ");
            for (i, table_ref) in select.from.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.render_table_ref(*table_ref));
            }
        }
        if let Some(where_clause) = select.where_clause {
            out.push_str(" WHERE ");
            out.push_str(&self.render_expr(where_clause));
        }
        if !select.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            for (i, expr) in select.group_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.render_expr(*expr));
            }
        }
        if let Some(having) = select.having {
            out.push_str(" HAVING ");
            out.push_str(&self.render_expr(having));
        }
        if !select.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            for (i, item) in select.order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.render_order_item(item));
            }
        }
        if let Some(limit) = select.limit {
            out.push_str(" LIMIT ");
            out.push_str(&self.render_expr(limit.count));
            if let Some(offset) = limit.offset {
                out.push_str(" OFFSET ");
                out.push_str(&self.render_expr(offset));
            }
        }
        out
    }

    fn render_order_item(&mut self, item: &OrderByItem<'_>) -> String {
        let mut out = self.render_expr(item.expr);
        out.push_str(if item.desc { " DESC" } else { " ASC" });
        // MySQL has no NULLS FIRST/LAST clause; drop it there.
        if self.target != Dialect::MySql {
            match item.nulls_first {
                Some(true) => out.push_str(" NULLS FIRST"),
                Some(false) => out.push_str(" NULLS LAST"),
                None => {}
            }
        }
        out
    }

    fn render_insert(&mut self, insert: &InsertStmt<'_>) -> Result<String, RenderError> {
        let mut out = self.render_with(insert.with);
        if insert.replace {
            out.push_str("REPLACE INTO ");
        } else {
            out.push_str("INSERT ");
            if insert.ignore && self.target == Dialect::MySql {
                out.push_str("IGNORE ");
            }
            out.push_str("INTO ");
        }
        out.push_str(&self.render_qualified(&insert.table));
        if !insert.columns.is_empty() {
            out.push_str(" (");
            out.push_str(&self.render_ident_list(insert.columns));
            out.push(')');
        }
        if !insert.rows.is_empty() {
            out.push_str(" VALUES ");
            for (i, row) in insert.rows.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push('(');
                for (j, expr) in row.iter().enumerate() {
                    if j > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&self.render_expr(*expr));
                }
                out.push(')');
            }
        } else if let Some(select) = insert.select {
            out.push(' ');
            out.push_str(&self.render_select(select));
        }

        match self.target {
            Dialect::MySql => {
                // Prefer the original duplicate-key assignments; fall back to
                // an ON CONFLICT update list parsed from another dialect.
                let assignments = if insert.on_dup_key.is_empty() {
                    insert.on_conflict_update
                } else {
                    insert.on_dup_key
                };
                if !assignments.is_empty() {
                    out.push_str(" ON DUPLICATE KEY UPDATE ");
                    out.push_str(&self.render_assignments(assignments));
                }
            }
            Dialect::Postgres | Dialect::Sqlite => {
                let mut target = insert.on_conflict_target;
                let assignments = if insert.on_conflict_update.is_empty() {
                    insert.on_dup_key
                } else {
                    insert.on_conflict_update
                };
                let do_nothing = insert.on_conflict_do_nothing;
                if !assignments.is_empty() || do_nothing {
                    if target.is_empty() && !assignments.is_empty() {
                        // Synthesize a conflict target from the insert column
                        // list when translating ON DUPLICATE KEY.
                        if !insert.columns.is_empty() {
                            target = &insert.columns[..1];
                        } else if self.strict {
                            return Err(RenderError::MissingConflictTarget);
                        }
                    }
                    out.push_str(" ON CONFLICT");
                    if !target.is_empty() {
                        out.push_str(" (");
                        out.push_str(&self.render_ident_list(target));
                        out.push(')');
                    }
                    if do_nothing && assignments.is_empty() {
                        out.push_str(" DO NOTHING");
                    } else {
                        out.push_str(" DO UPDATE SET ");
                        out.push_str(&self.render_assignments(assignments));
                    }
                }
            }
        }
        Ok(out)
    }

    fn render_assignments(&mut self, assignments: &[crate::ast::Assignment<'_>]) -> String {
        let mut out = String::new();
        for (i, assignment) in assignments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_ident(&assignment.column));
            out.push_str(" = ");
            out.push_str(&self.render_expr(assignment.value));
        }
        out
    }

    fn render_update(&mut self, update: &UpdateStmt<'_>) -> String {
        let mut out = self.render_with(update.with);
        out.push_str("UPDATE ");
        for (i, table_ref) in update.tables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_table_ref(*table_ref));
        }
        out.push_str(" SET ");
        out.push_str(&self.render_assignments(update.set));
        if let Some(where_clause) = update.where_clause {
            out.push_str(" WHERE ");
            out.push_str(&self.render_expr(where_clause));
        }
        out.push_str(&self.render_dml_tail(update.order_by, update.limit));
        out
    }

    fn render_delete(&mut self, delete: &crate::ast::DeleteStmt<'_>) -> String {
        let mut out = self.render_with(delete.with);
        out.push_str("DELETE FROM ");
        for (i, table_ref) in delete.from.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_table_ref(*table_ref));
        }
        if let Some(where_clause) = delete.where_clause {
            out.push_str(" WHERE ");
            out.push_str(&self.render_expr(where_clause));
        }
        out.push_str(&self.render_dml_tail(delete.order_by, delete.limit));
        out
    }

    /// `ORDER BY … LIMIT …` on UPDATE/DELETE; ascending keys render bare.
    fn render_dml_tail(
        &mut self,
        order_by: &[OrderByItem<'_>],
        limit: Option<&crate::ast::LimitClause<'_>>,
    ) -> String {
        let mut out = String::new();
        if !order_by.is_empty() {
            out.push_str(" ORDER BY ");
            for (i, item) in order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.render_expr(item.expr));
                if item.desc {
                    out.push_str(" DESC");
                }
            }
        }
        if let Some(limit) = limit {
            out.push_str(" LIMIT ");
            out.push_str(&self.render_expr(limit.count));
        }
        out
    }

    // ---- DDL ----

    fn render_create_table(&mut self, stmt: &CreateTableStmt<'_>) -> String {
        let mut out = String::from("CREATE ");
        if stmt.temporary {
            out.push_str("TEMPORARY ");
        }
        out.push_str("TABLE ");
        if stmt.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&self.render_qualified(&stmt.table));
        if let Some(like) = &stmt.like {
            out.push_str(" LIKE ");
            out.push_str(&self.render_qualified(like));
            return out;
        }
        if !stmt.columns.is_empty() || !stmt.constraints.is_empty() {
            out.push_str(" (");
            let mut wrote = false;
            for column in stmt.columns {
                if wrote {
                    out.push_str(", ");
                }
                wrote = true;
                out.push_str(&self.render_column_def(column));
            }
            for constraint in stmt.constraints {
                if wrote {
                    out.push_str(", ");
                }
                wrote = true;
                out.push_str(&self.render_constraint(constraint));
            }
            out.push(')');
        }
        for option in stmt.options {
            out.push(' ');
            out.push_str(option.key);
            if let Some(value) = option.value {
                out.push('=');
                out.push_str(value);
            }
        }
        if let Some(select) = stmt.select {
            out.push_str(" AS ");
            out.push_str(&self.render_select(select));
        }
        out
    }

    fn render_column_def(&mut self, column: &ColumnDef<'_>) -> String {
        let mut out = self.render_ident(&column.name);
        out.push(' ');
        out.push_str(&self.render_data_type(column.data_type));
        if column.not_null {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = column.default {
            out.push_str(" DEFAULT ");
            out.push_str(&self.render_expr(default));
        }
        if column.auto_increment {
            if self.target == Dialect::Postgres {
                out.push_str(" GENERATED BY DEFAULT AS IDENTITY");
            } else {
                out.push_str(" AUTO_INCREMENT");
            }
        }
        if column.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if column.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(comment) = column.comment {
            out.push_str(" COMMENT ");
            out.push_str(comment.raw);
        }
        if let Some(fk) = column.references {
            out.push_str(" REFERENCES ");
            out.push_str(&self.render_qualified(&fk.table));
            if !fk.columns.is_empty() {
                out.push_str(" (");
                out.push_str(&self.render_ident_list(fk.columns));
                out.push(')');
            }
            out.push_str(&render_ref_actions(fk.on_delete, fk.on_update));
        }
        if let Some(check) = column.check {
            out.push_str(" CHECK (");
            out.push_str(&self.render_expr(check));
            out.push(')');
        }
        if let Some(generated) = column.generated {
            out.push_str(" GENERATED ALWAYS AS (");
            out.push_str(&self.render_expr(generated.expr));
            out.push(')');
            out.push_str(if generated.stored { " STORED" } else { " VIRTUAL" });
        }
        if let Some(on_update) = column.on_update {
            out.push_str(" ON UPDATE ");
            out.push_str(&self.render_expr(on_update));
        }
        out
    }

    fn render_data_type(&mut self, data_type: &DataType<'_>) -> String {
        let mut name = data_type.name;
        if name.eq_ignore_ascii_case("jsonb") {
            match self.target {
                Dialect::MySql => name = "JSON",
                Dialect::Sqlite => name = "TEXT",
                Dialect::Postgres => {}
            }
        } else if name.eq_ignore_ascii_case("json") && self.target == Dialect::Sqlite {
            name = "TEXT";
        }
        let mut out = String::from(name);
        if !data_type.enum_values.is_empty() {
            out.push('(');
            for (i, value) in data_type.enum_values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(value);
            }
            out.push(')');
        } else if let Some(precision) = data_type.precision {
            let _ = write!(out, "({precision}");
            if let Some(scale) = data_type.scale {
                let _ = write!(out, ",{scale}");
            }
            out.push(')');
        }
        if self.target == Dialect::MySql {
            if data_type.unsigned {
                out.push_str(" UNSIGNED");
            }
            if data_type.zerofill {
                out.push_str(" ZEROFILL");
            }
            if let Some(charset) = data_type.charset {
                out.push_str(" CHARACTER SET ");
                out.push_str(charset);
            }
            if let Some(collation) = data_type.collation {
                out.push_str(" COLLATE ");
                out.push_str(collation);
            }
        }
        out
    }

    fn render_constraint(&mut self, constraint: &TableConstraint<'_>) -> String {
        let mut out = String::new();
        if let Some(name) = &constraint.name {
            out.push_str("CONSTRAINT ");
            out.push_str(&self.render_ident(name));
            out.push(' ');
        }
        out.push_str(match constraint.kind {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Index => "INDEX",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::Fulltext => "FULLTEXT",
            ConstraintKind::Spatial => "SPATIAL",
        });
        if let Some(check) = constraint.check {
            out.push_str(" (");
            out.push_str(&self.render_expr(check));
            out.push(')');
            return out;
        }
        if !constraint.columns.is_empty() {
            out.push_str(" (");
            out.push_str(&self.render_index_columns(constraint.columns));
            out.push(')');
        }
        if let Some(ref_table) = &constraint.ref_table {
            out.push_str(" REFERENCES ");
            out.push_str(&self.render_qualified(ref_table));
            if !constraint.ref_columns.is_empty() {
                out.push_str(" (");
                out.push_str(&self.render_ident_list(constraint.ref_columns));
                out.push(')');
            }
            out.push_str(&render_ref_actions(
                constraint.on_delete,
                constraint.on_update,
            ));
        }
        if let Some(algorithm) = constraint.algorithm {
            out.push_str(" USING ");
            out.push_str(algorithm);
        }
        out
    }

    fn render_index_columns(&mut self, columns: &[IndexColumn<'_>]) -> String {
        let mut out = String::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_ident(&column.name));
            if let Some(length) = column.length {
                let _ = write!(out, "({length})");
            }
            if column.desc {
                out.push_str(" DESC");
            }
        }
        out
    }

    fn render_alter_table(&mut self, stmt: &AlterTableStmt<'_>) -> String {
        let mut out = String::from("ALTER TABLE ");
        out.push_str(&self.render_qualified(&stmt.table));
        for (i, command) in stmt.commands.iter().enumerate() {
            out.push_str(if i == 0 { " " } else { ", " });
            out.push_str(&self.render_alter_cmd(*command));
        }
        out
    }

    fn render_alter_cmd(&mut self, command: AlterCmd<'_>) -> String {
        match command {
            AlterCmd::AddColumn(cmd) => {
                let mut out = String::from("ADD COLUMN ");
                out.push_str(&self.render_column_def(cmd.column));
                if cmd.first {
                    out.push_str(" FIRST");
                }
                if let Some(after) = &cmd.after {
                    out.push_str(" AFTER ");
                    out.push_str(&self.render_ident(after));
                }
                out
            }
            AlterCmd::AddConstraint(constraint) => {
                format!("ADD {}", self.render_constraint(constraint))
            }
            AlterCmd::DropColumn(name) => format!("DROP COLUMN {}", self.render_ident(name)),
            AlterCmd::DropIndex(name) => format!("DROP INDEX {}", self.render_ident(name)),
            AlterCmd::ModifyColumn(cmd) => {
                let mut out = String::from("MODIFY COLUMN ");
                out.push_str(&self.render_column_def(cmd.column));
                if cmd.first {
                    out.push_str(" FIRST");
                }
                if let Some(after) = &cmd.after {
                    out.push_str(" AFTER ");
                    out.push_str(&self.render_ident(after));
                }
                out
            }
            AlterCmd::RenameTable(new_name) => {
                format!("RENAME TO {}", self.render_qualified(new_name))
            }
        }
    }

    fn render_drop_table(&mut self, stmt: &DropTableStmt<'_>) -> String {
        let mut out = String::from(if stmt.view { "DROP VIEW " } else { "DROP TABLE " });
        if stmt.if_exists {
            out.push_str("IF EXISTS ");
        }
        for (i, table) in stmt.tables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_qualified(table));
        }
        if stmt.cascade {
            out.push_str(" CASCADE");
        }
        out
    }

    fn render_create_index(&mut self, stmt: &CreateIndexStmt<'_>) -> String {
        let mut out = String::from("CREATE ");
        if stmt.unique {
            out.push_str("UNIQUE ");
        }
        out.push_str("INDEX ");
        out.push_str(&self.render_ident(&stmt.name));
        out.push_str(" ON ");
        out.push_str(&self.render_qualified(&stmt.table));
        out.push_str(" (");
        out.push_str(&self.render_index_columns(stmt.columns));
        out.push(')');
        if let Some(algorithm) = stmt.algorithm {
            out.push_str(" USING ");
            out.push_str(algorithm);
        }
        out
    }

    /// MySQL drops an index relative to its table; PostgreSQL and SQLite
    /// address it by name alone.
    fn render_drop_index(&mut self, stmt: &DropIndexStmt<'_>) -> String {
        if matches!(self.target, Dialect::Postgres | Dialect::Sqlite) {
            let mut out = String::from("DROP INDEX ");
            if stmt.if_exists {
                out.push_str("IF EXISTS ");
            }
            out.push_str(&self.render_ident(&stmt.name));
            return out;
        }
        let mut out = format!("DROP INDEX {}", self.render_ident(&stmt.name));
        if let Some(table) = &stmt.table {
            out.push_str(" ON ");
            out.push_str(&self.render_qualified(table));
        }
        out
    }

    fn render_create_view(&mut self, stmt: &CreateViewStmt<'_>) -> String {
        let mut out = String::from("CREATE ");
        if stmt.or_replace {
            out.push_str("OR REPLACE ");
        }
        out.push_str("VIEW ");
        out.push_str(&self.render_qualified(&stmt.name));
        if !stmt.columns.is_empty() {
            out.push_str(" (");
            out.push_str(&self.render_ident_list(stmt.columns));
            out.push(')');
        }
        out.push_str(" AS ");
        out.push_str(&self.render_select(stmt.select));
        out
    }

    fn render_create_database(&mut self, stmt: &CreateDatabaseStmt<'_>) -> String {
        let mut out = String::from("CREATE DATABASE ");
        if stmt.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&self.render_ident(&stmt.name));
        out.push_str(&render_options(stmt.options));
        out
    }

    fn render_alter_database(&mut self, stmt: &AlterDatabaseStmt<'_>) -> String {
        let mut out = String::from("ALTER DATABASE ");
        out.push_str(&self.render_ident(&stmt.name));
        out.push_str(&render_options(stmt.options));
        out
    }

    fn render_drop_database(&mut self, stmt: &DropDatabaseStmt<'_>) -> String {
        let mut out = String::from("DROP DATABASE ");
        if stmt.if_exists {
            out.push_str("IF EXISTS ");
        }
        out.push_str(&self.render_ident(&stmt.name));
        out
    }

    fn render_truncate(&mut self, stmt: &TruncateStmt<'_>) -> String {
        format!("TRUNCATE TABLE {}", self.render_qualified(&stmt.table))
    }

    fn render_use(&mut self, stmt: &UseStmt<'_>) -> String {
        format!("USE {}", self.render_ident(&stmt.database))
    }

    fn render_show(&mut self, stmt: &ShowStmt<'_>) -> String {
        let mut out = format!("SHOW {}", stmt.what);
        if let Some(like) = stmt.like {
            out.push_str(" LIKE ");
            out.push_str(like.raw);
        }
        if let Some(where_clause) = stmt.where_clause {
            out.push_str(" WHERE ");
            out.push_str(&self.render_expr(where_clause));
        }
        out
    }

    fn render_call(&mut self, stmt: &CallStmt<'_>) -> String {
        let mut out = format!("CALL {}(", self.render_qualified(&stmt.name));
        for (i, arg) in stmt.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_expr(*arg));
        }
        out.push(')');
        out
    }

    fn render_transaction(&mut self, stmt: &TransactionStmt<'_>) -> String {
        match stmt.action {
            TxAction::Begin => String::from("BEGIN"),
            TxAction::Commit => String::from("COMMIT"),
            TxAction::Rollback => match &stmt.savepoint {
                None => String::from("ROLLBACK"),
                Some(savepoint) => {
                    format!("ROLLBACK TO SAVEPOINT {}", self.render_ident(savepoint))
                }
            },
            TxAction::StartTransaction => {
                let mut out = String::from("START TRANSACTION");
                for option in stmt.options {
                    out.push(' ');
                    out.push_str(option);
                }
                out
            }
            TxAction::Savepoint => match &stmt.savepoint {
                Some(savepoint) => format!("SAVEPOINT {}", self.render_ident(savepoint)),
                None => String::from("SAVEPOINT"),
            },
            TxAction::ReleaseSavepoint => match &stmt.savepoint {
                Some(savepoint) => {
                    format!("RELEASE SAVEPOINT {}", self.render_ident(savepoint))
                }
                None => String::from("RELEASE SAVEPOINT"),
            },
            TxAction::SetTransaction => {
                let mut out = String::from("SET TRANSACTION");
                for option in stmt.options {
                    out.push(' ');
                    out.push_str(option);
                }
                out
            }
        }
    }

    fn render_generic_ddl(&mut self, stmt: &GenericDdlStmt<'_>) -> String {
        let mut out = format!(
            "{} {}",
            stmt.verb.to_ascii_uppercase(),
            stmt.object.to_ascii_uppercase()
        );
        if let Some(name) = &stmt.name {
            out.push(' ');
            out.push_str(&self.render_ident(name));
        }
        out
    }

    // ---- table references and expressions ----

    fn render_table_ref(&mut self, table_ref: TableRef<'_>) -> String {
        match table_ref {
            TableRef::Table(table) => {
                let mut out = self.render_qualified(&table.name);
                if let Some(alias) = &table.alias {
                    out.push(' ');
                    out.push_str(&self.render_ident(alias));
                }
                out
            }
            TableRef::Subquery(subquery) => {
                let mut out = format!("({})", self.render_select(subquery.subquery));
                if let Some(alias) = &subquery.alias {
                    out.push(' ');
                    out.push_str(&self.render_ident(alias));
                }
                out
            }
            TableRef::Join(join) => {
                let mut out = self.render_table_ref(join.left);
                out.push_str(match join.kind {
                    JoinKind::Inner => " JOIN ",
                    JoinKind::Left => " LEFT JOIN ",
                    JoinKind::Right => " RIGHT JOIN ",
                    JoinKind::Full => " FULL JOIN ",
                    JoinKind::Cross => " CROSS JOIN ",
                    JoinKind::Natural => " NATURAL JOIN ",
                });
                out.push_str(&self.render_table_ref(join.right));
                if let Some(on) = join.on {
                    out.push_str(" ON ");
                    out.push_str(&self.render_expr(on));
                }
                if !join.using.is_empty() {
                    out.push_str(" USING (");
                    out.push_str(&self.render_ident_list(join.using));
                    out.push(')');
                }
                out
            }
        }
    }

    fn render_expr(&mut self, expr: Expr<'_>) -> String {
        match expr {
            Expr::Ident(ident) => self.render_ident(ident),
            Expr::Qualified(name) => self.render_qualified(name),
            Expr::Star(_) => String::from("*"),
            Expr::Literal(literal) => String::from(literal.raw),
            Expr::Null(_) => String::from("NULL"),
            Expr::Param(_) => self.render_param(),
            Expr::Binary(binary) => format!(
                "({} {} {})",
                self.render_expr(binary.left),
                op_text(binary.op),
                self.render_expr(binary.right)
            ),
            Expr::Unary(unary) => {
                format!("({} {})", op_text(unary.op), self.render_expr(unary.expr))
            }
            Expr::Function(call) => {
                let mut out = self.render_function_name(&call.name);
                out.push('(');
                if call.star {
                    out.push('*');
                } else {
                    if call.distinct {
                        out.push_str("DISTINCT ");
                    }
                    for (i, arg) in call.args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(&self.render_expr(*arg));
                    }
                }
                out.push(')');
                out
            }
            Expr::Case(case) => {
                let mut out = String::from("CASE");
                if let Some(operand) = case.operand {
                    out.push(' ');
                    out.push_str(&self.render_expr(operand));
                }
                for when in case.whens {
                    out.push_str(" WHEN ");
                    out.push_str(&self.render_expr(when.cond));
                    out.push_str(" THEN ");
                    out.push_str(&self.render_expr(when.result));
                }
                if let Some(else_expr) = case.else_expr {
                    out.push_str(" ELSE ");
                    out.push_str(&self.render_expr(else_expr));
                }
                out.push_str(" END");
                out
            }
            Expr::Between(between) => {
                let mut out = self.render_expr(between.expr);
                if between.negated {
                    out.push_str(" NOT");
                }
                out.push_str(" BETWEEN ");
                out.push_str(&self.render_expr(between.low));
                out.push_str(" AND ");
                out.push_str(&self.render_expr(between.high));
                out
            }
            Expr::In(in_expr) => {
                let mut out = self.render_expr(in_expr.expr);
                if in_expr.negated {
                    out.push_str(" NOT");
                }
                out.push_str(" IN (");
                if let Some(subquery) = in_expr.subquery {
                    out.push_str(&self.render_select(subquery));
                } else {
                    for (i, item) in in_expr.list.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(&self.render_expr(*item));
                    }
                }
                out.push(')');
                out
            }
            Expr::Like(like) => {
                let mut out = self.render_expr(like.expr);
                if like.negated {
                    out.push_str(" NOT");
                }
                out.push_str(" LIKE ");
                out.push_str(&self.render_expr(like.pattern));
                if let Some(escape) = like.escape {
                    out.push_str(" ESCAPE ");
                    out.push_str(&self.render_expr(escape));
                }
                out
            }
            Expr::IsNull(is_null) => {
                let mut out = self.render_expr(is_null.expr);
                out.push_str(if is_null.negated {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                });
                out
            }
            Expr::Exists(exists) => {
                let prefix = if exists.negated { "NOT " } else { "" };
                format!("{prefix}EXISTS ({})", self.render_select(exists.subquery))
            }
            Expr::Subquery(subquery) => {
                format!("({})", self.render_select(subquery.subquery))
            }
            Expr::Cast(cast) => {
                format!(
                    "CAST({} AS {})",
                    self.render_expr(cast.expr),
                    self.render_data_type(cast.data_type)
                )
            }
            Expr::Interval(interval) => {
                format!("INTERVAL {} {}", self.render_expr(interval.expr), interval.unit)
            }
            Expr::Select(select) => format!("({})", self.render_select(select)),
        }
    }

    /// Single-part function names are uppercased and the null-coalescing
    /// pair is swapped per dialect: `IFNULL` for MySQL, `COALESCE` for
    /// PostgreSQL and SQLite.
    fn render_function_name(&mut self, name: &QualifiedName<'_>) -> String {
        if name.parts.len() == 1 {
            let fn_name = name.parts[0].text.to_ascii_uppercase();
            return match self.target {
                Dialect::Postgres | Dialect::Sqlite if fn_name == "IFNULL" => {
                    String::from("COALESCE")
                }
                Dialect::MySql if fn_name == "COALESCE" => String::from("IFNULL"),
                _ => fn_name,
            };
        }
        self.render_qualified(name)
    }

    fn render_param(&mut self) -> String {
        if self.target == Dialect::Postgres {
            self.param_index += 1;
            format!("${}", self.param_index)
        } else {
            String::from("?")
        }
    }

    fn render_qualified(&mut self, name: &QualifiedName<'_>) -> String {
        let mut out = String::new();
        for (i, part) in name.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&self.render_ident(part));
        }
        out
    }

    fn render_ident_list(&mut self, idents: &[Ident<'_>]) -> String {
        let mut out = String::new();
        for (i, ident) in idents.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_ident(ident));
        }
        out
    }

    /// MySQL quotes with backticks (inner backticks doubled); PostgreSQL and
    /// SQLite with double quotes. A bare `*` passes through unquoted.
    fn render_ident(&mut self, ident: &Ident<'_>) -> String {
        let name = ident.text;
        if name == "*" {
            return String::from("*");
        }
        match self.target {
            Dialect::MySql => format!("`{}`", name.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => {
                format!("\"{}\"", name.replace('"', "\"\""))
            }
        }
    }
}

fn render_ref_actions(on_delete: RefAction, on_update: RefAction) -> String {
    let mut out = String::new();
    if on_delete != RefAction::NoAction {
        out.push_str(" ON DELETE ");
        out.push_str(on_delete.as_str());
    }
    if on_update != RefAction::NoAction {
        out.push_str(" ON UPDATE ");
        out.push_str(on_update.as_str());
    }
    out
}

fn render_options(options: &[crate::ast::TableOption<'_>]) -> String {
    let mut out = String::new();
    for option in options {
        out.push(' ');
        out.push_str(option.key);
        if let Some(value) = option.value {
            out.push('=');
            out.push_str(value);
        }
    }
    out
}

/// Operator spelling for rendered output. The double forms normalize:
/// `&&` renders as `AND`.
fn op_text(op: TokenKind) -> &'static str {
    match op {
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => "AND",
        TokenKind::Keyword(Keyword::Or) => "OR",
        TokenKind::Keyword(Keyword::Not) => "NOT",
        other => other.as_str(),
    }
}
